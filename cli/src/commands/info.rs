//! Info command implementation.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Info command arguments.
#[derive(Parser)]
pub struct InfoCommand {
    /// Directory holding the trained model
    #[arg(short, long)]
    pub tokenizer: PathBuf,

    /// Maximum number of merges to list
    #[arg(long, default_value_t = 20)]
    pub limit: usize,
}

pub fn run(cmd: InfoCommand) -> Result<()> {
    let tokenizer = super::load_tokenizer(&cmd.tokenizer)?;
    let (Some(vocab), Some(merges)) = (tokenizer.vocab(), tokenizer.merges()) else {
        anyhow::bail!("{} holds no trained model", cmd.tokenizer.display());
    };

    println!("Vocab size: {}", vocab.len());
    println!("Merges: {}", merges.len());

    for rule in merges.iter().take(cmd.limit) {
        let render = |id| vocab.render(id).unwrap_or_default();
        println!(
            "  {:>6} = ({}, {})  {:?} + {:?} -> {:?}",
            rule.new_token_id,
            rule.pair.0,
            rule.pair.1,
            render(rule.pair.0),
            render(rule.pair.1),
            render(rule.new_token_id)
        );
    }
    if merges.len() > cmd.limit {
        println!("  ... {} more", merges.len() - cmd.limit);
    }

    Ok(())
}
