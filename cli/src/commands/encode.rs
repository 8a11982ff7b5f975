//! Encode command implementation.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;

/// Encode command arguments.
#[derive(Parser)]
pub struct EncodeCommand {
    /// Directory holding the trained model
    #[arg(short, long)]
    pub tokenizer: PathBuf,

    /// Text to encode ("-" reads stdin)
    #[arg(short, long)]
    pub input: String,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(cmd: EncodeCommand) -> Result<()> {
    let tokenizer = super::load_tokenizer(&cmd.tokenizer)?;

    let input_text = if cmd.input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        buffer
    } else {
        cmd.input
    };

    let encoding = tokenizer.encode(&input_text)?;
    let output = encoding
        .ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    match &cmd.output {
        Some(path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Encoded {} tokens to {}", encoding.len(), path.display());
        }
        None => println!("{}", output),
    }

    Ok(())
}
