//! Decode command implementation.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Decode command arguments.
#[derive(Parser)]
pub struct DecodeCommand {
    /// Directory holding the trained model
    #[arg(short, long)]
    pub tokenizer: PathBuf,

    /// Token IDs to decode (comma-separated)
    #[arg(long)]
    pub tokens: String,
}

/// Parse `"1, 2,3"` into token IDs. An empty string is an empty sequence.
fn parse_ids(tokens: &str) -> Result<Vec<u32>> {
    tokens
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .with_context(|| format!("invalid token id '{}'", s))
        })
        .collect()
}

pub fn run(cmd: DecodeCommand) -> Result<()> {
    let tokenizer = super::load_tokenizer(&cmd.tokenizer)?;
    let ids = parse_ids(&cmd.tokens)?;

    let text = tokenizer.decode(&ids)?;
    println!("{}", text);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids() {
        assert_eq!(parse_ids("1, 2,3").unwrap(), vec![1, 2, 3]);
        assert!(parse_ids("").unwrap().is_empty());
        assert!(parse_ids("1,x").is_err());
    }
}
