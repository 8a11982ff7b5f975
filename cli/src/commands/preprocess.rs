//! Preprocess command implementation.

use anyhow::{Context, Result};
use bytepair_tokenizer::{CorpusStats, PreprocessConfig, Preprocessor};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

/// Preprocess command arguments.
#[derive(Parser)]
pub struct PreprocessCommand {
    /// Text file to clean, one sample per line
    #[arg(short, long)]
    pub input: PathBuf,

    /// JSON preprocessing config
    #[arg(short, long)]
    pub config: PathBuf,

    /// Where to write the cleaned text
    #[arg(short, long)]
    pub output: PathBuf,
}

pub fn run(cmd: PreprocessCommand) -> Result<()> {
    let config = PreprocessConfig::from_path(&cmd.config)
        .with_context(|| format!("failed to load {}", cmd.config.display()))?;
    let data = fs::read_to_string(&cmd.input)
        .with_context(|| format!("failed to read {}", cmd.input.display()))?;

    let before = CorpusStats::from_samples(data.lines());
    let (lines, stats) = Preprocessor::new(config).process_all(data.lines());
    let after = CorpusStats::from_samples(&lines);

    let mut output = lines.join("\n");
    output.push('\n');
    fs::write(&cmd.output, output)
        .with_context(|| format!("failed to write {}", cmd.output.display()))?;

    println!("Preprocessed text saved to {}", cmd.output.display());
    println!("Total non-ASCII characters removed: {}", stats.non_ascii_removed);
    println!("Total unwanted spaces removed: {}", stats.extra_spaces_removed);
    println!(
        "Removed non-ASCII characters as a percentage of total characters: {:.2}%",
        stats.non_ascii_percentage()
    );
    println!(
        "Removed unwanted spaces as a percentage of total characters: {:.2}%",
        stats.extra_space_percentage()
    );
    for (label, corpus) in [("Before", before), ("After", after)] {
        println!(
            "{}: {} samples, {} characters, {:.2} characters per sample",
            label,
            corpus.num_samples,
            corpus.total_chars,
            corpus.avg_chars_per_sample()
        );
    }

    Ok(())
}
