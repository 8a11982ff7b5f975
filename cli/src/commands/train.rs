//! Train command implementation.

use anyhow::{Context, Result};
use bytepair_tokenizer::{ModelFormat, PreprocessConfig, Preprocessor, Tokenizer};
use clap::Parser;
use log::info;
use rayon::ThreadPoolBuilder;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// Train command arguments.
#[derive(Parser)]
pub struct TrainCommand {
    /// Path to the training data file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory for the trained model
    #[arg(short, long)]
    pub output: PathBuf,

    /// Target vocabulary size (including the 256 byte tokens)
    #[arg(long, default_value_t = 276)]
    pub vocab_size: usize,

    /// Log every merge as it is learned
    #[arg(long)]
    pub verbose_merges: bool,

    /// Count pairs in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Number of worker threads for parallel counting
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// JSON preprocessing config applied to each input line before training
    #[arg(long, value_name = "CONFIG")]
    pub preprocess: Option<PathBuf>,

    /// Also write merges.txt next to tokenizer.json
    #[arg(long)]
    pub merges_txt: bool,
}

pub fn run(cmd: TrainCommand) -> Result<()> {
    if let Some(threads) = cmd.threads {
        ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("unable to configure Rayon thread pool")?;
    }

    let start = Instant::now();
    let mut data = fs::read_to_string(&cmd.input)
        .with_context(|| format!("failed to read {}", cmd.input.display()))?;
    info!(
        "Read {} bytes from {} in {:.2}s",
        data.len(),
        cmd.input.display(),
        start.elapsed().as_secs_f64()
    );

    if let Some(config_path) = &cmd.preprocess {
        let config = PreprocessConfig::from_path(config_path)
            .with_context(|| format!("failed to load {}", config_path.display()))?;
        let (lines, stats) = Preprocessor::new(config).process_all(data.lines());
        data = lines.join("\n");
        info!(
            "Preprocessed input: {} -> {} chars ({} non-ASCII runs, {} extra spaces removed)",
            stats.chars_before, stats.chars_after, stats.non_ascii_removed, stats.extra_spaces_removed
        );
    }

    let mut tokenizer = Tokenizer::builder()
        .vocab_size(cmd.vocab_size)
        .verbose(cmd.verbose_merges)
        .parallel(cmd.parallel)
        .build()?;

    let start = Instant::now();
    let summary = tokenizer.train(&data)?;
    println!("Training completed in {:.2}s", start.elapsed().as_secs_f64());
    println!("Final vocab size: {}", summary.vocab_size);
    println!("Merges learned: {}", summary.num_merges);
    if summary.stopped_early {
        println!("Stopped early: no pairs left to merge");
    }
    println!(
        "Length: {} bytes -> {} tokens (compression ratio {:.2}X)",
        summary.input_bytes,
        summary.tokens.len(),
        summary.compression_ratio()
    );

    let mut formats = vec![ModelFormat::Json];
    if cmd.merges_txt {
        formats.push(ModelFormat::MergesTxt);
    }
    for format in formats {
        tokenizer.save_format(&cmd.output, format).with_context(|| {
            format!(
                "failed to save {} to {}",
                format.file_name(),
                cmd.output.display()
            )
        })?;
    }
    println!("Model saved to {}", cmd.output.display());

    Ok(())
}
