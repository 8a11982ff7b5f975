//! CLI commands for the bytepair tokenizer.

pub mod decode;
pub mod encode;
pub mod info;
pub mod preprocess;
pub mod train;

pub use decode::DecodeCommand;
pub use encode::EncodeCommand;
pub use info::InfoCommand;
pub use preprocess::PreprocessCommand;
pub use train::TrainCommand;

use anyhow::{Context, Result};
use bytepair_tokenizer::{ModelFormat, Tokenizer};
use std::path::Path;

/// Load a model directory, preferring `tokenizer.json` over `merges.txt`.
pub(crate) fn load_tokenizer(dir: &Path) -> Result<Tokenizer> {
    let Some(format) = ModelFormat::detect(dir) else {
        anyhow::bail!("no tokenizer.json or merges.txt in {}", dir.display());
    };
    Tokenizer::load_format(dir, format)
        .with_context(|| format!("failed to load tokenizer from {}", dir.display()))
}
