//! Serialization and deserialization for BPE models.
//!
//! This module provides functionality for saving and loading trained tokenizers
//! as `tokenizer.json` or as a plain `merges.txt`.

pub mod format;
pub mod load;
pub mod save;

pub use format::{ModelFormat, SerializedTokenizer, MERGES_FILE, MODEL_FILE};
pub use load::TokenizerLoader;
pub use save::TokenizerSaver;
