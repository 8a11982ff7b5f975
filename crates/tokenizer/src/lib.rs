//! Bytepair-tokenizer - High-level tokenizer API
//!
//! This crate ties the byte-level vocabulary, merge rules and trainer
//! together behind a single `Tokenizer` type.
//!
//! # Features
//!
//! - Builder pattern for training configuration
//! - Lossless byte-level encoding of arbitrary UTF-8 text
//! - Optional preprocessing of training text (normalization, cleanup)
//! - Saving and loading as `tokenizer.json` or `merges.txt`
//!
//! # Example
//!
//! ```rust
//! use bytepair_tokenizer::Tokenizer;
//!
//! let mut tokenizer = Tokenizer::builder().vocab_size(258).build()?;
//! tokenizer.train("aaabdaaabac")?;
//!
//! let encoding = tokenizer.encode("aaabdaaabac")?;
//! assert_eq!(encoding.ids, vec![257, 98, 100, 257, 98, 97, 99]);
//!
//! let text = tokenizer.decode(&encoding.ids)?;
//! assert_eq!(text, "aaabdaaabac");
//! # Ok::<(), bytepair_tokenizer::TokenizerError>(())
//! ```

// Re-export core types
pub use bytepair_core::{MergeRule, MergeRules, Result, TokenizerError, Vocabulary};
pub use bytepair_training::TrainingConfig;

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{Encoding, Tokenizer, TokenizerBuilder, TrainingSummary};

// IO/Serialization
pub mod io;
pub use io::{ModelFormat, TokenizerLoader, TokenizerSaver};

// Preprocessing
pub mod preprocess;
pub use preprocess::{CorpusStats, PreprocessConfig, PreprocessStats, Preprocessor};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
