//! bytepair-training - BPE training infrastructure
//!
//! This crate learns byte-level BPE merge rules from text.
//!
//! # Features
//!
//! - Pair frequency counting, optionally split across the rayon thread pool
//! - Deterministic merge selection (highest count, then earliest occurrence)
//! - Early stop once the training text has no adjacent pairs left
//!
//! # Example
//!
//! ```rust
//! use bytepair_training::{BpeTrainer, TrainingConfig};
//!
//! let trainer = BpeTrainer::new(TrainingConfig {
//!     vocab_size: 258,
//!     ..Default::default()
//! });
//! let output = trainer.train("aaabdaaabac")?;
//! assert_eq!(output.merges.len(), 2);
//! # Ok::<(), bytepair_training::TokenizerError>(())
//! ```

pub use bytepair_core::{Result, TokenizerError};

// Training infrastructure
pub mod training;
pub use training::{BpeTrainer, PairCounter, PairStats, TrainingConfig, TrainingOutput};
