//! Training infrastructure for BPE tokenizers.
//!
//! This module provides the pair counter and the greedy merge trainer.

pub mod counter;
pub mod trainer;

pub use counter::{PairCounter, PairStats};
pub use trainer::{BpeTrainer, TrainingConfig, TrainingOutput};
