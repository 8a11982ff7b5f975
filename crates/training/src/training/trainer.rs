//! BPE trainer implementation.
//!
//! Greedy byte-level BPE: start from the 256 byte tokens and repeatedly
//! merge the most frequent adjacent pair until the target vocabulary size
//! is reached or nothing is left to merge.

use super::counter::PairCounter;
use bytepair_core::{
    best_candidate, merge_pair, MergeRules, Result, TokenizerError, Vocabulary, BYTE_VOCAB_SIZE,
};
use log::{debug, info};

/// Configuration for BPE training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingConfig {
    /// Target vocabulary size, including the 256 byte tokens
    pub vocab_size: usize,
    /// Log every merge at `info` level instead of `debug`
    pub verbose: bool,
    /// Count pairs on the rayon thread pool
    pub parallel: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            vocab_size: 276,
            verbose: false,
            parallel: false,
        }
    }
}

impl TrainingConfig {
    /// Check that the configuration leaves room for at least one merge.
    pub fn validate(&self) -> Result<()> {
        if self.vocab_size <= BYTE_VOCAB_SIZE as usize {
            return Err(TokenizerError::InvalidConfig(format!(
                "vocab_size must be greater than {} (the byte alphabet), got {}",
                BYTE_VOCAB_SIZE, self.vocab_size
            )));
        }
        if self.vocab_size > u32::MAX as usize {
            return Err(TokenizerError::InvalidConfig(format!(
                "vocab_size {} does not fit in a u32 token id",
                self.vocab_size
            )));
        }
        Ok(())
    }
}

/// Everything a training run produces.
#[derive(Debug, Clone)]
pub struct TrainingOutput {
    /// Learned vocabulary (256 bytes + one entry per merge)
    pub vocab: Vocabulary,
    /// Merge rules in creation order
    pub merges: MergeRules,
    /// The training text as it looked after the last merge
    pub tokens: Vec<u32>,
    /// Number of UTF-8 bytes in the training text
    pub input_bytes: usize,
    /// True if training ran out of pairs before reaching the target size
    pub stopped_early: bool,
}

impl TrainingOutput {
    /// Bytes per token on the training text (0.0 for an empty text).
    pub fn compression_ratio(&self) -> f64 {
        if self.tokens.is_empty() {
            0.0
        } else {
            self.input_bytes as f64 / self.tokens.len() as f64
        }
    }
}

/// BPE trainer.
///
/// Trains a byte-level BPE model by iteratively merging the most frequent
/// pair of adjacent tokens. Ties go to the pair that occurs first in the
/// current token sequence, so training is deterministic.
#[derive(Debug, Clone)]
pub struct BpeTrainer {
    /// Configuration
    config: TrainingConfig,
}

impl BpeTrainer {
    /// Create a new BPE trainer with the given configuration.
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Create a new BPE trainer with default configuration.
    pub fn with_vocab_size(vocab_size: usize) -> Self {
        Self::new(TrainingConfig {
            vocab_size,
            ..Default::default()
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train on the UTF-8 bytes of `text`.
    pub fn train(&self, text: &str) -> Result<TrainingOutput> {
        self.train_bytes(text.as_bytes())
    }

    /// Train on a raw byte sequence.
    pub fn train_bytes(&self, bytes: &[u8]) -> Result<TrainingOutput> {
        self.config.validate()?;

        let target = self.config.vocab_size;
        info!(
            "Starting BPE training: {} input bytes, target vocab size {}",
            bytes.len(),
            target
        );

        let mut tokens: Vec<u32> = bytes.iter().map(|&b| u32::from(b)).collect();
        // Each merge shortens the sequence by at least one token
        let reachable = target.min(BYTE_VOCAB_SIZE as usize + bytes.len().saturating_sub(1));
        let mut vocab = Vocabulary::with_capacity(reachable);
        let mut merges = MergeRules::with_capacity(reachable - BYTE_VOCAB_SIZE as usize);
        let counter = PairCounter::with_parallel(self.config.parallel);
        let mut stopped_early = false;

        while vocab.len() < target {
            if tokens.len() < 2 {
                stopped_early = true;
                break;
            }

            let stats = counter.count(&tokens);
            let Some(best) = best_candidate(stats.iter()) else {
                stopped_early = true;
                break;
            };

            let new_id = merges.push(best.pair)?;
            let vocab_id = vocab.add_merge(best.pair)?;
            if vocab_id != new_id {
                return Err(TokenizerError::InvalidMerge(format!(
                    "vocabulary assigned id {} to merge {}",
                    vocab_id, new_id
                )));
            }

            merge_pair(&mut tokens, best.pair, new_id);

            if self.config.verbose {
                info!(
                    "Merged pair ({}, {}) into new token {}. Occurs {} times.",
                    best.pair.0, best.pair.1, new_id, best.count
                );
            } else {
                debug!(
                    "Merged pair ({}, {}) into new token {}. Occurs {} times.",
                    best.pair.0, best.pair.1, new_id, best.count
                );
            }
        }

        if stopped_early {
            info!(
                "No pairs left to merge; stopping at vocab size {} (target {})",
                vocab.len(),
                target
            );
        }
        info!(
            "Finished training: {} merges, {} bytes -> {} tokens",
            merges.len(),
            bytes.len(),
            tokens.len()
        );

        Ok(TrainingOutput {
            vocab,
            merges,
            tokens,
            input_bytes: bytes.len(),
            stopped_early,
        })
    }
}
