//! Main tokenizer implementation.
//!
//! This module provides the high-level `Tokenizer` struct that owns the
//! trained vocabulary and merge rules and exposes training, encoding and
//! decoding over them.

use bytepair_core::{
    merge_pair, MergeRules, Result, TokenizerError, Vocabulary, BYTE_VOCAB_SIZE,
};
use bytepair_training::{BpeTrainer, TrainingConfig};
use crate::io::{ModelFormat, TokenizerLoader, TokenizerSaver};
use log::debug;
use std::path::Path;

/// Builder for creating a tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    config: TrainingConfig,
}

impl TokenizerBuilder {
    /// Create a new tokenizer builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target vocabulary size (must be greater than 256).
    pub fn vocab_size(mut self, size: usize) -> Self {
        self.config.vocab_size = size;
        self
    }

    /// Log each merge at `info` level during training.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Count pairs in parallel during training.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Build an untrained tokenizer.
    pub fn build(self) -> Result<Tokenizer> {
        Tokenizer::new(self.config)
    }
}

/// Trained state: vocabulary and the rules that produced it.
#[derive(Debug, Clone)]
struct Model {
    vocab: Vocabulary,
    merges: MergeRules,
}

/// Main tokenizer struct.
///
/// A tokenizer is either untrained (no model; `encode` and `decode` fail
/// with [`TokenizerError::ModelNotTrained`]) or trained (immutable
/// vocabulary and merge rules). Training a trained tokenizer replaces the
/// model instead of extending it.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// Configuration used by `train`
    config: TrainingConfig,
    /// `None` until trained or loaded
    model: Option<Model>,
}

impl Tokenizer {
    /// Create a new untrained tokenizer with the given configuration.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            model: None,
        })
    }

    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    /// Build a trained tokenizer from externally supplied merge rules.
    ///
    /// The vocabulary is rebuilt from the rules.
    pub fn from_parts(merges: MergeRules) -> Result<Self> {
        let vocab = Vocabulary::from_merges(&merges)?;
        Ok(Self::from_loaded(vocab, merges))
    }

    /// Whether a model has been trained or loaded.
    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// Get the training configuration.
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Get the vocabulary size (0 when untrained).
    pub fn vocab_size(&self) -> usize {
        self.model.as_ref().map_or(0, |m| m.vocab.len())
    }

    /// Get a reference to the vocabulary.
    pub fn vocab(&self) -> Option<&Vocabulary> {
        self.model.as_ref().map(|m| &m.vocab)
    }

    /// Get a reference to the merge rules.
    pub fn merges(&self) -> Option<&MergeRules> {
        self.model.as_ref().map(|m| &m.merges)
    }

    fn model(&self) -> Result<&Model> {
        self.model.as_ref().ok_or(TokenizerError::ModelNotTrained)
    }

    /// Train the tokenizer on text data.
    ///
    /// Any previously trained model is discarded first. An invalid
    /// configuration is reported before the current model is touched.
    ///
    /// # Arguments
    /// * `data` - Training text data
    pub fn train(&mut self, data: &str) -> Result<TrainingSummary> {
        self.config.validate()?;
        self.model = None;

        let trainer = BpeTrainer::new(self.config.clone());
        let output = trainer.train(data)?;

        let summary = TrainingSummary {
            vocab_size: output.vocab.len(),
            num_merges: output.merges.len(),
            input_bytes: output.input_bytes,
            stopped_early: output.stopped_early,
            tokens: output.tokens,
        };

        self.model = Some(Model {
            vocab: output.vocab,
            merges: output.merges,
        });

        Ok(summary)
    }

    /// Encode text to token IDs.
    pub fn encode(&self, text: &str) -> Result<Encoding> {
        let ids = self.encode_bytes(text.as_bytes())?;
        Ok(Encoding {
            ids,
            text: text.to_string(),
        })
    }

    /// Encode raw bytes by applying every merge rule in creation order.
    pub fn encode_bytes(&self, bytes: &[u8]) -> Result<Vec<u32>> {
        let model = self.model()?;

        let mut tokens: Vec<u32> = bytes.iter().map(|&b| u32::from(b)).collect();
        for rule in model.merges.iter() {
            if tokens.len() < 2 {
                break;
            }
            merge_pair(&mut tokens, rule.pair, rule.new_token_id);
        }

        Ok(tokens)
    }

    /// Encode a batch of texts (parallelized).
    pub fn encode_batch(&self, texts: &[String]) -> Result<Vec<Encoding>> {
        use rayon::prelude::*;

        self.model()?;
        texts
            .par_iter()
            .map(|text| self.encode(text))
            .collect::<Result<Vec<_>>>()
    }

    /// Decode token IDs back to text.
    ///
    /// Unknown IDs are an error. Byte sequences that are not valid UTF-8
    /// (for example a multi-byte character cut between tokens) are
    /// replaced with U+FFFD instead.
    pub fn decode(&self, ids: &[u32]) -> Result<String> {
        let bytes = self.decode_bytes(ids)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Decode token IDs to the raw bytes they stand for.
    pub fn decode_bytes(&self, ids: &[u32]) -> Result<Vec<u8>> {
        self.model()?.vocab.decode_bytes(ids)
    }

    /// Save the tokenizer to a directory as `tokenizer.json`.
    ///
    /// # Arguments
    /// * `path` - Directory path to save to
    pub fn save(&self, path: &Path) -> Result<()> {
        let model = self.model()?;
        debug!(
            "Saving tokenizer ({} merges) to {}",
            model.merges.len(),
            path.display()
        );
        TokenizerSaver::new(&model.vocab, &model.merges).save(path)
    }

    /// Save the merge rules to a directory as `merges.txt`.
    pub fn save_merges_txt(&self, path: &Path) -> Result<()> {
        let model = self.model()?;
        TokenizerSaver::new(&model.vocab, &model.merges).save_merges_txt(path)
    }

    /// Load a tokenizer from a directory containing `tokenizer.json`.
    ///
    /// # Arguments
    /// * `path` - Directory path to load from
    pub fn load(path: &Path) -> Result<Self> {
        let (vocab, merges) = TokenizerLoader::load(path)?;
        debug!(
            "Loaded tokenizer with vocab size {} from {}",
            vocab.len(),
            path.display()
        );
        Ok(Self::from_loaded(vocab, merges))
    }

    /// Load a tokenizer from a directory containing `merges.txt`.
    pub fn load_merges_txt(path: &Path) -> Result<Self> {
        let (vocab, merges) = TokenizerLoader::load_merges_txt(path)?;
        Ok(Self::from_loaded(vocab, merges))
    }

    /// Save the model in the given format.
    pub fn save_format(&self, path: &Path, format: ModelFormat) -> Result<()> {
        let model = self.model()?;
        TokenizerSaver::new(&model.vocab, &model.merges).save_format(path, format)
    }

    /// Load a model stored in the given format.
    pub fn load_format(path: &Path, format: ModelFormat) -> Result<Self> {
        let (vocab, merges) = TokenizerLoader::load_format(path, format)?;
        debug!(
            "Loaded {} merges ({}) from {}",
            merges.len(),
            format.file_name(),
            path.display()
        );
        Ok(Self::from_loaded(vocab, merges))
    }

    fn from_loaded(vocab: Vocabulary, merges: MergeRules) -> Self {
        let config = TrainingConfig {
            vocab_size: vocab.len().max(BYTE_VOCAB_SIZE as usize + 1),
            ..Default::default()
        };

        Self {
            config,
            model: Some(Model { vocab, merges }),
        }
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            config: TrainingConfig::default(),
            model: None,
        }
    }
}

/// Result of encoding text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    /// Token IDs
    pub ids: Vec<u32>,
    /// Original text
    pub text: String,
}

impl Encoding {
    /// Get the number of tokens.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if the encoding is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Bytes of input per token (0.0 for an empty encoding).
    pub fn compression_ratio(&self) -> f64 {
        if self.ids.is_empty() {
            0.0
        } else {
            self.text.len() as f64 / self.ids.len() as f64
        }
    }
}

/// What `Tokenizer::train` learned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingSummary {
    /// Final vocabulary size
    pub vocab_size: usize,
    /// Number of merge rules learned
    pub num_merges: usize,
    /// UTF-8 length of the training text
    pub input_bytes: usize,
    /// Whether training ran out of pairs before the target size
    pub stopped_early: bool,
    /// The training text's token sequence after the last merge
    pub tokens: Vec<u32>,
}

impl TrainingSummary {
    /// Bytes per token on the training text (0.0 for an empty text).
    pub fn compression_ratio(&self) -> f64 {
        if self.tokens.is_empty() {
            0.0
        } else {
            self.input_bytes as f64 / self.tokens.len() as f64
        }
    }
}
