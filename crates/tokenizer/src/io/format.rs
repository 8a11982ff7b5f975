//! Format definitions for tokenizer serialization.
//!
//! A saved model only needs its merge rules in creation order: the
//! vocabulary is fully determined by them and is rebuilt on load.

use bytepair_core::MergeRule;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name of the JSON model inside a model directory.
pub const MODEL_FILE: &str = "tokenizer.json";

/// File name of the plain-text merges inside a model directory.
pub const MERGES_FILE: &str = "merges.txt";

/// Model format types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    /// `tokenizer.json`
    Json,
    /// `merges.txt`, one `left right` pair per line
    MergesTxt,
}

impl ModelFormat {
    /// File name this format is stored under.
    pub fn file_name(self) -> &'static str {
        match self {
            ModelFormat::Json => MODEL_FILE,
            ModelFormat::MergesTxt => MERGES_FILE,
        }
    }

    /// Format of the model stored in `dir`, preferring `tokenizer.json`.
    pub fn detect(dir: &Path) -> Option<Self> {
        [ModelFormat::Json, ModelFormat::MergesTxt]
            .into_iter()
            .find(|format| dir.join(format.file_name()).is_file())
    }
}

/// Complete tokenizer serialization format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedTokenizer {
    /// Format version
    pub version: String,
    /// Model summary
    pub config: SerializedConfig,
    /// Merge rules in creation order
    pub merges: Vec<MergeRule>,
}

/// Tokenizer configuration in serialized format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedConfig {
    /// Vocabulary size (256 + number of merges)
    pub vocab_size: usize,
    /// Number of merge rules
    pub num_merges: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let tokenizer_data = SerializedTokenizer {
            version: "0.1.0".to_string(),
            config: SerializedConfig {
                vocab_size: 257,
                num_merges: 1,
            },
            merges: vec![MergeRule {
                pair: (104, 101),
                new_token_id: 256,
            }],
        };

        let json = serde_json::to_value(&tokenizer_data).unwrap();
        assert_eq!(json["merges"][0]["pair"], serde_json::json!([104, 101]));
        assert_eq!(json["merges"][0]["new_token_id"], 256);
        assert_eq!(json["config"]["vocab_size"], 257);

        let deserialized: SerializedTokenizer = serde_json::from_value(json).unwrap();
        assert_eq!(deserialized, tokenizer_data);
    }

    #[test]
    fn test_detect() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(ModelFormat::detect(dir.path()), None);

        std::fs::write(dir.path().join(ModelFormat::MergesTxt.file_name()), "").unwrap();
        assert_eq!(ModelFormat::detect(dir.path()), Some(ModelFormat::MergesTxt));

        std::fs::write(dir.path().join(ModelFormat::Json.file_name()), "{}").unwrap();
        assert_eq!(ModelFormat::detect(dir.path()), Some(ModelFormat::Json));
    }
}
