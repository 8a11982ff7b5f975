//! Error types for the BPE tokenizer library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tokenizer library.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// Invalid configuration (e.g. a target vocabulary that leaves no room for merges)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Encode/decode/save called before the model was trained or loaded
    #[error("Model has not been trained")]
    ModelNotTrained,

    /// Unknown token ID
    #[error("Unknown token ID: {0}")]
    UnknownTokenId(u32),

    /// Invalid merge rule
    #[error("Invalid merge rule: {0}")]
    InvalidMerge(String),

    /// Error loading a saved model
    #[error("Load error: {0}")]
    Load(String),

    /// Error saving a model
    #[error("Save error: {0}")]
    Save(String),

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },
}

impl TokenizerError {
    /// Wrap an I/O error together with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            err,
        }
    }
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            TokenizerError::UnknownTokenId(99999).to_string(),
            "Unknown token ID: 99999"
        );
        assert_eq!(
            TokenizerError::ModelNotTrained.to_string(),
            "Model has not been trained"
        );
    }

    #[test]
    fn test_io_keeps_path() {
        let err = TokenizerError::io(
            "/tmp/missing.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        let message = err.to_string();
        assert!(message.contains("/tmp/missing.json"));
        assert!(message.contains("gone"));
    }
}
