//! Save functionality for trained tokenizers.
//!
//! This module provides methods for saving trained tokenizers to disk
//! in various formats.

use super::format::{ModelFormat, SerializedConfig, SerializedTokenizer};
use bytepair_core::{MergeRules, Result, TokenizerError, Vocabulary};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Tokenizer saver - handles saving trained models.
pub struct TokenizerSaver<'a> {
    /// Vocabulary reference
    vocab: &'a Vocabulary,
    /// Merge rules reference
    merges: &'a MergeRules,
}

impl<'a> TokenizerSaver<'a> {
    /// Create a new tokenizer saver.
    pub fn new(vocab: &'a Vocabulary, merges: &'a MergeRules) -> Self {
        Self { vocab, merges }
    }

    /// Save the tokenizer to a directory in JSON format.
    ///
    /// This saves a single `tokenizer.json` file containing all model data.
    ///
    /// # Arguments
    /// * `path` - Directory path to save to
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path).map_err(|e| TokenizerError::io(path, e))?;

        let file_path = path.join(ModelFormat::Json.file_name());
        let file = File::create(&file_path).map_err(|e| TokenizerError::io(&file_path, e))?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.serialize())
            .map_err(|e| TokenizerError::Save(format!("Failed to serialize tokenizer: {}", e)))?;
        writer
            .flush()
            .map_err(|e| TokenizerError::io(&file_path, e))?;

        Ok(())
    }

    /// Save the merge rules as `merges.txt`.
    ///
    /// One `left right` line per rule, in creation order, after a
    /// `#version` header.
    pub fn save_merges_txt(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path).map_err(|e| TokenizerError::io(path, e))?;

        let merges_path = path.join(ModelFormat::MergesTxt.file_name());
        let file = File::create(&merges_path).map_err(|e| TokenizerError::io(&merges_path, e))?;
        let mut writer = BufWriter::new(file);

        let write_err = |e: std::io::Error| TokenizerError::io(&merges_path, e);
        writeln!(writer, "#version: {}", env!("CARGO_PKG_VERSION")).map_err(write_err)?;
        for rule in self.merges.iter() {
            writeln!(writer, "{} {}", rule.pair.0, rule.pair.1).map_err(write_err)?;
        }
        writer.flush().map_err(write_err)?;

        Ok(())
    }

    /// Save in the given format.
    pub fn save_format(&self, path: &Path, format: ModelFormat) -> Result<()> {
        match format {
            ModelFormat::Json => self.save(path),
            ModelFormat::MergesTxt => self.save_merges_txt(path),
        }
    }

    /// Serialize the tokenizer to a structure.
    pub(crate) fn serialize(&self) -> SerializedTokenizer {
        SerializedTokenizer {
            version: env!("CARGO_PKG_VERSION").to_string(),
            config: SerializedConfig {
                vocab_size: self.vocab.len(),
                num_merges: self.merges.len(),
            },
            merges: self.merges.iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize() {
        let merges = MergeRules::from_pairs([(104, 101), (256, 108)]).unwrap();
        let vocab = Vocabulary::from_merges(&merges).unwrap();

        let saver = TokenizerSaver::new(&vocab, &merges);
        let serialized = saver.serialize();

        assert_eq!(serialized.config.vocab_size, 258);
        assert_eq!(serialized.config.num_merges, 2);
        assert_eq!(serialized.merges[1].pair, (256, 108));
        assert_eq!(serialized.merges[1].new_token_id, 257);
        assert_eq!(serialized.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_save_merges_txt() {
        let dir = tempfile::tempdir().unwrap();
        let merges = MergeRules::from_pairs([(97, 97), (256, 97)]).unwrap();
        let vocab = Vocabulary::from_merges(&merges).unwrap();

        TokenizerSaver::new(&vocab, &merges)
            .save_merges_txt(dir.path())
            .unwrap();

        let contents =
            std::fs::read_to_string(dir.path().join(ModelFormat::MergesTxt.file_name())).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert!(lines[0].starts_with("#version:"));
        assert_eq!(&lines[1..], &["97 97", "256 97"]);
    }
}
