//! Load functionality for saved tokenizers.
//!
//! Both formats store only merge rules; the loader rebuilds the vocabulary
//! and rejects rules that could not have come out of training.

use super::format::{ModelFormat, SerializedTokenizer};
use bytepair_core::{MergeRules, Pair, Result, TokenizerError, Vocabulary, BYTE_VOCAB_SIZE};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Tokenizer loader - handles loading trained models.
pub struct TokenizerLoader;

impl TokenizerLoader {
    /// Load a tokenizer from a directory in JSON format.
    ///
    /// Expects a `tokenizer.json` file in the given directory.
    ///
    /// # Arguments
    /// * `path` - Directory path to load from
    pub fn load(path: &Path) -> Result<(Vocabulary, MergeRules)> {
        let file_path = path.join(ModelFormat::Json.file_name());
        let file = File::open(&file_path).map_err(|e| TokenizerError::io(&file_path, e))?;

        let reader = BufReader::new(file);
        let serialized: SerializedTokenizer = serde_json::from_reader(reader)
            .map_err(|e| TokenizerError::Load(format!("Failed to deserialize tokenizer: {}", e)))?;

        Self::deserialize(serialized)
    }

    /// Load from `merges.txt`: one `left right` pair of IDs per line.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn load_merges_txt(path: &Path) -> Result<(Vocabulary, MergeRules)> {
        let merges_path = path.join(ModelFormat::MergesTxt.file_name());
        let content =
            std::fs::read_to_string(&merges_path).map_err(|e| TokenizerError::io(&merges_path, e))?;

        let mut pairs = Vec::new();
        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            pairs.push(Self::parse_merge_line(line, line_num + 1)?);
        }

        let merges = MergeRules::from_pairs(pairs)?;
        let vocab = Vocabulary::from_merges(&merges)?;
        Ok((vocab, merges))
    }

    /// Load in the given format.
    pub fn load_format(path: &Path, format: ModelFormat) -> Result<(Vocabulary, MergeRules)> {
        match format {
            ModelFormat::Json => Self::load(path),
            ModelFormat::MergesTxt => Self::load_merges_txt(path),
        }
    }

    fn parse_merge_line(line: &str, line_num: usize) -> Result<Pair> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 2 {
            return Err(TokenizerError::Load(format!(
                "Invalid merge format at line {}: '{}'",
                line_num, line
            )));
        }

        let parse = |s: &str| {
            s.parse::<u32>().map_err(|e| {
                TokenizerError::Load(format!(
                    "Invalid token id '{}' at line {}: {}",
                    s, line_num, e
                ))
            })
        };

        Ok((parse(parts[0])?, parse(parts[1])?))
    }

    /// Deserialize from a serialized structure.
    fn deserialize(data: SerializedTokenizer) -> Result<(Vocabulary, MergeRules)> {
        let expected = BYTE_VOCAB_SIZE as usize + data.merges.len();
        if data.config.vocab_size != expected || data.config.num_merges != data.merges.len() {
            return Err(TokenizerError::Load(format!(
                "Inconsistent model: vocab_size {} and num_merges {} for {} merges",
                data.config.vocab_size,
                data.config.num_merges,
                data.merges.len()
            )));
        }

        let merges = MergeRules::from_rules(data.merges)?;
        let vocab = Vocabulary::from_merges(&merges)?;
        Ok((vocab, merges))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::format::{MERGES_FILE, MODEL_FILE};
    use crate::io::save::TokenizerSaver;

    fn sample() -> (Vocabulary, MergeRules) {
        let merges = MergeRules::from_pairs([(97, 97), (256, 97), (98, 100)]).unwrap();
        let vocab = Vocabulary::from_merges(&merges).unwrap();
        (vocab, merges)
    }

    #[test]
    fn test_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let (vocab, merges) = sample();

        TokenizerSaver::new(&vocab, &merges).save(dir.path()).unwrap();
        let (loaded_vocab, loaded_merges) = TokenizerLoader::load(dir.path()).unwrap();

        assert_eq!(loaded_vocab, vocab);
        assert_eq!(loaded_merges, merges);
    }

    #[test]
    fn test_load_merges_txt_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let (vocab, merges) = sample();

        TokenizerSaver::new(&vocab, &merges)
            .save_merges_txt(dir.path())
            .unwrap();
        let (loaded_vocab, loaded_merges) = TokenizerLoader::load_merges_txt(dir.path()).unwrap();

        assert_eq!(loaded_vocab, vocab);
        assert_eq!(loaded_merges, merges);
    }

    #[test]
    fn test_load_format_dispatch() {
        let (vocab, merges) = sample();
        for format in [ModelFormat::Json, ModelFormat::MergesTxt] {
            let dir = tempfile::tempdir().unwrap();
            TokenizerSaver::new(&vocab, &merges)
                .save_format(dir.path(), format)
                .unwrap();

            assert_eq!(ModelFormat::detect(dir.path()), Some(format));
            let (_, loaded) = TokenizerLoader::load_format(dir.path(), format).unwrap();
            assert_eq!(loaded, merges);
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TokenizerLoader::load(dir.path()).unwrap_err();
        assert!(matches!(err, TokenizerError::Io { .. }));
    }

    #[test]
    fn test_load_rejects_out_of_order_ids() {
        let dir = tempfile::tempdir().unwrap();
        let json = r#"{
            "version": "0.1.0",
            "config": { "vocab_size": 258, "num_merges": 2 },
            "merges": [
                { "pair": [97, 97], "new_token_id": 257 },
                { "pair": [98, 98], "new_token_id": 256 }
            ]
        }"#;
        std::fs::write(dir.path().join(MODEL_FILE), json).unwrap();

        let err = TokenizerLoader::load(dir.path()).unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidMerge(_)));
    }

    #[test]
    fn test_load_rejects_inconsistent_size() {
        let dir = tempfile::tempdir().unwrap();
        let json = r#"{
            "version": "0.1.0",
            "config": { "vocab_size": 300, "num_merges": 1 },
            "merges": [ { "pair": [97, 97], "new_token_id": 256 } ]
        }"#;
        std::fs::write(dir.path().join(MODEL_FILE), json).unwrap();

        let err = TokenizerLoader::load(dir.path()).unwrap_err();
        assert!(matches!(err, TokenizerError::Load(_)));
    }

    #[test]
    fn test_load_merges_txt_errors() {
        let dir = tempfile::tempdir().unwrap();

        std::fs::write(dir.path().join(MERGES_FILE), "97 97\n97\n").unwrap();
        assert!(matches!(
            TokenizerLoader::load_merges_txt(dir.path()),
            Err(TokenizerError::Load(_))
        ));

        std::fs::write(dir.path().join(MERGES_FILE), "97 x\n").unwrap();
        assert!(matches!(
            TokenizerLoader::load_merges_txt(dir.path()),
            Err(TokenizerError::Load(_))
        ));

        // 257 does not exist when the first rule is created
        std::fs::write(dir.path().join(MERGES_FILE), "# header\n\n257 97\n").unwrap();
        assert!(matches!(
            TokenizerLoader::load_merges_txt(dir.path()),
            Err(TokenizerError::InvalidMerge(_))
        ));
    }
}
