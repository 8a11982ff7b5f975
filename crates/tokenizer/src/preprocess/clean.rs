//! Text cleaning applied to training samples.
//!
//! Steps run in a fixed order: normalization, non-ASCII removal,
//! lowercasing, then whitespace collapsing. Each call returns the counters it
//! produced so callers can sum them across a corpus.

use super::normalize::{NormalizationForm, Normalizer};
use bytepair_core::{Result, TokenizerError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;
use std::path::Path;
use std::sync::OnceLock;

fn non_ascii_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\x00-\x7F]+").expect("Invalid regex pattern"))
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("Invalid regex pattern"))
}

/// Which cleaning steps to run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Delete every run of non-ASCII characters
    pub remove_non_ascii: bool,
    /// Unicode lowercase
    pub lowercase: bool,
    /// Collapse whitespace runs to a single space and trim the ends
    pub remove_extra_spaces: bool,
    /// Unicode normalization applied first
    pub normalization: NormalizationForm,
}

impl PreprocessConfig {
    /// Parse a configuration from a JSON string.
    ///
    /// Missing fields take their defaults (every step disabled).
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            TokenizerError::InvalidConfig(format!("Invalid preprocessing config: {}", e))
        })
    }

    /// Read a JSON configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TokenizerError::io(path, e))?;
        Self::from_json(&content)
    }
}

/// Counters produced by preprocessing.
///
/// Character counts are Unicode scalar values, not bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreprocessStats {
    /// Characters before any step ran
    pub chars_before: usize,
    /// Characters after the last step
    pub chars_after: usize,
    /// Number of non-ASCII runs deleted
    pub non_ascii_removed: usize,
    /// Characters dropped by whitespace collapsing
    pub extra_spaces_removed: usize,
}

impl PreprocessStats {
    /// Removed non-ASCII runs as a percentage of `chars_before`.
    pub fn non_ascii_percentage(&self) -> f64 {
        percentage(self.non_ascii_removed, self.chars_before)
    }

    /// Removed whitespace as a percentage of `chars_before`.
    pub fn extra_space_percentage(&self) -> f64 {
        percentage(self.extra_spaces_removed, self.chars_before)
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

impl AddAssign for PreprocessStats {
    fn add_assign(&mut self, other: Self) {
        self.chars_before += other.chars_before;
        self.chars_after += other.chars_after;
        self.non_ascii_removed += other.non_ascii_removed;
        self.extra_spaces_removed += other.extra_spaces_removed;
    }
}

/// One cleaned sample and what cleaning it cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preprocessed {
    pub text: String,
    pub stats: PreprocessStats,
}

/// Applies a [`PreprocessConfig`] to text samples.
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    config: PreprocessConfig,
    normalizer: Normalizer,
}

impl Preprocessor {
    /// Create a preprocessor for the given configuration.
    pub fn new(config: PreprocessConfig) -> Self {
        let normalizer = Normalizer::new(config.normalization);
        Self { config, normalizer }
    }

    /// Get the configuration.
    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    /// Clean a single sample.
    pub fn process(&self, text: &str) -> Preprocessed {
        let mut stats = PreprocessStats {
            chars_before: text.chars().count(),
            ..Default::default()
        };

        let mut text = if self.normalizer.is_enabled() {
            self.normalizer.normalize(text)
        } else {
            text.to_string()
        };

        if self.config.remove_non_ascii {
            let re = non_ascii_re();
            stats.non_ascii_removed = re.find_iter(&text).count();
            if stats.non_ascii_removed > 0 {
                text = re.replace_all(&text, "").into_owned();
            }
        }

        if self.config.lowercase {
            text = text.to_lowercase();
        }

        if self.config.remove_extra_spaces {
            let before = text.chars().count();
            text = whitespace_re().replace_all(&text, " ").trim().to_string();
            stats.extra_spaces_removed = before - text.chars().count();
        }

        stats.chars_after = text.chars().count();
        Preprocessed { text, stats }
    }

    /// Clean many samples, returning them with the summed statistics.
    pub fn process_all<I, S>(&self, samples: I) -> (Vec<String>, PreprocessStats)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut total = PreprocessStats::default();
        let texts = samples
            .into_iter()
            .map(|sample| {
                let processed = self.process(sample.as_ref());
                total += processed.stats;
                processed.text
            })
            .collect();
        (texts, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_steps() -> PreprocessConfig {
        PreprocessConfig {
            remove_non_ascii: true,
            lowercase: true,
            remove_extra_spaces: true,
            normalization: NormalizationForm::None,
        }
    }

    #[test]
    fn test_all_steps() {
        let processed = Preprocessor::new(all_steps()).process("  Héllo   Wörld\t\n");

        assert_eq!(processed.text, "hllo wrld");
        assert_eq!(
            processed.stats,
            PreprocessStats {
                chars_before: 17,
                chars_after: 9,
                non_ascii_removed: 2,
                extra_spaces_removed: 6,
            }
        );
    }

    #[test]
    fn test_non_ascii_counts_runs() {
        let config = PreprocessConfig {
            remove_non_ascii: true,
            ..Default::default()
        };
        let processed = Preprocessor::new(config).process("a日本語b€c");

        assert_eq!(processed.text, "abc");
        assert_eq!(processed.stats.non_ascii_removed, 2);
    }

    #[test]
    fn test_disabled_steps_leave_text() {
        let processed = Preprocessor::default().process("  Mixed CASE  ünï  ");

        assert_eq!(processed.text, "  Mixed CASE  ünï  ");
        assert_eq!(processed.stats.chars_before, processed.stats.chars_after);
        assert_eq!(processed.stats.non_ascii_removed, 0);
        assert_eq!(processed.stats.extra_spaces_removed, 0);
    }

    #[test]
    fn test_normalization_runs_before_ascii_filter() {
        let config = PreprocessConfig {
            remove_non_ascii: true,
            normalization: NormalizationForm::Nfd,
            ..Default::default()
        };
        // NFD splits é into e + U+0301, so only the accent is removed
        let processed = Preprocessor::new(config).process("caf\u{00e9}");
        assert_eq!(processed.text, "cafe");
    }

    #[test]
    fn test_process_all_sums_stats() {
        let preprocessor = Preprocessor::new(all_steps());
        let (texts, stats) = preprocessor.process_all(["A  B", "ç", ""]);

        assert_eq!(texts, vec!["a b", "", ""]);
        assert_eq!(stats.chars_before, 5);
        assert_eq!(stats.chars_after, 3);
        assert_eq!(stats.non_ascii_removed, 1);
        assert_eq!(stats.extra_spaces_removed, 1);
    }

    #[test]
    fn test_percentages() {
        let stats = PreprocessStats {
            chars_before: 200,
            chars_after: 180,
            non_ascii_removed: 5,
            extra_spaces_removed: 15,
        };
        assert!((stats.non_ascii_percentage() - 2.5).abs() < 1e-9);
        assert!((stats.extra_space_percentage() - 7.5).abs() < 1e-9);

        let empty = PreprocessStats::default();
        assert_eq!(empty.non_ascii_percentage(), 0.0);
        assert_eq!(empty.extra_space_percentage(), 0.0);
    }

    #[test]
    fn test_config_from_json() {
        let config = PreprocessConfig::from_json(
            r#"{ "lowercase": true, "normalization": "nfc" }"#,
        )
        .unwrap();
        assert!(config.lowercase);
        assert!(!config.remove_non_ascii);
        assert_eq!(config.normalization, NormalizationForm::Nfc);

        let err = PreprocessConfig::from_json("{ lowercase: yes }").unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidConfig(_)));
    }

    #[test]
    fn test_config_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preprocess.json");
        std::fs::write(&path, r#"{ "remove_extra_spaces": true }"#).unwrap();

        let config = PreprocessConfig::from_path(&path).unwrap();
        assert!(config.remove_extra_spaces);

        let missing = PreprocessConfig::from_path(&dir.path().join("nope.json"));
        assert!(matches!(missing, Err(TokenizerError::Io { .. })));
    }
}
