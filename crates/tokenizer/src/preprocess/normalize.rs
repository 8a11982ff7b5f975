//! Unicode normalization applied before any other cleaning step.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Normalization form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationForm {
    /// Leave the text as-is
    #[default]
    None,
    /// Canonical composition
    Nfc,
    /// Canonical decomposition
    Nfd,
    /// Compatibility composition
    Nfkc,
    /// Compatibility decomposition
    Nfkd,
}

/// Unicode normalizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    form: NormalizationForm,
}

impl Normalizer {
    /// Create a new normalizer.
    pub fn new(form: NormalizationForm) -> Self {
        Self { form }
    }

    /// Normalize text.
    pub fn normalize(&self, text: &str) -> String {
        match self.form {
            NormalizationForm::None => text.to_string(),
            NormalizationForm::Nfc => text.nfc().collect(),
            NormalizationForm::Nfd => text.nfd().collect(),
            NormalizationForm::Nfkc => text.nfkc().collect(),
            NormalizationForm::Nfkd => text.nfkd().collect(),
        }
    }

    /// Check if normalization is enabled.
    pub fn is_enabled(&self) -> bool {
        self.form != NormalizationForm::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nfc_composes() {
        let normalizer = Normalizer::new(NormalizationForm::Nfc);
        assert_eq!(normalizer.normalize("e\u{0301}"), "\u{00e9}");
    }

    #[test]
    fn test_nfd_decomposes() {
        let normalizer = Normalizer::new(NormalizationForm::Nfd);
        assert_eq!(normalizer.normalize("\u{00e9}"), "e\u{0301}");
    }

    #[test]
    fn test_nfkc_folds_compatibility_chars() {
        let normalizer = Normalizer::new(NormalizationForm::Nfkc);
        assert_eq!(normalizer.normalize("\u{FB01}le"), "file");
    }

    #[test]
    fn test_default_is_disabled() {
        let normalizer = Normalizer::default();
        assert!(!normalizer.is_enabled());
        assert_eq!(normalizer.normalize("e\u{0301}"), "e\u{0301}");
    }

    #[test]
    fn test_serde_names() {
        let form: NormalizationForm = serde_json::from_str("\"nfkc\"").unwrap();
        assert_eq!(form, NormalizationForm::Nfkc);
        assert_eq!(
            serde_json::to_string(&NormalizationForm::None).unwrap(),
            "\"none\""
        );
    }
}
