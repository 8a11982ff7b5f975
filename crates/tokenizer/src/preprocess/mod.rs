//! Training-text preprocessing.
//!
//! Optional cleaning applied to raw samples before they reach the trainer,
//! plus the statistics it reports.

pub mod clean;
pub mod corpus;
pub mod normalize;

pub use clean::{PreprocessConfig, PreprocessStats, Preprocessed, Preprocessor};
pub use corpus::CorpusStats;
pub use normalize::{NormalizationForm, Normalizer};
