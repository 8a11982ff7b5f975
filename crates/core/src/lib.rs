//! bytepair-core - Core byte-level BPE data structures
//!
//! This crate provides the fundamental data structures for byte-pair
//! encoding (BPE): a vocabulary seeded with the 256 byte values, ordered
//! merge rules, and the non-overlapping merge routine used by both the
//! trainer and the encoder.
//!
//! # Example
//!
//! ```rust
//! use bytepair_core::{merge_pair, MergeRules, Vocabulary};
//!
//! let merges = MergeRules::from_pairs([(b'a' as u32, b'a' as u32)])?;
//! let vocab = Vocabulary::from_merges(&merges)?;
//! assert_eq!(vocab.get(256), Some(&b"aa"[..]));
//!
//! let mut tokens: Vec<u32> = b"aaa".iter().map(|&b| b as u32).collect();
//! merge_pair(&mut tokens, (b'a' as u32, b'a' as u32), 256);
//! assert_eq!(tokens, vec![256, b'a' as u32]);
//! # Ok::<(), bytepair_core::TokenizerError>(())
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

pub mod core;
pub use self::core::{
    best_candidate, merge_pair, MergeCandidate, MergeMap, MergeRule, MergeRules, Pair, PairStat,
    Vocabulary, BYTE_VOCAB_SIZE,
};
