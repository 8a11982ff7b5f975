//! Core BPE data structures.
//!
//! This module contains the vocabulary, the ordered merge rules, the merge
//! application routine shared by training and encoding, and the ordering
//! used to pick the next merge.

pub mod merges;
pub mod priority;
pub mod vocab;

pub use merges::{merge_pair, MergeMap, MergeRule, MergeRules, Pair};
pub use priority::{best_candidate, MergeCandidate, PairStat};
pub use vocab::{Vocabulary, BYTE_VOCAB_SIZE};
