//! Merge rule management for BPE.
//!
//! Merge rules are stored using token IDs rather than strings for fast comparison.
//! Rules are kept in creation order: rule `i` always produced token
//! `BYTE_VOCAB_SIZE + i`, so the ordered list doubles as the reverse index
//! from a merged token back to the pair it came from.

use crate::core::vocab::BYTE_VOCAB_SIZE;
use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A pair of token IDs that can be merged.
pub type Pair = (u32, u32);

/// Forward lookup: pair -> ID of the token created by merging it.
pub type MergeMap = AHashMap<Pair, u32>;

/// A single merge rule: `pair.0` followed by `pair.1` becomes `new_token_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MergeRule {
    /// The pair of token IDs being merged
    pub pair: Pair,
    /// The ID of the token created by this merge
    pub new_token_id: u32,
}

/// Ordered collection of BPE merge rules with efficient lookup.
///
/// Both indices are private and only ever updated together by [`MergeRules::push`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeRules {
    /// Pairs in creation order (reverse index: `new_id - 256` -> pair)
    rules: Vec<Pair>,
    /// Forward index: pair -> new_id
    by_pair: MergeMap,
}

impl MergeRules {
    /// Create a new empty collection of merge rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new collection with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rules: Vec::with_capacity(capacity),
            by_pair: MergeMap::with_capacity(capacity),
        }
    }

    /// ID the next pushed rule will produce.
    #[inline]
    pub fn next_id(&self) -> u32 {
        BYTE_VOCAB_SIZE + self.rules.len() as u32
    }

    /// Append a merge rule and return the ID of the new token.
    ///
    /// Both halves of the pair must already exist (a byte or an earlier
    /// merge), and a pair can only be merged once.
    pub fn push(&mut self, pair: Pair) -> Result<u32> {
        let new_id = self.next_id();

        if pair.0 >= new_id || pair.1 >= new_id {
            return Err(TokenizerError::InvalidMerge(format!(
                "pair ({}, {}) references a token that does not exist before {}",
                pair.0, pair.1, new_id
            )));
        }
        if let Some(existing) = self.by_pair.get(&pair) {
            return Err(TokenizerError::InvalidMerge(format!(
                "pair ({}, {}) already merged into {}",
                pair.0, pair.1, existing
            )));
        }

        self.rules.push(pair);
        self.by_pair.insert(pair, new_id);
        Ok(new_id)
    }

    /// Get the token produced by merging `pair`, if that pair has a rule.
    #[inline]
    pub fn get(&self, pair: Pair) -> Option<u32> {
        self.by_pair.get(&pair).copied()
    }

    /// Get the pair that produced a merged token.
    ///
    /// Returns `None` for byte tokens and for IDs that were never created.
    #[inline]
    pub fn pair_for(&self, id: u32) -> Option<Pair> {
        let index = id.checked_sub(BYTE_VOCAB_SIZE)?;
        self.rules.get(index as usize).copied()
    }

    /// Get the number of merge rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if there are no merge rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over the rules in creation order.
    pub fn iter(&self) -> impl Iterator<Item = MergeRule> + '_ {
        self.rules
            .iter()
            .zip(BYTE_VOCAB_SIZE..)
            .map(|(&pair, new_token_id)| MergeRule { pair, new_token_id })
    }

    /// Build merge rules from an ordered list of pairs.
    ///
    /// The pairs are assigned IDs in order (256, 257, ...).
    pub fn from_pairs(pairs: impl IntoIterator<Item = Pair>) -> Result<Self> {
        let mut rules = Self::new();
        for pair in pairs {
            rules.push(pair)?;
        }
        Ok(rules)
    }

    /// Rebuild merge rules from externally supplied records.
    ///
    /// Every record must carry the ID its position implies.
    pub fn from_rules(records: impl IntoIterator<Item = MergeRule>) -> Result<Self> {
        let mut rules = Self::new();
        for record in records {
            let expected = rules.next_id();
            if record.new_token_id != expected {
                return Err(TokenizerError::InvalidMerge(format!(
                    "merge ({}, {}) has id {}, expected {}",
                    record.pair.0, record.pair.1, record.new_token_id, expected
                )));
            }
            rules.push(record.pair)?;
        }
        Ok(rules)
    }
}

/// Replace every non-overlapping occurrence of `pair` with `new_id`, in place.
///
/// The scan runs left to right and resumes after each replacement, so
/// `[a, a, a]` with `(a, a)` becomes `[new, a]`. Returns the number of
/// replacements.
pub fn merge_pair(tokens: &mut Vec<u32>, pair: Pair, new_id: u32) -> usize {
    let len = tokens.len();
    let mut read = 0;
    let mut write = 0;
    let mut merged = 0;

    while read < len {
        if read + 1 < len && tokens[read] == pair.0 && tokens[read + 1] == pair.1 {
            tokens[write] = new_id;
            read += 2;
            merged += 1;
        } else {
            tokens[write] = tokens[read];
            read += 1;
        }
        write += 1;
    }

    tokens.truncate(write);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_sequential_ids() {
        let mut rules = MergeRules::new();
        assert_eq!(rules.push((97, 97)).unwrap(), 256);
        assert_eq!(rules.push((256, 97)).unwrap(), 257);

        assert_eq!(rules.get((97, 97)), Some(256));
        assert_eq!(rules.get((256, 97)), Some(257));
        assert_eq!(rules.get((1, 2)), None);
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn test_reverse_lookup() {
        let rules = MergeRules::from_pairs([(104, 105), (256, 33)]).unwrap();

        assert_eq!(rules.pair_for(256), Some((104, 105)));
        assert_eq!(rules.pair_for(257), Some((256, 33)));
        assert_eq!(rules.pair_for(258), None);
        assert_eq!(rules.pair_for(42), None);
    }

    #[test]
    fn test_push_rejects_future_token() {
        let mut rules = MergeRules::new();
        let err = rules.push((256, 1)).unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidMerge(_)));
        assert!(rules.is_empty());
    }

    #[test]
    fn test_push_rejects_duplicate_pair() {
        let mut rules = MergeRules::new();
        rules.push((1, 2)).unwrap();
        assert!(matches!(
            rules.push((1, 2)),
            Err(TokenizerError::InvalidMerge(_))
        ));
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn test_from_rules_checks_numbering() {
        let ok = MergeRules::from_rules([
            MergeRule {
                pair: (1, 2),
                new_token_id: 256,
            },
            MergeRule {
                pair: (256, 3),
                new_token_id: 257,
            },
        ])
        .unwrap();
        assert_eq!(ok.len(), 2);

        let gap = MergeRules::from_rules([MergeRule {
            pair: (1, 2),
            new_token_id: 300,
        }]);
        assert!(matches!(gap, Err(TokenizerError::InvalidMerge(_))));
    }

    #[test]
    fn test_iter_in_creation_order() {
        let rules = MergeRules::from_pairs([(10, 11), (12, 13), (256, 257)]).unwrap();
        let ids: Vec<u32> = rules.iter().map(|r| r.new_token_id).collect();
        let pairs: Vec<Pair> = rules.iter().map(|r| r.pair).collect();

        assert_eq!(ids, vec![256, 257, 258]);
        assert_eq!(pairs, vec![(10, 11), (12, 13), (256, 257)]);
    }

    #[test]
    fn test_merge_pair_does_not_overlap() {
        let mut tokens = vec![5, 5, 5];
        let merged = merge_pair(&mut tokens, (5, 5), 300);

        assert_eq!(merged, 1);
        assert_eq!(tokens, vec![300, 5]);
    }

    #[test]
    fn test_merge_pair_multiple_occurrences() {
        let mut tokens = vec![1, 2, 3, 1, 2, 1, 2];
        let merged = merge_pair(&mut tokens, (1, 2), 256);

        assert_eq!(merged, 3);
        assert_eq!(tokens, vec![256, 3, 256, 256]);
    }

    #[test]
    fn test_merge_pair_no_match_and_short_input() {
        let mut tokens = vec![1, 2, 3];
        assert_eq!(merge_pair(&mut tokens, (3, 1), 256), 0);
        assert_eq!(tokens, vec![1, 2, 3]);

        let mut single = vec![7];
        assert_eq!(merge_pair(&mut single, (7, 7), 256), 0);
        assert_eq!(single, vec![7]);

        let mut empty: Vec<u32> = Vec::new();
        assert_eq!(merge_pair(&mut empty, (7, 7), 256), 0);
        assert!(empty.is_empty());
    }
}
