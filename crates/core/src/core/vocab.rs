//! Vocabulary storage and lookup.
//!
//! The vocabulary maps token IDs to the byte sequences they stand for. IDs
//! are dense, so entries live in a `Vec` indexed by ID.

use crate::core::merges::{MergeRules, Pair};
use crate::error::{Result, TokenizerError};

/// Number of base tokens, one per byte value.
pub const BYTE_VOCAB_SIZE: u32 = 256;

/// Token ID -> byte sequence, append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    tokens: Vec<Vec<u8>>,
}

impl Vocabulary {
    /// Create a vocabulary holding only the 256 single-byte tokens.
    pub fn new() -> Self {
        Self::with_capacity(BYTE_VOCAB_SIZE as usize)
    }

    /// Create a byte vocabulary with room for `capacity` tokens in total.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut tokens = Vec::with_capacity(capacity.max(BYTE_VOCAB_SIZE as usize));
        tokens.extend((0..=u8::MAX).map(|b| vec![b]));
        Self { tokens }
    }

    /// Rebuild the vocabulary implied by a set of merge rules.
    pub fn from_merges(merges: &MergeRules) -> Result<Self> {
        let mut vocab = Self::with_capacity(BYTE_VOCAB_SIZE as usize + merges.len());
        for rule in merges.iter() {
            let id = vocab.add_merge(rule.pair)?;
            if id != rule.new_token_id {
                return Err(TokenizerError::InvalidMerge(format!(
                    "merge ({}, {}) produced id {}, expected {}",
                    rule.pair.0, rule.pair.1, id, rule.new_token_id
                )));
            }
        }
        Ok(vocab)
    }

    /// Append the concatenation of a pair's byte sequences.
    ///
    /// Returns the ID assigned to the new token.
    pub fn add_merge(&mut self, pair: Pair) -> Result<u32> {
        let left = self.get(pair.0).ok_or(TokenizerError::UnknownTokenId(pair.0))?;
        let right = self.get(pair.1).ok_or(TokenizerError::UnknownTokenId(pair.1))?;

        let mut bytes = Vec::with_capacity(left.len() + right.len());
        bytes.extend_from_slice(left);
        bytes.extend_from_slice(right);

        let id = self.tokens.len() as u32;
        self.tokens.push(bytes);
        Ok(id)
    }

    /// Get the byte sequence for an ID.
    #[inline]
    pub fn get(&self, id: u32) -> Option<&[u8]> {
        self.tokens.get(id as usize).map(Vec::as_slice)
    }

    /// Check whether an ID exists.
    #[inline]
    pub fn contains(&self, id: u32) -> bool {
        (id as usize) < self.tokens.len()
    }

    /// Get the size of the vocabulary.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the vocabulary is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over `(id, bytes)` in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[u8])> + '_ {
        self.tokens
            .iter()
            .enumerate()
            .map(|(id, bytes)| (id as u32, bytes.as_slice()))
    }

    /// Concatenate the byte sequences of `ids`.
    ///
    /// Fails on the first ID that is not in the vocabulary.
    pub fn decode_bytes(&self, ids: &[u32]) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(ids.len() * 2);
        for &id in ids {
            let token = self.get(id).ok_or(TokenizerError::UnknownTokenId(id))?;
            bytes.extend_from_slice(token);
        }
        Ok(bytes)
    }

    /// Human-readable form of a token (invalid UTF-8 replaced with U+FFFD).
    pub fn render(&self, id: u32) -> Option<String> {
        self.get(id)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}
