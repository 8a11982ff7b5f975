//! Merge priority: which pair a training step merges next.
//!
//! Candidates are ordered by count, and among equal counts by the position
//! of their first occurrence (leftmost wins). Distinct pairs never share a
//! first position, so this is a total order and selection never depends on
//! hash map iteration order.

use crate::core::merges::Pair;
use std::cmp::Ordering;

/// Frequency statistics for one adjacent pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairStat {
    /// Number of occurrences (overlapping occurrences each count)
    pub count: u64,
    /// Index of the leftmost occurrence in the token sequence
    pub first_seen: usize,
}

impl PairStat {
    /// Stats for a pair seen once at `position`.
    pub fn new(position: usize) -> Self {
        Self {
            count: 1,
            first_seen: position,
        }
    }

    /// Record one more occurrence.
    #[inline]
    pub fn observe(&mut self, position: usize) {
        self.count += 1;
        self.first_seen = self.first_seen.min(position);
    }

    /// Fold another partial count for the same pair into this one.
    #[inline]
    pub fn absorb(&mut self, other: PairStat) {
        self.count += other.count;
        self.first_seen = self.first_seen.min(other.first_seen);
    }
}

/// A merge candidate during BPE training.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeCandidate {
    /// The pair of token IDs to merge
    pub pair: Pair,
    /// The frequency/count of this pair
    pub count: u64,
    /// Position of the pair's first occurrence
    pub first_seen: usize,
}

impl MergeCandidate {
    /// Create a new merge candidate.
    pub fn new(pair: Pair, stat: PairStat) -> Self {
        Self {
            pair,
            count: stat.count,
            first_seen: stat.first_seen,
        }
    }
}

// Greater = merged first: higher count, then earlier first occurrence.
impl Ord for MergeCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.count
            .cmp(&other.count)
            .then_with(|| other.first_seen.cmp(&self.first_seen))
            .then_with(|| other.pair.cmp(&self.pair))
    }
}

impl PartialOrd for MergeCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pick the candidate to merge next, or `None` if there are no pairs.
pub fn best_candidate<'a, I>(stats: I) -> Option<MergeCandidate>
where
    I: IntoIterator<Item = (&'a Pair, &'a PairStat)>,
{
    stats
        .into_iter()
        .map(|(&pair, &stat)| MergeCandidate::new(pair, stat))
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashMap;

    fn stat(count: u64, first_seen: usize) -> PairStat {
        PairStat { count, first_seen }
    }

    #[test]
    fn test_higher_count_wins() {
        let mut stats = AHashMap::new();
        stats.insert((0, 1), stat(10, 0));
        stats.insert((1, 2), stat(20, 5));
        stats.insert((2, 3), stat(15, 2));

        let best = best_candidate(stats.iter()).unwrap();
        assert_eq!(best.pair, (1, 2));
        assert_eq!(best.count, 20);
    }

    #[test]
    fn test_tie_broken_by_first_occurrence() {
        let mut stats = AHashMap::new();
        stats.insert((97, 98), stat(2, 1));
        stats.insert((256, 97), stat(2, 0));
        stats.insert((98, 100), stat(1, 2));

        let best = best_candidate(stats.iter()).unwrap();
        assert_eq!(best.pair, (256, 97));
    }

    #[test]
    fn test_empty_stats() {
        let stats: AHashMap<Pair, PairStat> = AHashMap::new();
        assert!(best_candidate(stats.iter()).is_none());
    }

    #[test]
    fn test_observe_and_absorb() {
        let mut left = PairStat::new(7);
        left.observe(9);
        assert_eq!(left, stat(2, 7));

        left.absorb(stat(3, 2));
        assert_eq!(left, stat(5, 2));
    }
}
