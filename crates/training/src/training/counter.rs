//! Pair counting for BPE training.
//!
//! Builds the pair frequency table for one training iteration: every
//! adjacent pair in the token sequence with its count and the position of
//! its first occurrence. The table is rebuilt from scratch each iteration.

use ahash::AHashMap;
use bytepair_core::{Pair, PairStat};

/// Pair -> frequency and first occurrence.
pub type PairStats = AHashMap<Pair, PairStat>;

/// Sequences shorter than this are always counted sequentially.
const PARALLEL_MIN_TOKENS: usize = 1 << 16;

/// Counter for BPE pair frequencies.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairCounter {
    /// Whether to split counting across the rayon thread pool
    parallel: bool,
}

impl PairCounter {
    /// Create a new sequential pair counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a counter that counts in parallel on large inputs.
    pub fn with_parallel(parallel: bool) -> Self {
        Self { parallel }
    }

    /// Count all adjacent pairs of `tokens`.
    ///
    /// Parallel and sequential counting produce identical tables.
    pub fn count(&self, tokens: &[u32]) -> PairStats {
        if self.parallel && tokens.len() >= PARALLEL_MIN_TOKENS {
            Self::count_pairs_parallel(tokens)
        } else {
            Self::count_pairs_sequential(tokens)
        }
    }

    /// Count all pairs in parallel.
    pub fn count_pairs_parallel(tokens: &[u32]) -> PairStats {
        use rayon::prelude::*;

        tokens
            .par_windows(2)
            .enumerate()
            .fold(PairStats::new, |mut acc, (position, window)| {
                record(&mut acc, (window[0], window[1]), position);
                acc
            })
            .reduce(PairStats::new, |mut acc, partial| {
                for (pair, stat) in partial {
                    acc.entry(pair)
                        .and_modify(|existing| existing.absorb(stat))
                        .or_insert(stat);
                }
                acc
            })
    }

    /// Count all pairs sequentially.
    pub fn count_pairs_sequential(tokens: &[u32]) -> PairStats {
        let mut stats = PairStats::with_capacity(tokens.len().min(1 << 20));

        for (position, window) in tokens.windows(2).enumerate() {
            record(&mut stats, (window[0], window[1]), position);
        }

        stats
    }
}

#[inline]
fn record(stats: &mut PairStats, pair: Pair, position: usize) {
    stats
        .entry(pair)
        .and_modify(|stat| stat.observe(position))
        .or_insert_with(|| PairStat::new(position));
}
