//! Basic size statistics over a set of text samples.

/// Sample count and character totals for a corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CorpusStats {
    /// Number of samples
    pub num_samples: usize,
    /// Total characters across all samples
    pub total_chars: usize,
}

impl CorpusStats {
    /// Compute statistics over the given samples.
    pub fn from_samples<I, S>(samples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        samples.into_iter().fold(Self::default(), |mut stats, sample| {
            stats.num_samples += 1;
            stats.total_chars += sample.as_ref().chars().count();
            stats
        })
    }

    /// Average characters per sample (0.0 for an empty corpus).
    pub fn avg_chars_per_sample(&self) -> f64 {
        if self.num_samples == 0 {
            0.0
        } else {
            self.total_chars as f64 / self.num_samples as f64
        }
    }
}
