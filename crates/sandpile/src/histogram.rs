//! Distribution of falls per drop over a run.

use std::collections::BTreeMap;
use std::fmt;

/// Number of drops that produced each fall count, ordered by fall count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallsHistogram {
    counts: BTreeMap<u64, u64>,
}

impl FallsHistogram {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one drop that produced `falls` moves.
    pub fn record(&mut self, falls: u64) {
        *self.counts.entry(falls).or_insert(0) += 1;
    }

    /// Drops that produced exactly `falls` moves.
    #[must_use]
    pub fn count(&self, falls: u64) -> u64 {
        self.counts.get(&falls).copied().unwrap_or(0)
    }

    /// `(falls, drops)` pairs, ascending by falls.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.counts.iter().map(|(&falls, &drops)| (falls, drops))
    }

    /// Total number of recorded drops.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Largest fall count seen.
    #[must_use]
    pub fn max_falls(&self) -> Option<u64> {
        self.counts.last_key_value().map(|(&falls, _)| falls)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl fmt::Display for FallsHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (falls, drops) in self.iter() {
            writeln!(f, "{falls}: {drops}")?;
        }
        Ok(())
    }
}

impl Extend<u64> for FallsHistogram {
    fn extend<I: IntoIterator<Item = u64>>(&mut self, iter: I) {
        for falls in iter {
            self.record(falls);
        }
    }
}

impl FromIterator<u64> for FallsHistogram {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        let mut histogram = Self::new();
        histogram.extend(iter);
        histogram
    }
}
