//! Occurrence counts of positions reached during a match
//!
//! The match controller records the state hash after every completed turn.
//! Search only reads it: a position already played once is treated as a
//! repetition and not explored again.

use rustc_hash::FxHashMap;

/// Position hash -> number of times it has been reached
#[derive(Debug, Clone, Default)]
pub struct DrawTable {
    counts: FxHashMap<u64, u32>,
}

impl DrawTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `hash`; returns the new count
    pub fn record(&mut self, hash: u64) -> u32 {
        let count = self.counts.entry(hash).or_insert(0);
        *count += 1;
        *count
    }

    #[inline]
    pub fn count(&self, hash: u64) -> u32 {
        self.counts.get(&hash).copied().unwrap_or(0)
    }

    /// Whether the position has occurred at least once
    #[inline]
    pub fn contains(&self, hash: u64) -> bool {
        self.count(hash) > 0
    }

    /// Number of distinct positions recorded
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }
}
