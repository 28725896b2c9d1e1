//! Sync candidate shape and bounded FIFO
//!
//! A candidate is a plain data struct produced by scoring and later ranked: fixed
//! capacity, FIFO eviction, minimum-search commit.

use std::collections::VecDeque;

/// A hypothesis that the calibration header starts at a particular sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncCandidate {
    /// Non-negative; lower is a better match. `f32::INFINITY` means "no lock here".
    pub error: f32,
    /// DC bias to subtract from samples once this candidate is adopted.
    pub offset: f32,
    /// Sideband polarity: `+1.0` (USB) or `-1.0` (LSB).
    pub invert: f32,
}

impl SyncCandidate {
    /// The "nothing found here" sentinel.
    pub fn none() -> Self {
        Self {
            error: f32::INFINITY,
            offset: 0.0,
            invert: 1.0,
        }
    }
}

/// Fixed-capacity FIFO of [`SyncCandidate`]s with oldest-first eviction: at most
/// `capacity` candidates are retained at a time.
#[derive(Debug, Clone)]
pub struct CandidateFifo {
    entries: VecDeque<SyncCandidate>,
    capacity: usize,
}

impl CandidateFifo {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "CandidateFifo capacity must be positive");
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Push a newly-scored candidate onto the back. Does not evict; callers decide
    /// whether to evict based on [`CandidateFifo::is_full`] after pushing, matching
    /// the search loop's "push, then (if full) inspect the minimum" order.
    pub fn push(&mut self, candidate: SyncCandidate) {
        self.entries.push_back(candidate);
    }

    /// Drop the oldest entry, returning it if present.
    pub fn evict_oldest(&mut self) -> Option<SyncCandidate> {
        self.entries.pop_front()
    }

    pub fn oldest(&self) -> Option<SyncCandidate> {
        self.entries.front().copied()
    }

    /// The lowest-error entry, paired with how many samples back (from the read
    /// position implied by this FIFO's current length) its header was first scored.
    /// Every entry is pushed exactly once per sample advance, so an entry at index
    /// `i` (0 = oldest) started `len() - i` samples before the current position.
    pub fn minimum(&self) -> Option<(usize, SyncCandidate)> {
        self.entries
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.error.partial_cmp(&b.1.error).unwrap())
            .map(|(idx, c)| (self.entries.len() - idx, *c))
    }
}
