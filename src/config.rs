//! Decoder configuration
//!
//! The contract constants (FIFO capacity, commit/search error thresholds, VIS
//! deviation tolerance, edge-search majority fraction) are kept as defaults here but
//! made overridable by the embedding host, so the sync algorithm stays fixed while its
//! tolerances can be tuned per deployment.

use crate::error::{InvalidThresholdSnafu, Result, ZeroFifoCapacitySnafu};
use snafu::ensure;

/// Tunables for [`crate::decoder::Decoder`].
#[derive(Debug, Clone, PartialEq)]
pub struct DecoderConfig {
    /// Maximum number of sync candidates retained in the search FIFO.
    pub fifo_capacity: usize,
    /// Candidate `error` threshold below which commit is considered.
    pub commit_error_threshold: f32,
    /// Candidate `error` threshold below which a candidate is tracked at all.
    pub search_error_threshold: f32,
    /// Maximum mean deviation accepted during VIS decode.
    pub vis_deviation_threshold: f32,
    /// Fraction of the edge-search boxcar window that must read "above threshold"
    /// before the line-sync edge search commits (fixed at >25/50 by default).
    pub edge_search_majority_fraction: f32,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            fifo_capacity: crate::constants::DEFAULT_FIFO_CAPACITY,
            commit_error_threshold: 0.3,
            search_error_threshold: 0.5,
            vis_deviation_threshold: 0.1,
            edge_search_majority_fraction: 0.5,
        }
    }
}

impl DecoderConfig {
    /// Validate the configuration, returning a boundary-facing error if a field is
    /// nonsensical. Called by [`crate::decoder::Decoder::new`].
    pub fn validate(&self) -> Result<()> {
        ensure!(self.fifo_capacity > 0, ZeroFifoCapacitySnafu);
        for (field, value) in [
            ("commit_error_threshold", self.commit_error_threshold),
            ("search_error_threshold", self.search_error_threshold),
            ("vis_deviation_threshold", self.vis_deviation_threshold),
            (
                "edge_search_majority_fraction",
                self.edge_search_majority_fraction,
            ),
        ] {
            ensure!(
                value.is_finite() && value > 0.0,
                InvalidThresholdSnafu { field, value }
            );
        }
        Ok(())
    }
}
