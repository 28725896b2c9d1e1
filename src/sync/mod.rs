//! Calibration-header acquisition and VIS decode
//!
//! Candidate scoring and the `SYNC`-state search loop
//! ([`header`]), the bounded candidate FIFO ([`candidate`]), and VIS byte decode with
//! parity ([`vis`]). [`crate::decoder`] drives these as pure functions over slices it
//! obtains from a [`crate::io::SampleSource`]; nothing here touches I/O.

pub mod candidate;
pub mod header;
pub mod vis;

pub use candidate::{CandidateFifo, SyncCandidate};
pub use header::{advance_search, score_candidate, SearchOutcome};
pub use vis::decode_vis;
