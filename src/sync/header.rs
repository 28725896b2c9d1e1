//! Calibration header scoring and the `SYNC`-state search loop
//!
//! Grounded on `csdr-sstv.cpp::getSyncError` (per-candidate scoring) and the
//! surrounding `canProcess`/`process` search loop, generalized here into a pure
//! function over a [`CandidateFifo`] so it can be driven and tested independently of
//! [`crate::io`].

use crate::config::DecoderConfig;
use crate::constants::*;
use crate::signal::std_dev;

use super::candidate::{CandidateFifo, SyncCandidate};

/// Score the candidate calibration header starting at the first sample of `window`.
///
/// `window` must hold at least [`HEADER_TOTAL_SAMPLES`] samples; only the first
/// `HEADER_TOTAL_SAMPLES` are read. Tries both sideband polarities and returns the
/// better-scoring one, or [`SyncCandidate::none`] if neither polarity's three segments
/// agree on a DC bias within [`MAX_OFFSET_DEVIATION`].
pub fn score_candidate(window: &[f32]) -> SyncCandidate {
    if window.len() < HEADER_TOTAL_SAMPLES {
        return SyncCandidate::none();
    }
    tracing::trace!(window_len = window.len(), "scoring header candidate");

    let leader1 = &window[0..HEADER_LEADER_SAMPLES];
    let brk = &window[HEADER_LEADER_SAMPLES..HEADER_LEADER_SAMPLES + HEADER_BREAK_SAMPLES];
    let leader2 = &window[HEADER_LEADER_SAMPLES + HEADER_BREAK_SAMPLES..HEADER_TOTAL_SAMPLES];

    let (mean1, dev1) = std_dev(leader1);
    let (mean2, dev2) = std_dev(brk);
    let (mean3, dev3) = std_dev(leader2);

    let mut best = SyncCandidate::none();
    for invert in [1.0f32, -1.0f32] {
        let offset1 = mean1 - invert * CARRIER_1900;
        let offset2 = mean2 - invert * CARRIER_1200;
        let offset3 = mean3 - invert * CARRIER_1900;

        let max = offset1.max(offset2).max(offset3);
        let min = offset1.min(offset2).min(offset3);
        if max - min >= MAX_OFFSET_DEVIATION {
            continue;
        }

        let error = (dev1 + dev2 + dev3) / 3.0;
        if error < best.error {
            best = SyncCandidate {
                error,
                offset: (offset1 + offset2 + offset3) / 3.0,
                invert,
            };
        }
    }
    best
}

/// Outcome of one step of the `SYNC`-state search loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchOutcome {
    /// No commit; advance the read cursor by this many samples and score again.
    Continue { advance: usize },
    /// Commit to `candidate`; rewind the read cursor by `rewind` samples from the
    /// current position before attempting VIS decode.
    Commit {
        rewind: usize,
        candidate: SyncCandidate,
    },
}

/// Advance the search loop by one step given the candidate just scored at the current
/// read position. Pushes, evicts, and clears `fifo` per the commit rules above.
pub fn advance_search(
    fifo: &mut CandidateFifo,
    candidate: SyncCandidate,
    config: &DecoderConfig,
) -> SearchOutcome {
    if candidate.error < config.search_error_threshold {
        fifo.push(candidate);
        if fifo.is_full() {
            if let Some((rewind, minimum)) = fifo.minimum() {
                let is_oldest = rewind == fifo.len();
                if is_oldest && minimum.error < config.commit_error_threshold {
                    tracing::info!(error = minimum.error, offset = minimum.offset, invert = minimum.invert, "header committed");
                    return SearchOutcome::Commit {
                        rewind,
                        candidate: minimum,
                    };
                }
            }
            tracing::debug!(fifo_len = fifo.len(), "candidate fifo full, evicting oldest");
            fifo.evict_oldest();
        }
        SearchOutcome::Continue { advance: 1 }
    } else {
        if !fifo.is_empty() {
            if let Some((rewind, minimum)) = fifo.minimum() {
                if minimum.error < config.commit_error_threshold {
                    tracing::info!(error = minimum.error, offset = minimum.offset, invert = minimum.invert, "header committed on error spike");
                    return SearchOutcome::Commit {
                        rewind,
                        candidate: minimum,
                    };
                }
            }
        }
        tracing::debug!("candidate error above search threshold, clearing fifo");
        fifo.clear();
        SearchOutcome::Continue { advance: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synth_header(invert: f32, offset: f32) -> Vec<f32> {
        let mut v = Vec::with_capacity(HEADER_TOTAL_SAMPLES);
        v.extend(std::iter::repeat(invert * CARRIER_1900 + offset).take(HEADER_LEADER_SAMPLES));
        v.extend(std::iter::repeat(invert * CARRIER_1200 + offset).take(HEADER_BREAK_SAMPLES));
        v.extend(std::iter::repeat(invert * CARRIER_1900 + offset).take(HEADER_LEADER_SAMPLES));
        v
    }

    #[test]
    fn score_candidate_locks_onto_clean_header() {
        let window = synth_header(1.0, 0.0);
        let cand = score_candidate(&window);
        assert!(cand.error < 1e-6);
        assert!((cand.invert - 1.0).abs() < 1e-9);
        assert!(cand.offset.abs() < 1e-6);
    }

    #[test]
    fn score_candidate_locks_onto_inverted_header() {
        let window = synth_header(-1.0, 0.0);
        let cand = score_candidate(&window);
        assert!(cand.error < 1e-6);
        assert!((cand.invert + 1.0).abs() < 1e-9);
    }

    #[test]
    fn score_candidate_tolerates_dc_bias_within_bound() {
        let window = synth_header(1.0, 0.9 * MAX_OFFSET_DEVIATION);
        let cand = score_candidate(&window);
        assert!(cand.error < 1e-6);
    }

    #[test]
    fn score_candidate_rejects_noise() {
        let window: Vec<f32> = (0..HEADER_TOTAL_SAMPLES)
            .map(|i| if i % 2 == 0 { 0.05 } else { -0.05 })
            .collect();
        let cand = score_candidate(&window);
        assert!(cand.error.is_infinite());
    }

    #[test]
    fn score_candidate_rejects_too_short_window() {
        let cand = score_candidate(&[0.0; 10]);
        assert!(cand.error.is_infinite());
    }

    #[test]
    fn search_loop_advances_ten_on_no_candidate() {
        let mut fifo = CandidateFifo::new(100);
        let config = DecoderConfig::default();
        let outcome = advance_search(&mut fifo, SyncCandidate::none(), &config);
        assert_eq!(outcome, SearchOutcome::Continue { advance: 10 });
        assert!(fifo.is_empty());
    }

    #[test]
    fn search_loop_pushes_and_advances_one_below_threshold() {
        let mut fifo = CandidateFifo::new(100);
        let config = DecoderConfig::default();
        let cand = SyncCandidate {
            error: 0.2,
            offset: 0.0,
            invert: 1.0,
        };
        let outcome = advance_search(&mut fifo, cand, &config);
        assert_eq!(outcome, SearchOutcome::Continue { advance: 1 });
        assert_eq!(fifo.len(), 1);
    }

    #[test]
    fn search_loop_commits_when_fifo_full_and_oldest_is_best() {
        let mut fifo = CandidateFifo::new(3);
        let config = DecoderConfig::default();
        let good = SyncCandidate {
            error: 0.05,
            offset: 0.0,
            invert: 1.0,
        };
        let mediocre = SyncCandidate {
            error: 0.2,
            offset: 0.0,
            invert: 1.0,
        };
        assert_eq!(
            advance_search(&mut fifo, good, &config),
            SearchOutcome::Continue { advance: 1 }
        );
        assert_eq!(
            advance_search(&mut fifo, mediocre, &config),
            SearchOutcome::Continue { advance: 1 }
        );
        let outcome = advance_search(&mut fifo, mediocre, &config);
        match outcome {
            SearchOutcome::Commit { rewind, candidate } => {
                assert_eq!(rewind, 3);
                assert!((candidate.error - 0.05).abs() < 1e-9);
            }
            _ => panic!("expected commit on full fifo with oldest-is-best"),
        }
    }

    #[test]
    fn search_loop_evicts_oldest_when_full_but_not_committing() {
        let mut fifo = CandidateFifo::new(2);
        let config = DecoderConfig::default();
        let mediocre = SyncCandidate {
            error: 0.2,
            offset: 0.0,
            invert: 1.0,
        };
        advance_search(&mut fifo, mediocre, &config);
        let outcome = advance_search(&mut fifo, mediocre, &config);
        assert_eq!(outcome, SearchOutcome::Continue { advance: 1 });
        assert_eq!(fifo.len(), 1); // evicted back down from 2
    }

    #[test]
    fn search_loop_commits_from_non_full_fifo_on_error_spike() {
        let mut fifo = CandidateFifo::new(100);
        let config = DecoderConfig::default();
        let good = SyncCandidate {
            error: 0.1,
            offset: 0.0,
            invert: 1.0,
        };
        advance_search(&mut fifo, good, &config);
        let outcome = advance_search(&mut fifo, SyncCandidate::none(), &config);
        match outcome {
            SearchOutcome::Commit { rewind, candidate } => {
                assert_eq!(rewind, 1);
                assert!((candidate.error - 0.1).abs() < 1e-9);
            }
            _ => panic!("expected commit from non-full fifo on error spike"),
        }
    }
}
