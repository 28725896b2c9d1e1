//! Top-level cooperative state machine
//!
//! Grounded on `csdr-sstv.cpp::SstvDecoder::canProcess/process`: the decoder owns no
//! thread or timer, mutates only its own fields and the two collaborators it's handed,
//! and performs exactly one step — a candidate evaluation, a promotion attempt, or one
//! scan line — per [`Decoder::process`] call.

use crate::config::DecoderConfig;
use crate::constants::{HEADER_TOTAL_SAMPLES, VIS_DECODE_GUARD_SAMPLES, VIS_TOTAL_SAMPLES};
use crate::error::Result;
use crate::io::{ByteSink, SampleSource};
use crate::line::LineDecoder;
use crate::mode::Mode;
use crate::sync::{advance_search, decode_vis, score_candidate, CandidateFifo, SearchOutcome};

/// Coarse decoder state: searching for a calibration header, or streaming an image.
/// [`Decoder`] itself tracks a finer-grained phase internally (header search vs. the
/// fast-forward-then-decode promotion attempt both report as `Sync` here).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    Sync,
    Data,
}

enum Phase {
    /// Scanning for a calibration header.
    Searching { fifo: CandidateFifo },
    /// Header committed; fast-forwarding to the VIS decode point, then attempting it.
    AwaitingVis {
        offset: f32,
        invert: f32,
        samples_until_vis: usize,
    },
    /// Streaming an image.
    Streaming {
        line: Box<LineDecoder>,
        offset: f32,
        invert: f32,
    },
}

/// The streaming SSTV demodulator. Drive it with repeated `can_process()`/`process()`
/// calls against a [`SampleSource`] and a [`ByteSink`]; each `process()` call performs
/// exactly one step of work.
pub struct Decoder {
    config: DecoderConfig,
    phase: Phase,
}

impl Decoder {
    pub fn new(config: DecoderConfig) -> Result<Self> {
        config.validate()?;
        let fifo = CandidateFifo::new(config.fifo_capacity);
        Ok(Self {
            config,
            phase: Phase::Searching { fifo },
        })
    }

    pub fn state(&self) -> DecoderState {
        match &self.phase {
            Phase::Searching { .. } | Phase::AwaitingVis { .. } => DecoderState::Sync,
            Phase::Streaming { .. } => DecoderState::Data,
        }
    }

    /// True only if enough samples are buffered to make forward progress on the next
    /// [`Decoder::process`] call. Pure; never blocks, never mutates.
    pub fn can_process(&self, source: &impl SampleSource) -> bool {
        match &self.phase {
            Phase::Searching { .. } => source.available() >= HEADER_TOTAL_SAMPLES,
            Phase::AwaitingVis { samples_until_vis, .. } => {
                source.available() >= samples_until_vis + VIS_TOTAL_SAMPLES
            }
            Phase::Streaming { line, .. } => source.available() >= line.required_samples(),
        }
    }

    /// Perform exactly one step. Returns the number of output bytes written.
    pub fn process(&mut self, source: &mut impl SampleSource, sink: &mut impl ByteSink) -> usize {
        match std::mem::replace(
            &mut self.phase,
            Phase::Searching {
                fifo: CandidateFifo::new(self.config.fifo_capacity),
            },
        ) {
            Phase::Searching { mut fifo } => {
                let candidate = score_candidate(source.read_ptr());
                match advance_search(&mut fifo, candidate, &self.config) {
                    SearchOutcome::Continue { advance } => {
                        source.advance(advance.min(source.available()));
                        self.phase = Phase::Searching { fifo };
                    }
                    SearchOutcome::Commit { rewind, candidate } => {
                        // `rewind` samples separate the committed candidate's header
                        // start from the current read position; VIS decode begins
                        // VIS_DECODE_GUARD_SAMPLES past that start, which (since the
                        // candidate FIFO never holds more than `fifo_capacity` <<
                        // VIS_DECODE_GUARD_SAMPLES entries) always lies ahead of the
                        // current position. No backward seek is ever required.
                        let samples_until_vis = VIS_DECODE_GUARD_SAMPLES.saturating_sub(rewind);
                        self.phase = Phase::AwaitingVis {
                            offset: candidate.offset,
                            invert: candidate.invert,
                            samples_until_vis,
                        };
                    }
                }
                0
            }
            Phase::AwaitingVis {
                offset,
                invert,
                samples_until_vis,
            } => {
                if samples_until_vis > 0 {
                    let consumed = samples_until_vis.min(source.available());
                    source.advance(consumed);
                    self.phase = Phase::AwaitingVis {
                        offset,
                        invert,
                        samples_until_vis: samples_until_vis - consumed,
                    };
                    return 0;
                }

                let promoted = decode_vis(source.read_ptr(), offset, invert, &self.config).and_then(|vis| {
                    match Mode::from_vis(vis) {
                        Some(mode) => Some((vis, mode)),
                        None => {
                            tracing::debug!(vis, "mode not implemented, rejecting");
                            None
                        }
                    }
                });

                match promoted {
                    Some((vis, mode)) => {
                        tracing::info!(
                            mode = mode.name(),
                            vis,
                            pixels = mode.horizontal_pixels(),
                            lines = mode.vertical_lines(),
                            "VIS decoded, promoting to DATA"
                        );
                        // Position the cursor at the start of the first scan line. For
                        // modes whose line sync falls at component 0 the sync pulse
                        // itself is still ahead of us, so we consume less than the
                        // full VIS window and leave it for the line decoder's first
                        // edge search to find.
                        let held_back = if mode.line_sync_position() == 0 {
                            (mode.line_sync_duration() * crate::constants::SAMPLE_RATE) as usize
                        } else {
                            0
                        };
                        let advance = VIS_TOTAL_SAMPLES.saturating_sub(held_back);
                        source.advance(advance.min(source.available()));

                        let written = write_sync_marker(sink, vis, mode.horizontal_pixels(), mode.vertical_lines());
                        self.phase = Phase::Streaming {
                            line: Box::new(LineDecoder::new(mode)),
                            offset,
                            invert,
                        };
                        written
                    }
                    None => {
                        source.advance(10.min(source.available()));
                        self.phase = Phase::Searching {
                            fifo: CandidateFifo::new(self.config.fifo_capacity),
                        };
                        0
                    }
                }
            }
            Phase::Streaming {
                mut line,
                offset,
                invert,
            } => {
                let result = line.process_line(source, sink, offset, invert, &self.config);
                if result.image_complete {
                    self.phase = Phase::Searching {
                        fifo: CandidateFifo::new(self.config.fifo_capacity),
                    };
                } else {
                    self.phase = Phase::Streaming { line, offset, invert };
                }
                result.bytes_written
            }
        }
    }
}

fn write_sync_marker(sink: &mut impl ByteSink, vis: u8, pixels: u16, lines: u16) -> usize {
    let mut buf = [0u8; 10];
    buf[0..4].copy_from_slice(b"SYNC");
    buf[4..6].copy_from_slice(&(vis as u16).to_le_bytes());
    buf[6..8].copy_from_slice(&pixels.to_le_bytes());
    buf[8..10].copy_from_slice(&lines.to_le_bytes());

    if sink.writeable() >= buf.len() {
        sink.write_ptr()[..buf.len()].copy_from_slice(&buf);
        sink.advance(buf.len());
        buf.len()
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CARRIER_1200, CARRIER_1900, CARRIER_2300};
    use crate::io::{VecByteSink, VecSampleSource};

    /// Synthesize a calibration header + VIS for `vis`, followed by `tail_seconds` of
    /// a constant carrier, all at unity gain with no DC offset.
    fn synth_preamble(vis: u8, tail: &[f32]) -> Vec<f32> {
        let mut samples = Vec::new();
        samples.extend(std::iter::repeat(CARRIER_1900).take(3600));
        samples.extend(std::iter::repeat(CARRIER_1200).take(120));
        samples.extend(std::iter::repeat(CARRIER_1900).take(3600));

        let mut push_bit = |bit: bool| {
            let carrier = if bit {
                crate::constants::CARRIER_1100
            } else {
                crate::constants::CARRIER_1300
            };
            samples.extend(std::iter::repeat(carrier).take(360));
        };
        push_bit(false); // start bit (value irrelevant, rejected)
        let mut ones = 0u32;
        for i in 0..7 {
            let bit = (vis >> i) & 1 != 0;
            if bit {
                ones += 1;
            }
            push_bit(bit);
        }
        push_bit(ones % 2 != 0); // even parity
        push_bit(false); // stop bit

        samples.extend_from_slice(tail);
        samples
    }

    #[test]
    fn locks_and_promotes_on_martin_m1_all_white() {
        let mode = Mode::from_vis(44).unwrap();
        let pixels = mode.horizontal_pixels() as usize;
        let lines = mode.vertical_lines() as usize;
        let tail_len = lines * (mode.line_sync_duration() * crate::constants::SAMPLE_RATE) as usize
            + lines * 3 * (mode.component_duration(0) * crate::constants::SAMPLE_RATE) as usize
            + 50_000;
        let tail = vec![CARRIER_2300; tail_len];
        let samples = synth_preamble(44, &tail);

        let config = DecoderConfig::default();
        let mut decoder = Decoder::new(config).unwrap();
        let mut source = VecSampleSource::new(samples);
        let mut sink = VecByteSink::new();

        let mut marker_seen = false;
        for _ in 0..2_000_000 {
            if !decoder.can_process(&source) {
                break;
            }
            decoder.process(&mut source, &mut sink);
            if decoder.state() == DecoderState::Data {
                marker_seen = true;
            }
            if marker_seen && decoder.state() == DecoderState::Sync {
                break; // image completed and decoder returned to searching
            }
        }

        assert!(marker_seen, "decoder never promoted to DATA state");
        let committed = sink.committed();
        assert!(committed.len() >= 10, "no SYNC marker/descriptor written");
        assert_eq!(&committed[0..4], b"SYNC");
        let vis = u16::from_le_bytes([committed[4], committed[5]]);
        let out_pixels = u16::from_le_bytes([committed[6], committed[7]]);
        let out_lines = u16::from_le_bytes([committed[8], committed[9]]);
        assert_eq!(vis, 44);
        assert_eq!(out_pixels, pixels as u16);
        assert_eq!(out_lines, lines as u16);
    }

    #[test]
    fn noise_floor_never_locks() {
        let samples: Vec<f32> = (0..(HEADER_TOTAL_SAMPLES * 3))
            .map(|i| if i % 2 == 0 { 0.05 } else { -0.05 })
            .collect();
        let config = DecoderConfig::default();
        let mut decoder = Decoder::new(config).unwrap();
        let mut source = VecSampleSource::new(samples);
        let mut sink = VecByteSink::new();

        for _ in 0..1000 {
            if !decoder.can_process(&source) {
                break;
            }
            decoder.process(&mut source, &mut sink);
        }

        assert_eq!(decoder.state(), DecoderState::Sync);
        assert!(sink.committed().is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = DecoderConfig::default();
        config.fifo_capacity = 0;
        assert!(Decoder::new(config).is_err());
    }
}
