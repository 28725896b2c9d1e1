//! Per-mode line/component scheduling and color conversion
//!
//! Grounded on `csdr-sstv.cpp::readColorLine`/`lineSync`/`convertLineData`, generalized
//! from those hand-written per-mode branches into a single schedule driven
//! describes, driven entirely by [`crate::mode::Mode`]'s accessors.

use crate::color::{self, bw_to_rgb, gbr_to_rgb, yuv_to_rgb, ColorLayout};
use crate::config::DecoderConfig;
use crate::constants::{CARRIER_1200, CARRIER_1500, CARRIER_2300, EDGE_SEARCH_BOXCAR_LEN, EDGE_THRESHOLD_MARGIN, SAMPLE_RATE};
use crate::io::{ByteSink, SampleSource};
use crate::mode::Mode;

/// Result of processing one physical scan line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineResult {
    pub bytes_written: usize,
    pub image_complete: bool,
}

/// Map a corrected sample's instantaneous frequency to a pixel byte via the
/// `[C1500, C2300] -> [0, 255]` linear map.
fn map_to_byte(corrected: f32) -> u8 {
    let t = (corrected - CARRIER_1500) / (CARRIER_2300 - CARRIER_1500);
    color::clamp_u8(t * 255.0)
}

/// Search `window` for the 1200 Hz sync pulse's trailing edge, starting at 90% of
/// `nominal_samples` and scanning up to 150% of it using a 50-sample boxcar majority
/// vote. Falls back to `nominal_samples` rounded if no edge is
/// found (clock-drift-tolerant, never blocks).
fn edge_search(window: &[f32], offset: f32, invert: f32, nominal_samples: f32, majority_fraction: f32) -> usize {
    let fallback = nominal_samples.round().max(0.0) as usize;
    if window.len() <= EDGE_SEARCH_BOXCAR_LEN {
        return fallback.min(window.len());
    }

    let start = (0.9 * nominal_samples).max(0.0) as usize;
    let end = ((1.5 * nominal_samples) as usize).min(window.len() - EDGE_SEARCH_BOXCAR_LEN);
    if start > end {
        return fallback.min(window.len());
    }

    let threshold = CARRIER_1200 + EDGE_THRESHOLD_MARGIN;
    for p in start..=end {
        let above = window[p..p + EDGE_SEARCH_BOXCAR_LEN]
            .iter()
            .filter(|&&s| invert * s - offset > threshold)
            .count();
        if above as f32 > majority_fraction * EDGE_SEARCH_BOXCAR_LEN as f32 {
            return p;
        }
    }
    fallback.min(window.len())
}

/// Per-image line/component scheduling state: the active mode, scan progress, the
/// sub-sample timing residual, and (for chroma-subsampled layouts) the previous scan's
/// luma/chroma back-buffer.
pub struct LineDecoder {
    mode: Mode,
    current_line: u16,
    line_offset: f32,
    yuv420_back_buffer: Option<Vec<(u8, u8)>>, // (Y, Cr) from the preceding even scan
}

impl LineDecoder {
    /// Start decoding a fresh image in `mode`. Called on VIS promotion.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            current_line: 0,
            line_offset: 0.0,
            yuv420_back_buffer: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn current_line(&self) -> u16 {
        self.current_line
    }

    /// Worst-case sample count this mode's line decoder needs buffered to guarantee
    /// forward progress on the next [`LineDecoder::process_line`] call.
    pub fn required_samples(&self) -> usize {
        let sync = self.mode.line_sync_duration();
        let comp0_sync = self.mode.component_sync_duration(0);
        let comp0_dur = self.mode.component_duration(0);
        let seconds = sync + self.mode.component_count() as f32 * (2.0 * comp0_sync + comp0_dur);
        (seconds * SAMPLE_RATE).ceil() as usize
    }

    /// Process exactly one physical scan line: line-sync, per-component sync and pixel
    /// sampling, color conversion, and output. Returns the number of bytes actually
    /// written and whether this line completed the image.
    pub fn process_line(
        &mut self,
        source: &mut impl SampleSource,
        sink: &mut impl ByteSink,
        offset: f32,
        invert: f32,
        config: &DecoderConfig,
    ) -> LineResult {
        let components = self.mode.component_count();
        let pixels = self.mode.horizontal_pixels() as usize;
        let sync_position = self.mode.line_sync_position();

        let mut row = vec![vec![0u8; components as usize]; pixels];

        for i in 0..components {
            if i == sync_position {
                let nominal = self.mode.line_sync_duration() * SAMPLE_RATE;
                let consumed = edge_search(
                    source.read_ptr(),
                    offset,
                    invert,
                    nominal,
                    config.edge_search_majority_fraction,
                );
                source.advance(consumed.min(source.available()));
            }

            if self.mode.has_component_sync() && i > 0 {
                let nominal = self.mode.component_sync_duration(i) * SAMPLE_RATE;
                let consumed = edge_search(
                    source.read_ptr(),
                    offset,
                    invert,
                    nominal,
                    config.edge_search_majority_fraction,
                );
                source.advance(consumed.min(source.available()));
            } else {
                let delay = (self.mode.component_sync_duration(i) * SAMPLE_RATE)
                    .round()
                    .max(0.0) as usize;
                source.advance(delay.min(source.available()));
            }

            let comp_dur = self.mode.component_duration(i);
            let samples_per_pixel = comp_dur * SAMPLE_RATE / pixels as f32;
            let scan_len = ((comp_dur * SAMPLE_RATE).ceil() as usize + 1).min(source.available());
            let window = &source.read_ptr()[..scan_len];

            for (k, slot) in row.iter_mut().enumerate() {
                let start = (k as f32 * samples_per_pixel).floor() as usize;
                let len = (samples_per_pixel.floor() as usize).max(1);
                let start = start.min(window.len());
                let end = (start + len).min(window.len());
                let mean = if end > start {
                    window[start..end].iter().map(|&s| invert * s - offset).sum::<f32>() / (end - start) as f32
                } else {
                    0.0
                };
                slot[i as usize] = map_to_byte(mean);
            }

            let advance_f = comp_dur * SAMPLE_RATE + self.line_offset;
            let consumed = advance_f.floor().max(0.0);
            self.line_offset = advance_f - consumed;
            source.advance((consumed as usize).min(source.available()));
        }

        let rows = self.convert_row(row, pixels);
        let bytes_needed = rows.len() * pixels * 3;
        let bytes_written = if bytes_needed == 0 {
            0
        } else if sink.writeable() >= bytes_needed {
            let mut n = 0;
            for r in &rows {
                for px in r {
                    sink.write_ptr()[n..n + 3].copy_from_slice(px);
                    n += 3;
                }
            }
            sink.advance(n);
            n
        } else {
            tracing::warn!(
                line = self.current_line,
                bytes_needed,
                writeable = sink.writeable(),
                "sink refused a full row, dropping it"
            );
            0 // writer can't accept a full line: observable, non-fatal loss
        };

        tracing::debug!(line = self.current_line, bytes_written, "completed scan line");

        self.current_line += self.mode.lines_per_line_sync() as u16;
        let image_complete = self.current_line >= self.mode.vertical_lines();

        LineResult {
            bytes_written,
            image_complete,
        }
    }

    /// Apply this mode's color-layout conversion, returning zero, one, or two output
    /// rows of RGB888 pixels (zero for an even YUV420 scan that only fed the back
    /// buffer; two for a YUV420 odd scan or any YUV420PD scan).
    fn convert_row(&mut self, row: Vec<Vec<u8>>, pixels: usize) -> Vec<Vec<[u8; 3]>> {
        match self.mode.color_layout() {
            ColorLayout::Bw => vec![row.iter().map(|c| bw_to_rgb(c[0])).collect()],
            ColorLayout::Rgb => vec![row.iter().map(|c| [c[0], c[1], c[2]]).collect()],
            ColorLayout::Gbr => vec![row.iter().map(|c| gbr_to_rgb([c[0], c[1], c[2]])).collect()],
            ColorLayout::Yuv422 => vec![row
                .iter()
                .map(|c| yuv_to_rgb(c[0], c[1] as i32 - 128, c[2] as i32 - 128))
                .collect()],
            ColorLayout::Yuv420 => {
                let even_scan = self.current_line % 2 == 0;
                if even_scan {
                    self.yuv420_back_buffer = Some(row.iter().map(|c| (c[0], c[1])).collect());
                    Vec::new()
                } else {
                    let Some(prev) = self.yuv420_back_buffer.take() else {
                        // No preceding even scan (resync mid-frame); emit black rather
                        // than panic.
                        return vec![vec![[0u8; 3]; pixels]; 2];
                    };
                    let row1: Vec<[u8; 3]> = (0..pixels)
                        .map(|p| {
                            let (prev_y, cr) = prev[p];
                            let cb = row[p][1];
                            yuv_to_rgb(prev_y, cr as i32 - 128, cb as i32 - 128)
                        })
                        .collect();
                    let row2: Vec<[u8; 3]> = (0..pixels)
                        .map(|p| {
                            let (_, cr) = prev[p];
                            let cb = row[p][1];
                            yuv_to_rgb(row[p][0], cr as i32 - 128, cb as i32 - 128)
                        })
                        .collect();
                    vec![row1, row2]
                }
            }
            ColorLayout::Yuv420Pd => {
                let row1: Vec<[u8; 3]> = row
                    .iter()
                    .map(|c| yuv_to_rgb(c[0], c[1] as i32 - 128, c[2] as i32 - 128))
                    .collect();
                let row2: Vec<[u8; 3]> = row
                    .iter()
                    .map(|c| yuv_to_rgb(c[3], c[1] as i32 - 128, c[2] as i32 - 128))
                    .collect();
                vec![row1, row2]
            }
        }
    }
}
