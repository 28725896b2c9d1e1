//! Synthetic SSTV waveform generation for test fixtures and the `sstvsim` binary
//!
//! A reusable generator so tests and the `sstvsim` binary don't each hand-roll their
//! own waveform. SSTV's header, VIS, and scan-line segments are each a constant tone
//! (or a linear pixel-to-frequency ramp) held for a fixed duration, so generation is
//! just "repeat this carrier for this many samples" chained together.

use crate::color::ColorLayout;
use crate::constants::{
    CARRIER_1100, CARRIER_1200, CARRIER_1300, CARRIER_1500, CARRIER_1900, CARRIER_2300,
    HEADER_BREAK_SAMPLES, HEADER_LEADER_SAMPLES, SAMPLE_RATE, VIS_TILE_SAMPLES,
};
use crate::mode::Mode;

/// A checkerboard/solid/gradient test pattern, sampled per output pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestPattern {
    SolidWhite,
    SolidBlack,
    /// Horizontal gradient, black at the left edge to white at the right.
    Gradient,
    /// 8x8-pixel black/white checkerboard.
    Checkerboard,
}

impl TestPattern {
    /// Luma (0-255) of the pixel at `(x, y)`.
    fn luma(&self, x: u16, y: u16) -> u8 {
        match self {
            TestPattern::SolidWhite => 255,
            TestPattern::SolidBlack => 0,
            TestPattern::Gradient => x.min(255) as u8,
            TestPattern::Checkerboard => {
                if (x / 8 + y / 8) % 2 == 0 {
                    255
                } else {
                    0
                }
            }
        }
    }
}

/// Append `count` samples at `carrier` to `out`.
fn push_tone(out: &mut Vec<f32>, carrier: f32, count: usize) {
    out.extend(std::iter::repeat(carrier).take(count));
}

/// Map an 8-bit luma/chroma sample onto its scan-carrier frequency (inverse of
/// `line::map_to_byte`'s `[C1500, C2300] -> [0, 255]` mapping).
fn byte_to_carrier(value: u8) -> f32 {
    CARRIER_1500 + (value as f32 / 255.0) * (CARRIER_2300 - CARRIER_1500)
}

/// Synthesize the 300ms/10ms/300ms calibration header.
pub fn synth_header() -> Vec<f32> {
    let mut out = Vec::with_capacity(HEADER_LEADER_SAMPLES * 2 + HEADER_BREAK_SAMPLES);
    push_tone(&mut out, CARRIER_1900, HEADER_LEADER_SAMPLES);
    push_tone(&mut out, CARRIER_1200, HEADER_BREAK_SAMPLES);
    push_tone(&mut out, CARRIER_1900, HEADER_LEADER_SAMPLES);
    out
}

/// Synthesize the 10-tile VIS sequence (start bit, 7 data bits LSB-first, even parity,
/// stop bit) for `vis`.
pub fn synth_vis(vis: u8) -> Vec<f32> {
    let mut out = Vec::with_capacity(VIS_TILE_SAMPLES * 10);
    let mut push_bit = |bit: bool| {
        let carrier = if bit { CARRIER_1100 } else { CARRIER_1300 };
        push_tone(&mut out, carrier, VIS_TILE_SAMPLES);
    };
    push_bit(false); // start bit
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
    out
}

/// Synthesize every scan line for `mode` rendering `pattern`, including the line-sync
/// pulse (placed at `mode.line_sync_position()`, not always before component 0 — e.g.
/// Scottie's falls between components 1 and 2) and each component's own sync/delay.
pub fn synth_scan(mode: Mode, pattern: TestPattern) -> Vec<f32> {
    let pixels = mode.horizontal_pixels();
    let lines = mode.vertical_lines();
    let components = mode.component_count();
    let physical_lines = lines / mode.lines_per_line_sync() as u16;
    let mut out = Vec::new();

    let sync_position = mode.line_sync_position();
    // Mirrors `LineDecoder`'s own accumulator: each component's cursor advance is
    // `floor(comp_dur * SAMPLE_RATE + line_offset)`, with the leftover fraction carried
    // into the next component/line. Matching that here keeps this generator's total
    // per-component sample count exactly in step with what the decoder consumes,
    // rather than drifting over hundreds of lines the way independent rounding would.
    let mut line_offset = 0.0f32;

    for y in 0..physical_lines {
        for c in 0..components {
            if c == sync_position {
                push_tone(
                    &mut out,
                    CARRIER_1200,
                    (mode.line_sync_duration() * SAMPLE_RATE).round() as usize,
                );
            }

            if c > 0 || mode.has_component_sync() {
                // Wraase SC-1 is the only family whose component sync is edge-searched
                // like a line sync, so it alone needs the 1200 Hz tone; every other
                // family's component break is a fixed-delay 1500 Hz tone (see
                // scenario 1's "0.572 ms @ 1500 Hz").
                let carrier = if mode.has_component_sync() {
                    CARRIER_1200
                } else {
                    CARRIER_1500
                };
                push_tone(
                    &mut out,
                    carrier,
                    (mode.component_sync_duration(c) * SAMPLE_RATE).round() as usize,
                );
            }
            let comp_dur = mode.component_duration(c);
            let advance_f = comp_dur * SAMPLE_RATE + line_offset;
            let comp_samples = advance_f.floor().max(0.0) as usize;
            line_offset = advance_f - comp_samples as f32;

            let samples_per_pixel = comp_samples / pixels as usize;
            let remainder = comp_samples - samples_per_pixel * pixels as usize;
            for x in 0..pixels {
                let value = component_value(mode.color_layout(), c, pattern, x, y);
                // Distribute the fractional remainder across the first `remainder`
                // pixels so the component's total sample count matches `comp_samples`
                // exactly.
                let len = samples_per_pixel + if (x as usize) < remainder { 1 } else { 0 };
                push_tone(&mut out, byte_to_carrier(value), len);
            }
        }
    }
    out
}

/// Resolve the raw component byte a synthesizer should transmit for pixel `(x, y)`,
/// component index `c`, under `layout`, so that a decoder applying the matching
/// conversion recovers `pattern`'s RGB color exactly for the BW/RGB/GBR layouts (the
/// chroma-subsampled layouts approximate: luma carries the pattern, chroma is neutral).
fn component_value(layout: ColorLayout, c: u8, pattern: TestPattern, x: u16, y: u16) -> u8 {
    let luma = pattern.luma(x, y);
    match layout {
        ColorLayout::Bw => luma,
        ColorLayout::Rgb => luma,
        ColorLayout::Gbr => luma,
        ColorLayout::Yuv422 | ColorLayout::Yuv420 => {
            if c == 0 {
                luma
            } else {
                128 // neutral chroma
            }
        }
        ColorLayout::Yuv420Pd => {
            if c == 0 || c == 3 {
                luma
            } else {
                128
            }
        }
    }
}

/// Synthesize a complete transmission: header, VIS, and scan data for `mode`.
pub fn synth_transmission(mode: Mode, pattern: TestPattern) -> Vec<f32> {
    let mut out = synth_header();
    out.extend(synth_vis(mode.vis()));
    out.extend(synth_scan(mode, pattern));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_has_exact_sample_counts() {
        let header = synth_header();
        assert_eq!(header.len(), 3600 + 120 + 3600);
        assert_eq!(header[0], CARRIER_1900);
        assert_eq!(header[3600], CARRIER_1200);
        assert_eq!(header[3720], CARRIER_1900);
    }

    #[test]
    fn vis_tiles_encode_expected_bit_pattern() {
        // vis 44 = 0b0101100 -> bits LSBF: 0,0,1,1,0,1,0 ; ones=3 -> parity=1
        let tiles = synth_vis(44);
        assert_eq!(tiles.len(), 360 * 10);
        assert_eq!(tiles[0], CARRIER_1300); // start bit = 0
        assert_eq!(tiles[360 * 3], CARRIER_1100); // third data bit = 1
        assert_eq!(tiles[360 * 8], CARRIER_1100); // parity tile = 1
    }

    #[test]
    fn martin_m1_solid_white_scan_is_uniform_2300hz_in_color_region() {
        let mode = Mode::from_vis(44).unwrap();
        let scan = synth_scan(mode, TestPattern::SolidWhite);
        let sync_len = (mode.line_sync_duration() * SAMPLE_RATE).round() as usize;
        // Somewhere inside the first component's pixel data the carrier should read as
        // the white (2300 Hz) tone.
        let probe = sync_len + 100;
        assert!((scan[probe] - CARRIER_2300).abs() < 1e-6);
    }

    #[test]
    fn transmission_concatenates_header_vis_and_scan() {
        let mode = Mode::from_vis(44).unwrap();
        let transmission = synth_transmission(mode, TestPattern::SolidBlack);
        let header_vis_len = 3600 + 120 + 3600 + 360 * 10;
        assert!(transmission.len() > header_vis_len);
        assert_eq!(transmission[0], CARRIER_1900);
    }

    #[test]
    fn checkerboard_alternates_luma_by_8px_block() {
        assert_eq!(TestPattern::Checkerboard.luma(0, 0), 255);
        assert_eq!(TestPattern::Checkerboard.luma(8, 0), 0);
        assert_eq!(TestPattern::Checkerboard.luma(0, 8), 0);
    }
}
