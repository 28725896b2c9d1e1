//! Color-space conversion: per-mode component layout to RGB888
//!
//! Per-family conversion table (BW, RGB, GBR, YUV422, YUV420, YUV420-PD). The YUV420 conversion needs a one-line
//! back-buffer (owned by the line decoder, sized for the widest mode) because it emits
//! two output rows for every two physical scans.

/// How a mode's raw per-component samples map onto an RGB888 pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorLayout {
    /// Single luma component, replicated to R, G, and B.
    Bw,
    /// Components are already R, G, B in that order.
    Rgb,
    /// Components are G, B, R in that order (rotate to R, G, B).
    Gbr,
    /// Components are Y, Cr, Cb sampled once per pixel (4:2:2 chroma).
    Yuv422,
    /// Components are Y, chroma sampled once per *line pair* (4:2:0 chroma).
    Yuv420,
    /// PD-style: each row entry carries (Y1, Cr, Cb, Y2) for a pair of output rows.
    Yuv420Pd,
}

/// Clamp `v` into `[0, 255]` and truncate to `u8`.
pub(crate) fn clamp_u8(v: f32) -> u8 {
    if v <= 0.0 {
        0
    } else if v >= 255.0 {
        255
    } else {
        v as u8
    }
}

/// Convert one `(Y, Cr, Cb)` triple (Cr/Cb already bias-removed, i.e. in `[-128,127]`)
/// to RGB888 using the standard integer YCbCr approximation.
pub fn yuv_to_rgb(y: u8, cr: i32, cb: i32) -> [u8; 3] {
    let y = y as i32;
    let r = y + (45 * cr) / 32;
    let g = y - (11 * cb + 23 * cr) / 32;
    let b = y + (113 * cb) / 64;
    [clamp_u8(r as f32), clamp_u8(g as f32), clamp_u8(b as f32)]
}

/// Rotate a GBR-ordered raw triple into RGB order: `R=raw2, G=raw0, B=raw1`.
pub fn gbr_to_rgb(raw: [u8; 3]) -> [u8; 3] {
    [raw[2], raw[0], raw[1]]
}

/// Replicate a single luma byte across all three RGB channels.
pub fn bw_to_rgb(y: u8) -> [u8; 3] {
    [y, y, y]
}
