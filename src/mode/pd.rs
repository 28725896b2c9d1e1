//! PD-family per-VIS resolution/duration table
//!
//! PD modes don't derive their resolution from VIS bits the way Robot/Martin/Scottie/
//! Wraase do; each of the seven PD VIS codes names a fixed frame size and per-component
//! scan duration. Table values are grounded on `modes.hpp::PDMode`.

use once_cell::sync::Lazy;
use std::collections::HashMap;

struct PdEntry {
    pixels: u16,
    lines: u16,
    component_duration: f32,
}

static TABLE: Lazy<HashMap<u8, PdEntry>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(93, PdEntry { pixels: 320, lines: 256, component_duration: 0.09152 }); // PD 50
    m.insert(99, PdEntry { pixels: 320, lines: 256, component_duration: 0.170240 }); // PD 90
    m.insert(95, PdEntry { pixels: 640, lines: 496, component_duration: 0.1216 }); // PD 120
    m.insert(98, PdEntry { pixels: 512, lines: 400, component_duration: 0.195584 }); // PD 160
    m.insert(96, PdEntry { pixels: 640, lines: 496, component_duration: 0.18304 }); // PD 180
    m.insert(97, PdEntry { pixels: 640, lines: 496, component_duration: 0.24448 }); // PD 240
    m.insert(94, PdEntry { pixels: 800, lines: 616, component_duration: 0.2288 }); // PD 290
    m
});

/// `(pixels, lines)` for a PD VIS code. Falls back to PD 50's dimensions for any VIS
/// code outside the known table (`Mode::from_vis` never constructs one, so this is
/// unreachable in practice).
pub fn resolution(vis: u8) -> (u16, u16) {
    TABLE
        .get(&vis)
        .map(|e| (e.pixels, e.lines))
        .unwrap_or((320, 256))
}

/// Per-component scan duration (identical for all 4 components within a PD mode).
pub fn component_duration(vis: u8) -> f32 {
    TABLE.get(&vis).map(|e| e.component_duration).unwrap_or(0.09152)
}
