//! SSTV signal constants
//!
//! All carriers are expressed in the normalized-sample domain used throughout this
//! crate: an instantaneous frequency of `F` Hz arrives as `F / (SAMPLE_RATE / 2)`.

/// Input sample rate in Hz. The decoder assumes samples already arrive at this rate;
/// resampling is out of scope (upstream collaborator's job).
pub const SAMPLE_RATE: f32 = 12_000.0;

/// Nyquist frequency used to normalize carrier frequencies into the sample domain.
pub const NYQUIST: f32 = SAMPLE_RATE / 2.0;

/// Image sync carrier (300 ms / 300 ms either side of the 1200 Hz break).
pub const CARRIER_1900: f32 = 1900.0 / NYQUIST;
/// Image sync break and line sync carrier.
pub const CARRIER_1200: f32 = 1200.0 / NYQUIST;
/// Minimum color carrier (black).
pub const CARRIER_1500: f32 = 1500.0 / NYQUIST;
/// Maximum color carrier (white).
pub const CARRIER_2300: f32 = 2300.0 / NYQUIST;
/// VIS bit value 1.
pub const CARRIER_1100: f32 = 1100.0 / NYQUIST;
/// VIS bit value 0.
pub const CARRIER_1300: f32 = 1300.0 / NYQUIST;

/// Allowed DC-offset disagreement between the three header segments, in the
/// normalized sample domain (100 Hz).
pub const MAX_OFFSET_DEVIATION: f32 = 100.0 / NYQUIST;

/// Line-sync "above threshold" margin above the 1200 Hz carrier (100 Hz).
pub const EDGE_THRESHOLD_MARGIN: f32 = 100.0 / NYQUIST;

/// Duration of the leading 1900 Hz tone in the calibration header, in samples.
pub const HEADER_LEADER_SAMPLES: usize = 3600;
/// Duration of the 1200 Hz break in the calibration header, in samples.
pub const HEADER_BREAK_SAMPLES: usize = 120;
/// Total calibration header duration, in samples (leader + break + leader).
pub const HEADER_TOTAL_SAMPLES: usize =
    HEADER_LEADER_SAMPLES + HEADER_BREAK_SAMPLES + HEADER_LEADER_SAMPLES;

/// Duration of one VIS tile (bit), in samples (30 ms).
pub const VIS_TILE_SAMPLES: usize = 360;
/// Number of VIS tiles: start bit, 7 data bits, parity, stop bit.
pub const VIS_TILE_COUNT: usize = 10;
/// Total VIS duration, in samples.
pub const VIS_TOTAL_SAMPLES: usize = VIS_TILE_SAMPLES * VIS_TILE_COUNT;

/// Number of samples from a committed header candidate's start to the end of the
/// calibration header's preamble (header total) minus a small guard, i.e. where VIS
/// decode is attempted.
pub const VIS_DECODE_GUARD_SAMPLES: usize = 7220;

/// Default candidate FIFO capacity, used by [`crate::config::DecoderConfig`] unless
/// overridden.
pub const DEFAULT_FIFO_CAPACITY: usize = 100;

/// Boxcar window length used by the line-sync edge search.
pub const EDGE_SEARCH_BOXCAR_LEN: usize = 50;
