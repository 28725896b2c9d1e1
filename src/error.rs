//! Boundary-facing errors
//!
//! Rejections internal to the sync/VIS/line state machine (no lock, bad parity,
//! unimplemented mode) are not modeled here — they are expected, frequent, and handled
//! by falling back to [`crate::decoder::DecoderState::Sync`], not by returning `Err`.
//! This enum covers failures an embedding host actually needs to react to: malformed
//! fixtures, a nonsensical configuration, a CLI argument mistake.

use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SstvError {
    /// WAV file too short to contain a valid header
    #[snafu(display("WAV file '{path}' is too small to be a valid WAV file"))]
    WavTooSmall { path: String },

    /// WAV decoding failed
    #[snafu(display("failed to read WAV file '{path}': {source}"))]
    WavRead {
        path: String,
        source: hound::Error,
    },

    /// WAV encoding failed
    #[snafu(display("failed to write WAV file '{path}': {source}"))]
    WavWrite {
        path: String,
        source: hound::Error,
    },

    /// Only mono WAV files are supported
    #[snafu(display("WAV file '{path}' has {channels} channels, expected 1 (mono)"))]
    WavNotMono { path: String, channels: u16 },

    /// `DecoderConfig` built with a zero-capacity candidate FIFO
    #[snafu(display("fifo_capacity must be at least 1"))]
    ZeroFifoCapacity,

    /// `DecoderConfig` built with a non-positive threshold
    #[snafu(display("{field} must be a finite, positive value, got {value}"))]
    InvalidThreshold { field: &'static str, value: f32 },

    /// A CLI argument was missing or malformed
    #[snafu(display("{message}"))]
    InvalidArgument { message: String },
}

pub type Result<T, E = SstvError> = core::result::Result<T, E>;
