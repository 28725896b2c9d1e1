//! Streaming SSTV demodulator
//!
//! Decodes a normalized-frequency-domain sample stream (an FM discriminator's output,
//! already scaled so that a carrier `F` Hz arrives as `F / 6000`) into framed RGB888
//! images. [`Decoder`] is the entry point; see its docs for the cooperative
//! `can_process`/`process` contract.

pub mod color;
pub mod config;
pub mod constants;
pub mod decoder;
pub mod error;
pub mod io;
pub mod line;
pub mod mode;
pub mod signal;
pub mod simulation;
pub mod sync;
pub mod tracing_init;
pub mod wav;

pub use config::DecoderConfig;
pub use decoder::{Decoder, DecoderState};
pub use error::{Result, SstvError};
pub use io::{ByteSink, SampleSource, VecByteSink, VecSampleSource};
pub use mode::Mode;
