//! WAV file I/O for normalized sample streams
//!
//! Grounded on `bin/mix_wav.rs`'s use of `hound` for WAV read/write; generalized here
//! into the read and write directions this crate actually needs: loading a captured
//! mono 12 kHz recording as normalized `f32` samples, and (for the simulator) writing
//! one back out as 16-bit PCM.

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::{Result, WavNotMonoSnafu, WavReadSnafu, WavWriteSnafu};
use snafu::ResultExt;

/// Read a mono WAV file and return its samples as normalized `f32` in `[-1.0, 1.0]`.
///
/// Accepts both integer and float sample formats; integer PCM is scaled by its bit
/// depth's full-scale value.
pub fn read_normalized_wav(path: &str) -> Result<Vec<f32>> {
    let mut reader = WavReader::open(path).context(WavReadSnafu { path })?;
    let spec = reader.spec();
    if spec.channels != 1 {
        return WavNotMonoSnafu {
            path,
            channels: spec.channels,
        }
        .fail();
    }

    let samples = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, hound::Error>>()
            .context(WavReadSnafu { path })?,
        SampleFormat::Int => {
            let full_scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / full_scale))
                .collect::<std::result::Result<Vec<f32>, hound::Error>>()
                .context(WavReadSnafu { path })?
        }
    };

    Ok(samples)
}

/// Write normalized `f32` samples (clamped to `[-1.0, 1.0]`) as a mono 16-bit PCM WAV
/// file at `sample_rate` Hz.
pub fn write_normalized_wav(path: &str, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec).context(WavWriteSnafu { path })?;
    for &sample in samples {
        let clamped = sample.clamp(-1.0, 1.0);
        let pcm = (clamped * i16::MAX as f32) as i16;
        writer.write_sample(pcm).context(WavWriteSnafu { path })?;
    }
    writer.finalize().context(WavWriteSnafu { path })?;
    Ok(())
}
