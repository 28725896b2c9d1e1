//! VIS byte decode
//!
//! Grounded on `csdr-sstv.cpp::getVis`/`readRawVis`: ten 30 ms tone tiles (start bit,
//! 7 data bits LSB-first, even parity, stop bit), decoded with [`bitvec`] since the
//! payload really is a bitfield with a parity check, the same shape `bitvec` is built
//! for.

use bitvec::prelude::*;

use crate::config::DecoderConfig;
use crate::constants::{CARRIER_1200, VIS_TILE_COUNT, VIS_TILE_SAMPLES, VIS_TOTAL_SAMPLES};
use crate::signal::std_dev;

/// Decode the VIS byte from the next [`VIS_TOTAL_SAMPLES`] corrected samples.
///
/// Returns `None` if the tiles are too noisy (mean deviation above
/// `config.vis_deviation_threshold`) or parity fails. `samples` must hold at least
/// [`VIS_TOTAL_SAMPLES`] raw (uncorrected) samples; `offset`/`invert` are applied here.
pub fn decode_vis(samples: &[f32], offset: f32, invert: f32, config: &DecoderConfig) -> Option<u8> {
    if samples.len() < VIS_TOTAL_SAMPLES {
        return None;
    }

    let mut tile_means = [0.0f32; VIS_TILE_COUNT];
    let mut tile_devs = [0.0f32; VIS_TILE_COUNT];
    for (i, tile_means_dev) in tile_means.iter_mut().zip(tile_devs.iter_mut()).enumerate() {
        let tile = &samples[i * VIS_TILE_SAMPLES..(i + 1) * VIS_TILE_SAMPLES];
        let (mean, dev) = std_dev(tile);
        *tile_means_dev.0 = mean;
        *tile_means_dev.1 = dev;
    }

    let mean_deviation = tile_devs.iter().sum::<f32>() / VIS_TILE_COUNT as f32;
    if mean_deviation > config.vis_deviation_threshold {
        tracing::debug!(mean_deviation, "bad overall VIS error, rejecting");
        return None;
    }

    let bit_of = |mean: f32| -> bool { invert * mean - offset < CARRIER_1200 };

    let mut data = bitvec![u8, Lsb0; 0; 7];
    for i in 0..7 {
        data.set(i, bit_of(tile_means[i + 1]));
    }
    let parity_bit = bit_of(tile_means[8]);

    let ones = data.count_ones() + usize::from(parity_bit);
    if ones % 2 != 0 {
        tracing::debug!("VIS parity failed, rejecting");
        return None;
    }

    Some(data.load::<u8>())
}
