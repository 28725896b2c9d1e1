//! Windowed statistics over normalized samples
//!
//! Used both by the sync/VIS detector to estimate a DC offset and quantify how "flat"
//! a nominally single-tone segment reads, and by the line decoder's edge search.

/// Mean and sample standard deviation (divisor `len - 1`) of `samples`.
///
/// A low deviation indicates a clean, nearly-constant tone; the mean approximates
/// `target carrier + offset` for a segment that should be holding one carrier.
pub fn std_dev(samples: &[f32]) -> (f32, f32) {
    let len = samples.len();
    assert!(len >= 2, "std_dev needs at least 2 samples, got {len}");

    let mean = samples.iter().sum::<f32>() / len as f32;
    let variance = samples
        .iter()
        .map(|&s| {
            let d = s - mean;
            d * d
        })
        .sum::<f32>()
        / (len - 1) as f32;

    (mean, variance.sqrt())
}

/// Mean absolute deviation of `samples` from `target + offset`.
///
/// Used for offset-free candidate evaluation: lower is a better match to `target`.
pub fn windowed_demean_error(samples: &[f32], target: f32, offset: f32) -> f32 {
    assert!(!samples.is_empty(), "windowed_demean_error needs at least 1 sample");
    samples
        .iter()
        .map(|&s| (s - target - offset).abs())
        .sum::<f32>()
        / samples.len() as f32
}
