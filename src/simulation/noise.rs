//! Noise generation for decoder robustness tests
//!
//! Covers the noise-floor and offset/inversion robustness scenarios: Gaussian and
//! uniform noise, DC bias, and sideband inversion, built on `rand`/`rand_distr`. No
//! SSB bandpass filtering, QSB fading, or carrier flutter is modeled — the decoder
//! operates on already-demodulated normalized samples, not an RF channel.

use rand_distr::{Distribution, Normal, Uniform};

/// `num_samples` of zero-mean Gaussian noise with standard deviation `sigma`.
pub fn generate_white_noise(num_samples: usize, sigma: f32) -> Vec<f32> {
    let mut rng = rand::rng();
    let normal = Normal::new(0.0, sigma).unwrap();
    (0..num_samples).map(|_| normal.sample(&mut rng)).collect()
}

/// `num_samples` of uniform noise in `[-amplitude, amplitude]`, used for the
/// "remains in SYNC forever" noise-floor scenario.
pub fn generate_uniform_noise(num_samples: usize, amplitude: f32) -> Vec<f32> {
    let mut rng = rand::rng();
    let dist = Uniform::new_inclusive(-amplitude, amplitude).unwrap();
    (0..num_samples).map(|_| dist.sample(&mut rng)).collect()
}

/// Add zero-mean Gaussian noise with standard deviation `sigma` to every sample.
pub fn with_noise(samples: &[f32], sigma: f32) -> Vec<f32> {
    let mut rng = rand::rng();
    let normal = Normal::new(0.0, sigma).unwrap();
    samples.iter().map(|&s| s + normal.sample(&mut rng)).collect()
}

/// Add a constant DC bias to every sample (used to test offset tolerance).
pub fn with_dc_bias(samples: &[f32], bias: f32) -> Vec<f32> {
    samples.iter().map(|&s| s + bias).collect()
}

/// Negate every sample (simulates LSB/USB sideband inversion).
pub fn inverted(samples: &[f32]) -> Vec<f32> {
    samples.iter().map(|&s| -s).collect()
}
