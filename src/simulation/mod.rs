//! Synthetic signal generation for tests, fixtures, and the `sstvsim` binary

pub mod noise;
pub mod synth;
