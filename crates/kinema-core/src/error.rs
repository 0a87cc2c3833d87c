//! Error types for kinema-core.
//!
//! Configuration is the only fallible surface here; every per-tick operation
//! is total by contract.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid wave duration: {0}. Must be between 0.5 and 10.0 seconds")]
    InvalidWaveDuration(f32),

    #[error("Invalid spectrum bin count: {0}. Must be greater than zero")]
    InvalidSpectrumBins(usize),

    #[error("Invalid normalization divisor: {0}. Must be a positive finite value")]
    InvalidDivisor(f32),
}

pub type Result<T> = core::result::Result<T, Error>;
