//! Centralized error type for the kinema umbrella crate.
//!
//! Wraps subsystem errors so `?` propagates naturally across crate
//! boundaries. Only construction and clip-load kickoff are fallible; every
//! per-tick operation is total by contract.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] kinema_core::Error),

    #[cfg(feature = "clips")]
    #[error("Clips: {0}")]
    Clips(#[from] kinema_clips::ClipError),

    #[error("Clip loading requested but no runtime or fetcher was configured")]
    ClipsNotConfigured,
}

pub type Result<T> = std::result::Result<T, Error>;
