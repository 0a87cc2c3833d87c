//! Error types for kinema-clips.
//!
//! All of these are non-fatal by contract: the loader converts every
//! per-request failure into an empty clip set before the engine sees it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Clip parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Clip source unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, ClipError>;
