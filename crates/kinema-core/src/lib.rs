//! Core types for the Kinema avatar engine: the behavior state machine,
//! frame-rate-independent smoothing, and engine configuration.
//!
//! Everything in this crate is single-threaded and allocation-free on the
//! per-tick path. The engine clock is a plain `f64` seconds accumulator fed
//! by the host's frame callback; no wall-clock reads happen here.

mod behavior;
mod config;
mod error;
mod smooth;

pub use behavior::{AnimState, Behavior, BehaviorFsm, Transition, WavePhase};
pub use config::{EngineConfig, WavePolicy};
pub use error::{Error, Result};
pub use smooth::{alpha, approach, approach_vec3, Smoothed, REF_DT};
