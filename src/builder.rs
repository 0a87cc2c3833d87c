//! Builder for configuring and constructing an `AvatarEngine`.

use kinema_core::{EngineConfig, WavePolicy};

use crate::{AvatarEngine, Result};

#[cfg(feature = "clips")]
use kinema_clips::{ClipFetcher, RuntimeHandle};
#[cfg(feature = "clips")]
use std::sync::Arc;

/// Settings are validated at `build()`; out-of-range values are rejected
/// there rather than silently clamped, so a host misconfiguration is caught
/// before the first frame instead of rendering wrong for its whole session.
///
/// # Example
///
/// ```ignore
/// use kinema::prelude::*;
///
/// let engine = AvatarEngine::builder()
///     .wave_duration(2.5)
///     .wave_policy(WavePolicy::SymmetricalHold)
///     .build()?;
/// ```
pub struct AvatarEngineBuilder {
    config: EngineConfig,

    #[cfg(feature = "clips")]
    clip_runtime: Option<RuntimeHandle>,
    #[cfg(feature = "clips")]
    clip_fetcher: Option<Arc<dyn ClipFetcher>>,
}

impl Default for AvatarEngineBuilder {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),

            #[cfg(feature = "clips")]
            clip_runtime: None,
            #[cfg(feature = "clips")]
            clip_fetcher: None,
        }
    }
}

impl AvatarEngineBuilder {
    /// Start from a complete (possibly deserialized) configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Seconds a wave plays before reverting. Default: 2.0.
    pub fn wave_duration(mut self, seconds: f32) -> Self {
        self.config.wave_duration = seconds;
        self
    }

    /// How `Wave` returns to `Idle`. Default: `DirectRevert`.
    pub fn wave_policy(mut self, policy: WavePolicy) -> Self {
        self.config.wave_policy = policy;
        self
    }

    /// Spectrum bin count expected from the audio feed. Default: 128.
    pub fn spectrum_bins(mut self, bins: usize) -> Self {
        self.config.spectrum_bins = bins;
        self
    }

    /// Loudness normalization divisor. Default: 50.0.
    pub fn normalization_divisor(mut self, divisor: f32) -> Self {
        self.config.normalization_divisor = divisor;
        self
    }

    /// Runtime the clip loader spawns onto. Required together with
    /// [`clip_fetcher`](Self::clip_fetcher) before `load_clips` works.
    #[cfg(feature = "clips")]
    pub fn clip_runtime(mut self, handle: RuntimeHandle) -> Self {
        self.clip_runtime = Some(handle);
        self
    }

    #[cfg(feature = "clips")]
    pub fn clip_fetcher(mut self, fetcher: Arc<dyn ClipFetcher>) -> Self {
        self.clip_fetcher = Some(fetcher);
        self
    }

    pub fn build(self) -> Result<AvatarEngine> {
        self.config.validate()?;

        Ok(AvatarEngine::from_parts(
            self.config,
            #[cfg(feature = "clips")]
            self.clip_runtime,
            #[cfg(feature = "clips")]
            self.clip_fetcher,
        ))
    }
}
