//! Engine configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// How `Wave` returns to `Idle` once its duration elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WavePolicy {
    /// Revert to `Idle` immediately when the duration elapses.
    #[default]
    DirectRevert,
    /// Smooth the forearm into the mirror-of-resting pose first; the state
    /// machine completes the transition only once the pose is within
    /// tolerance of that target.
    SymmetricalHold,
}

/// Validated engine settings. Hosts can persist this via serde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seconds a wave plays before reverting (observed range 2.0–3.0).
    pub wave_duration: f32,
    pub wave_policy: WavePolicy,
    /// Frequency-magnitude bin count expected from the audio feed.
    pub spectrum_bins: usize,
    /// Divisor mapping mean 8-bit magnitude into [0, 1]. Tuned so typical
    /// speech loudness lands near the top of the range.
    pub normalization_divisor: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            wave_duration: 2.0,
            wave_policy: WavePolicy::DirectRevert,
            spectrum_bins: 128,
            normalization_divisor: 50.0,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.wave_duration.is_finite() || !(0.5..=10.0).contains(&self.wave_duration) {
            return Err(Error::InvalidWaveDuration(self.wave_duration));
        }
        if self.spectrum_bins == 0 {
            return Err(Error::InvalidSpectrumBins(self.spectrum_bins));
        }
        if !self.normalization_divisor.is_finite() || self.normalization_divisor <= 0.0 {
            return Err(Error::InvalidDivisor(self.normalization_divisor));
        }
        Ok(())
    }
}
