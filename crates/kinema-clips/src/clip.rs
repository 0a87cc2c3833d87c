//! Motion clip data model.

use serde::{Deserialize, Serialize};

/// Keyframed local-rotation curve for one named bone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationTrack {
    pub bone: String,
    /// Keyframe times in seconds, ascending.
    pub times: Vec<f32>,
    /// Euler angle triples, one per keyframe time.
    pub rotations: Vec<[f32; 3]>,
}

impl RotationTrack {
    /// Linearly interpolated rotation at `t`, clamped to the track's range.
    /// Returns `None` for an empty or malformed track.
    pub fn sample(&self, t: f32) -> Option<[f32; 3]> {
        if self.times.is_empty() || self.times.len() != self.rotations.len() {
            return None;
        }
        if t <= self.times[0] {
            return Some(self.rotations[0]);
        }
        let last = self.times.len() - 1;
        if t >= self.times[last] {
            return Some(self.rotations[last]);
        }

        let next = self.times.partition_point(|&time| time <= t);
        let (t0, t1) = (self.times[next - 1], self.times[next]);
        let span = t1 - t0;
        let frac = if span > 0.0 { (t - t0) / span } else { 0.0 };

        let a = self.rotations[next - 1];
        let b = self.rotations[next];
        Some([
            a[0] + (b[0] - a[0]) * frac,
            a[1] + (b[1] - a[1]) * frac,
            a[2] + (b[2] - a[2]) * frac,
        ])
    }
}

/// One named motion clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionClip {
    pub name: String,
    pub duration_secs: f32,
    #[serde(default)]
    pub tracks: Vec<RotationTrack>,
}
