//! Frame-rate-independent smoothing toward a target value.
//!
//! The smoothing factors in this engine are expressed as a per-tick lerp
//! factor `k` at the nominal 60 Hz tick rate. [`alpha`] converts `k` into
//! the equivalent factor for an arbitrary `dt`, so variable tick rates
//! converge along the same curve instead of faster or slower.

use glam::Vec3;

/// Nominal tick interval the `k` factors are tuned against (60 Hz).
pub const REF_DT: f32 = 1.0 / 60.0;

/// Convert a per-reference-tick lerp factor into the factor for `dt`.
///
/// `alpha(k, REF_DT) == k`; doubling `dt` covers the same fraction of the
/// remaining distance as two reference ticks would.
#[inline]
pub fn alpha(k: f32, dt: f32) -> f32 {
    let k = k.clamp(0.0, 1.0);
    if k >= 1.0 {
        return 1.0;
    }
    1.0 - (1.0 - k).powf(dt / REF_DT)
}

/// One exponential-approach step: `current + (target - current) * alpha`.
#[inline]
pub fn approach(current: f32, target: f32, k: f32, dt: f32) -> f32 {
    current + (target - current) * alpha(k, dt)
}

/// Component-wise [`approach`] over a rotation triple.
#[inline]
pub fn approach_vec3(current: Vec3, target: Vec3, k: f32, dt: f32) -> Vec3 {
    current + (target - current) * alpha(k, dt)
}

/// Stateful smoothed scalar for values the engine owns between ticks
/// (morph channel weights). Bone rotations are smoothed in place on the
/// host's scene graph via [`approach_vec3`] instead.
#[derive(Debug, Clone)]
pub struct Smoothed {
    current: f32,
    target: f32,
    k: f32,
}

impl Smoothed {
    pub fn new(initial: f32, k: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            k,
        }
    }

    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
    }

    /// Advance by `dt` seconds and return the new current value.
    #[inline]
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.current = approach(self.current, self.target, self.k, dt);
        self.current
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn is_settled(&self, tolerance: f32) -> bool {
        (self.current - self.target).abs() <= tolerance
    }

    #[inline]
    pub fn skip_to_target(&mut self) {
        self.current = self.target;
    }
}
