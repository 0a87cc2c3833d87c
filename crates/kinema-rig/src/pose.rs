//! Procedural pose synthesis.
//!
//! Computes per-role target rotations from the current behavior state and
//! writes them into the host rig each tick, either directly (oscillators)
//! or through frame-rate-corrected smoothing. Outputs are pure functions of
//! `(state, elapsed, previous rotation)` so recorded input sequences
//! reproduce identical output sequences.

use std::f32::consts::FRAC_PI_3;

use glam::Vec3;
use kinema_core::{approach_vec3, AnimState, Behavior, WavePhase};

use crate::roles::{BoneRole, BoneRoleMap};
use crate::skeleton::Rig;

/// Per-tick lerp factor returning arms to rest (at the nominal tick rate).
const IDLE_ARM_K: f32 = 0.15;
/// Head settles slightly slower than the arms.
const IDLE_HEAD_K: f32 = 0.1;

/// Wave oscillation angular frequency, rad/s.
const WAVE_FREQ: f32 = 2.5;
/// Upper arm raised orientation: abduction away from the torso.
const WAVE_UPPER_ABDUCTION: f32 = 0.7;
/// Upper arm raised orientation: forward lift putting the elbow at hip level.
const WAVE_UPPER_LIFT: f32 = -0.25;
/// Subtle upper-arm sway amplitude while waving.
const WAVE_UPPER_SWAY: f32 = 0.1;
/// Forearm swing amplitude, ±60°.
const WAVE_FOREARM_SWING: f32 = FRAC_PI_3;
/// Forearm y stays in the positive quadrant (0.3..=0.5) during the wave so
/// the hand cannot swing into the body.
const WAVE_FOREARM_Y_BASE: f32 = 0.3;
const WAVE_FOREARM_Y_GAIN: f32 = 0.2;

/// Mirror of the resting opposite limb; the hold target after the wave.
const HOLD_TARGET: Vec3 = Vec3::new(-0.4, -0.3, 0.0);
const HOLD_K: f32 = 0.15;
/// Per-axis tolerance for declaring the hold pose reached, radians.
const HOLD_TOLERANCE: f32 = 0.05;

/// Nod angular frequency, rad/s, and amplitude, radians.
const NOD_FREQ: f32 = 1.5;
const NOD_AMPLITUDE: f32 = 0.4;

/// Outcome of one pose tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoseReport {
    /// True once the holding pose is within tolerance; feeds the state
    /// machine's `pose_settled` under the symmetrical-hold policy.
    pub hold_settled: bool,
}

/// Writes per-role rotations into the rig every tick.
#[derive(Debug, Clone, Default)]
pub struct PoseSynthesizer;

impl PoseSynthesizer {
    pub fn new() -> Self {
        Self
    }

    pub fn tick(
        &mut self,
        state: &AnimState,
        dt: f32,
        rig: &mut dyn Rig,
        roles: &BoneRoleMap,
    ) -> PoseReport {
        let t = state.seconds_in_state;
        let mut report = PoseReport::default();

        match state.behavior {
            Behavior::Wave => match state.wave_phase {
                WavePhase::Waving => {
                    write(rig, roles, BoneRole::RightUpperArm, |_| {
                        Vec3::new(
                            WAVE_UPPER_LIFT,
                            WAVE_UPPER_ABDUCTION,
                            (t * WAVE_FREQ).sin() * WAVE_UPPER_SWAY,
                        )
                    });
                    write(rig, roles, BoneRole::RightForearm, |_| {
                        let swing = (t * WAVE_FREQ).sin() * WAVE_FOREARM_SWING;
                        Vec3::new(
                            swing,
                            WAVE_FOREARM_Y_BASE + swing.abs() * WAVE_FOREARM_Y_GAIN,
                            0.0,
                        )
                    });
                    write(rig, roles, BoneRole::Head, |current| {
                        approach_vec3(current, Vec3::ZERO, IDLE_HEAD_K, dt)
                    });
                }
                WavePhase::Holding => {
                    write(rig, roles, BoneRole::RightUpperArm, |current| {
                        approach_vec3(current, Vec3::ZERO, HOLD_K, dt)
                    });
                    // An unresolved forearm settles immediately, otherwise a
                    // holding wave could never complete its transition.
                    report.hold_settled = true;
                    write(rig, roles, BoneRole::RightForearm, |current| {
                        let next = approach_vec3(current, HOLD_TARGET, HOLD_K, dt);
                        report.hold_settled =
                            (next - HOLD_TARGET).abs().max_element() < HOLD_TOLERANCE;
                        next
                    });
                    write(rig, roles, BoneRole::Head, |current| {
                        approach_vec3(current, Vec3::ZERO, IDLE_HEAD_K, dt)
                    });
                }
            },

            Behavior::Nod => {
                write(rig, roles, BoneRole::Head, |current| {
                    let settle = approach_vec3(current, Vec3::ZERO, IDLE_HEAD_K, dt);
                    Vec3::new((t * NOD_FREQ).sin() * NOD_AMPLITUDE, settle.y, settle.z)
                });
                self.relax_arms(rig, roles, dt);
            }

            // Talk contributes no pose; mouth articulation is the morph
            // blender's job.
            Behavior::Idle | Behavior::Talk => {
                self.relax_arms(rig, roles, dt);
                write(rig, roles, BoneRole::Head, |current| {
                    approach_vec3(current, Vec3::ZERO, IDLE_HEAD_K, dt)
                });
            }
        }

        report
    }

    fn relax_arms(&self, rig: &mut dyn Rig, roles: &BoneRoleMap, dt: f32) {
        for role in [BoneRole::RightUpperArm, BoneRole::RightForearm] {
            write(rig, roles, role, |current| {
                approach_vec3(current, Vec3::ZERO, IDLE_ARM_K, dt)
            });
        }
    }
}

/// Apply `f` to the role's bone rotation. No-op when the role is unresolved.
fn write(
    rig: &mut dyn Rig,
    roles: &BoneRoleMap,
    role: BoneRole,
    f: impl FnOnce(Vec3) -> Vec3,
) {
    if let Some(bone) = roles.get(role) {
        let current = rig.rotation(bone);
        rig.set_rotation(bone, f(current));
    }
}
