//! # Kinema - Real-time Avatar Behavior Engine
//!
//! Drives a skeletal 3D character's pose and facial deformation in real
//! time from a small discrete behavior signal (idle/talk/wave/nod) and a
//! live audio stream used for lip articulation. The host renderer owns the
//! scene graph, mesh, and playback surface; Kinema only reads bone names
//! and writes rotations and morph influences through a narrow trait.
//!
//! ## Architecture
//!
//! Kinema is an umbrella crate that coordinates:
//! - **kinema-core** - Behavior state machine, smoothing, configuration
//! - **kinema-rig** - Rig abstraction, bone-role resolution, pose synthesis
//! - **kinema-voice** - Audio envelope extraction, morph-target blending
//! - **kinema-clips** - Optional best-effort async motion-clip loading
//!
//! ## Quick Start
//!
//! ```ignore
//! use kinema::prelude::*;
//!
//! let mut engine = AvatarEngine::builder()
//!     .wave_duration(2.0)
//!     .build()?;
//!
//! // Once per loaded model:
//! engine.bind_rig(&rig);
//!
//! // From host callbacks, any time:
//! engine.signal_str("wave");
//!
//! // From the host's frame callback (~60 Hz, actual delta):
//! engine.tick(delta_seconds, &mut rig, Some(&audio));
//! ```
//!
//! ## Feature Flags
//!
//! - `clips` (default) - Async motion-clip loading; the procedural pose
//!   path never depends on it.

/// Re-export of kinema-core for direct access
pub use kinema_core as core;

pub use kinema_core::{
    alpha, approach, approach_vec3, AnimState, Behavior, BehaviorFsm, EngineConfig, Smoothed,
    Transition, WavePhase, WavePolicy, REF_DT,
};

pub use kinema_rig as rig;

pub use kinema_rig::{
    resolve_roles, BoneHandle, BoneRole, BoneRoleMap, MorphHandle, PoseReport, PoseSynthesizer,
    Rig,
};

pub use kinema_voice as voice;

pub use kinema_voice::{
    AudioFeed, EnvelopeExtractor, MorphBinding, MorphBlender, NORMALIZATION_DIVISOR,
};

#[cfg(feature = "clips")]
pub use kinema_clips as clips;

#[cfg(feature = "clips")]
pub use kinema_clips::{
    load_clip_set, ClipError, ClipFetcher, ClipLibrary, ClipSources, ClipTask, FileClipFetcher,
    Generation, MotionClip, RotationTrack, RuntimeHandle,
};

mod builder;
mod engine;
mod error;

pub use builder::AvatarEngineBuilder;
pub use engine::{AvatarEngine, SignalSender};
pub use error::{Error, Result};

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{AvatarEngine, AvatarEngineBuilder, SignalSender};

    pub use crate::core::{Behavior, EngineConfig, WavePolicy};

    pub use crate::rig::{BoneRole, Rig};

    pub use crate::voice::AudioFeed;

    #[cfg(feature = "clips")]
    pub use crate::clips::{ClipFetcher, ClipSources, FileClipFetcher};
}
