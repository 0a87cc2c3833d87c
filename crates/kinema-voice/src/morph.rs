//! Morph-target blending.
//!
//! Two channels: `mouth_open` tracks the audio envelope while talking, and
//! `smile` eases in whenever the behavior is expressive. Morph keys are
//! resolved to typed handles once per mesh bind; a channel whose keys exist
//! on no mesh is inert rather than an error.

use kinema_core::{AnimState, Behavior, Smoothed};
use kinema_rig::{MorphHandle, Rig};
use tracing::debug;

/// Ready Player Me jaw-open viseme, with the plain jaw key as fallback.
const MOUTH_OPEN_KEYS: [&str; 2] = ["viseme_aa", "jawOpen"];
/// Smile morph, falling back to the SS viseme some exports use.
const SMILE_KEYS: [&str; 2] = ["mouthSmile", "viseme_SS"];

/// Fast factor so the mouth tracks loudness perceptibly.
const MOUTH_K: f32 = 0.5;
/// Slow ease for the smile.
const SMILE_K: f32 = 0.1;
const SMILE_LEVEL: f32 = 0.6;

/// Morph key → handle table, built once per loaded mesh set.
#[derive(Debug, Clone, Default)]
pub struct MorphBinding {
    mouth_open: Vec<MorphHandle>,
    smile: Vec<MorphHandle>,
}

impl MorphBinding {
    /// Resolve each channel's primary key, then its fallback. Meshes missing
    /// both keys simply contribute no slots.
    pub fn resolve(rig: &dyn Rig) -> Self {
        let binding = Self {
            mouth_open: first_matching(rig, &MOUTH_OPEN_KEYS),
            smile: first_matching(rig, &SMILE_KEYS),
        };
        debug!(
            mouth_slots = binding.mouth_open.len(),
            smile_slots = binding.smile.len(),
            "morph binding resolved"
        );
        binding
    }

    pub fn is_empty(&self) -> bool {
        self.mouth_open.is_empty() && self.smile.is_empty()
    }
}

/// Per mesh: take the primary key's slot when present, otherwise the
/// fallback's. A mesh carrying neither contributes nothing.
fn first_matching(rig: &dyn Rig, keys: &[&str]) -> Vec<MorphHandle> {
    let mut handles = rig.morph_handles(keys[0]);
    let covered: Vec<u32> = handles.iter().map(|h| h.mesh).collect();
    for fallback in rig.morph_handles(keys[1]) {
        if !covered.contains(&fallback.mesh) {
            handles.push(fallback);
        }
    }
    handles
}

/// Owns the smoothed channel weights and mirrors them into the mesh's
/// morph-influence slots every tick.
#[derive(Debug, Clone)]
pub struct MorphBlender {
    mouth_open: Smoothed,
    smile: Smoothed,
}

impl MorphBlender {
    pub fn new() -> Self {
        Self {
            mouth_open: Smoothed::new(0.0, MOUTH_K),
            smile: Smoothed::new(0.0, SMILE_K),
        }
    }

    pub fn tick(
        &mut self,
        state: &AnimState,
        envelope: f32,
        audio_playing: bool,
        dt: f32,
        rig: &mut dyn Rig,
        binding: &MorphBinding,
    ) {
        let mouth_target = if state.behavior == Behavior::Talk && audio_playing {
            envelope.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.mouth_open.set_target(mouth_target);

        let smile_target = if state.behavior.is_expressive() {
            SMILE_LEVEL
        } else {
            0.0
        };
        self.smile.set_target(smile_target);

        let mouth = self.mouth_open.advance(dt).clamp(0.0, 1.0);
        let smile = self.smile.advance(dt).clamp(0.0, 1.0);

        for &handle in &binding.mouth_open {
            rig.set_morph(handle, mouth);
        }
        for &handle in &binding.smile {
            rig.set_morph(handle, smile);
        }
    }

    #[inline]
    pub fn mouth_open(&self) -> f32 {
        self.mouth_open.current()
    }

    #[inline]
    pub fn smile(&self) -> f32 {
        self.smile.current()
    }

    #[inline]
    pub fn smile_target(&self) -> f32 {
        self.smile.target()
    }
}

impl Default for MorphBlender {
    fn default() -> Self {
        Self::new()
    }
}
