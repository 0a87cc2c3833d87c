//! Test helpers and fixtures for kinema integration tests.
//!
//! `FixtureRig` is a minimal in-memory skeleton + morph store with Mixamo
//! bone names and Ready Player Me morph dictionaries, exercising the same
//! resolution paths a real glTF-backed rig would. `ScriptedFeed` is a
//! manually-controlled audio source so tests drive loudness sample by
//! sample instead of depending on a live pipeline.

#![allow(dead_code)]

use std::cell::Cell;

use glam::Vec3;
use kinema::prelude::*;
use kinema::rig::{BoneHandle, MorphHandle};

/// Nominal frame delta used by the deterministic tests.
pub const TICK: f32 = 1.0 / 60.0;

/// Route resolver and loader diagnostics through the test writer so they
/// show up under `--nocapture`. Safe to call from every test; only the
/// first call installs the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Engine with default configuration and no clip loading.
pub fn test_engine() -> AvatarEngine {
    init_tracing();
    AvatarEngine::builder()
        .build()
        .expect("default engine config must validate")
}

pub fn tick_for(engine: &mut AvatarEngine, rig: &mut FixtureRig, seconds: f32) {
    let frames = (seconds / TICK).ceil() as usize;
    for _ in 0..frames {
        engine.tick(TICK, rig, None);
    }
}

struct Mesh {
    morph_names: Vec<&'static str>,
    weights: Vec<f32>,
}

impl Mesh {
    fn new(morph_names: Vec<&'static str>) -> Self {
        let weights = vec![0.0; morph_names.len()];
        Self {
            morph_names,
            weights,
        }
    }
}

pub struct FixtureRig {
    bone_names: Vec<&'static str>,
    rotations: Vec<Vec3>,
    meshes: Vec<Mesh>,
}

impl FixtureRig {
    /// Full Mixamo skeleton with Ready Player Me morph dictionaries: the
    /// head mesh carries the primary keys, the teeth mesh only the
    /// fallbacks.
    pub fn ready_player_me() -> Self {
        let bone_names = vec![
            "mixamorigHips",
            "mixamorigSpine",
            "mixamorigRightArm",
            "mixamorigRightForeArm",
            "mixamorigHead",
        ];
        let rotations = vec![Vec3::ZERO; bone_names.len()];
        let meshes = vec![
            Mesh::new(vec!["viseme_aa", "viseme_SS", "mouthSmile", "jawOpen"]),
            Mesh::new(vec!["jawOpen", "viseme_SS"]),
        ];
        Self {
            bone_names,
            rotations,
            meshes,
        }
    }

    /// Skeleton with no right arm and no morph targets. Waving and talking
    /// against this rig must degrade to no-ops, never panic.
    pub fn bare() -> Self {
        let bone_names = vec!["mixamorigHips", "mixamorigHead"];
        let rotations = vec![Vec3::ZERO; bone_names.len()];
        Self {
            bone_names,
            rotations,
            meshes: Vec::new(),
        }
    }

    pub fn bone(&self, name: &str) -> BoneHandle {
        let index = self
            .bone_names
            .iter()
            .position(|&n| n == name)
            .unwrap_or_else(|| panic!("fixture has no bone named {name}"));
        BoneHandle(index as u32)
    }

    pub fn morph_value(&self, mesh: u32, name: &str) -> f32 {
        let mesh = &self.meshes[mesh as usize];
        let slot = mesh
            .morph_names
            .iter()
            .position(|&n| n == name)
            .unwrap_or_else(|| panic!("fixture mesh has no morph named {name}"));
        mesh.weights[slot]
    }
}

impl Rig for FixtureRig {
    fn bone_handles(&self) -> Vec<BoneHandle> {
        (0..self.bone_names.len() as u32).map(BoneHandle).collect()
    }

    fn bone_name(&self, bone: BoneHandle) -> Option<&str> {
        self.bone_names.get(bone.0 as usize).copied()
    }

    fn rotation(&self, bone: BoneHandle) -> Vec3 {
        self.rotations[bone.0 as usize]
    }

    fn set_rotation(&mut self, bone: BoneHandle, rotation: Vec3) {
        self.rotations[bone.0 as usize] = rotation;
    }

    fn morph_handles(&self, name: &str) -> Vec<MorphHandle> {
        let mut handles = Vec::new();
        for (mesh_index, mesh) in self.meshes.iter().enumerate() {
            if let Some(slot) = mesh.morph_names.iter().position(|&n| n == name) {
                handles.push(MorphHandle {
                    mesh: mesh_index as u32,
                    slot: slot as u32,
                });
            }
        }
        handles
    }

    fn morph(&self, handle: MorphHandle) -> f32 {
        self.meshes[handle.mesh as usize].weights[handle.slot as usize]
    }

    fn set_morph(&mut self, handle: MorphHandle, value: f32) {
        self.meshes[handle.mesh as usize].weights[handle.slot as usize] = value;
    }
}

/// Audio feed whose playback state and spectrum level are set by the test.
pub struct ScriptedFeed {
    playing: Cell<bool>,
    level: Cell<u8>,
    fail_reads: Cell<bool>,
}

impl ScriptedFeed {
    pub fn new() -> Self {
        Self {
            playing: Cell::new(false),
            level: Cell::new(0),
            fail_reads: Cell::new(false),
        }
    }

    pub fn play(&self, level: u8) {
        self.playing.set(true);
        self.level.set(level);
    }

    pub fn pause(&self) {
        self.playing.set(false);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }
}

impl AudioFeed for ScriptedFeed {
    fn is_playing(&self) -> bool {
        self.playing.get()
    }

    fn fill_spectrum(&self, out: &mut [u8]) -> bool {
        if self.fail_reads.get() {
            return false;
        }
        out.fill(self.level.get());
        true
    }
}
