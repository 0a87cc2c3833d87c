//! The host-owned scene graph seam.

use glam::Vec3;

/// Opaque handle to a skeleton node. Stable for the lifetime of one loaded
/// model; resolved once and reused every tick so no per-frame string
/// matching happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoneHandle(pub u32);

/// Opaque handle to one morph-influence slot on one mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MorphHandle {
    pub mesh: u32,
    pub slot: u32,
}

/// Narrow view of the host's skeleton and meshes.
///
/// Rotations are local Euler angle triples in radians, matching the source
/// rigs' three independent axis angles. The engine mutates rotations and
/// morph influences through this trait and owns nothing else.
pub trait Rig {
    /// All skeleton nodes in hierarchy traversal order.
    fn bone_handles(&self) -> Vec<BoneHandle>;

    /// Bones reachable only through skinned meshes' bone lists. May overlap
    /// with [`bone_handles`](Rig::bone_handles); the resolver de-duplicates.
    fn skinned_bone_handles(&self) -> Vec<BoneHandle> {
        Vec::new()
    }

    fn bone_name(&self, bone: BoneHandle) -> Option<&str>;

    fn rotation(&self, bone: BoneHandle) -> Vec3;

    fn set_rotation(&mut self, bone: BoneHandle, rotation: Vec3);

    /// Every mesh slot exposing the named morph target. Empty when no mesh
    /// carries it.
    fn morph_handles(&self, name: &str) -> Vec<MorphHandle>;

    fn morph(&self, handle: MorphHandle) -> f32;

    fn set_morph(&mut self, handle: MorphHandle, value: f32);
}
