//! Rig abstraction and procedural pose synthesis.
//!
//! The host renderer owns the scene graph; this crate only sees it through
//! the narrow [`Rig`] trait, reading bone names once during resolution and
//! writing local rotations every tick. Roles that fail to resolve are a
//! normal steady state — every per-tick write on them is a silent no-op.

mod pose;
mod resolver;
mod roles;
mod skeleton;

pub use pose::{PoseReport, PoseSynthesizer};
pub use resolver::resolve_roles;
pub use roles::{BoneRole, BoneRoleMap};
pub use skeleton::{BoneHandle, MorphHandle, Rig};
