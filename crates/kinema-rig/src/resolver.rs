//! Bone-role resolution.
//!
//! One pass over the skeleton classifies nodes into semantic roles using
//! ordered naming heuristics for the Ready Player Me and Mixamo rig
//! conventions. First match wins per role; absence never errors.

use std::collections::HashSet;

use tracing::debug;

use crate::roles::{BoneRole, BoneRoleMap};
use crate::skeleton::Rig;

fn matches_role(role: BoneRole, name: &str) -> bool {
    match role {
        BoneRole::RightUpperArm => {
            (name.contains("rightarm") && !name.contains("forearm") && !name.contains("lower"))
                || name.contains("right_upperarm")
                || name == "mixamorigrightarm"
                || name == "rightarm"
                || name == "upperarm_r"
        }
        BoneRole::RightForearm => {
            name.contains("rightforearm")
                || name.contains("right_lowerarm")
                || name.contains("rightfore")
                || name == "mixamorigrightforearm"
                || name == "rightforearm"
                || name == "lowerarm_r"
        }
        BoneRole::Head => {
            (name.contains("head") && !name.contains("shoulder") && !name.contains("neck"))
                || name == "mixamorighead"
                || name == "head"
        }
    }
}

/// Classify the rig's nodes into a [`BoneRoleMap`].
///
/// Visits the hierarchy first, then any bones reachable only through skinned
/// meshes' bone lists, de-duplicated. Idempotent: callers rebuild the map
/// only when the skeleton changes.
pub fn resolve_roles(rig: &dyn Rig) -> BoneRoleMap {
    let mut map = BoneRoleMap::default();
    let mut seen = HashSet::new();

    let hierarchy = rig.bone_handles();
    let skinned = rig.skinned_bone_handles();

    for bone in hierarchy.into_iter().chain(skinned) {
        if !seen.insert(bone) {
            continue;
        }
        let Some(name) = rig.bone_name(bone) else {
            continue;
        };
        let name = name.to_ascii_lowercase();

        for role in BoneRole::ALL {
            if map.get(role).is_none() && matches_role(role, &name) {
                map.set(role, bone);
            }
        }
    }

    for role in BoneRole::ALL {
        if map.get(role).is_none() {
            debug!(role = role.name(), "bone role unresolved");
        }
    }
    debug!(resolved = map.resolved_count(), "bone role resolution complete");

    map
}
