//! Semantic bone roles.

use crate::skeleton::BoneHandle;

/// Semantic classification of a skeletal joint, independent of any rig's
/// literal bone names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoneRole {
    RightUpperArm,
    RightForearm,
    Head,
}

impl BoneRole {
    pub const ALL: [BoneRole; 3] = [
        BoneRole::RightUpperArm,
        BoneRole::RightForearm,
        BoneRole::Head,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BoneRole::RightUpperArm => "right upper arm",
            BoneRole::RightForearm => "right forearm",
            BoneRole::Head => "head",
        }
    }
}

/// Role → bone handle table, built once per loaded skeleton.
///
/// Unresolved roles are a valid steady state, not an error; avatars vary in
/// rig completeness.
#[derive(Debug, Clone, Default)]
pub struct BoneRoleMap {
    right_upper_arm: Option<BoneHandle>,
    right_forearm: Option<BoneHandle>,
    head: Option<BoneHandle>,
}

impl BoneRoleMap {
    #[inline]
    pub fn get(&self, role: BoneRole) -> Option<BoneHandle> {
        match role {
            BoneRole::RightUpperArm => self.right_upper_arm,
            BoneRole::RightForearm => self.right_forearm,
            BoneRole::Head => self.head,
        }
    }

    pub(crate) fn set(&mut self, role: BoneRole, bone: BoneHandle) {
        let slot = match role {
            BoneRole::RightUpperArm => &mut self.right_upper_arm,
            BoneRole::RightForearm => &mut self.right_forearm,
            BoneRole::Head => &mut self.head,
        };
        // First match wins per role.
        if slot.is_none() {
            *slot = Some(bone);
        }
    }

    pub fn resolved_count(&self) -> usize {
        BoneRole::ALL
            .iter()
            .filter(|role| self.get(**role).is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved_count() == 0
    }
}
