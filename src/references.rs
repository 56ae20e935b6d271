use hashbrown::HashSet;

use super::kinematic::KinematicModel;
use super::VirtualJoint;

// virtual joints are not in the kinematic model, they get their own table
pub(super) struct References<'a, K: ?Sized> {
    kinematic: &'a K,
    virtual_joints: HashSet<&'a str>,
}

impl<'a, K: KinematicModel + ?Sized> References<'a, K> {
    pub(super) fn new(kinematic: &'a K, virtual_joints: &'a [VirtualJoint]) -> Self {
        Self {
            kinematic,
            virtual_joints: virtual_joints.iter().map(|vj| vj.name.as_str()).collect(),
        }
    }

    pub(super) fn kinematic(&self) -> &'a K {
        self.kinematic
    }

    pub(super) fn link_exists(&self, name: &str) -> bool {
        self.kinematic.has_link(name.trim())
    }

    pub(super) fn joint_exists(&self, name: &str) -> bool {
        let name = name.trim();
        self.kinematic.has_joint(name) || self.virtual_joints.contains(name)
    }
}
