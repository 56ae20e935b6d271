use std::fmt;

use hashbrown::HashMap;

mod chain;
mod diagnostics;
mod error;
mod kinematic;
mod loaders;
mod references;
mod srdf;
mod subgroups;
pub mod tags;
pub mod xml;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{Result, SrdfError};
pub use kinematic::{KinematicModel, RobotTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VirtualJointType {
    Planar,
    Floating,
    Fixed,
}

impl VirtualJointType {
    // case-insensitive, surrounding whitespace ignored
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "planar" => Some(Self::Planar),
            "floating" => Some(Self::Floating),
            "fixed" => Some(Self::Fixed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planar => "planar",
            Self::Floating => "floating",
            Self::Fixed => "fixed",
        }
    }
}

impl fmt::Display for VirtualJointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VirtualJoint {
    pub name: String,
    pub child_link: String,
    pub parent_frame: String,
    pub joint_type: VirtualJointType,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    pub name: String,
    pub links: Vec<String>,
    pub joints: Vec<String>,
    // (base_link, tip_link)
    pub chains: Vec<(String, String)>,
    pub subgroups: Vec<String>,
}

impl Group {
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
            && self.joints.is_empty()
            && self.chains.is_empty()
            && self.subgroups.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupState {
    pub name: String,
    pub group: String,
    // one value per degree of freedom, in document order
    pub joint_values: HashMap<String, Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EndEffector {
    pub name: String,
    pub component_group: String,
    pub parent_link: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisualSensor {
    pub name: String,
    pub frame: String,
    // radians
    pub fov_angle: f64,
    pub min_range: f64,
    pub max_range: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisabledCollisionPair {
    pub link1: String,
    pub link2: String,
}

// collections keep document order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    pub name: String,
    pub groups: Vec<Group>,
    pub group_states: Vec<GroupState>,
    pub virtual_joints: Vec<VirtualJoint>,
    pub end_effectors: Vec<EndEffector>,
    pub visual_sensors: Vec<VisualSensor>,
    pub disabled_collision_pairs: Vec<DisabledCollisionPair>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.name == name)
    }

    pub fn group_states_of<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a GroupState> {
        self.group_states
            .iter()
            .filter(move |state| state.group == group)
    }

    pub fn virtual_joint(&self, name: &str) -> Option<&VirtualJoint> {
        self.virtual_joints.iter().find(|vj| vj.name == name)
    }

    pub fn end_effector(&self, name: &str) -> Option<&EndEffector> {
        self.end_effectors.iter().find(|eef| eef.name == name)
    }

    // order of the two links does not matter
    pub fn is_collision_disabled(&self, a: &str, b: &str) -> bool {
        self.disabled_collision_pairs
            .iter()
            .any(|pair| (pair.link1 == a && pair.link2 == b) || (pair.link1 == b && pair.link2 == a))
    }
}
