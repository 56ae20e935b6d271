use std::path::Path;

use hashbrown::HashMap;
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;

use super::error::{Result, SrdfError};

pub trait KinematicModel {
    fn name(&self) -> &str;

    fn has_link(&self, name: &str) -> bool;

    fn has_joint(&self, name: &str) -> bool;

    // None for the root and for unknown links
    fn parent_link(&self, link: &str) -> Option<&str>;
}

#[derive(Debug, Clone)]
pub struct RobotTree {
    name: String,
    links: Vec<String>,
    // link name -> link_id
    link_ids: HashMap<String, usize>,
    // joint name -> child link_id
    joints: HashMap<String, usize>,
    // link_id -> link_id, parent to child
    link_graph: DiGraphMap<usize, ()>,
}

impl RobotTree {
    pub fn from_robot(robot: &urdf_rs::Robot) -> Result<Self> {
        let mut link_ids = HashMap::with_capacity(robot.links.len());
        let mut link_graph = DiGraphMap::<usize, ()>::new();
        for (index, link) in robot.links.iter().enumerate() {
            if link_ids.insert(link.name.clone(), index).is_some() {
                return Err(SrdfError::InvalidKinematicModel(format!(
                    "link '{}' is declared more than once",
                    link.name
                )));
            }
            link_graph.add_node(index);
        }

        let mut joints = HashMap::with_capacity(robot.joints.len());
        for joint in &robot.joints {
            let lookup = |link: &str| {
                link_ids.get(link).copied().ok_or_else(|| {
                    SrdfError::InvalidKinematicModel(format!(
                        "joint '{}' references unknown link '{}'",
                        joint.name, link
                    ))
                })
            };
            let parent = lookup(&joint.parent.link)?;
            let child = lookup(&joint.child.link)?;

            if link_graph
                .neighbors_directed(child, Direction::Incoming)
                .next()
                .is_some()
            {
                return Err(SrdfError::InvalidKinematicModel(format!(
                    "link '{}' has more than one parent joint",
                    joint.child.link
                )));
            }
            if joints.insert(joint.name.clone(), child).is_some() {
                return Err(SrdfError::InvalidKinematicModel(format!(
                    "joint '{}' is declared more than once",
                    joint.name
                )));
            }
            link_graph.add_edge(parent, child, ());
        }

        // every link has at most one parent, so a cycle is the only way
        // the links can fail to form a forest
        if petgraph::algo::is_cyclic_directed(&link_graph) {
            return Err(SrdfError::InvalidKinematicModel(format!(
                "links of robot '{}' do not form a tree",
                robot.name
            )));
        }

        Ok(Self {
            name: robot.name.clone(),
            links: robot.links.iter().map(|link| link.name.clone()).collect(),
            link_ids,
            joints,
            link_graph,
        })
    }

    pub fn from_urdf_string(str: &str) -> Result<Self> {
        let robot = urdf_rs::read_from_string(str)?;
        Self::from_robot(&robot)
    }

    pub fn from_urdf(path: impl AsRef<Path>) -> Result<Self> {
        let robot = urdf_rs::read_file(path)?;
        Self::from_robot(&robot)
    }

    pub fn root_link(&self) -> Option<&str> {
        (0..self.links.len())
            .find(|id| {
                self.link_graph
                    .neighbors_directed(*id, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .map(|id| self.links[id].as_str())
    }

    pub fn link_names(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(String::as_str)
    }

    pub fn joint_child(&self, joint: &str) -> Option<&str> {
        self.joints.get(joint).map(|id| self.links[*id].as_str())
    }
}

impl KinematicModel for RobotTree {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_link(&self, name: &str) -> bool {
        self.link_ids.contains_key(name)
    }

    fn has_joint(&self, name: &str) -> bool {
        self.joints.contains_key(name)
    }

    fn parent_link(&self, link: &str) -> Option<&str> {
        let id = *self.link_ids.get(link)?;
        self.link_graph
            .neighbors_directed(id, Direction::Incoming)
            .next()
            .map(|parent| self.links[parent].as_str())
    }
}
