use std::path::Path;

use tracing::debug;

use super::diagnostics::Diagnostics;
use super::error::{Result, SrdfError};
use super::kinematic::KinematicModel;
use super::loaders::*;
use super::references::References;
use super::tags;
use super::xml::{Document, Element};
use super::Model;

impl Model {
    /// Fails only when `robot` is not a `robot` element. Bad declarations are
    /// left out of the model and reported in the returned diagnostics.
    pub fn init_xml<K: KinematicModel + ?Sized>(
        &mut self,
        kinematic: &K,
        robot: &Element,
    ) -> Result<Diagnostics> {
        self.clear();
        if robot.tag() != tags::ROBOT {
            return Err(SrdfError::UnexpectedRoot(robot.tag().to_owned()));
        }

        let mut diagnostics = Diagnostics::new();
        match robot.attribute("name") {
            None => diagnostics.error(tags::ROBOT, "No name given for the robot."),
            Some(name) => {
                self.name = name.trim().to_owned();
                if self.name != kinematic.name() {
                    diagnostics.error(
                        tags::ROBOT,
                        format!(
                            "Semantic description is not specified for the same robot as the URDF ('{}' vs '{}')",
                            self.name,
                            kinematic.name()
                        ),
                    );
                }
            }
        }

        // later loaders resolve against what the earlier ones accepted
        let virtual_joints = load_virtual_joints(kinematic, robot, &mut diagnostics);
        {
            // borrows virtual_joints, must be gone before they move into self
            let references = References::new(kinematic, &virtual_joints);
            self.groups = load_groups(&references, robot, &mut diagnostics);
            self.group_states =
                load_group_states(&references, &self.groups, robot, &mut diagnostics);
            self.end_effectors =
                load_end_effectors(&references, &self.groups, robot, &mut diagnostics);
            self.visual_sensors = load_visual_sensors(robot, &mut diagnostics);
            self.disabled_collision_pairs =
                load_disabled_collisions(&references, robot, &mut diagnostics);
        }
        self.virtual_joints = virtual_joints;

        debug!(
            robot = %self.name,
            virtual_joints = self.virtual_joints.len(),
            groups = self.groups.len(),
            group_states = self.group_states.len(),
            end_effectors = self.end_effectors.len(),
            visual_sensors = self.visual_sensors.len(),
            disabled_collisions = self.disabled_collision_pairs.len(),
            errors = diagnostics.errors().count(),
            "loaded semantic robot description"
        );
        Ok(diagnostics)
    }

    pub fn init_document<K: KinematicModel + ?Sized>(
        &mut self,
        kinematic: &K,
        document: &Document,
    ) -> Result<Diagnostics> {
        match document.first_child_element(tags::ROBOT) {
            Some(robot) => self.init_xml(kinematic, robot),
            None => {
                self.clear();
                Err(SrdfError::MissingRobotElement)
            }
        }
    }

    pub fn init_string<K: KinematicModel + ?Sized>(
        &mut self,
        kinematic: &K,
        text: &str,
    ) -> Result<Diagnostics> {
        self.clear();
        let document = Document::parse(text)?;
        self.init_document(kinematic, &document)
    }

    pub fn init_file<K: KinematicModel + ?Sized>(
        &mut self,
        kinematic: &K,
        path: impl AsRef<Path>,
    ) -> Result<Diagnostics> {
        self.clear();
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| SrdfError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        self.init_string(kinematic, std::str::from_utf8(&bytes)?)
    }

    pub fn from_srdf_string<K: KinematicModel + ?Sized>(
        kinematic: &K,
        str: &str,
    ) -> Result<(Self, Diagnostics)> {
        let mut model = Self::new();
        let diagnostics = model.init_string(kinematic, str)?;
        Ok((model, diagnostics))
    }

    pub fn from_srdf<K: KinematicModel + ?Sized>(
        kinematic: &K,
        path: impl AsRef<Path>,
    ) -> Result<(Self, Diagnostics)> {
        let mut model = Self::new();
        let diagnostics = model.init_file(kinematic, path)?;
        Ok((model, diagnostics))
    }
}
