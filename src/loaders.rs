use hashbrown::HashMap;

use super::chain::forms_chain;
use super::diagnostics::Diagnostics;
use super::kinematic::KinematicModel;
use super::references::References;
use super::subgroups::retain_resolvable;
use super::tags;
use super::xml::Element;
use super::{
    DisabledCollisionPair, EndEffector, Group, GroupState, VirtualJoint, VirtualJointType,
    VisualSensor,
};

// Err carries the reason the element was skipped
type Parsed<T> = std::result::Result<T, String>;

fn collect<T>(
    robot: &Element,
    tag: &'static str,
    diagnostics: &mut Diagnostics,
    mut parse: impl FnMut(&Element, &mut Diagnostics) -> Parsed<T>,
) -> Vec<T> {
    let mut entities = Vec::new();
    for element in robot.children(tag) {
        match parse(element, diagnostics) {
            Ok(entity) => entities.push(entity),
            Err(reason) => diagnostics.error(tag, reason),
        }
    }
    entities
}

fn attribute(element: &Element, name: &str) -> Option<String> {
    element.attribute(name).map(|value| value.trim().to_owned())
}

fn number(value: &str) -> Option<f64> {
    value.trim().parse().ok()
}

pub(super) fn load_virtual_joints<K: KinematicModel + ?Sized>(
    kinematic: &K,
    robot: &Element,
    diagnostics: &mut Diagnostics,
) -> Vec<VirtualJoint> {
    collect(robot, tags::VIRTUAL_JOINT, diagnostics, |element, diagnostics| {
        let name = attribute(element, "name").ok_or("Name of virtual joint is not specified")?;
        let child_link = attribute(element, "child_link").ok_or_else(|| {
            format!("Child link of virtual joint '{}' is not specified", name)
        })?;
        if !kinematic.has_link(&child_link) {
            return Err(format!(
                "Virtual joint '{}' does not attach to a link on the robot (link '{}' is not known)",
                name, child_link
            ));
        }
        let parent_frame = attribute(element, "parent_frame").ok_or_else(|| {
            format!("Parent frame of virtual joint '{}' is not specified", name)
        })?;
        let joint_type = element
            .attribute("type")
            .ok_or_else(|| format!("Type of virtual joint '{}' is not specified", name))?;

        let joint_type = VirtualJointType::from_name(joint_type).unwrap_or_else(|| {
            diagnostics.error(
                tags::VIRTUAL_JOINT,
                format!(
                    "Unknown type of joint: '{}'. Assuming 'fixed' instead. Other known types are 'planar' and 'floating'.",
                    joint_type
                ),
            );
            VirtualJointType::Fixed
        });

        Ok(VirtualJoint {
            name,
            child_link,
            parent_frame,
            joint_type,
        })
    })
}

pub(super) fn load_groups<K: KinematicModel + ?Sized>(
    references: &References<'_, K>,
    robot: &Element,
    diagnostics: &mut Diagnostics,
) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    for element in robot.children(tags::GROUP) {
        // a dropped redeclaration is reported once, its members are not looked at
        if let Some(name) = attribute(element, "name") {
            if groups.iter().any(|known| known.name == name) {
                diagnostics.error(
                    tags::GROUP,
                    format!(
                        "Group '{}' is declared more than once. Only the first declaration is kept",
                        name
                    ),
                );
                continue;
            }
        }
        match group(references, element, diagnostics) {
            Ok(group) => groups.push(group),
            Err(reason) => diagnostics.error(tags::GROUP, reason),
        }
    }

    retain_resolvable(&mut groups, diagnostics);
    groups
}

fn group<K: KinematicModel + ?Sized>(
    references: &References<'_, K>,
    element: &Element,
    diagnostics: &mut Diagnostics,
) -> Parsed<Group> {
    let name = attribute(element, "name").ok_or("Group name not specified")?;
    let mut group = Group {
        name,
        ..Default::default()
    };

    for link in element.children(tags::LINK) {
        let Some(link) = attribute(link, "name") else {
            diagnostics.error(
                tags::GROUP,
                format!("Link name not specified in group '{}'", group.name),
            );
            continue;
        };
        if !references.link_exists(&link) {
            diagnostics.error(
                tags::GROUP,
                format!(
                    "Link '{}' declared as part of group '{}' is not known to the URDF",
                    link, group.name
                ),
            );
            continue;
        }
        group.links.push(link);
    }

    for joint in element.children(tags::JOINT) {
        let Some(joint) = attribute(joint, "name") else {
            diagnostics.error(
                tags::GROUP,
                format!("Joint name not specified in group '{}'", group.name),
            );
            continue;
        };
        if !references.joint_exists(&joint) {
            diagnostics.error(
                tags::GROUP,
                format!(
                    "Joint '{}' declared as part of group '{}' is not known to the URDF",
                    joint, group.name
                ),
            );
            continue;
        }
        group.joints.push(joint);
    }

    for chain in element.children(tags::CHAIN) {
        if let Some(chain) = chain_of(references, chain, &group.name, diagnostics) {
            group.chains.push(chain);
        }
    }

    for subgroup in element.children(tags::GROUP) {
        match attribute(subgroup, "name") {
            Some(subgroup) => group.subgroups.push(subgroup),
            None => diagnostics.error(
                tags::GROUP,
                format!(
                    "Group name not specified when included as subgroup of '{}'",
                    group.name
                ),
            ),
        }
    }

    if group.is_empty() {
        diagnostics.warning(tags::GROUP, format!("Group '{}' is empty.", group.name));
    }
    Ok(group)
}

fn chain_of<K: KinematicModel + ?Sized>(
    references: &References<'_, K>,
    element: &Element,
    group: &str,
    diagnostics: &mut Diagnostics,
) -> Option<(String, String)> {
    let reject = |diagnostics: &mut Diagnostics, message: String| -> Option<(String, String)> {
        diagnostics.error(tags::GROUP, message);
        None
    };

    let Some(base) = attribute(element, "base_link") else {
        return reject(
            diagnostics,
            format!("Base link name not specified for chain in group '{}'", group),
        );
    };
    let Some(tip) = attribute(element, "tip_link") else {
        return reject(
            diagnostics,
            format!("Tip link name not specified for chain in group '{}'", group),
        );
    };
    for link in [&base, &tip] {
        if !references.link_exists(link) {
            return reject(
                diagnostics,
                format!(
                    "Link '{}' declared as part of a chain in group '{}' is not known to the URDF",
                    link, group
                ),
            );
        }
    }
    if !forms_chain(references.kinematic(), &base, &tip) {
        return reject(
            diagnostics,
            format!(
                "Links '{}' and '{}' do not form a chain. Not included in group '{}'",
                base, tip, group
            ),
        );
    }
    Some((base, tip))
}

pub(super) fn load_group_states<K: KinematicModel + ?Sized>(
    references: &References<'_, K>,
    groups: &[Group],
    robot: &Element,
    diagnostics: &mut Diagnostics,
) -> Vec<GroupState> {
    collect(robot, tags::GROUP_STATE, diagnostics, |element, diagnostics| {
        let name = attribute(element, "name").ok_or("Name of group state is not specified")?;
        let group = attribute(element, "group")
            .ok_or_else(|| format!("Name of group for state '{}' is not specified", name))?;
        if !groups.iter().any(|known| known.name == group) {
            return Err(format!(
                "Group state '{}' specified for group '{}', but that group is not known",
                name, group
            ));
        }

        let mut joint_values: HashMap<String, Vec<f64>> = HashMap::new();
        for joint in element.children(tags::JOINT) {
            let Some(joint_name) = attribute(joint, "name") else {
                diagnostics.error(
                    tags::GROUP_STATE,
                    format!("Joint name not specified in group state '{}'", name),
                );
                continue;
            };
            let Some(value) = joint.attribute("value") else {
                diagnostics.error(
                    tags::GROUP_STATE,
                    format!(
                        "Value not specified for joint '{}' in group state '{}'",
                        joint_name, name
                    ),
                );
                continue;
            };
            if !references.joint_exists(&joint_name) {
                diagnostics.error(
                    tags::GROUP_STATE,
                    format!(
                        "Joint '{}' declared as part of group state '{}' is not known to the URDF",
                        joint_name, name
                    ),
                );
                continue;
            }

            let mut values = Vec::new();
            for token in value.split_whitespace() {
                match number(token) {
                    Some(v) => values.push(v),
                    None => diagnostics.error(
                        tags::GROUP_STATE,
                        format!(
                            "Unable to parse joint value '{}' for joint '{}' in group state '{}'",
                            token, joint_name, name
                        ),
                    ),
                }
            }
            if values.is_empty() {
                diagnostics.error(
                    tags::GROUP_STATE,
                    format!(
                        "Unable to parse joint value ('{}') for joint '{}' in group state '{}'",
                        value, joint_name, name
                    ),
                );
                continue;
            }
            joint_values.entry(joint_name).or_default().extend(values);
        }

        Ok(GroupState {
            name,
            group,
            joint_values,
        })
    })
}

pub(super) fn load_end_effectors<K: KinematicModel + ?Sized>(
    references: &References<'_, K>,
    groups: &[Group],
    robot: &Element,
    diagnostics: &mut Diagnostics,
) -> Vec<EndEffector> {
    collect(robot, tags::END_EFFECTOR, diagnostics, |element, _| {
        let name = attribute(element, "name").ok_or("Name of end effector is not specified")?;
        let component_group = attribute(element, "group")
            .ok_or_else(|| format!("Group not specified for end effector '{}'", name))?;
        if !groups.iter().any(|known| known.name == component_group) {
            return Err(format!(
                "End effector '{}' specified for group '{}', but that group is not known",
                name, component_group
            ));
        }
        let parent_link = attribute(element, "parent_link")
            .ok_or_else(|| format!("Parent link not specified for end effector '{}'", name))?;
        if !references.link_exists(&parent_link) {
            return Err(format!(
                "Link '{}' specified as parent for end effector '{}' is not known to the URDF",
                parent_link, name
            ));
        }
        Ok(EndEffector {
            name,
            component_group,
            parent_link,
        })
    })
}

pub(super) fn load_visual_sensors(robot: &Element, diagnostics: &mut Diagnostics) -> Vec<VisualSensor> {
    collect(robot, tags::VISUAL_SENSOR, diagnostics, |element, _| {
        let name = attribute(element, "name").ok_or("Name of visual sensor is not specified")?;
        let frame = attribute(element, "frame")
            .ok_or_else(|| format!("No frame specified for visual sensor '{}'", name))?;

        // every numeric field is mandatory, one bad value discards the sensor
        let numeric = |attr: &str, what: &str| -> Parsed<f64> {
            let raw = element.attribute(attr).ok_or_else(|| {
                format!("No {} specified for visual sensor '{}'", what, name)
            })?;
            number(raw).ok_or_else(|| {
                format!("Unable to parse {} ('{}') for sensor '{}'", what, raw, name)
            })
        };
        let fov_angle = numeric("fov_angle", "field of view angle")?;
        let min_range = numeric("min_range", "minimum range along Z axis")?;
        let max_range = numeric("max_range", "maximum range along Z axis")?;

        Ok(VisualSensor {
            name,
            frame,
            fov_angle,
            min_range,
            max_range,
        })
    })
}

pub(super) fn load_disabled_collisions<K: KinematicModel + ?Sized>(
    references: &References<'_, K>,
    robot: &Element,
    diagnostics: &mut Diagnostics,
) -> Vec<DisabledCollisionPair> {
    collect(robot, tags::DISABLE_COLLISIONS, diagnostics, |element, _| {
        let (Some(link1), Some(link2)) = (attribute(element, "link1"), attribute(element, "link2"))
        else {
            return Err("A pair of links needs to be specified to disable collisions".to_owned());
        };
        for link in [&link1, &link2] {
            if !references.link_exists(link) {
                return Err(format!(
                    "Link '{}' is not known to URDF. Cannot disable collisions.",
                    link
                ));
            }
        }
        Ok(DisabledCollisionPair { link1, link2 })
    })
}
