use robot_srdf::{Model, RobotTree, Severity, SrdfError, VirtualJointType};

const URDF_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/arm.urdf");
const SRDF_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/arm.srdf");

fn arm_bot() -> RobotTree {
    RobotTree::from_urdf(URDF_PATH).unwrap()
}

fn group_names(model: &Model) -> Vec<&str> {
    model.groups.iter().map(|g| g.name.as_str()).collect()
}

#[test]
fn load_fixture_files() {
    let robot = arm_bot();
    let (model, diagnostics) = Model::from_srdf(&robot, SRDF_PATH).unwrap();

    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    assert_eq!(model.name, "arm_bot");

    let world = model.virtual_joint("world_joint").unwrap();
    assert_eq!(world.joint_type, VirtualJointType::Floating);
    assert_eq!(world.parent_frame, "world");

    assert_eq!(
        group_names(&model),
        vec!["arm", "gripper", "arm_with_gripper", "base"]
    );
    assert_eq!(
        model.group("arm").unwrap().chains,
        vec![("root".to_string(), "hand".to_string())]
    );
    assert_eq!(
        model.group("arm_with_gripper").unwrap().subgroups,
        vec!["arm", "gripper"]
    );

    let states = model
        .group_states
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(states, vec!["home", "open", "origin"]);
    let home = model.group_states_of("arm").next().unwrap();
    assert_eq!(home.joint_values["wrist_joint"], vec![0.5]);

    assert_eq!(model.end_effector("hand_eef").unwrap().component_group, "gripper");
    assert_eq!(model.visual_sensors[0].frame, "camera");
    assert_eq!(model.visual_sensors[0].max_range, 5.0);
    assert_eq!(model.disabled_collision_pairs.len(), 3);
    assert!(model.is_collision_disabled("finger_right", "hand"));
}

#[test]
fn loading_twice_gives_the_same_model() {
    let robot = arm_bot();
    let mut model = Model::new();
    model.init_file(&robot, SRDF_PATH).unwrap();
    let once = model.clone();
    model.init_file(&robot, SRDF_PATH).unwrap();
    assert_eq!(model, once);
}

#[test]
fn group_with_undeclared_subgroup_is_dropped() {
    let srdf = r#"<robot name="arm_bot">
  <group name="arm"><chain base_link="root" tip_link="hand"/></group>
  <group name="arm_with_gripper">
    <group name="arm"/>
    <group name="gripper"/>
  </group>
</robot>"#;
    let (model, diagnostics) = Model::from_srdf_string(&arm_bot(), srdf).unwrap();

    assert_eq!(group_names(&model), vec!["arm"]);
    let errors = diagnostics.errors().collect::<Vec<_>>();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("arm_with_gripper"));
    assert!(errors[0].message.contains("gripper"));
}

#[test]
fn cyclic_groups_are_dropped() {
    let srdf = r#"<robot name="arm_bot">
  <group name="A"><group name="B"/></group>
  <group name="B"><group name="A"/></group>
  <group name="C"><group name="C"/></group>
  <group name="D"><link name="hand"/></group>
</robot>"#;
    let (model, diagnostics) = Model::from_srdf_string(&arm_bot(), srdf).unwrap();

    assert_eq!(group_names(&model), vec!["D"]);
    assert_eq!(diagnostics.errors().count(), 3);
}

#[test]
fn chain_from_root_to_hand_is_accepted() {
    let srdf = r#"<robot name="arm_bot">
  <group name="arm"><chain base_link=" root " tip_link="hand"/></group>
  <group name="reversed"><chain base_link="hand" tip_link="root"/></group>
  <group name="across"><chain base_link="camera" tip_link="finger_left"/></group>
</robot>"#;
    let (model, diagnostics) = Model::from_srdf_string(&arm_bot(), srdf).unwrap();

    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    assert_eq!(
        model.group("arm").unwrap().chains,
        vec![("root".to_string(), "hand".to_string())]
    );
    assert_eq!(model.group("reversed").unwrap().chains.len(), 1);
    // camera and finger_left only share the root link
    assert_eq!(model.group("across").unwrap().chains.len(), 1);
}

#[test]
fn bad_declarations_are_skipped_not_fatal() {
    let srdf = r#"<robot name="arm_bot">
  <group name="arm"><joint name="elbow_joint"/></group>
  <group_state name="home" group="arm">
    <joint name="wrist_joint" value="0.1 abc 0.3"/>
  </group_state>
  <group_state name="missing" group="legs"/>
  <end_effector name="eef" group="legs" parent_link="hand"/>
  <visual_sensor name="cam" frame="camera" fov_angle="1" min_range="0.1"/>
  <visual_sensor name="cam2" frame="camera" fov_angle="1" min_range="0.1" max_range="x"/>
  <disable_collisions link1="hand" link2="elbow"/>
</robot>"#;
    let (model, diagnostics) = Model::from_srdf_string(&arm_bot(), srdf).unwrap();

    // the unknown joint leaves the group empty
    assert_eq!(group_names(&model), vec!["arm"]);
    assert_eq!(diagnostics.warnings().count(), 1);

    assert_eq!(model.group_states.len(), 1);
    assert_eq!(model.group_states[0].joint_values["wrist_joint"], vec![0.1, 0.3]);
    assert!(model.end_effectors.is_empty());
    assert!(model.visual_sensors.is_empty());
    assert!(model.disabled_collision_pairs.is_empty());

    // elbow_joint, abc, legs state, legs eef, two sensors, elbow link
    assert_eq!(diagnostics.errors().count(), 7);
    assert!(diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .any(|d| d.element == "visual_sensor"));
}

#[test]
fn missing_robot_element_is_an_error() {
    let mut model = Model::new();
    let err = model
        .init_string(&arm_bot(), r#"<semantic name="arm_bot"/>"#)
        .unwrap_err();
    assert!(matches!(err, SrdfError::MissingRobotElement));
}

#[test]
fn unknown_urdf_path_is_an_error() {
    assert!(RobotTree::from_urdf("./tests/fixtures/missing.urdf").is_err());
}
