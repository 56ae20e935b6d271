//! Element and attribute vocabulary of a semantic robot description.

pub const ROBOT: &str = "robot";
pub const VIRTUAL_JOINT: &str = "virtual_joint";
pub const GROUP: &str = "group";
pub const GROUP_STATE: &str = "group_state";
pub const END_EFFECTOR: &str = "end_effector";
pub const VISUAL_SENSOR: &str = "visual_sensor";
pub const DISABLE_COLLISIONS: &str = "disable_collisions";

// children of `group` / `group_state`
pub const LINK: &str = "link";
pub const JOINT: &str = "joint";
pub const CHAIN: &str = "chain";
