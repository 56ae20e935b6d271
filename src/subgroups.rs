use hashbrown::HashSet;

use super::diagnostics::Diagnostics;
use super::tags;
use super::Group;

// scan until nothing new is accepted; groups on a cycle or depending on an
// undeclared group never are
pub(super) fn resolvable_groups(groups: &[Group]) -> HashSet<&str> {
    let mut known = HashSet::with_capacity(groups.len());
    let mut update = true;
    while update {
        update = false;
        for group in groups {
            if known.contains(group.name.as_str()) {
                continue;
            }
            if group
                .subgroups
                .iter()
                .all(|subgroup| known.contains(subgroup.as_str()))
            {
                known.insert(group.name.as_str());
                update = true;
            }
        }
    }
    known
}

pub(super) fn retain_resolvable(groups: &mut Vec<Group>, diagnostics: &mut Diagnostics) {
    let known = resolvable_groups(groups)
        .into_iter()
        .map(str::to_owned)
        .collect::<HashSet<_>>();
    if known.len() == groups.len() {
        return;
    }

    groups.retain(|group| {
        if known.contains(&group.name) {
            return true;
        }
        let unsatisfied = group
            .subgroups
            .iter()
            .filter(|subgroup| !known.contains(*subgroup))
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        diagnostics.error(
            tags::GROUP,
            format!(
                "Group '{}' has unsatisfied subgroups: {}",
                group.name, unsatisfied
            ),
        );
        false
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str, subgroups: &[&str]) -> Group {
        Group {
            name: name.to_string(),
            subgroups: subgroups.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn names(groups: &[Group]) -> Vec<&str> {
        groups.iter().map(|g| g.name.as_str()).collect()
    }

    #[test]
    fn dependencies_declared_later_resolve() {
        let mut groups = vec![
            group("body", &["torso", "arm"]),
            group("arm", &["hand"]),
            group("torso", &[]),
            group("hand", &[]),
        ];
        let mut diagnostics = Diagnostics::new();
        retain_resolvable(&mut groups, &mut diagnostics);
        assert_eq!(names(&groups), vec!["body", "arm", "torso", "hand"]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn missing_subgroup_is_pruned() {
        let mut groups = vec![
            group("arm", &[]),
            group("arm_with_gripper", &["arm", "gripper"]),
        ];
        let mut diagnostics = Diagnostics::new();
        retain_resolvable(&mut groups, &mut diagnostics);

        assert_eq!(names(&groups), vec!["arm"]);
        let errors = diagnostics.errors().collect::<Vec<_>>();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("arm_with_gripper"));
        assert!(errors[0].message.ends_with(": gripper"));
    }

    #[test]
    fn cycles_are_pruned() {
        let mut groups = vec![
            group("a", &["b"]),
            group("b", &["a"]),
            group("self", &["self"]),
            group("ok", &[]),
        ];
        let mut diagnostics = Diagnostics::new();
        retain_resolvable(&mut groups, &mut diagnostics);

        assert_eq!(names(&groups), vec!["ok"]);
        assert_eq!(diagnostics.errors().count(), 3);
    }

    #[test]
    fn dependents_of_pruned_groups_are_pruned() {
        let groups = vec![
            group("a", &["b"]),
            group("b", &["missing"]),
            group("c", &["a"]),
        ];
        assert!(resolvable_groups(&groups).is_empty());
    }
}
