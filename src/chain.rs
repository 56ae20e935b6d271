use hashbrown::HashSet;

use super::kinematic::KinematicModel;

// walk up from tip looking for base, then walk up from base looking for
// any link the first walk passed
pub(super) fn forms_chain<'a, K: KinematicModel + ?Sized>(
    kinematic: &'a K,
    base: &'a str,
    tip: &'a str,
) -> bool {
    let mut seen = HashSet::new();
    let mut link = Some(tip);
    while let Some(name) = link {
        if name == base {
            return true;
        }
        seen.insert(name);
        link = kinematic.parent_link(name);
    }

    let mut link = Some(base);
    while let Some(name) = link {
        if seen.contains(name) {
            return true;
        }
        link = kinematic.parent_link(name);
    }
    false
}
