use super::Timeline;
use crate::animation::{Property, PropertyValue};
use crate::view::{ElementId, ViewTree};

/// Pre-animation values of every (target, property) pair a timeline touches.
///
/// `None` records that the property was unset, so restoring clears it again.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    entries: Vec<(ElementId, Property, Option<PropertyValue>)>,
}

impl Snapshot {
    /// Record the current values of everything `timeline` animates
    pub fn capture(tree: &ViewTree, timeline: &Timeline) -> Self {
        let mut entries: Vec<(ElementId, Property, Option<PropertyValue>)> = Vec::new();
        for track in timeline.tracks() {
            let key = (track.target, track.spec.property);
            if entries.iter().any(|(t, p, _)| (*t, *p) == key) {
                continue;
            }
            entries.push((key.0, key.1, tree.style(key.0, key.1).cloned()));
        }
        Self { entries }
    }

    /// Write the recorded values back. Elements that left the tree are skipped.
    pub fn restore(&self, tree: &mut ViewTree) {
        for (target, property, value) in &self.entries {
            match value {
                Some(value) => tree.set_style(*target, *property, value.clone()),
                None => tree.clear_style(*target, *property),
            };
        }
    }

    /// Take over the pairs of `other` not recorded here yet, keeping the
    /// older value for pairs both have seen.
    pub fn absorb(&mut self, other: &Snapshot) {
        for (target, property, value) in &other.entries {
            if !self
                .entries
                .iter()
                .any(|(t, p, _)| t == target && p == property)
            {
                self.entries.push((*target, *property, value.clone()));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
