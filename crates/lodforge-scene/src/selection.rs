//! Snapshot of the objects the user has selected.

use bevy_ecs::entity::Entity;

/// Ordered snapshot of selected scene objects.
///
/// Two snapshots are the same selection when they hold the same objects in
/// the same order. Consumers keep the last snapshot they saw and compare it
/// against the current one to detect selection changes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    objects: Vec<Entity>,
}

impl Selection {
    pub fn from_entities(objects: impl IntoIterator<Item = Entity>) -> Self {
        Self {
            objects: objects.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Entity> {
        self.objects.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.objects.iter().copied()
    }
}
