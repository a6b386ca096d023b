//! The [`Scene`] wrapper: object creation, hierarchy edits, duplication, and removal.

use bevy_ecs::prelude::*;
use glam::Mat4;

use crate::components::{Children, MeshCollider, MeshFilter, MeshRenderer, Name, Parent, Transform};

/// Live scene of named objects arranged in a hierarchy.
#[derive(Default)]
pub struct Scene {
    world: World,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty root object with an identity transform.
    pub fn spawn(&mut self, name: impl Into<String>) -> Entity {
        self.world
            .spawn((Name::new(name), Transform::IDENTITY))
            .id()
    }

    /// Returns `true` if `entity` is a live scene object.
    pub fn contains(&self, entity: Entity) -> bool {
        self.world.get::<Name>(entity).is_some()
    }

    /// Adds or replaces a component. Returns `false` if the object does not exist.
    pub fn insert<C: Component>(&mut self, entity: Entity, component: C) -> bool {
        if !self.contains(entity) {
            return false;
        }
        self.world.entity_mut(entity).insert(component);
        true
    }

    pub fn get<C: Component>(&self, entity: Entity) -> Option<&C> {
        self.world.get::<C>(entity)
    }

    pub fn get_mut<C: Component>(&mut self, entity: Entity) -> Option<Mut<'_, C>> {
        self.world.get_mut::<C>(entity)
    }

    pub fn name(&self, entity: Entity) -> Option<&str> {
        self.world.get::<Name>(entity).map(|n| n.0.as_str())
    }

    pub fn set_name(&mut self, entity: Entity, name: impl Into<String>) {
        if let Some(mut n) = self.world.get_mut::<Name>(entity) {
            n.0 = name.into();
        }
    }

    pub fn parent(&self, entity: Entity) -> Option<Entity> {
        self.world.get::<Parent>(entity).map(|p| p.0)
    }

    pub fn children(&self, entity: Entity) -> &[Entity] {
        self.world
            .get::<Children>(entity)
            .map(|c| c.0.as_slice())
            .unwrap_or(&[])
    }

    /// Moves `child` under `parent` (appended last), or makes it a root when
    /// `parent` is `None`. The local transform is kept as is.
    ///
    /// Returns `false` and leaves the hierarchy untouched if either object is
    /// missing or `parent` is `child` itself or one of its descendants.
    pub fn set_parent(&mut self, child: Entity, parent: Option<Entity>) -> bool {
        if !self.contains(child) {
            return false;
        }
        if let Some(parent) = parent {
            if !self.contains(parent) || self.is_ancestor_or_self(child, parent) {
                return false;
            }
        }
        self.detach(child);
        if let Some(parent) = parent {
            self.world.entity_mut(child).insert(Parent(parent));
            if let Some(mut children) = self.world.get_mut::<Children>(parent) {
                children.0.push(child);
            } else {
                self.world
                    .entity_mut(parent)
                    .insert(Children(vec![child]));
            }
        }
        true
    }

    fn is_ancestor_or_self(&self, ancestor: Entity, entity: Entity) -> bool {
        let mut current = Some(entity);
        while let Some(e) = current {
            if e == ancestor {
                return true;
            }
            current = self.parent(e);
        }
        false
    }

    fn detach(&mut self, child: Entity) {
        let Some(old) = self.parent(child) else {
            return;
        };
        if let Some(mut children) = self.world.get_mut::<Children>(old) {
            children.0.retain(|c| *c != child);
        }
        self.world.entity_mut(child).remove::<Parent>();
    }

    /// `root` followed by all its descendants, depth-first pre-order.
    pub fn descendants(&self, root: Entity) -> Vec<Entity> {
        let mut out = Vec::new();
        if !self.contains(root) {
            return out;
        }
        let mut stack = vec![root];
        while let Some(entity) = stack.pop() {
            out.push(entity);
            stack.extend(self.children(entity).iter().rev().copied());
        }
        out
    }

    /// Objects under `root` (including `root`) that carry a `C` component, in pre-order.
    pub fn components_in_children<C: Component>(&self, root: Entity) -> Vec<Entity> {
        self.descendants(root)
            .into_iter()
            .filter(|e| self.world.get::<C>(*e).is_some())
            .collect()
    }

    /// Duplicates the subtree rooted at `source` as a new root object.
    ///
    /// Copies names, transforms, mesh filters, renderers, and colliders.
    /// Returns `None` if `source` does not exist.
    pub fn instantiate(&mut self, source: Entity) -> Option<Entity> {
        if !self.contains(source) {
            return None;
        }
        Some(self.clone_subtree(source, None))
    }

    fn clone_subtree(&mut self, source: Entity, parent: Option<Entity>) -> Entity {
        let name = self.name(source).unwrap_or_default().to_string();
        let copy = self.spawn(name);
        self.clone_component::<Transform>(source, copy);
        self.clone_component::<MeshFilter>(source, copy);
        self.clone_component::<MeshRenderer>(source, copy);
        self.clone_component::<MeshCollider>(source, copy);
        if parent.is_some() {
            self.set_parent(copy, parent);
        }
        for child in self.children(source).to_vec() {
            self.clone_subtree(child, Some(copy));
        }
        copy
    }

    fn clone_component<C: Component + Clone>(&mut self, from: Entity, to: Entity) {
        if let Some(component) = self.world.get::<C>(from).cloned() {
            self.world.entity_mut(to).insert(component);
        }
    }

    /// Removes `root` and its whole subtree. Returns the number of removed objects.
    pub fn despawn_recursive(&mut self, root: Entity) -> usize {
        if !self.contains(root) {
            return 0;
        }
        self.detach(root);
        self.descendants(root)
            .into_iter()
            .filter(|e| self.world.despawn(*e))
            .count()
    }

    /// Local-to-world matrix, composed up the parent chain.
    pub fn world_matrix(&self, entity: Entity) -> Mat4 {
        let mut matrix = Mat4::IDENTITY;
        let mut current = Some(entity);
        while let Some(e) = current {
            if let Some(t) = self.world.get::<Transform>(e) {
                matrix = t.matrix() * matrix;
            }
            current = self.parent(e);
        }
        matrix
    }

    /// Number of live scene objects.
    pub fn object_count(&mut self) -> usize {
        self.world
            .query_filtered::<Entity, With<Name>>()
            .iter(&self.world)
            .count()
    }

    /// Root objects (no parent), in no particular order.
    pub fn roots(&mut self) -> Vec<Entity> {
        self.world
            .query_filtered::<Entity, (With<Name>, Without<Parent>)>()
            .iter(&self.world)
            .collect()
    }
}
