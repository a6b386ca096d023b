//! Live scene graph: named objects in a parent/child hierarchy carrying
//! transforms, meshes, renderers, and colliders.
//!
//! The scene is backed by a [`bevy_ecs`] [`World`](bevy_ecs::world::World).
//! Objects are entities that always carry a [`Name`] and a [`Transform`].

mod bounds;
mod components;
mod scene;
mod selection;

pub use bounds::Aabb;
pub use components::{
    Children, MaterialRef, MeshCollider, MeshFilter, MeshRef, MeshRenderer, Name, Parent,
    Transform,
};
pub use scene::Scene;
pub use selection::Selection;

pub use bevy_ecs::entity::Entity;
