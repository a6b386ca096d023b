//! Scene object components.

use bevy_ecs::prelude::*;
use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::bounds::Aabb;

/// Display name of a scene object. Every scene object has one.
#[derive(Component, Clone, Debug, PartialEq, Eq, Default)]
pub struct Name(pub String);

impl Name {
    /// Creates a new [`Name`] from anything that converts to `String`.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Local transform relative to the parent (or the scene origin for roots).
#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Local-to-parent matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Parent link. Kept in sync with the parent's [`Children`] by [`Scene`](crate::Scene).
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Parent(pub Entity);

/// Ordered child list.
#[derive(Component, Clone, Debug, Default, PartialEq, Eq)]
pub struct Children(pub Vec<Entity>);

/// Reference to a mesh asset together with its local-space bounds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshRef {
    /// Project-relative asset path of the mesh.
    pub path: String,
    /// Bounds of the mesh vertices in the owning object's local space.
    pub bounds: Aabb,
}

impl MeshRef {
    pub fn new(path: impl Into<String>, bounds: Aabb) -> Self {
        Self {
            path: path.into(),
            bounds,
        }
    }
}

/// Mesh surface data of an object. `mesh: None` is an unassigned slot.
#[derive(Component, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshFilter {
    pub mesh: Option<MeshRef>,
}

impl MeshFilter {
    pub fn new(mesh: MeshRef) -> Self {
        Self { mesh: Some(mesh) }
    }
}

/// Reference to a material asset by project-relative path.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialRef(pub String);

impl MaterialRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &str {
        &self.0
    }
}

/// Draws the object's mesh with an ordered list of materials (one per submesh).
#[derive(Component, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshRenderer {
    pub materials: Vec<MaterialRef>,
}

impl MeshRenderer {
    pub fn new(materials: Vec<MaterialRef>) -> Self {
        Self { materials }
    }
}

/// Collision volume built from a mesh surface.
#[derive(Component, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshCollider {
    pub mesh: MeshRef,
    pub convex: bool,
}

impl MeshCollider {
    pub fn new(mesh: MeshRef) -> Self {
        Self {
            mesh,
            convex: false,
        }
    }
}
