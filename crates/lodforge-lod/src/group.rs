//! The LOD selector component.

use bevy_ecs::prelude::*;
use glam::Vec3;
use lodforge_scene::{Aabb, MeshFilter, MeshRenderer, Scene};

/// One level of detail: the renderers to show while the object covers at
/// least `screen_relative_height` of the screen height.
#[derive(Clone, Debug, PartialEq)]
pub struct LodLevel {
    /// Screen-size fraction in `[0, 1]` at which this level becomes active.
    pub screen_relative_height: f32,
    /// Renderer objects drawn for this level.
    pub renderers: Vec<Entity>,
}

impl LodLevel {
    pub fn new(screen_relative_height: f32, renderers: Vec<Entity>) -> Self {
        Self {
            screen_relative_height,
            renderers,
        }
    }
}

/// Groups renderers into ordered detail levels. Level 0 is the most detailed.
///
/// Thresholds are stored as given; nothing enforces that they decrease.
#[derive(Component, Clone, Debug, Default, PartialEq)]
pub struct LodGroup {
    lods: Vec<LodLevel>,
    /// Center of the grouped renderers, in the owner's local space.
    pub local_reference_point: Vec3,
    /// Largest extent of the grouped renderers, in the owner's local space.
    pub size: f32,
}

impl LodGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all levels.
    pub fn set_lods(&mut self, lods: Vec<LodLevel>) {
        self.lods = lods;
    }

    pub fn lods(&self) -> &[LodLevel] {
        &self.lods
    }

    pub fn lod_count(&self) -> usize {
        self.lods.len()
    }

    /// Index of the level shown at the given screen-relative height, or
    /// `None` when the object is small enough to be culled.
    ///
    /// Returns the first level whose threshold is at or below the height.
    pub fn select(&self, screen_relative_height: f32) -> Option<usize> {
        self.lods
            .iter()
            .position(|lod| screen_relative_height >= lod.screen_relative_height)
    }

    /// Recompute [`local_reference_point`](Self::local_reference_point) and
    /// [`size`](Self::size) from the meshes of every renderer in every level.
    ///
    /// `owner` is the object carrying this group. Renderers without mesh data
    /// are ignored; with no usable renderer the bounds collapse to zero.
    pub fn recalculate_bounds(&mut self, scene: &Scene, owner: Entity) {
        let world_bounds = self
            .lods
            .iter()
            .flat_map(|lod| lod.renderers.iter().copied())
            .filter(|r| scene.get::<MeshRenderer>(*r).is_some())
            .filter_map(|r| {
                let mesh = scene.get::<MeshFilter>(r)?.mesh.as_ref()?;
                Some(mesh.bounds.transformed(&scene.world_matrix(r)))
            })
            .reduce(|a, b| a.union(&b));

        let Some(world_bounds) = world_bounds else {
            self.local_reference_point = Vec3::ZERO;
            self.size = 0.0;
            return;
        };

        let to_local = scene.world_matrix(owner).inverse();
        let local: Aabb = world_bounds.transformed(&to_local);
        self.local_reference_point = local.center();
        self.size = local.size().max_element();
        tracing::debug!(
            size = self.size,
            center = ?self.local_reference_point,
            "recalculated LOD group bounds"
        );
    }
}
