//! Prefab asset format: a flattened, serializable snapshot of a hierarchy.

use glam::Vec3;
use lodforge_lod::{LodGroup, LodLevel};
use lodforge_scene::{Entity, MeshCollider, MeshFilter, MeshRenderer, Scene, Transform};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// A saved hierarchy. Nodes are stored in depth-first pre-order; node 0 is
/// the root and every other node names an earlier node as its parent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrefabAsset {
    pub nodes: Vec<PrefabNode>,
}

/// One object of a prefab and its components.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrefabNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<usize>,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh_filter: Option<MeshFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renderer: Option<MeshRenderer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collider: Option<MeshCollider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lod_group: Option<PrefabLodGroup>,
}

/// Saved [`LodGroup`]; renderers are node indices.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrefabLodGroup {
    pub local_reference_point: Vec3,
    pub size: f32,
    pub lods: Vec<PrefabLod>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrefabLod {
    pub screen_relative_height: f32,
    pub renderers: Vec<usize>,
}

impl PrefabAsset {
    /// Snapshot the subtree rooted at `root`.
    ///
    /// Fails with [`AssetError::UnknownObject`] if an LOD group lists a
    /// renderer that is not part of the subtree.
    pub fn from_scene(scene: &Scene, root: Entity) -> Result<Self, AssetError> {
        if !scene.contains(root) {
            return Err(AssetError::MissingRoot);
        }
        let order = scene.descendants(root);
        let index: FxHashMap<Entity, usize> =
            order.iter().enumerate().map(|(i, e)| (*e, i)).collect();

        let mut nodes = Vec::with_capacity(order.len());
        for (i, &entity) in order.iter().enumerate() {
            let name = scene.name(entity).unwrap_or_default().to_string();
            let parent = if i == 0 {
                None
            } else {
                scene.parent(entity).and_then(|p| index.get(&p).copied())
            };
            let lod_group = match scene.get::<LodGroup>(entity) {
                Some(group) => Some(snapshot_lod_group(group, &index, &name)?),
                None => None,
            };
            nodes.push(PrefabNode {
                name,
                parent,
                transform: scene.get::<Transform>(entity).copied().unwrap_or_default(),
                mesh_filter: scene.get::<MeshFilter>(entity).cloned(),
                renderer: scene.get::<MeshRenderer>(entity).cloned(),
                collider: scene.get::<MeshCollider>(entity).cloned(),
                lod_group,
            });
        }
        Ok(Self { nodes })
    }

    /// Check the structural rules of the format.
    pub fn validate(&self) -> Result<(), AssetError> {
        let Some(root) = self.nodes.first() else {
            return Err(AssetError::Malformed("no nodes".to_string()));
        };
        if root.parent.is_some() {
            return Err(AssetError::Malformed("root node has a parent".to_string()));
        }
        for (i, node) in self.nodes.iter().enumerate().skip(1) {
            match node.parent {
                Some(p) if p < i => {}
                _ => {
                    return Err(AssetError::Malformed(format!(
                        "node {i} ({:?}) has no valid parent",
                        node.name
                    )));
                }
            }
        }
        for node in &self.nodes {
            let Some(group) = &node.lod_group else {
                continue;
            };
            let out_of_range = group
                .lods
                .iter()
                .flat_map(|lod| lod.renderers.iter())
                .any(|r| *r >= self.nodes.len());
            if out_of_range {
                return Err(AssetError::Malformed(format!(
                    "LOD group on {:?} references a missing node",
                    node.name
                )));
            }
        }
        Ok(())
    }

    /// Name of the root node.
    pub fn root_name(&self) -> Option<&str> {
        self.nodes.first().map(|n| n.name.as_str())
    }

    /// Spawn the hierarchy into `scene` and return the new root.
    pub fn instantiate(&self, scene: &mut Scene) -> Result<Entity, AssetError> {
        self.validate()?;

        let mut spawned = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let entity = scene.spawn(node.name.clone());
            scene.insert(entity, node.transform);
            if let Some(filter) = &node.mesh_filter {
                scene.insert(entity, filter.clone());
            }
            if let Some(renderer) = &node.renderer {
                scene.insert(entity, renderer.clone());
            }
            if let Some(collider) = &node.collider {
                scene.insert(entity, collider.clone());
            }
            if let Some(parent) = node.parent {
                scene.set_parent(entity, Some(spawned[parent]));
            }
            spawned.push(entity);
        }

        for (node, &entity) in self.nodes.iter().zip(&spawned) {
            let Some(saved) = &node.lod_group else {
                continue;
            };
            let mut group = LodGroup::new();
            group.set_lods(
                saved
                    .lods
                    .iter()
                    .map(|lod| {
                        LodLevel::new(
                            lod.screen_relative_height,
                            lod.renderers.iter().map(|r| spawned[*r]).collect(),
                        )
                    })
                    .collect(),
            );
            group.local_reference_point = saved.local_reference_point;
            group.size = saved.size;
            scene.insert(entity, group);
        }

        Ok(spawned[0])
    }
}

fn snapshot_lod_group(
    group: &LodGroup,
    index: &FxHashMap<Entity, usize>,
    owner: &str,
) -> Result<PrefabLodGroup, AssetError> {
    let lods = group
        .lods()
        .iter()
        .map(|lod| {
            let renderers = lod
                .renderers
                .iter()
                .map(|r| {
                    index
                        .get(r)
                        .copied()
                        .ok_or_else(|| AssetError::UnknownObject(owner.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(PrefabLod {
                screen_relative_height: lod.screen_relative_height,
                renderers,
            })
        })
        .collect::<Result<Vec<_>, AssetError>>()?;
    Ok(PrefabLodGroup {
        local_reference_point: group.local_reference_point,
        size: group.size,
        lods,
    })
}
