//! Assembles an LOD group prefab from selected mesh objects.

use lodforge_assets::AssetDatabase;
use lodforge_config::CreatorConfig;
use lodforge_lod::{LodGroup, LodLevel};
use lodforge_scene::{
    Entity, MaterialRef, MeshCollider, MeshFilter, MeshRenderer, Scene, Selection,
};
use tracing::{debug, error, info, warn};

use crate::error::BuildError;

/// Inputs of one prefab build besides the selection and thresholds.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildConfig {
    /// Root object name and asset file stem.
    pub prefab_name: String,
    /// Project-relative folder the prefab is written to.
    pub destination_folder: String,
    /// Generate a mesh collider from the LOD 0 mesh.
    pub add_collider_to_nearest: bool,
    /// Put the generated collider on the prefab root instead of LOD 0.
    pub collider_on_root: bool,
    /// Replaces every renderer's material list when non-empty.
    pub materials: Vec<MaterialRef>,
}

impl From<&CreatorConfig> for BuildConfig {
    /// Unassigned (empty) material slots are dropped.
    fn from(settings: &CreatorConfig) -> Self {
        Self {
            prefab_name: settings.prefab_name.clone(),
            destination_folder: settings.destination_folder.clone(),
            add_collider_to_nearest: settings.add_collider,
            collider_on_root: settings.collider_on_root,
            materials: settings
                .materials
                .iter()
                .filter(|m| !m.trim().is_empty())
                .map(MaterialRef::new)
                .collect(),
        }
    }
}

/// Where the generated collider ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColliderPlacement {
    /// No collider was requested.
    None,
    /// Attached to the LOD 0 object.
    Nearest,
    /// Attached to the prefab root.
    Root,
    /// Requested, but LOD 0 carries no mesh to build it from.
    Skipped,
}

/// Summary of a successful build.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildReport {
    /// Project-relative path of the saved prefab.
    pub path: String,
    pub lod_count: usize,
    /// Renderers across all levels.
    pub renderer_count: usize,
    pub collider: ColliderPlacement,
}

/// Build an LOD group prefab from `selection` and save it to the asset store.
///
/// Each selected object is duplicated under a new root named after the
/// prefab, renamed `LOD {i+1}`, and becomes level `i` with threshold
/// `thresholds[i]`. The root is removed from the scene once the save has
/// been attempted, whether or not it succeeded.
pub fn build_prefab(
    scene: &mut Scene,
    assets: &AssetDatabase,
    selection: &Selection,
    thresholds: &[f32],
    config: &BuildConfig,
) -> Result<BuildReport, BuildError> {
    if selection.is_empty() {
        warn!("No meshes selected for creating the LOD group prefab");
        return Err(BuildError::EmptySelection);
    }
    if thresholds.len() != selection.len() {
        error!(
            selection = selection.len(),
            thresholds = thresholds.len(),
            "Threshold count does not match selection"
        );
        return Err(BuildError::ThresholdMismatch {
            selection: selection.len(),
            thresholds: thresholds.len(),
        });
    }
    if AssetDatabase::validate_folder(&config.destination_folder).is_err() {
        error!(folder = %config.destination_folder, "Invalid destination folder");
        return Err(BuildError::InvalidDestination(
            config.destination_folder.clone(),
        ));
    }
    if let Some(index) = selection.iter().position(|e| !scene.contains(e)) {
        error!(index, "Selected object no longer exists");
        return Err(BuildError::MissingSource { index });
    }

    let root = scene.spawn(config.prefab_name.clone());
    scene.insert(root, LodGroup::new());

    let (lods, collider) = assemble_levels(scene, root, selection, thresholds, config);
    let lod_count = lods.len();
    let renderer_count = lods.iter().map(|l| l.renderers.len()).sum();

    let mut group = LodGroup::new();
    group.set_lods(lods);
    group.recalculate_bounds(scene, root);
    scene.insert(root, group);

    let path = AssetDatabase::prefab_path(&config.destination_folder, &config.prefab_name);
    // The name is checked on its own: a `/` in it would otherwise be read
    // as a folder separator once joined into the path.
    let saved = AssetDatabase::validate_name(&config.prefab_name)
        .and_then(|()| assets.save_prefab(scene, root, &path));
    let removed = scene.despawn_recursive(root);
    debug!(removed, "Removed temporary LOD root from scene");

    match saved {
        Ok(path) => {
            info!("LOD prefab created and saved at {path}");
            Ok(BuildReport {
                path,
                lod_count,
                renderer_count,
                collider,
            })
        }
        Err(source) => {
            error!("Failed to save LOD prefab at {path}: {source}");
            Err(BuildError::AssetWriteRejected { path, source })
        }
    }
}

fn assemble_levels(
    scene: &mut Scene,
    root: Entity,
    selection: &Selection,
    thresholds: &[f32],
    config: &BuildConfig,
) -> (Vec<LodLevel>, ColliderPlacement) {
    let mut lods = Vec::with_capacity(selection.len());
    let mut collider = ColliderPlacement::None;

    for (i, (source, &threshold)) in selection.iter().zip(thresholds).enumerate() {
        // Sources were checked to exist before the root was created.
        let Some(lod_object) = scene.instantiate(source) else {
            continue;
        };
        scene.set_name(lod_object, format!("LOD {}", i + 1));
        scene.set_parent(lod_object, Some(root));

        if i == 0 && config.add_collider_to_nearest {
            collider = attach_collider(scene, root, lod_object, config.collider_on_root);
        }

        let renderers = scene.components_in_children::<MeshRenderer>(lod_object);
        if !config.materials.is_empty() {
            for &renderer in &renderers {
                if let Some(mut r) = scene.get_mut::<MeshRenderer>(renderer) {
                    r.materials = config.materials.clone();
                }
            }
        }
        lods.push(LodLevel::new(threshold, renderers));
    }

    (lods, collider)
}

fn attach_collider(
    scene: &mut Scene,
    root: Entity,
    nearest: Entity,
    on_root: bool,
) -> ColliderPlacement {
    let mesh = scene
        .get::<MeshFilter>(nearest)
        .and_then(|filter| filter.mesh.clone());
    let Some(mesh) = mesh else {
        debug!("LOD 1 has no mesh data, skipping collider");
        return ColliderPlacement::Skipped;
    };
    if on_root {
        scene.insert(root, MeshCollider::new(mesh));
        ColliderPlacement::Root
    } else {
        scene.insert(nearest, MeshCollider::new(mesh));
        ColliderPlacement::Nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use lodforge_assets::PrefabAsset;
    use lodforge_lod::default_thresholds;
    use lodforge_scene::{Aabb, MeshRef};

    struct Fixture {
        _dir: tempfile::TempDir,
        assets: AssetDatabase,
        scene: Scene,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let assets = AssetDatabase::new(dir.path());
            Self {
                _dir: dir,
                assets,
                scene: Scene::new(),
            }
        }

        /// A mesh object with one nested child renderer.
        fn mesh_source(&mut self, name: &str) -> Entity {
            let e = self.scene.spawn(name);
            self.scene.insert(
                e,
                MeshFilter::new(MeshRef::new(
                    format!("Assets/Meshes/{name}.mesh"),
                    Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE),
                )),
            );
            self.scene.insert(
                e,
                MeshRenderer::new(vec![MaterialRef::new(format!("Assets/{name}.mat"))]),
            );
            let detail = self.scene.spawn(format!("{name}_detail"));
            self.scene.insert(
                detail,
                MeshRenderer::new(vec![MaterialRef::new("Assets/detail.mat")]),
            );
            self.scene.set_parent(detail, Some(e));
            e
        }

        fn selection(&mut self, n: usize) -> Selection {
            Selection::from_entities((0..n).map(|i| self.mesh_source(&format!("rock{i}"))))
        }

        fn build(
            &mut self,
            selection: &Selection,
            thresholds: &[f32],
            config: &BuildConfig,
        ) -> Result<BuildReport, BuildError> {
            build_prefab(&mut self.scene, &self.assets, selection, thresholds, config)
        }

        fn load(&self, path: &str) -> PrefabAsset {
            self.assets.load_prefab(path).unwrap()
        }
    }

    fn config() -> BuildConfig {
        BuildConfig {
            prefab_name: "Foo".to_string(),
            destination_folder: "Assets/X".to_string(),
            add_collider_to_nearest: false,
            collider_on_root: false,
            materials: Vec::new(),
        }
    }

    fn colliders(prefab: &PrefabAsset) -> Vec<&str> {
        prefab
            .nodes
            .iter()
            .filter(|n| n.collider.is_some())
            .map(|n| n.name.as_str())
            .collect()
    }

    #[test]
    fn test_slots_follow_selection_order_and_thresholds() {
        let mut fx = Fixture::new();
        let selection = fx.selection(3);
        let thresholds = [0.6, 0.3, 0.1];
        let report = fx.build(&selection, &thresholds, &config()).unwrap();
        assert_eq!(report.lod_count, 3);
        assert_eq!(report.renderer_count, 6);

        let prefab = fx.load(&report.path);
        let root = &prefab.nodes[0];
        assert_eq!(root.name, "Foo");
        let group = root.lod_group.as_ref().unwrap();
        assert_eq!(group.lods.len(), 3);
        for (i, lod) in group.lods.iter().enumerate() {
            assert_eq!(lod.screen_relative_height, thresholds[i]);
            let owner = &prefab.nodes[lod.renderers[0]];
            assert_eq!(owner.name, format!("LOD {}", i + 1));
            assert_eq!(
                owner.mesh_filter.as_ref().unwrap().mesh.as_ref().unwrap().path,
                format!("Assets/Meshes/rock{i}.mesh")
            );
            // The nested child renderer is collected too.
            assert_eq!(lod.renderers.len(), 2);
        }
    }

    #[test]
    fn test_default_thresholds_carried_into_slots() {
        let mut fx = Fixture::new();
        let selection = fx.selection(4);
        let report = fx
            .build(&selection, &default_thresholds(4), &config())
            .unwrap();
        let prefab = fx.load(&report.path);
        let heights: Vec<f32> = prefab.nodes[0]
            .lod_group
            .as_ref()
            .unwrap()
            .lods
            .iter()
            .map(|l| l.screen_relative_height)
            .collect();
        assert_eq!(heights, vec![1.0, 0.75, 0.5, 0.25]);
    }

    #[test]
    fn test_non_monotonic_thresholds_pass_through() {
        let mut fx = Fixture::new();
        let selection = fx.selection(2);
        let report = fx.build(&selection, &[0.2, 0.9], &config()).unwrap();
        let prefab = fx.load(&report.path);
        let group = prefab.nodes[0].lod_group.as_ref().unwrap();
        assert_eq!(group.lods[0].screen_relative_height, 0.2);
        assert_eq!(group.lods[1].screen_relative_height, 0.9);
    }

    #[test]
    fn test_empty_selection_touches_nothing() {
        let mut fx = Fixture::new();
        let before = fx.scene.object_count();
        let result = fx.build(&Selection::default(), &[], &config());
        assert!(matches!(result, Err(BuildError::EmptySelection)));
        assert_eq!(fx.scene.object_count(), before);
        assert!(!fx.assets.project_root().join("Assets").exists());
    }

    #[test]
    fn test_threshold_mismatch_fails_before_mutation() {
        let mut fx = Fixture::new();
        let selection = fx.selection(3);
        let before = fx.scene.object_count();
        let result = fx.build(&selection, &[1.0, 0.5], &config());
        assert!(matches!(
            result,
            Err(BuildError::ThresholdMismatch {
                selection: 3,
                thresholds: 2
            })
        ));
        assert_eq!(fx.scene.object_count(), before);
    }

    #[test]
    fn test_invalid_destination() {
        let mut fx = Fixture::new();
        let selection = fx.selection(1);
        let before = fx.scene.object_count();
        for folder in ["", "Library/Cache", "Assets/../Secrets"] {
            let mut cfg = config();
            cfg.destination_folder = folder.to_string();
            let result = fx.build(&selection, &[1.0], &cfg);
            assert!(
                matches!(result, Err(BuildError::InvalidDestination(_))),
                "{folder:?}"
            );
        }
        assert_eq!(fx.scene.object_count(), before);
    }

    #[test]
    fn test_despawned_source_is_reported() {
        let mut fx = Fixture::new();
        let selection = fx.selection(2);
        let gone = selection.get(1).unwrap();
        fx.scene.despawn_recursive(gone);
        let before = fx.scene.object_count();
        let result = fx.build(&selection, &[1.0, 0.5], &config());
        assert!(matches!(result, Err(BuildError::MissingSource { index: 1 })));
        assert_eq!(fx.scene.object_count(), before);
    }

    #[test]
    fn test_materials_overwrite_every_renderer() {
        let mut fx = Fixture::new();
        let selection = fx.selection(2);
        let mut cfg = config();
        cfg.materials = vec![
            MaterialRef::new("Assets/Override/A.mat"),
            MaterialRef::new("Assets/Override/B.mat"),
        ];
        let report = fx.build(&selection, &[1.0, 0.5], &cfg).unwrap();
        let prefab = fx.load(&report.path);
        let group = prefab.nodes[0].lod_group.as_ref().unwrap();
        for lod in &group.lods {
            for &r in &lod.renderers {
                let renderer = prefab.nodes[r].renderer.as_ref().unwrap();
                assert_eq!(renderer.materials, cfg.materials);
            }
        }
    }

    #[test]
    fn test_empty_materials_keep_originals() {
        let mut fx = Fixture::new();
        let selection = fx.selection(2);
        let report = fx.build(&selection, &[1.0, 0.5], &config()).unwrap();
        let prefab = fx.load(&report.path);
        let lod1 = prefab.nodes.iter().find(|n| n.name == "LOD 2").unwrap();
        assert_eq!(
            lod1.renderer.as_ref().unwrap().materials,
            vec![MaterialRef::new("Assets/rock1.mat")]
        );
        let detail = prefab.nodes.iter().find(|n| n.name == "rock1_detail").unwrap();
        assert_eq!(
            detail.renderer.as_ref().unwrap().materials,
            vec![MaterialRef::new("Assets/detail.mat")]
        );
        // Sources in the scene are never modified.
        let source = selection.get(0).unwrap();
        assert_eq!(
            fx.scene.get::<MeshRenderer>(source).unwrap().materials,
            vec![MaterialRef::new("Assets/rock0.mat")]
        );
    }

    #[test]
    fn test_collider_on_nearest() {
        let mut fx = Fixture::new();
        let selection = fx.selection(3);
        let mut cfg = config();
        cfg.add_collider_to_nearest = true;
        let report = fx.build(&selection, &[1.0, 0.5, 0.2], &cfg).unwrap();
        assert_eq!(report.collider, ColliderPlacement::Nearest);
        let prefab = fx.load(&report.path);
        assert_eq!(colliders(&prefab), vec!["LOD 1"]);
    }

    #[test]
    fn test_collider_on_root() {
        let mut fx = Fixture::new();
        let selection = fx.selection(3);
        let mut cfg = config();
        cfg.add_collider_to_nearest = true;
        cfg.collider_on_root = true;
        let report = fx.build(&selection, &[1.0, 0.5, 0.2], &cfg).unwrap();
        assert_eq!(report.collider, ColliderPlacement::Root);
        let prefab = fx.load(&report.path);
        assert_eq!(colliders(&prefab), vec!["Foo"]);
        assert_eq!(
            prefab.nodes[0].collider.as_ref().unwrap().mesh.path,
            "Assets/Meshes/rock0.mesh"
        );
    }

    #[test]
    fn test_no_collider_unless_requested() {
        let mut fx = Fixture::new();
        let selection = fx.selection(2);
        let mut cfg = config();
        cfg.collider_on_root = true;
        let report = fx.build(&selection, &[1.0, 0.5], &cfg).unwrap();
        assert_eq!(report.collider, ColliderPlacement::None);
        assert!(colliders(&fx.load(&report.path)).is_empty());
    }

    #[test]
    fn test_collider_skipped_without_mesh_data() {
        let mut fx = Fixture::new();
        let bare = fx.scene.spawn("empty");
        fx.scene.insert(bare, MeshRenderer::default());
        let selection = Selection::from_entities([bare]);
        let mut cfg = config();
        cfg.add_collider_to_nearest = true;
        let report = fx.build(&selection, &[1.0], &cfg).unwrap();
        assert_eq!(report.collider, ColliderPlacement::Skipped);
        assert!(colliders(&fx.load(&report.path)).is_empty());
    }

    #[test]
    fn test_reported_path_and_overwrite() {
        let mut fx = Fixture::new();
        let selection = fx.selection(2);
        let first = fx.build(&selection, &[1.0, 0.5], &config()).unwrap();
        assert_eq!(first.path, "Assets/X/Foo.prefab");
        let second = fx.build(&selection, &[1.0, 0.5], &config()).unwrap();
        assert_eq!(second.path, first.path);

        let folder = fx.assets.project_root().join("Assets/X");
        assert_eq!(std::fs::read_dir(folder).unwrap().count(), 1);
    }

    #[test]
    fn test_no_temporary_root_left_after_success() {
        let mut fx = Fixture::new();
        let selection = fx.selection(2);
        let before = fx.scene.object_count();
        fx.build(&selection, &[1.0, 0.5], &config()).unwrap();
        assert_eq!(fx.scene.object_count(), before);
        assert!(fx.scene.roots().iter().all(|r| fx.scene.name(*r) != Some("Foo")));
    }

    #[test]
    fn test_no_temporary_root_left_after_rejected_write() {
        let mut fx = Fixture::new();
        let selection = fx.selection(2);
        let before = fx.scene.object_count();
        let mut cfg = config();
        cfg.prefab_name = "Bad:Name".to_string();
        let result = fx.build(&selection, &[1.0, 0.5], &cfg);
        assert!(matches!(
            result,
            Err(BuildError::AssetWriteRejected { ref path, .. }) if path == "Assets/X/Bad:Name.prefab"
        ));
        assert_eq!(fx.scene.object_count(), before);
    }

    #[test]
    fn test_name_with_separator_is_rejected() {
        let mut fx = Fixture::new();
        let selection = fx.selection(1);
        let before = fx.scene.object_count();
        let mut cfg = config();
        cfg.prefab_name = "Sub/Foo".to_string();
        let result = fx.build(&selection, &[1.0], &cfg);
        assert!(matches!(
            result,
            Err(BuildError::AssetWriteRejected { ref path, .. }) if path == "Assets/X/Sub/Foo.prefab"
        ));
        assert!(!fx.assets.exists("Assets/X/Sub/Foo.prefab"));
        assert_eq!(fx.scene.object_count(), before);
    }

    #[test]
    fn test_build_config_from_settings_drops_unassigned_materials() {
        let settings = CreatorConfig {
            prefab_name: "Tree".to_string(),
            destination_folder: "Assets/Foliage".to_string(),
            add_collider: true,
            collider_on_root: false,
            materials: vec![String::new(), "Assets/Bark.mat".to_string()],
        };
        let cfg = BuildConfig::from(&settings);
        assert_eq!(cfg.prefab_name, "Tree");
        assert!(cfg.add_collider_to_nearest);
        assert_eq!(cfg.materials, vec![MaterialRef::new("Assets/Bark.mat")]);
    }
}
