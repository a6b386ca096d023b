//! The LOD prefab creator tool window.

use std::path::Path;

use lodforge_assets::{AssetDatabase, AssetError};
use lodforge_config::CreatorConfig;
use lodforge_lod::ThresholdList;
use lodforge_scene::{Scene, Selection};

use crate::assembler::{BuildConfig, BuildReport, build_prefab};
use crate::error::BuildError;

/// Form state of the LOD prefab creator.
///
/// Opened with the persisted settings, edited by a UI between frames, and
/// closed to hand the settings back for persisting.
#[derive(Clone, Debug)]
pub struct LodPrefabCreator {
    settings: CreatorConfig,
    thresholds: ThresholdList,
}

impl LodPrefabCreator {
    pub const TITLE: &'static str = "LOD Group Prefab Creator";

    /// Open the window with the last-used settings.
    pub fn open(settings: CreatorConfig) -> Self {
        tracing::debug!(
            name = %settings.prefab_name,
            folder = %settings.destination_folder,
            "Opened LOD prefab creator"
        );
        Self {
            settings,
            thresholds: ThresholdList::new(),
        }
    }

    /// Close the window, returning the settings to persist.
    pub fn close(self) -> CreatorConfig {
        self.settings
    }

    pub fn settings(&self) -> &CreatorConfig {
        &self.settings
    }

    pub fn thresholds(&self) -> &ThresholdList {
        &self.thresholds
    }

    /// Observe the current selection; thresholds reset when it changed.
    pub fn refresh_selection(&mut self, selection: &Selection) -> bool {
        self.thresholds.refresh(selection)
    }

    /// Slider edit for level `index`; the value is clamped to `[0, 1]`.
    pub fn set_threshold(&mut self, index: usize, value: f32) -> bool {
        self.thresholds.set(index, value)
    }

    pub fn set_prefab_name(&mut self, name: impl Into<String>) {
        self.settings.prefab_name = name.into();
    }

    pub fn set_add_collider(&mut self, enabled: bool) {
        self.settings.add_collider = enabled;
    }

    pub fn set_collider_on_root(&mut self, on_root: bool) {
        self.settings.collider_on_root = on_root;
    }

    /// Resize the material list. New slots start unassigned.
    pub fn set_material_count(&mut self, count: usize) {
        self.settings.materials.resize(count, String::new());
    }

    /// Assign material slot `index`. Returns `false` if out of range.
    pub fn set_material(&mut self, index: usize, path: impl Into<String>) -> bool {
        match self.settings.materials.get_mut(index) {
            Some(slot) => {
                *slot = path.into();
                true
            }
            None => false,
        }
    }

    /// Set a project-relative destination folder typed by the user.
    pub fn set_destination_folder(&mut self, folder: &str) -> Result<(), AssetError> {
        AssetDatabase::validate_folder(folder)?;
        self.settings.destination_folder = folder.trim_end_matches('/').to_string();
        Ok(())
    }

    /// Accept the absolute path returned by a folder picker. The folder must
    /// be inside the project's `Assets`; otherwise the current folder is kept.
    pub fn choose_folder(
        &mut self,
        assets: &AssetDatabase,
        picked: &Path,
    ) -> Result<&str, AssetError> {
        match assets.to_project_relative(picked) {
            Ok(relative) => {
                self.settings.destination_folder = relative;
                Ok(self.settings.destination_folder.as_str())
            }
            Err(err) => {
                tracing::error!("Selected folder must be inside the project's Assets folder: {err}");
                Err(err)
            }
        }
    }

    /// Build configuration from the current form values.
    pub fn build_config(&self) -> BuildConfig {
        BuildConfig::from(&self.settings)
    }

    /// "Create LOD Prefab" button: refresh against `selection`, then build.
    pub fn create_prefab(
        &mut self,
        scene: &mut Scene,
        assets: &AssetDatabase,
        selection: &Selection,
    ) -> Result<BuildReport, BuildError> {
        self.refresh_selection(selection);
        let config = self.build_config();
        build_prefab(scene, assets, selection, self.thresholds.values(), &config)
    }

    /// Text rendering of the form for the last observed selection.
    pub fn form_lines(&self, scene: &Scene) -> Vec<String> {
        let mut lines = vec![
            Self::TITLE.to_string(),
            format!("Prefab Name: {}", self.settings.prefab_name),
            format!("Destination Folder: {}", self.settings.destination_folder),
            "Selected Meshes:".to_string(),
        ];

        let selection = self.thresholds.observed();
        if selection.is_empty() {
            lines.push("No meshes selected!".to_string());
        }
        for (i, entity) in selection.iter().enumerate() {
            let name = scene.name(entity).unwrap_or("<missing>");
            lines.push(format!("{}: {name}", i + 1));
        }

        lines.push("LOD Settings:".to_string());
        for (i, value) in self.thresholds.values().iter().enumerate() {
            lines.push(format!("LOD {} Threshold: {value:.2}", i + 1));
        }

        lines.push(format!("Add Collider to LOD 1: {}", yes_no(self.settings.add_collider)));
        if self.settings.add_collider {
            lines.push(format!(
                "Collider on Root: {}",
                yes_no(self.settings.collider_on_root)
            ));
        }

        lines.push(format!("Materials: {}", self.settings.materials.len()));
        for (i, material) in self.settings.materials.iter().enumerate() {
            let shown = if material.is_empty() { "(none)" } else { material.as_str() };
            lines.push(format!("Material {}: {shown}", i + 1));
        }
        lines
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
