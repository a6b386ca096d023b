//! The project asset store.

use std::path::{Component, Path, PathBuf};

use lodforge_scene::{Entity, Scene};

use crate::error::AssetError;
use crate::prefab::PrefabAsset;

/// Top-level folder holding every asset, relative to the project root.
pub const ASSET_ROOT: &str = "Assets";

/// File extension of saved prefabs.
pub const PREFAB_EXTENSION: &str = "prefab";

const RESERVED_NAME_CHARS: &[char] = &['/', '\\', '<', '>', ':', '"', '|', '?', '*'];

/// Path-addressed asset storage for one project.
#[derive(Clone, Debug)]
pub struct AssetDatabase {
    project_root: PathBuf,
}

impl AssetDatabase {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Filesystem location of a project-relative asset path.
    pub fn absolute_path(&self, asset_path: &str) -> PathBuf {
        asset_path
            .split('/')
            .filter(|s| !s.is_empty())
            .fold(self.project_root.clone(), |acc, segment| acc.join(segment))
    }

    /// Translate an absolute filesystem path (e.g. from a folder picker) into
    /// a project-relative asset path such as `Assets/Props`.
    pub fn to_project_relative(&self, absolute: &Path) -> Result<String, AssetError> {
        let outside = || AssetError::OutsideAssetRoot(absolute.to_path_buf());
        let root = std::path::absolute(&self.project_root).map_err(|_| outside())?;
        let target = std::path::absolute(absolute).map_err(|_| outside())?;
        let relative = target.strip_prefix(&root).map_err(|_| outside())?;

        let mut segments = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(s) => segments.push(s.to_string_lossy().into_owned()),
                Component::CurDir => {}
                _ => return Err(outside()),
            }
        }
        if segments.first().map(String::as_str) != Some(ASSET_ROOT) {
            return Err(outside());
        }
        Ok(segments.join("/"))
    }

    /// Check that `folder` is `Assets` or a folder below it, without `.`,
    /// `..`, or empty segments. A trailing `/` is tolerated.
    pub fn validate_folder(folder: &str) -> Result<(), AssetError> {
        let invalid = || AssetError::InvalidFolder(folder.to_string());
        let trimmed = folder.trim_end_matches('/');
        let mut segments = trimmed.split('/');
        if segments.next() != Some(ASSET_ROOT) {
            return Err(invalid());
        }
        if segments.any(|s| s.is_empty() || s == "." || s == "..") {
            return Err(invalid());
        }
        Ok(())
    }

    /// Check that `name` can be used as an asset file name.
    pub fn validate_name(name: &str) -> Result<(), AssetError> {
        let bad = name.trim().is_empty()
            || name == "."
            || name == ".."
            || name
                .chars()
                .any(|c| c.is_control() || RESERVED_NAME_CHARS.contains(&c));
        if bad {
            return Err(AssetError::InvalidName(name.to_string()));
        }
        Ok(())
    }

    /// `{folder}/{name}.prefab`
    pub fn prefab_path(folder: &str, name: &str) -> String {
        format!(
            "{}/{}.{}",
            folder.trim_end_matches('/'),
            name,
            PREFAB_EXTENSION
        )
    }

    pub fn exists(&self, asset_path: &str) -> bool {
        self.absolute_path(asset_path).is_file()
    }

    /// Save the hierarchy under `root` as a prefab at `asset_path`,
    /// overwriting any existing asset there. Missing folders are created.
    ///
    /// Returns the project-relative path that was written.
    pub fn save_prefab(
        &self,
        scene: &Scene,
        root: Entity,
        asset_path: &str,
    ) -> Result<String, AssetError> {
        let (folder, file_name) = asset_path
            .rsplit_once('/')
            .ok_or_else(|| AssetError::InvalidFolder(asset_path.to_string()))?;
        Self::validate_folder(folder)?;
        let stem = file_name
            .strip_suffix(&format!(".{PREFAB_EXTENSION}"))
            .unwrap_or(file_name);
        Self::validate_name(stem)?;

        let prefab = PrefabAsset::from_scene(scene, root)?;
        let pretty = ron::ser::PrettyConfig::new()
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(&prefab, pretty).map_err(AssetError::Serialize)?;

        let dir = self.absolute_path(folder);
        std::fs::create_dir_all(&dir).map_err(|source| AssetError::Io {
            path: dir.clone(),
            source,
        })?;
        let target = self.absolute_path(asset_path);
        let replaced = target.is_file();
        std::fs::write(&target, serialized).map_err(|source| AssetError::Io {
            path: target.clone(),
            source,
        })?;

        tracing::debug!(
            path = asset_path,
            nodes = prefab.nodes.len(),
            replaced,
            "saved prefab"
        );
        Ok(asset_path.to_string())
    }

    /// Read and parse the prefab at `asset_path`.
    pub fn load_prefab(&self, asset_path: &str) -> Result<PrefabAsset, AssetError> {
        let path = self.absolute_path(asset_path);
        let contents = std::fs::read_to_string(&path).map_err(|source| AssetError::Io {
            path: path.clone(),
            source,
        })?;
        let prefab: PrefabAsset = ron::from_str(&contents).map_err(|source| AssetError::Parse {
            path: asset_path.to_string(),
            source,
        })?;
        prefab.validate()?;
        Ok(prefab)
    }
}
