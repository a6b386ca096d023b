//! Settings record with explicit defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted settings inside the config directory.
pub const CONFIG_FILE_NAME: &str = "lodforge.ron";

/// Top-level settings, persisted as one unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Last-used LOD prefab creator form values.
    pub creator: CreatorConfig,
    /// Project location.
    pub project: ProjectConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Form values of the LOD prefab creator, remembered across sessions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CreatorConfig {
    /// Name of the prefab asset to create (without extension).
    pub prefab_name: String,
    /// Project-relative destination folder, e.g. `Assets/Props`.
    pub destination_folder: String,
    /// Generate a mesh collider for the nearest (LOD 0) object.
    pub add_collider: bool,
    /// Attach the generated collider to the prefab root instead of LOD 0.
    pub collider_on_root: bool,
    /// Material asset paths that replace every renderer's materials.
    /// Empty keeps the source materials.
    pub materials: Vec<String>,
}

/// Project settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project root directory. Assets live under `{root}/Assets`.
    pub root: PathBuf,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for CreatorConfig {
    fn default() -> Self {
        Self {
            prefab_name: "NewLODPrefab".to_string(),
            destination_folder: "Assets".to_string(),
            add_collider: false,
            collider_on_root: false,
            materials: Vec::new(),
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save ---

impl Config {
    /// Load settings from the given directory, or create a default settings file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
                    path: config_path.clone(),
                    source,
                })?;
            let config: Config = ron::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: config_path.clone(),
                source,
            })?;
            log::info!("Loaded settings from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default settings at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save settings to the given directory as `lodforge.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path.clone(),
            source,
        })?;
        log::debug!("Saved settings to {}", config_path.display());
        Ok(())
    }
}
