//! Command-line driver for the LOD prefab creator.
//!
//! Loads the source prefabs named on the command line into a fresh scene,
//! selects them in order, and runs the creator window's build once.

pub mod platform;

use std::path::Path;

use lodforge_assets::{AssetDatabase, AssetError};
use lodforge_config::{CONFIG_FILE_NAME, CliArgs, Config, ConfigError};
use lodforge_editor::{BuildError, BuildReport, LodPrefabCreator};
use lodforge_scene::{Scene, Selection};
use tracing::{debug, info, warn};

/// Errors surfaced by [`run`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The `--folder` value is not usable as a destination.
    #[error("invalid destination folder: {0}")]
    Folder(#[source] AssetError),

    /// A source prefab could not be loaded.
    #[error("failed to load source {path}: {source}")]
    Source {
        path: String,
        #[source]
        source: AssetError,
    },

    /// The build itself failed.
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Where the settings of this session came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsSource {
    /// Read from an existing settings file.
    Loaded,
    /// No file existed; defaults were written.
    Created,
}

/// Load (or create) the settings in `config_dir` and apply the command-line
/// overrides. Runs before logging is up, so the caller reports the source.
pub fn load_settings(
    config_dir: &Path,
    args: &CliArgs,
) -> Result<(Config, SettingsSource), ConfigError> {
    let source = if config_dir.join(CONFIG_FILE_NAME).exists() {
        SettingsSource::Loaded
    } else {
        SettingsSource::Created
    };
    let mut config = Config::load_or_create(config_dir)?;
    config.apply_cli_overrides(args);
    Ok((config, source))
}

/// Instantiate every source prefab into `scene` and select the new roots in order.
pub fn load_selection(
    scene: &mut Scene,
    assets: &AssetDatabase,
    sources: &[String],
) -> Result<Selection, AppError> {
    let mut selected = Vec::with_capacity(sources.len());
    for path in sources {
        let source_err = |source| AppError::Source {
            path: path.clone(),
            source,
        };
        let prefab = assets.load_prefab(path).map_err(source_err)?;
        let root = prefab.instantiate(scene).map_err(source_err)?;
        debug!(path = %path, nodes = prefab.nodes.len(), "Loaded source prefab");
        selected.push(root);
    }
    Ok(Selection::from_entities(selected))
}

/// Run one build with the given arguments and settings.
///
/// `config.creator` is updated with the form values used, also when the
/// build fails, so they can be persisted for the next session.
pub fn run(args: &CliArgs, config: &mut Config) -> Result<BuildReport, AppError> {
    let assets = AssetDatabase::new(&config.project.root);
    let mut window = LodPrefabCreator::open(config.creator.clone());

    if let Some(folder) = &args.folder {
        let picked = Path::new(folder);
        if picked.is_absolute() {
            window
                .choose_folder(&assets, picked)
                .map_err(AppError::Folder)?;
        } else {
            window
                .set_destination_folder(folder)
                .map_err(AppError::Folder)?;
        }
    }

    let mut scene = Scene::new();
    let selection = load_selection(&mut scene, &assets, &args.sources)?;
    window.refresh_selection(&selection);

    if args.thresholds.len() > selection.len() {
        warn!(
            given = args.thresholds.len(),
            levels = selection.len(),
            "Ignoring thresholds beyond the number of sources"
        );
    }
    for (i, value) in args.thresholds.iter().enumerate() {
        window.set_threshold(i, *value);
    }

    for line in window.form_lines(&scene) {
        debug!("{line}");
    }

    let result = window.create_prefab(&mut scene, &assets, &selection);
    config.creator = window.close();
    let report = result?;
    info!(
        path = %report.path,
        lods = report.lod_count,
        renderers = report.renderer_count,
        "Build finished"
    );
    Ok(report)
}
