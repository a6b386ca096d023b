//! Command-line argument parsing for the LOD prefab creator.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// LODForge command-line arguments.
///
/// CLI values override settings loaded from `lodforge.ron`.
#[derive(Parser, Debug)]
#[command(
    name = "lodforge",
    about = "Assemble an LOD group prefab from a set of mesh prefabs"
)]
pub struct CliArgs {
    /// Source prefabs (project-relative), highest detail first.
    #[arg(required = true)]
    pub sources: Vec<String>,

    /// Name of the prefab to create.
    #[arg(long)]
    pub name: Option<String>,

    /// Destination folder, project-relative (`Assets/...`) or absolute.
    #[arg(long)]
    pub folder: Option<String>,

    /// Generate a mesh collider for LOD 0.
    #[arg(long)]
    pub collider: Option<bool>,

    /// Attach the generated collider to the prefab root.
    #[arg(long)]
    pub collider_on_root: Option<bool>,

    /// Material asset replacing every renderer's materials (repeatable).
    #[arg(long = "material")]
    pub materials: Vec<String>,

    /// Forget remembered override materials.
    #[arg(long, conflicts_with = "materials")]
    pub clear_materials: bool,

    /// Screen-size threshold per LOD in [0, 1] (repeatable, in LOD order).
    #[arg(long = "threshold")]
    pub thresholds: Vec<f32>,

    /// Project root directory.
    #[arg(long)]
    pub project: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Do not write the form values back to the settings file.
    #[arg(long)]
    pub no_save_settings: bool,
}

impl Config {
    /// Apply CLI overrides to loaded settings.
    ///
    /// `--folder` is left to the caller: absolute folders must go through
    /// the asset database before they can be stored.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref name) = args.name {
            self.creator.prefab_name = name.clone();
        }
        if let Some(collider) = args.collider {
            self.creator.add_collider = collider;
        }
        if let Some(on_root) = args.collider_on_root {
            self.creator.collider_on_root = on_root;
        }
        if args.clear_materials {
            self.creator.materials.clear();
        } else if !args.materials.is_empty() {
            self.creator.materials = args.materials.clone();
        }
        if let Some(ref root) = args.project {
            self.project.root = root.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
