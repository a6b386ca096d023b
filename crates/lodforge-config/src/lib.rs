//! Settings for the LOD prefab creator.
//!
//! All tool settings live in a single [`Config`] record persisted to disk as
//! one RON file. Missing keys fall back to defaults, so older files keep
//! loading as fields are added. CLI overrides are applied on top via clap.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE_NAME, Config, CreatorConfig, DebugConfig, ProjectConfig};
pub use error::ConfigError;
