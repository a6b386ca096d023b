//! Settings error types.

use std::path::PathBuf;

/// Errors that can occur when loading, saving, or parsing the settings file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Creating the settings directory or writing the file failed.
    #[error("failed to write settings {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid RON for [`Config`](crate::Config).
    #[error("failed to parse settings {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[source] ron::Error),
}
