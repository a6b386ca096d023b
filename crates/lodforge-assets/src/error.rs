//! Asset store error types.

use std::path::PathBuf;

/// Errors returned by the asset store.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// An absolute path does not lie inside the project's `Assets` folder.
    #[error("{0} is not inside the project's Assets folder")]
    OutsideAssetRoot(PathBuf),

    /// A project-relative folder is empty, not under `Assets`, or has `.`/`..` segments.
    #[error("invalid asset folder {0:?}")]
    InvalidFolder(String),

    /// An asset file name is empty or contains reserved characters.
    #[error("invalid asset name {0:?}")]
    InvalidName(String),

    /// Reading or writing an asset file failed.
    #[error("asset I/O failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize a prefab to RON.
    #[error("failed to serialize prefab: {0}")]
    Serialize(#[source] ron::Error),

    /// Failed to parse a prefab file.
    #[error("failed to parse prefab {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ron::error::SpannedError,
    },

    /// A component references an object outside the hierarchy being saved.
    #[error("{0:?} references an object outside the saved hierarchy")]
    UnknownObject(String),

    /// The hierarchy root does not exist in the scene.
    #[error("object to save does not exist in the scene")]
    MissingRoot,

    /// A prefab file is structurally inconsistent.
    #[error("malformed prefab: {0}")]
    Malformed(String),
}
