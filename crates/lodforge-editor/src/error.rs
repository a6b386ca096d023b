//! Build error types.

use lodforge_assets::AssetError;

/// Reasons [`build_prefab`](crate::build_prefab) can fail.
///
/// Every variant except [`BuildError::AssetWriteRejected`] is detected
/// before the scene is touched.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Nothing was selected.
    #[error("no meshes selected for creating the LOD group prefab")]
    EmptySelection,

    /// The threshold list does not have one value per selected object.
    #[error("{thresholds} thresholds for {selection} selected objects")]
    ThresholdMismatch { selection: usize, thresholds: usize },

    /// The destination folder is empty or not inside the project's assets.
    #[error("invalid destination folder {0:?}")]
    InvalidDestination(String),

    /// A selected object no longer exists in the scene.
    #[error("selected object {index} no longer exists")]
    MissingSource { index: usize },

    /// The asset store refused to write the prefab.
    #[error("could not save prefab at {path}: {source}")]
    AssetWriteRejected {
        path: String,
        #[source]
        source: AssetError,
    },
}
