//! Path-addressed asset store rooted at a project directory.
//!
//! Assets live under `{project}/Assets` and are addressed by project-relative
//! paths with `/` separators (`Assets/Props/Rock.prefab`). Prefabs are stored
//! as RON snapshots of a scene hierarchy.

mod database;
mod error;
mod prefab;

pub use database::{ASSET_ROOT, AssetDatabase, PREFAB_EXTENSION};
pub use error::AssetError;
pub use prefab::{PrefabAsset, PrefabLod, PrefabLodGroup, PrefabNode};
