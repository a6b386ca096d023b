//! Editor tooling: the LOD prefab assembler and the creator tool window.
//!
//! [`build_prefab`] is the whole assembly as a single call taking explicit
//! inputs. [`LodPrefabCreator`] holds the form state a UI edits between
//! calls (name, folder, collider toggles, materials, thresholds) and keeps
//! the thresholds in step with the selection.

mod assembler;
mod error;
mod window;

pub use assembler::{BuildConfig, BuildReport, ColliderPlacement, build_prefab};
pub use error::BuildError;
pub use window::LodPrefabCreator;
