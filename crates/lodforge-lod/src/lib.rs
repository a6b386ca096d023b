//! Level-of-detail grouping: the LOD selector component, screen-size based
//! slot selection, and the per-selection threshold list.

mod group;
mod thresholds;

pub use group::{LodGroup, LodLevel};
pub use thresholds::{ThresholdList, default_thresholds};
