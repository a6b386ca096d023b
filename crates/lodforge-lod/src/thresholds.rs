//! Screen-size thresholds tied to the current selection.

use lodforge_scene::Selection;

/// Default screen-size thresholds for `count` LOD levels: `1 - i / count`.
///
/// Level 0 starts at 1.0 and each further level steps down evenly.
/// Returns an empty list for zero levels.
pub fn default_thresholds(count: usize) -> Vec<f32> {
    if count == 0 {
        return Vec::new();
    }
    (0..count)
        .map(|i| 1.0 - i as f32 / count as f32)
        .collect()
}

/// One threshold per selected object, reset whenever the selection changes.
///
/// Edits made through [`ThresholdList::set`] survive repeated refreshes with
/// the same selection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ThresholdList {
    values: Vec<f32>,
    observed: Selection,
}

impl ThresholdList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe the current selection. If it differs from the last observed
    /// one, replace the values with [`default_thresholds`] and return `true`.
    pub fn refresh(&mut self, selection: &Selection) -> bool {
        if *selection == self.observed {
            return false;
        }
        self.observed = selection.clone();
        self.values = default_thresholds(selection.len());
        tracing::debug!(count = self.values.len(), "selection changed, thresholds reset");
        true
    }

    /// Set the threshold of level `index`, clamped to `[0, 1]`.
    /// Returns `false` if `index` is out of range.
    pub fn set(&mut self, index: usize, value: f32) -> bool {
        match self.values.get_mut(index) {
            Some(slot) => {
                *slot = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
                true
            }
            None => false,
        }
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The selection these thresholds were derived for.
    pub fn observed(&self) -> &Selection {
        &self.observed
    }
}
