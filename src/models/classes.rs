//! Insertion-ordered class registry

use std::collections::HashMap;

/// Class labels in order of first appearance, each with a stable index.
///
/// Per-class model records are stored in vectors indexed by these positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassSet {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl ClassSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `label`, registering it at the end if unseen
    pub fn intern(&mut self, label: &str) -> usize {
        if let Some(&idx) = self.index.get(label) {
            return idx;
        }
        let idx = self.labels.len();
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), idx);
        idx
    }

    /// Index of a known label
    pub fn get(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Label at `idx`
    pub fn label(&self, idx: usize) -> &str {
        &self.labels[idx]
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.labels.iter().map(String::as_str).enumerate()
    }
}
