//! Per-column width cache.
//!
//! Widths only ever grow. The whole cache is dropped when the schema is
//! replaced; nothing else evicts entries.

use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct WidthCache {
    /// Column key -> widest content seen so far, padding included
    widths: HashMap<String, f64>,
    /// Keys whose header label was measured under the current styles
    labels: HashSet<String>,
}

impl WidthCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self, key: &str) -> Option<f64> {
        self.widths.get(key).copied()
    }

    /// Cached width, but only once the column's label has been measured.
    pub fn measured_width(&self, key: &str) -> Option<f64> {
        if self.labels.contains(key) {
            self.width(key)
        } else {
            None
        }
    }

    /// Fold a measurement into the cache and return the resulting width.
    pub fn record(&mut self, key: &str, width: f64) -> f64 {
        match self.widths.get_mut(key) {
            Some(existing) => {
                if width > *existing {
                    *existing = width;
                }
                *existing
            }
            None => {
                self.widths.insert(key.to_string(), width);
                width
            }
        }
    }

    pub fn mark_label_measured(&mut self, key: &str) {
        if !self.labels.contains(key) {
            self.labels.insert(key.to_string());
        }
    }

    /// Forget which labels were measured; widths are kept.
    pub fn forget_labels(&mut self) {
        self.labels.clear();
    }

    /// Sum of every cached width.
    pub fn total(&self) -> f64 {
        self.widths.values().sum()
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    pub fn clear(&mut self) {
        self.widths.clear();
        self.labels.clear();
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_record_never_shrinks() {
        let mut cache = WidthCache::new();
        assert_eq!(cache.record("a", 10.0), 10.0);
        assert_eq!(cache.record("a", 25.0), 25.0);
        assert_eq!(cache.record("a", 5.0), 25.0);
        assert_eq!(cache.width("a"), Some(25.0));
    }

    #[test]
    fn test_measured_width_requires_label() {
        let mut cache = WidthCache::new();
        cache.record("a", 10.0);
        assert_eq!(cache.measured_width("a"), None);
        cache.mark_label_measured("a");
        assert_eq!(cache.measured_width("a"), Some(10.0));
        cache.forget_labels();
        assert_eq!(cache.measured_width("a"), None);
        assert_eq!(cache.width("a"), Some(10.0));
    }

    #[test]
    fn test_total_and_clear() {
        let mut cache = WidthCache::new();
        cache.record("a", 10.0);
        cache.record("b", 15.0);
        assert_eq!(cache.total(), 25.0);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.total(), 0.0);
    }
}
