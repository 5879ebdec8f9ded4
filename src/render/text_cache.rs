//! Bounded memo of text widths keyed by font and text.

use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use crate::render::TextMeasurer;

pub(crate) const TEXT_MEASURE_CACHE_CAP: usize = 4096;

/// FIFO-evicting width cache. A cap of zero disables caching.
#[derive(Debug, Default)]
pub struct TextMeasureCache {
    entries: HashMap<Rc<str>, f64>,
    order: VecDeque<Rc<str>>,
    max_entries: usize,
    scratch: String,
}

impl TextMeasureCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            max_entries,
            scratch: String::new(),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn get(&mut self, font: &str, text: &str) -> Option<f64> {
        if self.max_entries == 0 {
            return None;
        }
        let key = Self::build_key(&mut self.scratch, font, text);
        self.entries.get(key).copied()
    }

    pub fn insert(&mut self, font: &str, text: &str, width: f64) {
        if self.max_entries == 0 {
            return;
        }
        let key = Self::build_key(&mut self.scratch, font, text);
        if self.entries.contains_key(key) {
            return;
        }
        let key: Rc<str> = key.into();
        self.entries.insert(Rc::clone(&key), width);
        self.order.push_back(key);
        self.enforce_cap();
    }

    /// Cached width, or measure with `measure` and remember the result.
    pub fn get_or_measure<F>(&mut self, font: &str, text: &str, measure: F) -> f64
    where
        F: FnOnce() -> f64,
    {
        if let Some(width) = self.get(font, text) {
            return width;
        }
        let width = measure();
        self.insert(font, text, width);
        width
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn build_key<'a>(scratch: &'a mut String, font: &str, text: &str) -> &'a str {
        scratch.clear();
        scratch.reserve(font.len() + 1 + text.len());
        scratch.push_str(font);
        scratch.push('\n');
        scratch.push_str(text);
        scratch.as_str()
    }

    fn enforce_cap(&mut self) {
        while self.entries.len() > self.max_entries {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }
    }
}

/// Wraps any [`TextMeasurer`] with a [`TextMeasureCache`].
#[derive(Debug)]
pub struct CachedTextMeasurer<M> {
    inner: M,
    cache: TextMeasureCache,
}

impl<M: TextMeasurer> CachedTextMeasurer<M> {
    pub fn new(inner: M) -> Self {
        Self::with_capacity(inner, TEXT_MEASURE_CACHE_CAP)
    }

    pub fn with_capacity(inner: M, max_entries: usize) -> Self {
        Self {
            inner,
            cache: TextMeasureCache::new(max_entries),
        }
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }

    pub fn cache(&self) -> &TextMeasureCache {
        &self.cache
    }
}

impl<M: TextMeasurer> TextMeasurer for CachedTextMeasurer<M> {
    fn measure_text(&mut self, font: &str, text: &str) -> f64 {
        let inner = &mut self.inner;
        self.cache
            .get_or_measure(font, text, || inner.measure_text(font, text))
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
    use crate::render::headless::StubTextMeasurer;

    #[test]
    fn text_measure_cache_reuses_entries() {
        let mut cache = TextMeasureCache::new(2);
        assert_eq!(cache.get("16px sans-serif", "hello"), None);
        cache.insert("16px sans-serif", "hello", 12.0);
        assert_eq!(cache.get("16px sans-serif", "hello"), Some(12.0));
        cache.insert("16px sans-serif", "hello", 22.0);
        assert_eq!(cache.get("16px sans-serif", "hello"), Some(12.0));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn text_measure_cache_enforces_cap() {
        let mut cache = TextMeasureCache::new(2);
        cache.insert("f", "a", 1.0);
        cache.insert("f", "b", 2.0);
        cache.insert("f", "c", 3.0);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("f", "a"), None);
        assert_eq!(cache.get("f", "c"), Some(3.0));
    }

    #[test]
    fn text_measure_cache_keys_include_font() {
        let mut cache = TextMeasureCache::new(8);
        cache.insert("bold 16px serif", "x", 9.0);
        assert_eq!(cache.get("normal 16px serif", "x"), None);
    }

    #[test]
    fn zero_capacity_disables_caching() {
        let mut measurer = CachedTextMeasurer::with_capacity(StubTextMeasurer::new(5.0), 0);
        measurer.measure_text("f", "a");
        measurer.measure_text("f", "a");
        assert_eq!(measurer.inner().call_count(), 2);
        assert!(measurer.cache().is_empty());
    }

    #[test]
    fn cached_measurer_measures_once() {
        let mut measurer = CachedTextMeasurer::new(StubTextMeasurer::new(5.0));
        assert_eq!(measurer.measure_text("f", "a"), 5.0);
        assert_eq!(measurer.measure_text("f", "a"), 5.0);
        assert_eq!(measurer.inner().call_count(), 1);
    }
}
