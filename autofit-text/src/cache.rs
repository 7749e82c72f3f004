//! Measurement cache — memoizes oracle results per layout-affecting input.
//!
//! Fitting the same layer again (undo, re-render, a batch with repeated
//! captions) repeats identical probes. `CachedOracle` keeps the most recent
//! measurements in an LRU and only forwards misses to the wrapped oracle.
//! Errors are never cached.

use std::num::NonZeroUsize;

use autofit_core::{
    FontStyle, MeasureError, MeasureOracle, Measurement, StyleConfig, WrapMode,
};
use lru::LruCache;
use serde::{Deserialize, Serialize};

/// Cache sizing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CacheConfig {
    /// Maximum number of cached measurements. Zero is treated as one.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 4096 }
    }
}

/// Hit/miss counters since creation or the last [`CachedOracle::clear`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Everything that can move a line break or change the measured height.
/// Floats are keyed by bit pattern.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct MeasureKey {
    text: String,
    box_width: u32,
    size: u32,
    family: String,
    weight: u16,
    italic: bool,
    line_height: u32,
    letter_spacing: u32,
    word_wrap: bool,
    stroke_width: u32,
}

impl MeasureKey {
    fn new(text: &str, box_width: f32, size: u32, style: &StyleConfig) -> Self {
        Self {
            text: text.to_owned(),
            box_width: box_width.to_bits(),
            size,
            family: style.font_family.clone(),
            weight: style.font_weight.value(),
            italic: style.font_style == FontStyle::Italic,
            line_height: style.line_height.to_bits(),
            letter_spacing: style.letter_spacing.to_bits(),
            word_wrap: style.wrap_mode == WrapMode::Word,
            stroke_width: style.stroke_width.to_bits(),
        }
    }
}

/// LRU-memoizing wrapper around any [`MeasureOracle`].
pub struct CachedOracle<O> {
    inner: O,
    entries: LruCache<MeasureKey, Measurement>,
    stats: CacheStats,
}

impl<O: MeasureOracle> CachedOracle<O> {
    pub fn new(inner: O) -> Self {
        Self::with_config(inner, &CacheConfig::default())
    }

    pub fn with_config(inner: O, config: &CacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            entries: LruCache::new(capacity),
            stats: CacheStats::default(),
        }
    }

    pub fn inner(&self) -> &O {
        &self.inner
    }

    pub fn into_inner(self) -> O {
        self.inner
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Number of cached measurements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries and reset counters, e.g. after fonts change.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = CacheStats::default();
    }
}

impl<O: MeasureOracle> MeasureOracle for CachedOracle<O> {
    fn measure(
        &mut self,
        text: &str,
        box_width: f32,
        size: u32,
        style: &StyleConfig,
    ) -> Result<Measurement, MeasureError> {
        let key = MeasureKey::new(text, box_width, size, style);
        if let Some(hit) = self.entries.get(&key) {
            self.stats.hits += 1;
            return Ok(*hit);
        }
        self.stats.misses += 1;
        let measurement = self.inner.measure(text, box_width, size, style)?;
        self.entries.put(key, measurement);
        Ok(measurement)
    }
}

// ===================================================================
// Tests
// ===================================================================
