//! # autofit-text
//!
//! Measurement oracles for `autofit-core`. Both oracles count lines with the
//! same grapheme line breaker and apply the same stroke and letter-spacing
//! rules; they differ only in where glyph advances come from.
//!
//! ## Architecture
//!
//! ```text
//!              ┌── MetricOracle  (static em tables, always available)
//! advances ────┤
//!              └── CosmicOracle  (cosmic-text FontSystem shaping)
//!     │
//!     ▼
//! LineBreaker::count_lines ──► measurement_for ──► Measurement
//!
//! CachedOracle<O> ── LRU in front of either
//! ```
//!
//! - **`wrap`** — greedy word / character line breaking over graphemes.
//! - **`metrics`** — table-driven headless oracle.
//! - **`shaper`** — font-shaping oracle over `cosmic-text`.
//! - **`cache`** — LRU memoization of measurements.

pub mod cache;
pub mod metrics;
pub mod shaper;
pub mod wrap;

// Re-exports for ergonomic use.
pub use cache::{CacheConfig, CacheStats, CachedOracle};
pub use metrics::{MetricClass, MetricOracle};
pub use shaper::CosmicOracle;
pub use wrap::{is_break_space, measurement_for, LineBreaker};
