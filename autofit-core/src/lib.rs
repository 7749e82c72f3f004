//! # autofit-core
//!
//! Auto-fit font-size resolution: the largest integer font size at which a
//! text's layout fits a box, optionally under a hard line-count ceiling.
//!
//! ## Architecture
//!
//! ```text
//! TextLayer ──fit_layer──► FitRequest ──resolve──► FitResult
//!                               │            ▲
//!                               ▼            │ ≤ 20 probes / pass
//!                         MeasureOracle::measure(text, width, size, style)
//!                               │
//!                               ▼
//!                    { rendered_height, line_count }
//! ```
//!
//! - **`style`** — `StyleConfig` and its enumerations.
//! - **`request`** — `FitRequest`, `FitResult`, `FitOutcome`, `SizeBounds`.
//! - **`oracle`** — the measurement contract the renderer supplies.
//! - **`resolver`** — binary search and the two-pass fallback policy.
//! - **`apply`** — fits a `TextLayer` in place.
//! - **`batch`** — parallel resolution, one oracle per worker.
//!
//! Concrete oracles live in `autofit-text`.

pub mod apply;
pub mod batch;
pub mod oracle;
pub mod request;
pub mod resolver;
pub mod style;

// Re-exports for ergonomic use.
pub use apply::{fit_layer, relayout, FitOptions, Rect, TextLayer};
pub use batch::{resolve_batch, BatchError, BatchResolver};
pub use oracle::{MeasureError, MeasureOracle, Measurement, UnavailableOracle};
pub use request::{FitOutcome, FitRequest, FitResult, SizeBounds, DEFAULT_MAX_SIZE, DEFAULT_MIN_SIZE};
pub use resolver::{resolve, FontSizeResolver, HEIGHT_TOLERANCE, MAX_SEARCH_ITERATIONS};
pub use style::{FontStyle, FontWeight, PaintOrder, ParseWeightError, StyleConfig, TextAlign, WrapMode};
