//! Resolver input and output values.

use serde::{Deserialize, Serialize};

use crate::style::StyleConfig;

/// Default lower bound on the resolved font size.
pub const DEFAULT_MIN_SIZE: u32 = 8;
/// Default upper bound on the resolved font size.
pub const DEFAULT_MAX_SIZE: u32 = 500;

/// Caller-supplied font-size bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SizeBounds {
    pub min_size: u32,
    pub max_size: u32,
}

impl Default for SizeBounds {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

impl SizeBounds {
    pub fn new(min_size: u32, max_size: u32) -> Self {
        Self { min_size, max_size }
    }

    /// Clamp to a searchable range: `min >= 1`, `max >= min`.
    pub fn normalized(self) -> Self {
        let min_size = self.min_size.max(1);
        Self {
            min_size,
            max_size: self.max_size.max(min_size),
        }
    }
}

/// Everything the resolver needs for one resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct FitRequest {
    pub text: String,
    pub box_width: f32,
    pub box_height: f32,
    pub style: StyleConfig,
    pub min_size: u32,
    pub max_size: u32,
    /// Hard ceiling on the wrapped line count.
    pub max_lines: Option<u32>,
}

impl FitRequest {
    /// Build a request with the default size bounds and no line ceiling.
    pub fn new(text: impl Into<String>, box_width: f32, box_height: f32, style: StyleConfig) -> Self {
        let bounds = SizeBounds::default();
        Self {
            text: text.into(),
            box_width,
            box_height,
            style,
            min_size: bounds.min_size,
            max_size: bounds.max_size,
            max_lines: None,
        }
    }

    pub fn with_bounds(mut self, min_size: u32, max_size: u32) -> Self {
        self.min_size = min_size;
        self.max_size = max_size;
        self
    }

    pub fn with_max_lines(mut self, max_lines: u32) -> Self {
        self.max_lines = Some(max_lines);
        self
    }

    pub fn bounds(&self) -> SizeBounds {
        SizeBounds::new(self.min_size, self.max_size)
    }

    /// Nothing to measure: empty text or a collapsed box.
    pub fn is_degenerate(&self) -> bool {
        // `!(x > 0.0)` also catches NaN.
        self.text.is_empty() || !(self.box_width > 0.0) || !(self.box_height > 0.0)
    }
}

/// Classification of a resolved size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FitOutcome {
    /// A size within `[min_size, max_size]` fits.
    FittedWithinRange,
    /// Only a size below `min_size` keeps the text within `max_lines`.
    FittedBelowRange,
    /// No size in `[1, max_size]` fits; `font_size` is `min_size` as a best effort.
    Unsatisfiable,
}

/// Resolver output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitResult {
    pub font_size: u32,
    pub outcome: FitOutcome,
    /// Number of oracle invocations spent on this resolution.
    pub probes: u32,
}

impl FitResult {
    pub fn is_fitted(&self) -> bool {
        !matches!(self.outcome, FitOutcome::Unsatisfiable)
    }
}
