//! Apply adapter — fits a live text layer in place.
//!
//! Reads the layer's geometry and style, resolves a size, writes it back
//! and refreshes the layer's measured dimensions at the applied size.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::oracle::MeasureOracle;
use crate::request::{FitOutcome, FitRequest, FitResult, SizeBounds};
use crate::resolver::resolve;
use crate::style::StyleConfig;

#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A text object on the canvas.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TextLayer {
    pub id: Uuid,
    pub content: String,
    pub bounds: Rect,
    pub style: StyleConfig,
    pub font_size: u32,
    /// Wrapped line count at `font_size`, as of the last layout.
    pub line_count: u32,
    /// Laid-out text height at `font_size`, as of the last layout.
    pub rendered_height: f32,
}

impl TextLayer {
    pub fn new(content: impl Into<String>, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            bounds: Rect { x, y, width, height },
            style: StyleConfig::default(),
            font_size: 16,
            line_count: 0,
            rendered_height: 0.0,
        }
    }
}

/// How a layer should be fitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FitOptions {
    pub bounds: SizeBounds,
    pub max_lines: Option<u32>,
    /// Leave the layer untouched when no size fits, instead of falling back
    /// to `min_size`.
    pub strict: bool,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            bounds: SizeBounds::default(),
            max_lines: None,
            strict: false,
        }
    }
}

impl FitOptions {
    /// Build the resolver request for `layer`.
    pub fn request_for(&self, layer: &TextLayer) -> FitRequest {
        FitRequest {
            text: layer.content.clone(),
            box_width: layer.bounds.width,
            box_height: layer.bounds.height,
            style: layer.style.clone(),
            min_size: self.bounds.min_size,
            max_size: self.bounds.max_size,
            max_lines: self.max_lines,
        }
    }
}

/// Fit `layer` into its own bounds and apply the result.
///
/// On [`FitOutcome::Unsatisfiable`] the returned `font_size` (`min_size`) is
/// applied anyway unless `options.strict` is set; callers that need to reject
/// check the outcome.
pub fn fit_layer<O: MeasureOracle + ?Sized>(
    layer: &mut TextLayer,
    oracle: &mut O,
    options: &FitOptions,
) -> FitResult {
    let request = options.request_for(layer);
    let result = resolve(oracle, &request);

    if result.outcome == FitOutcome::Unsatisfiable && options.strict {
        debug!("fit_layer {}: unsatisfiable, left at size {}", layer.id, layer.font_size);
        return result;
    }

    layer.font_size = result.font_size;
    relayout(layer, oracle);
    debug!(
        "fit_layer {}: size {} ({:?}), {} lines",
        layer.id, layer.font_size, result.outcome, layer.line_count
    );
    result
}

/// Recompute the layer's measured dimensions at its current size.
pub fn relayout<O: MeasureOracle + ?Sized>(layer: &mut TextLayer, oracle: &mut O) {
    if layer.content.is_empty() {
        layer.line_count = 0;
        layer.rendered_height = 0.0;
        return;
    }
    match oracle.measure(&layer.content, layer.bounds.width, layer.font_size, &layer.style) {
        Ok(m) => {
            layer.line_count = m.line_count;
            layer.rendered_height = m.rendered_height;
        }
        Err(err) => warn!("relayout {}: {err}, keeping previous dimensions", layer.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{MeasureError, Measurement, UnavailableOracle};

    /// Fixed-pitch glyphs half an em wide, greedy fill.
    struct GridOracle;

    impl MeasureOracle for GridOracle {
        fn measure(&mut self, text: &str, box_width: f32, size: u32, style: &StyleConfig) -> Result<Measurement, MeasureError> {
            let per_line = ((box_width / (size as f32 * 0.5)).floor() as usize).max(1);
            let lines = text.chars().count().div_ceil(per_line) as u32;
            Ok(Measurement {
                rendered_height: lines as f32 * style.line_box(size),
                line_count: lines,
            })
        }
    }

    #[test]
    fn test_fit_layer_applies_size() {
        let mut layer = TextLayer::new("Hello World", 0.0, 0.0, 200.0, 60.0);
        let result = fit_layer(&mut layer, &mut GridOracle, &FitOptions::default());
        assert!(result.is_fitted());
        assert_eq!(layer.font_size, result.font_size);
        assert!(layer.line_count >= 1);
        assert!(layer.rendered_height <= 61.0);
    }

    #[test]
    fn test_fit_layer_keeps_style() {
        let mut layer = TextLayer::new("Hello World", 0.0, 0.0, 200.0, 60.0);
        layer.style.paint_order = crate::style::PaintOrder::StrokeThenFill;
        let before = layer.style.clone();
        fit_layer(&mut layer, &mut GridOracle, &FitOptions::default());
        assert_eq!(layer.style, before);
    }

    #[test]
    fn test_unsatisfiable_applies_min_size() {
        let mut layer = TextLayer::new("x".repeat(400), 0.0, 0.0, 50.0, 10.0);
        let options = FitOptions {
            bounds: SizeBounds::new(8, 72),
            ..Default::default()
        };
        let result = fit_layer(&mut layer, &mut GridOracle, &options);
        assert_eq!(result.outcome, FitOutcome::Unsatisfiable);
        assert_eq!(layer.font_size, 8);
    }

    #[test]
    fn test_strict_leaves_layer_untouched() {
        let mut layer = TextLayer::new("x".repeat(400), 0.0, 0.0, 50.0, 10.0);
        let options = FitOptions {
            bounds: SizeBounds::new(8, 72),
            strict: true,
            ..Default::default()
        };
        let result = fit_layer(&mut layer, &mut GridOracle, &options);
        assert_eq!(result.outcome, FitOutcome::Unsatisfiable);
        assert_eq!(layer.font_size, 16);
        assert_eq!(layer.line_count, 0);
    }

    #[test]
    fn test_headless_fit_uses_min_size() {
        let mut layer = TextLayer::new("Hello", 0.0, 0.0, 200.0, 60.0);
        layer.rendered_height = 3.0;
        let result = fit_layer(&mut layer, &mut UnavailableOracle, &FitOptions::default());
        assert_eq!(result.font_size, 8);
        assert_eq!(layer.font_size, 8);
        // Dimensions can't be refreshed without an oracle.
        assert_eq!(layer.rendered_height, 3.0);
    }

    #[test]
    fn test_request_for_layer() {
        let layer = TextLayer::new("Hi", 5.0, 5.0, 120.0, 40.0);
        let options = FitOptions {
            bounds: SizeBounds::new(10, 20),
            max_lines: Some(1),
            strict: false,
        };
        let req = options.request_for(&layer);
        assert_eq!(req.text, "Hi");
        assert_eq!(req.box_width, 120.0);
        assert_eq!(req.box_height, 40.0);
        assert_eq!((req.min_size, req.max_size, req.max_lines), (10, 20, Some(1)));
    }
}
