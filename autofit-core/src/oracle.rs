//! Measurement oracle contract.
//!
//! The resolver never lays text out itself. It asks an oracle what the text
//! would look like at a candidate size, using the same line-breaking rules the
//! renderer applies at draw time.
//!
//! ## Contract
//!
//! - Calls with different sizes against the same `(text, box_width, style)`
//!   must not influence each other. Any scratch layout state is private to
//!   the oracle.
//! - Every style attribute that moves line breaks counts, stroke width and
//!   letter spacing included.
//! - Increasing `size` must never decrease `rendered_height` or `line_count`.
//!   The resolver relies on this but does not check it; its iteration cap is
//!   the only guard against an oracle that breaks it.

use thiserror::Error;

use crate::style::StyleConfig;

/// What a layout at one candidate size looks like.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    /// Height of the laid-out text box in pixels, stroke included.
    pub rendered_height: f32,
    /// Number of lines after wrapping.
    pub line_count: u32,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeasureError {
    /// No compatible rendering surface (e.g. a headless worker without fonts).
    #[error("measurement unavailable: {0}")]
    Unavailable(String),
    /// The layout engine failed on this input.
    #[error("layout failed: {0}")]
    Layout(String),
}

/// Text measurement capability supplied by the rendering environment.
///
/// Instances are not required to be `Sync`; give each worker its own.
pub trait MeasureOracle {
    fn measure(
        &mut self,
        text: &str,
        box_width: f32,
        size: u32,
        style: &StyleConfig,
    ) -> Result<Measurement, MeasureError>;
}

impl<O: MeasureOracle + ?Sized> MeasureOracle for &mut O {
    fn measure(
        &mut self,
        text: &str,
        box_width: f32,
        size: u32,
        style: &StyleConfig,
    ) -> Result<Measurement, MeasureError> {
        (**self).measure(text, box_width, size, style)
    }
}

impl<O: MeasureOracle + ?Sized> MeasureOracle for Box<O> {
    fn measure(
        &mut self,
        text: &str,
        box_width: f32,
        size: u32,
        style: &StyleConfig,
    ) -> Result<Measurement, MeasureError> {
        (**self).measure(text, box_width, size, style)
    }
}

/// Oracle for contexts without a rendering surface.
///
/// Every call reports [`MeasureError::Unavailable`], which sends the
/// resolver down its `min_size` short-circuit.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableOracle;

impl MeasureOracle for UnavailableOracle {
    fn measure(
        &mut self,
        _text: &str,
        _box_width: f32,
        _size: u32,
        _style: &StyleConfig,
    ) -> Result<Measurement, MeasureError> {
        Err(MeasureError::Unavailable("no rendering surface".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Measurement);

    impl MeasureOracle for Fixed {
        fn measure(&mut self, _: &str, _: f32, _: u32, _: &StyleConfig) -> Result<Measurement, MeasureError> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_unavailable_oracle() {
        let mut oracle = UnavailableOracle;
        let err = oracle
            .measure("Hi", 100.0, 12, &StyleConfig::default())
            .unwrap_err();
        assert!(matches!(err, MeasureError::Unavailable(_)));
        assert_eq!(err.to_string(), "measurement unavailable: no rendering surface");
    }

    #[test]
    fn test_boxed_and_borrowed_oracles_forward() {
        let m = Measurement {
            rendered_height: 14.0,
            line_count: 1,
        };
        let style = StyleConfig::default();

        let mut boxed: Box<dyn MeasureOracle> = Box::new(Fixed(m));
        assert_eq!(boxed.measure("x", 10.0, 12, &style), Ok(m));

        let mut inner = Fixed(m);
        let mut borrowed = &mut inner;
        assert_eq!(
            MeasureOracle::measure(&mut borrowed, "x", 10.0, 12, &style),
            Ok(m)
        );
    }
}
