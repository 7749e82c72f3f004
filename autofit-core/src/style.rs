//! Style configuration — everything that shapes a text layout except the
//! font size under search.
//!
//! Field names serialise as camelCase so a `StyleConfig` can be read
//! straight from the editor's JSON object description.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ── Font weight ─────────────────────────────────────────────────────

/// Numeric font weight (CSS range 1–1000). 400 = normal, 700 = bold.
///
/// Accepts either a number or a CSS keyword when parsed or deserialised.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "WeightRepr", into = "u16")]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const BOLD: FontWeight = FontWeight(700);

    pub fn value(self) -> u16 {
        self.0
    }

    /// Whether the weight renders as a bold face (600 and above).
    pub fn is_bold(self) -> bool {
        self.0 >= 600
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl From<FontWeight> for u16 {
    fn from(weight: FontWeight) -> u16 {
        weight.0
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseWeightError {
    #[error("unknown font weight keyword: {0:?}")]
    Keyword(String),
    #[error("font weight out of range (1–1000): {0}")]
    OutOfRange(i64),
}

impl FromStr for FontWeight {
    type Err = ParseWeightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<i64>() {
            return FontWeight::try_from(n);
        }
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::NORMAL),
            "bold" | "bolder" => Ok(Self::BOLD),
            "lighter" => Ok(FontWeight(300)),
            _ => Err(ParseWeightError::Keyword(s.to_string())),
        }
    }
}

impl TryFrom<i64> for FontWeight {
    type Error = ParseWeightError;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        if (1..=1000).contains(&n) {
            Ok(FontWeight(n as u16))
        } else {
            Err(ParseWeightError::OutOfRange(n))
        }
    }
}

/// Wire form: the editor sends `fontWeight` as either `700` or `"bold"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum WeightRepr {
    Number(i64),
    Text(String),
}

impl TryFrom<WeightRepr> for FontWeight {
    type Error = ParseWeightError;

    fn try_from(repr: WeightRepr) -> Result<Self, Self::Error> {
        match repr {
            WeightRepr::Number(n) => FontWeight::try_from(n),
            WeightRepr::Text(s) => s.parse(),
        }
    }
}

// ── Enumerations ────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// Horizontal alignment. Carried for the renderer; never moves a line break.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Where line breaks may occur.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WrapMode {
    /// Break at whitespace; words wider than the line fall back to graphemes.
    #[default]
    Word,
    /// Break between any two grapheme clusters.
    Character,
}

/// Order in which fill and stroke are painted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaintOrder {
    #[default]
    FillThenStroke,
    StrokeThenFill,
}

// ── Style config ────────────────────────────────────────────────────

/// Immutable description of a text object's layout-affecting style.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleConfig {
    /// CSS-style family chain (e.g. `"Inter, Helvetica, sans-serif"`).
    pub font_family: String,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
    pub text_align: TextAlign,
    /// Extra advance added to every grapheme, in pixels (can be negative).
    pub letter_spacing: f32,
    pub wrap_mode: WrapMode,
    /// Stroke width in pixels. The stroke straddles the outline, so it
    /// narrows the usable wrap width and adds to the rendered height.
    pub stroke_width: f32,
    pub paint_order: PaintOrder,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_family: String::from("sans-serif"),
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
            line_height: 1.2,
            text_align: TextAlign::Left,
            letter_spacing: 0.0,
            wrap_mode: WrapMode::Word,
            stroke_width: 0.0,
            paint_order: PaintOrder::FillThenStroke,
        }
    }
}

impl StyleConfig {
    /// Line box height in pixels at `size`.
    pub fn line_box(&self, size: u32) -> f32 {
        size as f32 * self.line_height
    }

    /// Width available to line breaking once the stroke is accounted for.
    pub fn wrap_width(&self, box_width: f32) -> f32 {
        (box_width - self.stroke_width.max(0.0)).max(0.0)
    }

    /// First concrete family of the CSS chain, unquoted.
    pub fn primary_family(&self) -> &str {
        self.font_family
            .split(',')
            .map(|s| s.trim().trim_matches('"').trim_matches('\''))
            .find(|s| !s.is_empty())
            .unwrap_or("sans-serif")
    }
}

// ===================================================================
// Tests
// ===================================================================
