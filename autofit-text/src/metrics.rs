//! Table-driven measurement oracle for headless contexts.
//!
//! Grapheme advances come from static em-width tables instead of real font
//! files, so batch workers without a font database can still fit text. One
//! proportional sans table, a narrower serif scale, and fixed-pitch
//! monospace.
//!
//! Widths are in 1/1000 em. Index = (char as usize) - 32, covering ASCII
//! 0x20 (space) through 0x7E (~).

use autofit_core::{FontWeight, MeasureError, MeasureOracle, Measurement, StyleConfig};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::wrap::{measurement_for, LineBreaker};

/// Fallback advance for graphemes outside the table.
const AVERAGE_WIDTH: u16 = 556;
/// East Asian wide graphemes take a full em.
const WIDE_WIDTH: u16 = 1000;
const MONO_WIDTH: u16 = 600;
const SERIF_SCALE: f32 = 0.9;
const BOLD_SCALE: f32 = 1.06;

/// Helvetica-class proportional widths.
#[rustfmt::skip]
static SANS_WIDTHS: [u16; 95] = [
    // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0    1    2    3    4    5    6    7    8    9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    278, 278, 584, 584, 584, 556, 1015,
    // A    B    C    D    E    F    G    H    I    J    K    L    M
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    278, 278, 278, 469, 556, 333,
    // a    b    c    d    e    f    g    h    i    j    k    l    m
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    // n    o    p    q    r    s    t    u    v    w    x    y    z
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // {    |    }    ~
    334, 260, 334, 584,
];

/// Coarse classification of a font family for width lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetricClass {
    Sans,
    Serif,
    Mono,
}

impl MetricClass {
    /// Classify a single (unquoted) family name.
    pub fn for_family(family: &str) -> Self {
        let name = family.to_ascii_lowercase();
        let mono = name.split(|c: char| !c.is_ascii_alphanumeric()).any(|word| {
            matches!(word, "monospace" | "mono" | "code" | "courier" | "consolas" | "menlo")
                || (word.len() > 4 && word.ends_with("mono"))
        });
        if mono {
            Self::Mono
        } else if name == "serif"
            || name.contains("times")
            || name.contains("georgia")
            || name.contains("garamond")
            || (name.contains("serif") && !name.contains("sans"))
        {
            Self::Serif
        } else {
            Self::Sans
        }
    }

    /// Advance of one grapheme in 1/1000 em, before weight scaling.
    pub fn grapheme_units(self, grapheme: &str) -> u16 {
        let mut chars = grapheme.chars();
        let (Some(first), rest) = (chars.next(), chars.as_str()) else {
            return 0;
        };
        match grapheme.width() {
            0 => return 0,
            w if w >= 2 => return WIDE_WIDTH,
            _ if first.is_control() => return 0,
            _ => {}
        }
        if self == Self::Mono {
            return MONO_WIDTH;
        }
        // Combining marks ride on the base character.
        let code = first as usize;
        if (32..=126).contains(&code) && rest.chars().all(|c| c.width() == Some(0)) {
            SANS_WIDTHS[code - 32]
        } else {
            AVERAGE_WIDTH
        }
    }

    /// Multiplier applied on top of the sans table.
    fn scale(self, weight: FontWeight) -> f32 {
        let base = match self {
            Self::Sans | Self::Mono => 1.0,
            Self::Serif => SERIF_SCALE,
        };
        if weight.is_bold() && self != Self::Mono {
            base * BOLD_SCALE
        } else {
            base
        }
    }
}

/// Headless oracle backed by static width tables. Always available.
#[derive(Clone, Copy, Debug, Default)]
pub struct MetricOracle;

impl MetricOracle {
    pub fn new() -> Self {
        Self
    }

    /// Pixel advance of `grapheme` at `size`, letter spacing included.
    pub fn advance(&self, grapheme: &str, size: u32, style: &StyleConfig) -> f32 {
        let class = MetricClass::for_family(style.primary_family());
        let units = class.grapheme_units(grapheme) as f32;
        units * size as f32 * class.scale(style.font_weight) / 1000.0 + style.letter_spacing
    }
}

impl MeasureOracle for MetricOracle {
    fn measure(
        &mut self,
        text: &str,
        box_width: f32,
        size: u32,
        style: &StyleConfig,
    ) -> Result<Measurement, MeasureError> {
        let breaker = LineBreaker::new(style.wrap_width(box_width), style.wrap_mode);
        let lines = breaker.count_lines(text, |_, g| self.advance(g, size, style));
        Ok(measurement_for(lines, size, style))
    }
}

// ===================================================================
// Tests
// ===================================================================
