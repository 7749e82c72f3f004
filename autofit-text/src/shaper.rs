//! Shaping oracle — measures text with `cosmic-text`.
//!
//! The oracle owns a `FontSystem` and one scratch `Buffer`. Each probe
//! shapes the text unwrapped at the candidate size, folds glyph advances
//! onto grapheme clusters, and hands them to the shared [`LineBreaker`],
//! so letter spacing and stroke width move breaks exactly as they do in
//! [`MetricOracle`](crate::metrics::MetricOracle).
//!
//! ## Font database
//!
//! `CosmicOracle::new()` discovers system fonts. In containers without any
//! fonts the database is empty and every probe reports
//! [`MeasureError::Unavailable`]; load bundled fonts with
//! [`CosmicOracle::from_font_data`] instead.

use std::borrow::Cow;

use autofit_core::{FontStyle, MeasureError, MeasureOracle, Measurement, StyleConfig};
use cosmic_text::{
    fontdb, Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Style as CStyle, Weight, Wrap,
};
use unicode_segmentation::UnicodeSegmentation;

use crate::wrap::{measurement_for, LineBreaker};

/// Measurement oracle backed by real font shaping.
///
/// Not `Sync`: give each worker its own instance.
pub struct CosmicOracle {
    font_system: FontSystem,
    /// Scratch layout buffer, reset on every probe.
    buffer: Buffer,
    /// Advance per byte offset of the last shaped text. Only cluster-start
    /// offsets are non-zero.
    advances: Vec<f32>,
    available: bool,
}

impl CosmicOracle {
    /// Create an oracle with system font discovery.
    pub fn new() -> Self {
        Self::with_font_system(FontSystem::new())
    }

    /// Create an oracle over an existing font system.
    pub fn with_font_system(mut font_system: FontSystem) -> Self {
        let face_count = font_system.db().faces().count();
        if face_count == 0 {
            log::warn!("CosmicOracle: font database is empty, measurements unavailable");
        } else {
            log::info!("CosmicOracle: {face_count} font faces available");
        }
        let buffer = Buffer::new(&mut font_system, Metrics::new(16.0, 20.0));
        Self {
            font_system,
            buffer,
            advances: Vec::new(),
            available: face_count > 0,
        }
    }

    /// Create an oracle that only knows the given font files (TTF/OTF bytes).
    pub fn from_font_data<I>(fonts: I) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        let mut db = fontdb::Database::new();
        for data in fonts {
            db.load_font_data(data);
        }
        Self::with_font_system(FontSystem::new_with_locale_and_db("en-US".into(), db))
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn font_system(&self) -> &FontSystem {
        &self.font_system
    }

    /// Width of the widest paragraph laid out on a single line, letter
    /// spacing included.
    pub fn line_width(&mut self, text: &str, size: u32, style: &StyleConfig) -> Result<f32, MeasureError> {
        self.check(size)?;
        let text = normalize_newlines(text);
        self.shape(&text, size, style);

        let mut widest = 0.0f32;
        let mut base = 0;
        for paragraph in text.split('\n') {
            let width: f32 = paragraph
                .grapheme_indices(true)
                .map(|(i, g)| cluster_advance(&self.advances, base + i, g.len()) + style.letter_spacing)
                .sum();
            widest = widest.max(width);
            base += paragraph.len() + 1;
        }
        Ok(widest)
    }

    fn check(&self, size: u32) -> Result<(), MeasureError> {
        if !self.available {
            return Err(MeasureError::Unavailable("font database is empty".into()));
        }
        if size == 0 {
            return Err(MeasureError::Layout("font size must be positive".into()));
        }
        Ok(())
    }

    /// Shape `text` without wrapping and record per-cluster advances.
    fn shape(&mut self, text: &str, size: u32, style: &StyleConfig) {
        let font_size = size as f32;
        let font_style = match style.font_style {
            FontStyle::Normal => CStyle::Normal,
            FontStyle::Italic => CStyle::Italic,
        };
        let attrs = Attrs::new()
            .family(family_for(style.primary_family()))
            .weight(Weight(style.font_weight.value()))
            .style(font_style);

        let fs = &mut self.font_system;
        self.buffer.set_metrics(fs, Metrics::new(font_size, font_size));
        self.buffer.set_wrap(fs, Wrap::None);
        self.buffer.set_size(fs, None, None);
        self.buffer.set_text(fs, text, attrs, Shaping::Advanced);

        self.advances.clear();
        self.advances.resize(text.len(), 0.0);

        // Buffer lines follow the '\n' splits of the normalized text.
        let starts: Vec<usize> = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        for (line_i, &base) in starts.iter().enumerate().take(self.buffer.lines.len()) {
            let Some(layout) = self.buffer.line_layout(fs, line_i) else {
                continue;
            };
            for layout_line in layout {
                for glyph in &layout_line.glyphs {
                    if let Some(slot) = self.advances.get_mut(base + glyph.start) {
                        *slot += glyph.w;
                    }
                }
            }
        }
    }
}

impl Default for CosmicOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl MeasureOracle for CosmicOracle {
    fn measure(
        &mut self,
        text: &str,
        box_width: f32,
        size: u32,
        style: &StyleConfig,
    ) -> Result<Measurement, MeasureError> {
        self.check(size)?;
        let text = normalize_newlines(text);
        self.shape(&text, size, style);

        let breaker = LineBreaker::new(style.wrap_width(box_width), style.wrap_mode);
        let advances = &self.advances;
        let lines = breaker.count_lines(&text, |offset, g| {
            cluster_advance(advances, offset, g.len()) + style.letter_spacing
        });
        log::trace!("CosmicOracle: size {size}, width {box_width} -> {lines} lines");
        Ok(measurement_for(lines, size, style))
    }
}

/// Map the primary CSS family onto a cosmic-text family.
fn family_for(name: &str) -> Family<'_> {
    match name.to_ascii_lowercase().as_str() {
        "sans-serif" => Family::SansSerif,
        "serif" => Family::Serif,
        "monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        _ => Family::Name(name),
    }
}

/// `\r\n` and lone `\r` become `\n`, so shaping and line breaking agree on
/// paragraph boundaries.
fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

fn cluster_advance(advances: &[f32], offset: usize, len: usize) -> f32 {
    advances
        .get(offset..offset + len)
        .map_or(0.0, |slice| slice.iter().sum())
}

// ===================================================================
// Tests
// ===================================================================
