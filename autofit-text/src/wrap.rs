//! Greedy line breaking over grapheme clusters.
//!
//! Both oracles in this crate break lines here, so they agree on where
//! breaks fall and differ only in how wide each grapheme is. Advances come
//! from a caller-supplied closure keyed by byte offset.
//!
//! Rules:
//! - `\n` (or `\r\n`) is a hard break; every paragraph takes at least one line.
//! - [`WrapMode::Word`] breaks at breaking whitespace. Whitespace at a break
//!   hangs past the edge and takes no room. A word wider than the line is
//!   broken between graphemes.
//! - [`WrapMode::Character`] breaks between any two graphemes. Whitespace
//!   at a break hangs, as in word mode.

use autofit_core::{Measurement, StyleConfig, WrapMode};
use unicode_segmentation::UnicodeSegmentation;

/// Whitespace that permits a line break (no-break spaces excluded).
pub fn is_break_space(grapheme: &str) -> bool {
    !grapheme.is_empty()
        && grapheme
            .chars()
            .all(|c| c.is_whitespace() && !matches!(c, '\u{00A0}' | '\u{2007}' | '\u{202F}'))
}

/// Layout box for `lines` lines at `size`, with the stroke straddling the
/// outline on both edges.
pub fn measurement_for(lines: u32, size: u32, style: &StyleConfig) -> Measurement {
    Measurement {
        rendered_height: lines as f32 * style.line_box(size) + style.stroke_width.max(0.0),
        line_count: lines,
    }
}

#[derive(Clone, Copy, Debug)]
pub struct LineBreaker {
    max_width: f32,
    mode: WrapMode,
}

impl LineBreaker {
    pub fn new(max_width: f32, mode: WrapMode) -> Self {
        Self { max_width, mode }
    }

    /// Count wrapped lines. `advance(offset, grapheme)` is called once per
    /// grapheme in order, with the grapheme's byte offset into `text`.
    pub fn count_lines<F>(&self, text: &str, mut advance: F) -> u32
    where
        F: FnMut(usize, &str) -> f32,
    {
        let mut lines = 0;
        let mut base = 0;
        for paragraph in text.split('\n') {
            let body = paragraph.strip_suffix('\r').unwrap_or(paragraph);
            lines += match self.mode {
                WrapMode::Word => self.word_lines(body, base, &mut advance),
                WrapMode::Character => self.char_lines(body, base, &mut advance),
            };
            base += paragraph.len() + 1;
        }
        lines
    }

    fn char_lines<F>(&self, body: &str, base: usize, advance: &mut F) -> u32
    where
        F: FnMut(usize, &str) -> f32,
    {
        let mut lines = 1;
        let mut width = 0.0f32;
        // Whitespace since the last placed grapheme; dropped at a break.
        let mut pending = 0.0f32;
        let mut empty = true;
        for (i, g) in body.grapheme_indices(true) {
            let w = advance(base + i, g);
            if is_break_space(g) {
                pending += w;
                continue;
            }
            if (!empty || pending > 0.0) && width + pending + w > self.max_width {
                lines += 1;
                width = 0.0;
                pending = 0.0;
            }
            width += pending + w;
            pending = 0.0;
            empty = false;
        }
        lines
    }

    fn word_lines<F>(&self, body: &str, base: usize, advance: &mut F) -> u32
    where
        F: FnMut(usize, &str) -> f32,
    {
        let mut line = LineState::default();
        let mut word: Vec<f32> = Vec::new();

        for (i, g) in body.grapheme_indices(true) {
            let w = advance(base + i, g);
            if is_break_space(g) {
                self.place_word(&mut line, &word);
                word.clear();
                line.pending += w;
            } else {
                word.push(w);
            }
        }
        self.place_word(&mut line, &word);
        line.lines
    }

    fn place_word(&self, line: &mut LineState, word: &[f32]) {
        if word.is_empty() {
            return;
        }
        let word_width: f32 = word.iter().sum();

        if line.width + line.pending + word_width <= self.max_width {
            line.commit(line.pending + word_width);
            return;
        }
        if !line.empty {
            line.lines += 1;
            line.width = 0.0;
            line.pending = 0.0;
            line.empty = true;
        }
        // Fresh line. Any pending width is leading whitespace of the paragraph.
        if line.pending + word_width <= self.max_width {
            line.commit(line.pending + word_width);
            return;
        }

        let mut width = line.pending;
        let mut empty = width == 0.0;
        for &a in word {
            if !empty && width + a > self.max_width {
                line.lines += 1;
                width = 0.0;
            }
            width += a;
            empty = false;
        }
        line.width = width;
        line.pending = 0.0;
        line.empty = false;
    }
}

struct LineState {
    lines: u32,
    /// Committed width on the current line.
    width: f32,
    /// Whitespace since the last committed word.
    pending: f32,
    empty: bool,
}

impl Default for LineState {
    fn default() -> Self {
        Self {
            lines: 1,
            width: 0.0,
            pending: 0.0,
            empty: true,
        }
    }
}

impl LineState {
    fn commit(&mut self, width: f32) {
        self.width += width;
        self.pending = 0.0;
        self.empty = false;
    }
}

// ===================================================================
// Tests
// ===================================================================
