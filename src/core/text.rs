use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use super::BlockSize;

/// Line-height to font-size ratio used for canvas label blocks.
///
/// A heuristic for the canvas text baseline step, not a measured metric.
pub const LINE_HEIGHT_RATIO: f64 = 0.72;

/// Font used to measure and draw a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub size_px: f64,
    pub family: String,
}

impl FontSpec {
    #[must_use]
    pub fn new(size_px: f64, family: impl Into<String>) -> Self {
        Self {
            size_px,
            family: family.into(),
        }
    }

    /// CSS/canvas shorthand, e.g. `14px sans-serif`.
    #[must_use]
    pub fn css(&self) -> String {
        format!("{}px {}", self.size_px, self.family)
    }
}

/// Measures the rendered width of one line of text.
pub trait TextMeasurer {
    fn text_width(&mut self, text: &str, font: &FontSpec) -> f64;
}

/// Deterministic, backend-independent width estimate.
///
/// Used by headless surfaces and containers so label geometry stays
/// reproducible in tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EstimatingTextMeasurer;

impl EstimatingTextMeasurer {
    #[must_use]
    pub fn estimate(text: &str, font_size_px: f64) -> f64 {
        let units = text.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' => 0.56,
                'i' | 'j' | 'l' | '!' | '|' | '\'' => 0.24,
                '.' | ',' | ':' | ';' => 0.28,
                ' ' => 0.28,
                '(' | ')' | '[' | ']' | '-' => 0.34,
                'm' | 'w' => 0.78,
                'A'..='Z' => 0.66,
                'a'..='z' => 0.52,
                _ => 0.58,
            }
        });
        units * font_size_px
    }
}

impl TextMeasurer for EstimatingTextMeasurer {
    fn text_width(&mut self, text: &str, font: &FontSpec) -> f64 {
        Self::estimate(text, font.size_px)
    }
}

/// Per-line measurement of a (possibly multi-line) label.
#[derive(Debug, Clone, PartialEq)]
pub struct LineBreakResult {
    pub widths: SmallVec<[f64; 4]>,
    pub widest_index: usize,
    pub widest_width: f64,
    pub lines: Vec<String>,
}

impl LineBreakResult {
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn widest_line(&self) -> &str {
        &self.lines[self.widest_index]
    }

    #[must_use]
    pub fn joined(&self) -> String {
        self.lines.join("\n")
    }
}

/// Splits `text` on line breaks and measures every line.
///
/// The first of several equally wide lines wins.
pub fn measure<M: TextMeasurer + ?Sized>(
    text: &str,
    font: &FontSpec,
    measurer: &mut M,
) -> LineBreakResult {
    let lines: Vec<String> = text.split('\n').map(str::to_owned).collect();
    measure_lines(lines, font, measurer)
}

fn measure_lines<M: TextMeasurer + ?Sized>(
    lines: Vec<String>,
    font: &FontSpec,
    measurer: &mut M,
) -> LineBreakResult {
    let mut widths = SmallVec::with_capacity(lines.len());
    let mut widest_index = 0;
    let mut widest_width: Option<f64> = None;
    for (index, line) in lines.iter().enumerate() {
        let width = measurer.text_width(line, font);
        if widest_width.is_none_or(|current| width > current) {
            widest_width = Some(width);
            widest_index = index;
        }
        widths.push(width);
    }

    LineBreakResult {
        widths,
        widest_index,
        widest_width: widest_width.unwrap_or(0.0),
        lines,
    }
}

/// Breaks the last word of `line` onto its own line.
///
/// The run of spaces in front of that word is consumed by the break. Returns
/// `None` when the line has no space past its first character.
fn break_last_word(line: &str) -> Option<(String, String)> {
    let last_space = line.rfind(' ').filter(|index| *index > 0)?;
    let word = &line[last_space + 1..];
    let head = line[..last_space].trim_end_matches(' ');
    Some((head.to_owned(), word.to_owned()))
}

/// Inserts line breaks until the widest line fits into `max_extent`.
///
/// Only the widest line is ever broken, always at its last space. Wrapping
/// stops as soon as the widest line has nothing left to break on, so an
/// unbreakable word may still overflow; the text is never clipped. Each step
/// consumes at least one space, which bounds the loop.
pub fn wrap_to_fit<M: TextMeasurer + ?Sized>(
    text: &str,
    max_extent: f64,
    font: &FontSpec,
    measurer: &mut M,
) -> String {
    let mut measured = measure(text, font, measurer);
    let mut breaks = 0usize;

    while measured.widest_width > max_extent {
        let Some((head, word)) = break_last_word(measured.widest_line()) else {
            debug!(
                widest_width = measured.widest_width,
                max_extent, breaks, "label line cannot be broken further; leaving overflow"
            );
            break;
        };
        let mut lines = measured.lines;
        let index = measured.widest_index;
        lines[index] = head;
        lines.insert(index + 1, word);
        breaks += 1;
        measured = measure_lines(lines, font, measurer);
    }

    if breaks == 0 {
        return text.to_owned();
    }
    measured.joined()
}

/// Approximate space taken by a block of `line_count` label lines.
///
/// The extent lands on the width for vertical axes and on the height
/// otherwise; the other dimension stays zero.
#[must_use]
pub fn estimate_block_size(
    line_count: usize,
    font_size_px: f64,
    line_padding: f64,
    padding: f64,
    axis_is_vertical: bool,
) -> BlockSize {
    let lines = line_count.max(1) as f64;
    let extent = font_size_px * lines * LINE_HEIGHT_RATIO + line_padding * (lines - 1.0) + padding;
    if axis_is_vertical {
        BlockSize::new(extent, 0.0)
    } else {
        BlockSize::new(0.0, extent)
    }
}
