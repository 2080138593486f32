use crate::text::{FontSpec, TextMeasurer};

const BOLD_WIDTH_FACTOR: f64 = 1.08;

/// Backend-independent text metrics from a per-character width table.
///
/// Widths are expressed in em units of the font size. The table favors
/// the glyph classes axis labels are made of (digits, separators, signs).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeuristicTextMeasurer;

impl HeuristicTextMeasurer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn char_units(ch: char) -> f64 {
        match ch {
            '0'..='9' => 0.62,
            '.' | ',' | ':' | ';' | '\'' | '|' | 'i' | 'l' | 'j' => 0.34,
            '-' | '+' | '%' | '(' | ')' | '/' => 0.42,
            ' ' => 0.33,
            'm' | 'w' | 'M' | 'W' => 0.86,
            'A'..='Z' => 0.68,
            _ => 0.58,
        }
    }
}

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure_width(&self, text: &str, font: &FontSpec) -> f64 {
        let units: f64 = text.chars().map(Self::char_units).sum();
        let width = units * font.size_px;
        if font.bold {
            width * BOLD_WIDTH_FACTOR
        } else {
            width
        }
    }

    fn measure_height(&self, _sample: &str, font: &FontSpec) -> f64 {
        font.size_px
    }
}
