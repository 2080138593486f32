//! Text metrics used by axis layout.
//!
//! Layout never touches a real font directly; it asks a [`TextMeasurer`]
//! for widths, heights, oriented label boxes and trimmed strings.

pub mod font;
pub mod heuristic;
pub mod label_bbox;
#[cfg(feature = "cairo-backend")]
pub mod pango_measurer;
pub mod trim;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AxisError, AxisResult};

pub use font::FontSpec;
pub use heuristic::HeuristicTextMeasurer;
pub use label_bbox::{LabelBBox, LabelCorner};
#[cfg(feature = "cairo-backend")]
pub use pango_measurer::PangoTextMeasurer;
pub use trim::DEFAULT_ELLIPSIS;

/// Horizontal alignment of a label relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

impl FromStr for TextAlign {
    type Err = AxisError;

    fn from_str(value: &str) -> AxisResult<Self> {
        match value {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            other => Err(AxisError::InvalidData(format!(
                "unknown text align `{other}`"
            ))),
        }
    }
}

impl fmt::Display for TextAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vertical alignment of a label relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    Top,
    #[default]
    Middle,
    Bottom,
    Alphabetic,
}

impl TextBaseline {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
            Self::Alphabetic => "alphabetic",
        }
    }
}

impl FromStr for TextBaseline {
    type Err = AxisError;

    fn from_str(value: &str) -> AxisResult<Self> {
        match value {
            "top" => Ok(Self::Top),
            "middle" => Ok(Self::Middle),
            "bottom" => Ok(Self::Bottom),
            "alphabetic" => Ok(Self::Alphabetic),
            other => Err(AxisError::InvalidData(format!(
                "unknown text baseline `{other}`"
            ))),
        }
    }
}

impl fmt::Display for TextBaseline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of text metrics for axis layout.
///
/// Implementations must be deterministic: the tick search calls them many
/// times per pass and expects identical answers for identical input.
pub trait TextMeasurer {
    fn measure_width(&self, text: &str, font: &FontSpec) -> f64;

    /// Line height, measured on a representative sample such as `"m"`.
    fn measure_height(&self, sample: &str, font: &FontSpec) -> f64;

    /// Oriented bounding box of a `text_width` x `text_height` label placed
    /// at the origin with the given alignment, rotation and margin.
    fn label_bounding_box(
        &self,
        text_width: f64,
        text_height: f64,
        align: TextAlign,
        baseline: TextBaseline,
        angle: f64,
        margin: f64,
    ) -> LabelBBox {
        LabelBBox::compute(text_width, text_height, align, baseline, angle, margin)
    }

    /// Truncates `text` so it fits `max_width`, marking the cut with `ellipsis`.
    fn trim_to_width(
        &self,
        max_width: f64,
        text: &str,
        font: &FontSpec,
        ellipsis: &str,
        keep_trailing_chars: bool,
    ) -> String {
        trim::trim_to_width(self, max_width, text, font, ellipsis, keep_trailing_chars)
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure_width(&self, text: &str, font: &FontSpec) -> f64 {
        (**self).measure_width(text, font)
    }

    fn measure_height(&self, sample: &str, font: &FontSpec) -> f64 {
        (**self).measure_height(sample, font)
    }

    fn label_bounding_box(
        &self,
        text_width: f64,
        text_height: f64,
        align: TextAlign,
        baseline: TextBaseline,
        angle: f64,
        margin: f64,
    ) -> LabelBBox {
        (**self).label_bounding_box(text_width, text_height, align, baseline, angle, margin)
    }

    fn trim_to_width(
        &self,
        max_width: f64,
        text: &str,
        font: &FontSpec,
        ellipsis: &str,
        keep_trailing_chars: bool,
    ) -> String {
        (**self).trim_to_width(max_width, text, font, ellipsis, keep_trailing_chars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Clips labels to their first character and pads every box.
    struct FirstCharMeasurer;

    impl TextMeasurer for FirstCharMeasurer {
        fn measure_width(&self, text: &str, _font: &FontSpec) -> f64 {
            text.chars().count() as f64 * 5.0
        }

        fn measure_height(&self, _sample: &str, _font: &FontSpec) -> f64 {
            10.0
        }

        fn label_bounding_box(
            &self,
            text_width: f64,
            text_height: f64,
            align: TextAlign,
            baseline: TextBaseline,
            angle: f64,
            margin: f64,
        ) -> LabelBBox {
            LabelBBox::compute(text_width + 20.0, text_height, align, baseline, angle, margin)
        }

        fn trim_to_width(
            &self,
            _max_width: f64,
            text: &str,
            _font: &FontSpec,
            _ellipsis: &str,
            _keep_trailing_chars: bool,
        ) -> String {
            text.chars().take(1).collect()
        }
    }

    fn through_reference<M: TextMeasurer>(measurer: M) -> (String, f64) {
        let trimmed = measurer.trim_to_width(
            100.0,
            "quarterly",
            &FontSpec::default(),
            DEFAULT_ELLIPSIS,
            false,
        );
        let bbox = measurer.label_bounding_box(
            10.0,
            10.0,
            TextAlign::Left,
            TextBaseline::Top,
            0.0,
            0.0,
        );
        (trimmed, bbox.width())
    }

    #[test]
    fn references_keep_measurer_overrides() {
        let measurer = FirstCharMeasurer;
        let (trimmed, width) = through_reference(&measurer);
        assert_eq!(trimmed, "q");
        assert_eq!(width, 30.0);

        let dynamic: &dyn TextMeasurer = &measurer;
        let (trimmed, width) = through_reference(&dynamic);
        assert_eq!(trimmed, "q");
        assert_eq!(width, 30.0);
    }
}
