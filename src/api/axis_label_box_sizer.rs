use tracing::warn;

use crate::core::Anchor;
use crate::extensions::{AxisPart, ExtensionTable, property};
use crate::text::{LabelBBox, TextAlign, TextBaseline, TextMeasurer};

pub const DEFAULT_TEXT_MARGIN: f64 = 3.0;

/// Placement of axis labels around their tick anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStyle {
    pub align: TextAlign,
    pub baseline: TextBaseline,
    /// Rotation in radians, clockwise on screen.
    pub angle: f64,
    pub margin: f64,
}

impl LabelStyle {
    /// Labels read away from the plot: centered under/over horizontal axes,
    /// flush against the rule on vertical ones.
    #[must_use]
    pub fn for_anchor(anchor: Anchor) -> Self {
        let align = match anchor {
            Anchor::Top | Anchor::Bottom => TextAlign::Center,
            Anchor::Left => TextAlign::Right,
            Anchor::Right => TextAlign::Left,
        };
        let baseline = match anchor {
            Anchor::Left | Anchor::Right => TextBaseline::Middle,
            Anchor::Bottom => TextBaseline::Top,
            Anchor::Top => TextBaseline::Bottom,
        };
        Self {
            align,
            baseline,
            angle: 0.0,
            margin: DEFAULT_TEXT_MARGIN,
        }
    }

    /// Anchor defaults overridden by the `<panel>Label` constants.
    #[must_use]
    pub fn resolve(anchor: Anchor, panel_name: &str, extensions: &ExtensionTable) -> Self {
        let mut style = Self::for_anchor(anchor);
        let component = AxisPart::Label.component(panel_name);

        if let Some(align) = extensions.text(&component, property::TEXT_ALIGN) {
            match align.parse() {
                Ok(align) => style.align = align,
                Err(err) => warn!(%component, %err, "ignoring label align override"),
            }
        }
        if let Some(baseline) = extensions.text(&component, property::TEXT_BASELINE) {
            match baseline.parse() {
                Ok(baseline) => style.baseline = baseline,
                Err(err) => warn!(%component, %err, "ignoring label baseline override"),
            }
        }
        if let Some(angle) = extensions.number(&component, property::TEXT_ANGLE) {
            style.angle = angle;
        }
        if let Some(margin) = extensions.number(&component, property::TEXT_MARGIN) {
            style.margin = margin;
        }
        style
    }
}

#[must_use]
pub fn label_bbox(
    measurer: &dyn TextMeasurer,
    max_text_width: f64,
    text_height: f64,
    style: LabelStyle,
) -> LabelBBox {
    measurer.label_bounding_box(
        max_text_width,
        text_height,
        style.align,
        style.baseline,
        style.angle,
        style.margin,
    )
}

/// Band thickness needed so the label box is not clipped on the outer side.
///
/// One tick length of clearance is always added; a second one is added
/// unless the labels are unrotated on a horizontal axis, where the text
/// height already leaves enough room.
#[must_use]
pub fn axis_size_from_label_bbox(anchor: Anchor, bbox: &LabelBBox, tick_length: f64) -> f64 {
    let outer_length = match anchor {
        Anchor::Left => -bbox.x,
        Anchor::Right => bbox.x2,
        Anchor::Top => -bbox.y,
        Anchor::Bottom => bbox.y2,
    }
    .max(0.0);

    let mut axis_size = tick_length + outer_length;
    if !(bbox.source_angle == 0.0 && anchor.is_top_or_bottom()) {
        axis_size += tick_length;
    }
    axis_size
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_4;

    use super::*;
    use crate::extensions::ExtensionValue;
    use crate::text::HeuristicTextMeasurer;

    fn sized(anchor: Anchor, width: f64, height: f64, style: LabelStyle) -> f64 {
        let bbox = label_bbox(&HeuristicTextMeasurer::new(), width, height, style);
        axis_size_from_label_bbox(anchor, &bbox, 6.0)
    }

    #[test]
    fn vertical_axis_gets_two_tick_lengths() {
        let size = sized(Anchor::Left, 40.0, 10.0, LabelStyle::for_anchor(Anchor::Left));
        assert!((size - 55.0).abs() <= 1e-9);
        let size = sized(Anchor::Right, 40.0, 10.0, LabelStyle::for_anchor(Anchor::Right));
        assert!((size - 55.0).abs() <= 1e-9);
    }

    #[test]
    fn unrotated_horizontal_axis_gets_one_tick_length() {
        let size = sized(Anchor::Bottom, 40.0, 9.0, LabelStyle::for_anchor(Anchor::Bottom));
        assert!((size - 18.0).abs() <= 1e-9);
        let size = sized(Anchor::Top, 40.0, 9.0, LabelStyle::for_anchor(Anchor::Top));
        assert!((size - 18.0).abs() <= 1e-9);
    }

    #[test]
    fn rotated_labels_grow_the_band() {
        let style = LabelStyle {
            angle: FRAC_PI_4,
            ..LabelStyle::for_anchor(Anchor::Bottom)
        };
        let flat = sized(Anchor::Bottom, 60.0, 9.0, LabelStyle::for_anchor(Anchor::Bottom));
        let rotated = sized(Anchor::Bottom, 60.0, 9.0, style);
        assert!(rotated > flat + 6.0);
    }

    #[test]
    fn label_overrides_replace_anchor_defaults() {
        let extensions = ExtensionTable::new()
            .with_constant("xAxisLabel", property::TEXT_ALIGN, ExtensionValue::Text("right".to_owned()))
            .with_constant("xAxisLabel", property::TEXT_ANGLE, ExtensionValue::Number(-0.5))
            .with_constant("xAxisLabel", property::TEXT_BASELINE, ExtensionValue::Text("sideways".to_owned()));
        let style = LabelStyle::resolve(Anchor::Bottom, "xAxis", &extensions);
        assert_eq!(style.align, TextAlign::Right);
        assert_eq!(style.baseline, TextBaseline::Top);
        assert_eq!(style.angle, -0.5);
        assert_eq!(style.margin, DEFAULT_TEXT_MARGIN);
    }
}
