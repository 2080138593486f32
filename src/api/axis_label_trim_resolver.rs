use tracing::debug;

use crate::core::{Anchor, Vec2, line_intersect};
use crate::text::{LabelBBox, LabelCorner, TextAlign};

/// Width labels must be trimmed to so the band fits `available_ortho_length`.
///
/// Returns `None` when the band already fits, or when the label edges run
/// parallel to the axis and no width reduction can help.
///
/// The cut line runs parallel to the axis at the farthest distance labels may
/// reach (available length minus two tick lengths). Each long edge of the
/// rotated label box is intersected with it and measured from its trailing
/// corner: the right corners while the text reads upright (`cos(angle) >= 0`),
/// the left corners when it is upside down. The smaller of the two edges wins.
/// Centered labels lose the same amount on the other side.
#[must_use]
pub fn max_text_width_that_fits(
    anchor: Anchor,
    bbox: &LabelBBox,
    axis_size: f64,
    available_ortho_length: f64,
    tick_length: f64,
) -> Option<f64> {
    if axis_size <= available_ortho_length {
        return None;
    }

    let max_ortho_length = available_ortho_length - 2.0 * tick_length;
    let (farthest_point, parallel) = match anchor {
        Anchor::Left => (Vec2::new(-max_ortho_length, 0.0), Vec2::new(0.0, 1.0)),
        Anchor::Right => (Vec2::new(max_ortho_length, 0.0), Vec2::new(0.0, 1.0)),
        Anchor::Top => (Vec2::new(0.0, -max_ortho_length), Vec2::new(1.0, 0.0)),
        Anchor::Bottom => (Vec2::new(0.0, max_ortho_length), Vec2::new(1.0, 0.0)),
    };

    let upright = bbox.source_angle.cos() >= 0.0;
    let visible_length = |left: LabelCorner, right: LabelCorner| -> Option<f64> {
        let start = bbox.corner(left);
        let end = bbox.corner(right);
        let hit = line_intersect(farthest_point, parallel, start, end - start)?;
        let trailing = if upright { end } else { start };
        let length = (trailing - hit).length();
        length.is_finite().then_some(length)
    };

    let top = visible_length(LabelCorner::TopLeft, LabelCorner::TopRight);
    let bottom = visible_length(LabelCorner::BottomLeft, LabelCorner::BottomRight);
    let fitting = match (top, bottom) {
        (Some(top), Some(bottom)) => top.min(bottom),
        (Some(length), None) | (None, Some(length)) => length,
        (None, None) => {
            debug!(
                anchor = anchor.as_str(),
                angle = bbox.source_angle,
                "label edges parallel to the axis, not trimming"
            );
            return None;
        }
    };

    let mut max_text_width = fitting.min(bbox.source_text_width);
    if bbox.source_align == TextAlign::Center {
        let cut = bbox.source_text_width - max_text_width;
        max_text_width -= cut;
    }
    Some(max_text_width.max(0.0))
}
