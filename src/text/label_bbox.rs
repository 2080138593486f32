use crate::core::Vec2;
use crate::text::{TextAlign, TextBaseline};

/// Corner of the un-rotated label rectangle, in `LabelBBox::source_corners` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelCorner {
    BottomLeft = 0,
    BottomRight = 1,
    TopLeft = 2,
    TopRight = 3,
}

/// Oriented bounding box of a label anchored at the origin.
///
/// `x..x2` and `y..y2` are the axis-aligned extents of the rotated box.
/// `source_corners` are the rotated images of the text rectangle's
/// corners, ordered bottom-left, bottom-right, top-left, top-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelBBox {
    pub x: f64,
    pub y: f64,
    pub x2: f64,
    pub y2: f64,
    pub source_corners: [Vec2; 4],
    pub source_angle: f64,
    pub source_align: TextAlign,
    pub source_text_width: f64,
}

impl LabelBBox {
    #[must_use]
    pub fn compute(
        text_width: f64,
        text_height: f64,
        align: TextAlign,
        baseline: TextBaseline,
        angle: f64,
        margin: f64,
    ) -> Self {
        let left = match align {
            TextAlign::Left => margin,
            TextAlign::Center => -text_width / 2.0,
            TextAlign::Right => -text_width - margin,
        };
        let top = match baseline {
            TextBaseline::Top => margin,
            TextBaseline::Middle => -text_height / 2.0,
            TextBaseline::Bottom => -text_height - margin,
            TextBaseline::Alphabetic => -text_height,
        };
        let right = left + text_width;
        let bottom = top + text_height;

        let source_corners = [
            Vec2::new(left, bottom),
            Vec2::new(right, bottom),
            Vec2::new(left, top),
            Vec2::new(right, top),
        ]
        .map(|corner| corner.rotate(angle));

        let (mut x, mut y) = (f64::INFINITY, f64::INFINITY);
        let (mut x2, mut y2) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for corner in source_corners {
            x = x.min(corner.x);
            y = y.min(corner.y);
            x2 = x2.max(corner.x);
            y2 = y2.max(corner.y);
        }

        Self {
            x,
            y,
            x2,
            y2,
            source_corners,
            source_angle: angle,
            source_align: align,
            source_text_width: text_width,
        }
    }

    #[must_use]
    pub fn corner(&self, corner: LabelCorner) -> Vec2 {
        self.source_corners[corner as usize]
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.x2 - self.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.y2 - self.y
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn right_aligned_label_sits_left_of_anchor() {
        let bbox = LabelBBox::compute(40.0, 10.0, TextAlign::Right, TextBaseline::Middle, 0.0, 3.0);
        assert_close(bbox.x, -43.0);
        assert_close(bbox.x2, -3.0);
        assert_close(bbox.y, -5.0);
        assert_close(bbox.y2, 5.0);
        assert_eq!(bbox.corner(LabelCorner::TopRight), Vec2::new(-3.0, -5.0));
    }

    #[test]
    fn top_baseline_pushes_label_below_anchor() {
        let bbox = LabelBBox::compute(30.0, 9.0, TextAlign::Center, TextBaseline::Top, 0.0, 3.0);
        assert_close(bbox.x, -15.0);
        assert_close(bbox.y, 3.0);
        assert_close(bbox.y2, 12.0);
        assert_close(bbox.width(), 30.0);
    }

    #[test]
    fn quarter_turn_swaps_extents() {
        let bbox = LabelBBox::compute(40.0, 10.0, TextAlign::Left, TextBaseline::Middle, FRAC_PI_2, 0.0);
        assert_close(bbox.width(), 10.0);
        assert_close(bbox.height(), 40.0);
        assert_close(bbox.y, 0.0);
        assert_close(bbox.y2, 40.0);
        assert_close(bbox.source_angle, FRAC_PI_2);
    }
}
