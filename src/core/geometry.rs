use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

const PARALLEL_EPSILON: f64 = 1e-12;

/// Point or direction in screen space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Counter-clockwise perpendicular.
    #[must_use]
    pub fn perp(self) -> Self {
        Self::new(-self.y, self.x)
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Rotates around the origin; positive angles turn clockwise on screen.
    #[must_use]
    pub fn rotate(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Intersects the line `origin_a + t * dir_a` with `origin_b + s * dir_b`.
///
/// Returns `None` for parallel lines or a zero-length direction.
#[must_use]
pub fn line_intersect(origin_a: Vec2, dir_a: Vec2, origin_b: Vec2, dir_b: Vec2) -> Option<Vec2> {
    let normal_b = dir_b.perp();
    let denominator = dir_a.dot(normal_b);
    if !denominator.is_finite() || denominator.abs() <= PARALLEL_EPSILON {
        return None;
    }

    let t = (origin_b - origin_a).dot(normal_b) / denominator;
    let point = origin_a + dir_a * t;
    point.is_finite().then_some(point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn perpendicular_lines_meet_at_expected_point() {
        let point = line_intersect(
            Vec2::new(0.0, 5.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(3.0, -10.0),
            Vec2::new(0.0, 2.0),
        )
        .expect("lines intersect");
        assert_abs_diff_eq!(point.x, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(point.y, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn parallel_or_degenerate_lines_do_not_intersect() {
        let horizontal = Vec2::new(1.0, 0.0);
        assert!(line_intersect(Vec2::default(), horizontal, Vec2::new(0.0, 1.0), horizontal).is_none());
        assert!(line_intersect(Vec2::default(), horizontal, Vec2::new(0.0, 1.0), Vec2::default()).is_none());
    }

    #[test]
    fn quarter_turn_rotates_clockwise_on_screen() {
        let rotated = Vec2::new(1.0, 0.0).rotate(std::f64::consts::FRAC_PI_2);
        assert_abs_diff_eq!(rotated.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rotated.y, 1.0, epsilon = 1e-12);
    }
}
