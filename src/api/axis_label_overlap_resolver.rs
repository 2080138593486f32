use tracing::debug;

/// Upper bound for the tolerated overlap fraction.
pub const MAX_OVERLAP_FACTOR: f64 = 0.9;

/// Inputs for discrete label hiding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapInput {
    pub enabled: bool,
    pub item_count: usize,
    pub axis_length: f64,
    pub text_height: f64,
    /// Fraction of a label allowed to overlap its neighbor.
    pub max_overlap_pct: f64,
}

/// Show every `stride`-th discrete label so neighbors do not overlap by more
/// than the tolerated fraction of a line. Returns 1 (show all) when hiding is
/// disabled, there are no items or the axis has no length.
#[must_use]
pub fn overlap_label_stride(input: OverlapInput) -> usize {
    if !input.enabled || input.item_count == 0 || !(input.axis_length > 0.0) {
        return 1;
    }

    let overlap_factor = if input.max_overlap_pct.is_finite() {
        input.max_overlap_pct.clamp(0.0, MAX_OVERLAP_FACTOR)
    } else {
        0.0
    };
    let required_spacing = input.text_height * (1.0 - overlap_factor);
    let ratio = (input.item_count as f64 * required_spacing / input.axis_length).ceil();
    let stride = if ratio.is_finite() && ratio > 1.0 {
        ratio as usize
    } else {
        1
    };

    if stride > 1 {
        debug!(
            overlap_factor,
            item_count = input.item_count,
            required_spacing,
            axis_length = input.axis_length,
            stride,
            "hiding overlapped axis labels"
        );
    }
    stride
}

#[must_use]
pub fn is_label_in_stride(index: usize, stride: usize) -> bool {
    stride <= 1 || index % stride == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(item_count: usize, axis_length: f64, text_height: f64, pct: f64) -> OverlapInput {
        OverlapInput {
            enabled: true,
            item_count,
            axis_length,
            text_height,
            max_overlap_pct: pct,
        }
    }

    #[test]
    fn crowded_axis_shows_every_tenth_label() {
        assert_eq!(overlap_label_stride(input(100, 200.0, 20.0, 0.0)), 10);
    }

    #[test]
    fn overlap_tolerance_shrinks_required_spacing() {
        // 20 px lines at 50% overlap need 10 px each: ceil(100 * 10 / 200) = 5.
        assert_eq!(overlap_label_stride(input(100, 200.0, 20.0, 0.5)), 5);
        // Tolerance is capped at 90%.
        assert_eq!(overlap_label_stride(input(100, 200.0, 20.0, 5.0)), 1);
    }

    #[test]
    fn disabled_or_degenerate_input_shows_everything() {
        let mut disabled = input(100, 200.0, 20.0, 0.0);
        disabled.enabled = false;
        assert_eq!(overlap_label_stride(disabled), 1);
        assert_eq!(overlap_label_stride(input(0, 200.0, 20.0, 0.0)), 1);
        assert_eq!(overlap_label_stride(input(100, 0.0, 20.0, 0.0)), 1);
        assert_eq!(overlap_label_stride(input(100, f64::NAN, 20.0, 0.0)), 1);
    }

    #[test]
    fn stride_membership() {
        assert!(is_label_in_stride(0, 3));
        assert!(!is_label_in_stride(4, 3));
        assert!(is_label_in_stride(6, 3));
        assert!(is_label_in_stride(5, 1));
    }
}
