use crate::text::{FontSpec, TextMeasurer};

/// Marker appended (or prepended) to trimmed axis labels.
pub const DEFAULT_ELLIPSIS: &str = "..";

/// Cuts `text` to the longest prefix (or suffix with `keep_trailing_chars`)
/// whose width plus the ellipsis fits `max_width`.
///
/// Text that already fits is returned unchanged. When not even one
/// character fits, only the ellipsis is returned.
pub fn trim_to_width<M: TextMeasurer + ?Sized>(
    measurer: &M,
    max_width: f64,
    text: &str,
    font: &FontSpec,
    ellipsis: &str,
    keep_trailing_chars: bool,
) -> String {
    if !max_width.is_finite() || measurer.measure_width(text, font) <= max_width {
        return text.to_owned();
    }

    let budget = max_width - measurer.measure_width(ellipsis, font);
    let chars: Vec<char> = text.chars().collect();
    let piece = |count: usize| -> String {
        if keep_trailing_chars {
            chars[chars.len() - count..].iter().collect()
        } else {
            chars[..count].iter().collect()
        }
    };

    // Largest `count` with piece(count) fitting; widths grow with `count`.
    let (mut low, mut high) = (0_usize, chars.len());
    while low < high {
        let mid = (low + high).div_ceil(2);
        if measurer.measure_width(&piece(mid), font) <= budget {
            low = mid;
        } else {
            high = mid - 1;
        }
    }

    let kept = piece(low);
    if keep_trailing_chars {
        format!("{ellipsis}{kept}")
    } else {
        format!("{kept}{ellipsis}")
    }
}
