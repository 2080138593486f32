use crate::core::{AxisScale, ScaleKind, ScaleRange, TickOptions, TickSet, TickValue};
use crate::error::{AxisError, AxisResult};

const DEFAULT_TICK_COUNT: usize = 10;
const MAX_FORMAT_DECIMALS: usize = 8;
/// Upper bound on ticks per requested tick once the step is clamped.
const MAX_TICKS_PER_DESIRED: usize = 4;

/// Continuous numeric scale with "nice" 1/2/5 tick steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range: ScaleRange,
    null: bool,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> AxisResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(AxisError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range: ScaleRange::new(0.0, 1.0),
            null: false,
        })
    }

    /// A scale with no data behind it; its axis reserves no space.
    #[must_use]
    pub fn null() -> Self {
        Self {
            domain_start: 0.0,
            domain_end: 1.0,
            range: ScaleRange::new(0.0, 0.0),
            null: true,
        }
    }

    pub fn with_range(mut self, min: f64, max: f64) -> AxisResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(AxisError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }
        self.range = ScaleRange::new(min, max);
        Ok(self)
    }

    pub fn with_range_size(mut self, size: f64) -> AxisResult<Self> {
        if !size.is_finite() || size < self.range.max {
            return Err(AxisError::InvalidData(
                "scale range size must be finite and cover the range".to_owned(),
            ));
        }
        self.range = self.range.with_size(size);
        Ok(self)
    }

    #[must_use]
    pub fn domain_bounds(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn value_to_pixel(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range.min + normalized * self.range.span()
    }

    #[must_use]
    pub fn pixel_to_value(self, pixel: f64) -> f64 {
        let span = self.range.span();
        if span == 0.0 {
            return self.domain_start;
        }
        let normalized = (pixel - self.range.min) / span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }
}

impl AxisScale for LinearScale {
    fn kind(&self) -> ScaleKind {
        ScaleKind::Continuous
    }

    fn is_null(&self) -> bool {
        self.null
    }

    fn domain(&self) -> Option<(TickValue, TickValue)> {
        Some((
            TickValue::Number(self.domain_start),
            TickValue::Number(self.domain_end),
        ))
    }

    fn ticks(&self, desired_count: Option<usize>, options: TickOptions) -> AxisResult<TickSet> {
        let (values, exponent, exponent_overflow) = nice_ticks(
            self.domain_start,
            self.domain_end,
            desired_count.unwrap_or(DEFAULT_TICK_COUNT),
            options,
        );
        Ok(TickSet {
            values: values.into_iter().map(TickValue::Number).collect(),
            exponent: Some(exponent),
            exponent_overflow,
        })
    }

    fn tick_format(&self, tick: &TickValue) -> String {
        tick.as_number()
            .map(format_number)
            .unwrap_or_default()
    }

    fn map(&self, tick: &TickValue) -> Option<f64> {
        tick.as_number().map(|value| self.value_to_pixel(value))
    }

    fn map_number(&self, value: f64) -> Option<f64> {
        value.is_finite().then(|| self.value_to_pixel(value))
    }

    fn range(&self) -> ScaleRange {
        self.range
    }
}

/// Builds evenly spaced ticks at a 1, 2 or 5 times power-of-ten step.
///
/// Returns the ticks, the decimal exponent of the step and whether the
/// exponent had to be clamped into `[exponent_min, exponent_max]`.
pub(crate) fn nice_ticks(
    domain_start: f64,
    domain_end: f64,
    desired_count: usize,
    options: TickOptions,
) -> (Vec<f64>, i32, bool) {
    let reversed = domain_start > domain_end;
    let (low, high) = if reversed {
        (domain_end, domain_start)
    } else {
        (domain_start, domain_end)
    };
    let span = high - low;
    if !span.is_finite() || span <= 0.0 {
        return (vec![low], 0, false);
    }

    let desired = desired_count.max(1) as f64;
    let mut exponent = (span / desired).log10().floor() as i32;
    let mut overflow = false;
    if let Some(min) = options.exponent_min
        && exponent < min
    {
        exponent = min;
        overflow = true;
    }
    if let Some(max) = options.exponent_max
        && exponent > max
    {
        exponent = max;
        overflow = true;
    }

    let mut step = 10_f64.powi(exponent);
    if !overflow {
        let error = desired / (span / step);
        if error <= 0.15 {
            step *= 10.0;
        } else if error <= 0.35 {
            step *= 5.0;
        } else if error <= 0.75 {
            step *= 2.0;
        }
        exponent = step.log10().floor() as i32;
    }

    // A clamped exponent over a wide domain would emit one tick per step.
    let max_count = desired_count
        .max(1)
        .saturating_mul(MAX_TICKS_PER_DESIRED)
        .saturating_add(1) as f64;
    let (first, last) = loop {
        let (first, last) = if options.round_inside {
            ((low / step).ceil(), (high / step).floor())
        } else {
            ((low / step).floor(), (high / step).ceil())
        };
        if last < first || last - first < max_count {
            break (first, last);
        }
        step *= 10.0;
        exponent += 1;
    };
    let mut ticks: Vec<f64> = if last < first {
        vec![low]
    } else {
        let count = (last - first).round() as usize + 1;
        (0..count)
            .map(|index| clean_zero((first + index as f64) * step))
            .collect()
    };
    if reversed {
        ticks.reverse();
    }

    (ticks, exponent, overflow)
}

fn clean_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

/// Shortest fixed-point rendering of a tick value.
pub(crate) fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let fixed = format!("{:.*}", MAX_FORMAT_DECIMALS, clean_zero(value));
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}
