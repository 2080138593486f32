use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone, Utc};

use crate::core::{AxisScale, ScaleKind, ScaleRange, TickOptions, TickSet, TickValue};
use crate::error::{AxisError, AxisResult};

const DEFAULT_TICK_COUNT: usize = 10;

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeStep {
    Fixed(i64),
    Months(u32),
}

impl TimeStep {
    fn approx_ms(self) -> i64 {
        match self {
            Self::Fixed(ms) => ms,
            Self::Months(months) => i64::from(months) * 30 * DAY_MS,
        }
    }
}

const TIME_STEPS: &[TimeStep] = &[
    TimeStep::Fixed(SECOND_MS),
    TimeStep::Fixed(5 * SECOND_MS),
    TimeStep::Fixed(15 * SECOND_MS),
    TimeStep::Fixed(30 * SECOND_MS),
    TimeStep::Fixed(MINUTE_MS),
    TimeStep::Fixed(5 * MINUTE_MS),
    TimeStep::Fixed(15 * MINUTE_MS),
    TimeStep::Fixed(30 * MINUTE_MS),
    TimeStep::Fixed(HOUR_MS),
    TimeStep::Fixed(3 * HOUR_MS),
    TimeStep::Fixed(6 * HOUR_MS),
    TimeStep::Fixed(12 * HOUR_MS),
    TimeStep::Fixed(DAY_MS),
    TimeStep::Fixed(2 * DAY_MS),
    TimeStep::Fixed(7 * DAY_MS),
    TimeStep::Months(1),
    TimeStep::Months(3),
    TimeStep::Months(6),
    TimeStep::Months(12),
    TimeStep::Months(24),
    TimeStep::Months(60),
    TimeStep::Months(120),
];

/// Time-series scale over UTC timestamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSeriesScale {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    range: ScaleRange,
}

impl TimeSeriesScale {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> AxisResult<Self> {
        if start == end {
            return Err(AxisError::InvalidData(
                "time scale domain must be non-zero".to_owned(),
            ));
        }
        Ok(Self {
            start,
            end,
            range: ScaleRange::new(0.0, 1.0),
        })
    }

    pub fn from_unix_seconds(start: i64, end: i64) -> AxisResult<Self> {
        let to_time = |seconds: i64| {
            Utc.timestamp_opt(seconds, 0).single().ok_or_else(|| {
                AxisError::InvalidData(format!("timestamp {seconds} is out of range"))
            })
        };
        Self::new(to_time(start)?, to_time(end)?)
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

    fn span_ms(self) -> i64 {
        (self.end.timestamp_millis() - self.start.timestamp_millis()).abs()
    }

    fn millis_to_pixel(self, millis: f64) -> f64 {
        let start = self.start.timestamp_millis() as f64;
        let end = self.end.timestamp_millis() as f64;
        self.range.min + (millis - start) / (end - start) * self.range.span()
    }

    fn label_format(self) -> &'static str {
        let span = self.span_ms();
        if span < 2 * MINUTE_MS {
            "%H:%M:%S"
        } else if span < 2 * DAY_MS {
            "%H:%M"
        } else if span < 90 * DAY_MS {
            "%b %d"
        } else if span < 3 * 365 * DAY_MS {
            "%b %Y"
        } else {
            "%Y"
        }
    }
}

impl AxisScale for TimeSeriesScale {
    fn kind(&self) -> ScaleKind {
        ScaleKind::Timeseries
    }

    fn domain(&self) -> Option<(TickValue, TickValue)> {
        Some((TickValue::Time(self.start), TickValue::Time(self.end)))
    }

    fn ticks(&self, desired_count: Option<usize>, options: TickOptions) -> AxisResult<TickSet> {
        let desired = desired_count.unwrap_or(DEFAULT_TICK_COUNT).max(1) as i64;
        let target_ms = self.span_ms() / desired;
        let step = TIME_STEPS
            .iter()
            .copied()
            .find(|step| step.approx_ms() >= target_ms)
            .unwrap_or(TimeStep::Months(120));

        let (low, high) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        let mut values = match step {
            TimeStep::Fixed(step_ms) => fixed_step_ticks(low, high, step_ms, options.round_inside),
            TimeStep::Months(months) => month_step_ticks(low, high, months, options.round_inside),
        };
        if self.start > self.end {
            values.reverse();
        }

        Ok(TickSet::new(values.into_iter().map(TickValue::Time).collect()))
    }

    fn tick_format(&self, tick: &TickValue) -> String {
        match tick {
            TickValue::Time(time) => time.format(self.label_format()).to_string(),
            other => other
                .as_number()
                .and_then(|millis| Utc.timestamp_millis_opt(millis as i64).single())
                .map(|time| time.format(self.label_format()).to_string())
                .unwrap_or_default(),
        }
    }

    fn map(&self, tick: &TickValue) -> Option<f64> {
        tick.as_number().map(|millis| self.millis_to_pixel(millis))
    }

    fn map_number(&self, value: f64) -> Option<f64> {
        value.is_finite().then(|| self.millis_to_pixel(value))
    }

    fn range(&self) -> ScaleRange {
        self.range
    }
}

fn fixed_step_ticks(
    low: DateTime<Utc>,
    high: DateTime<Utc>,
    step_ms: i64,
    round_inside: bool,
) -> Vec<DateTime<Utc>> {
    let low_ms = low.timestamp_millis();
    let high_ms = high.timestamp_millis();
    let floor = |ms: i64| ms.div_euclid(step_ms);
    let ceil = |ms: i64| ms.div_euclid(step_ms) + i64::from(ms.rem_euclid(step_ms) != 0);
    let (first, last) = if round_inside {
        (ceil(low_ms), floor(high_ms))
    } else {
        (floor(low_ms), ceil(high_ms))
    };
    (first..=last)
        .filter_map(|index| Utc.timestamp_millis_opt(index * step_ms).single())
        .collect()
}

fn month_step_ticks(
    low: DateTime<Utc>,
    high: DateTime<Utc>,
    months: u32,
    round_inside: bool,
) -> Vec<DateTime<Utc>> {
    let month_index = |time: DateTime<Utc>| time.year() * 12 + time.month0() as i32;
    let step = months as i32;
    let aligned = month_index(low).div_euclid(step) * step;
    let Some(mut cursor) = month_start(aligned) else {
        return Vec::new();
    };

    let mut ticks = Vec::new();
    loop {
        if cursor > high {
            if !round_inside {
                ticks.push(cursor);
            }
            break;
        }
        if cursor >= low || !round_inside {
            ticks.push(cursor);
        }
        match cursor.checked_add_months(Months::new(months)) {
            Some(next) => cursor = next,
            None => break,
        }
    }
    if !round_inside {
        // Keep a single leading tick at or before the domain start.
        while ticks.len() > 1 && ticks[1] <= low {
            ticks.remove(0);
        }
    }
    ticks
}

fn month_start(month_index: i32) -> Option<DateTime<Utc>> {
    let year = month_index.div_euclid(12);
    let month = month_index.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
