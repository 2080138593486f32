use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::CategoryNode;
use crate::error::AxisResult;

/// Scale family as seen by axis layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleKind {
    Discrete,
    Timeseries,
    Continuous,
    /// A scale family the layout does not know how to tick.
    Unknown(String),
}

impl ScaleKind {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "Discrete" | "discrete" => Self::Discrete,
            "Timeseries" | "timeseries" => Self::Timeseries,
            "Continuous" | "continuous" => Self::Continuous,
            other => Self::Unknown(other.to_owned()),
        }
    }
}

impl fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discrete => f.write_str("Discrete"),
            Self::Timeseries => f.write_str("Timeseries"),
            Self::Continuous => f.write_str("Continuous"),
            Self::Unknown(name) => write!(f, "{name}"),
        }
    }
}

/// A domain value an axis can place a tick at.
#[derive(Debug, Clone, PartialEq)]
pub enum TickValue {
    Number(f64),
    Time(DateTime<Utc>),
    Category(Arc<CategoryNode>),
}

impl TickValue {
    /// Numeric coercion shared by number and time ticks (time in epoch milliseconds).
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Time(time) => Some(time.timestamp_millis() as f64),
            Self::Category(_) => None,
        }
    }

    #[must_use]
    pub fn as_category(&self) -> Option<&CategoryNode> {
        match self {
            Self::Category(node) => Some(node),
            _ => None,
        }
    }
}

/// Options forwarded to `AxisScale::ticks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickOptions {
    /// Keep ticks inside the domain instead of extending it to tick boundaries.
    pub round_inside: bool,
    pub exponent_min: Option<i32>,
    pub exponent_max: Option<i32>,
}

/// Candidate tick set produced by a scale.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickSet {
    pub values: Vec<TickValue>,
    /// Decimal exponent of the tick step, when the scale has one.
    pub exponent: Option<i32>,
    /// The requested count could not be honored within the exponent bounds.
    pub exponent_overflow: bool,
}

impl TickSet {
    #[must_use]
    pub fn new(values: Vec<TickValue>) -> Self {
        Self {
            values,
            exponent: None,
            exponent_overflow: false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Pixel range covered by a scale.
///
/// `min..max` is the mapped interval, `size` the full length including any
/// outer margin on either end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleRange {
    pub min: f64,
    pub max: f64,
    pub size: f64,
}

impl ScaleRange {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            size: max.max(min),
        }
    }

    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }
}

/// Scale contract consumed by axis layout and rendering.
pub trait AxisScale {
    fn kind(&self) -> ScaleKind;

    /// A null scale has nothing to show; its axis collapses to zero size.
    fn is_null(&self) -> bool {
        false
    }

    /// First and last domain values, `None` for an empty domain.
    fn domain(&self) -> Option<(TickValue, TickValue)>;

    fn ticks(&self, desired_count: Option<usize>, options: TickOptions) -> AxisResult<TickSet>;

    fn tick_format(&self, tick: &TickValue) -> String;

    /// Pixel position of a tick, `None` when the value does not belong to this scale.
    fn map(&self, tick: &TickValue) -> Option<f64>;

    /// Pixel position of a numerically coerced domain value.
    fn map_number(&self, value: f64) -> Option<f64>;

    fn range(&self) -> ScaleRange;

    /// Band width of discrete scales.
    fn band_step(&self) -> Option<f64> {
        None
    }
}
