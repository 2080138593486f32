use serde::{Deserialize, Serialize};

use crate::core::{Anchor, TickOptions};
use crate::error::{AxisError, AxisResult};
use crate::text::FontSpec;

/// How a continuous domain relates to its ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DomainRoundMode {
    /// Ticks stay inside the data domain.
    #[default]
    None,
    /// The domain is extended outwards to the nearest ticks.
    Tick,
}

/// Which chart dimension an axis measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    #[default]
    X,
    Y,
}

impl AxisKind {
    #[must_use]
    pub fn default_anchor(self) -> Anchor {
        match self {
            Self::X => Anchor::Bottom,
            Self::Y => Anchor::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AxisSlot {
    #[default]
    Primary,
    Secondary,
}

/// Name used for extension lookups (`xAxisLabel`, `secondYAxisRule`, ...).
#[must_use]
pub fn panel_name(kind: AxisKind, slot: AxisSlot) -> &'static str {
    match (kind, slot) {
        (AxisKind::X, AxisSlot::Primary) => "xAxis",
        (AxisKind::X, AxisSlot::Secondary) => "secondXAxis",
        (AxisKind::Y, AxisSlot::Primary) => "yAxis",
        (AxisKind::Y, AxisSlot::Secondary) => "secondYAxis",
    }
}

/// Options consumed by axis layout and rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisPanelConfig {
    #[serde(default)]
    pub kind: AxisKind,
    #[serde(default)]
    pub slot: AxisSlot,
    /// Overrides the side implied by `kind`.
    #[serde(default)]
    pub anchor: Option<Anchor>,
    /// Fixed band thickness; skips label-driven sizing.
    #[serde(default)]
    pub axis_size: Option<f64>,
    /// Upper bound of the band thickness.
    #[serde(default)]
    pub axis_size_max: Option<f64>,
    /// Fixed tick count; skips the tick search.
    #[serde(default)]
    pub desired_tick_count: Option<usize>,
    #[serde(default)]
    pub tick_exponent_min: Option<i32>,
    #[serde(default)]
    pub tick_exponent_max: Option<i32>,
    #[serde(default)]
    pub domain_round_mode: DomainRoundMode,
    #[serde(default = "default_minor_ticks")]
    pub minor_ticks: bool,
    /// Minimum spacing between labels, in em units of the label font.
    #[serde(default = "default_label_spacing_min")]
    pub label_spacing_min: f64,
    #[serde(default)]
    pub overlapped_labels_hide: bool,
    /// Fraction of a discrete label allowed to overlap its neighbor.
    #[serde(default = "default_overlapped_labels_max_pct")]
    pub overlapped_labels_max_pct: f64,
    #[serde(default = "default_tick_length")]
    pub tick_length: f64,
    #[serde(default)]
    pub font: FontSpec,
    #[serde(default)]
    pub full_grid: bool,
    #[serde(default = "default_true")]
    pub full_grid_crosses_margin: bool,
    #[serde(default = "default_true")]
    pub rule_crosses_margin: bool,
    #[serde(default)]
    pub use_composite_axis: bool,
    #[serde(default = "default_composite_axis_size")]
    pub composite_axis_size: f64,
}

impl AxisPanelConfig {
    #[must_use]
    pub fn new(kind: AxisKind, slot: AxisSlot) -> Self {
        Self {
            kind,
            slot,
            anchor: None,
            axis_size: None,
            axis_size_max: None,
            desired_tick_count: None,
            tick_exponent_min: None,
            tick_exponent_max: None,
            domain_round_mode: DomainRoundMode::default(),
            minor_ticks: default_minor_ticks(),
            label_spacing_min: default_label_spacing_min(),
            overlapped_labels_hide: false,
            overlapped_labels_max_pct: default_overlapped_labels_max_pct(),
            tick_length: default_tick_length(),
            font: FontSpec::default(),
            full_grid: false,
            full_grid_crosses_margin: true,
            rule_crosses_margin: true,
            use_composite_axis: false,
            composite_axis_size: default_composite_axis_size(),
        }
    }

    #[must_use]
    pub fn x_axis() -> Self {
        Self::new(AxisKind::X, AxisSlot::Primary)
    }

    #[must_use]
    pub fn y_axis() -> Self {
        Self::new(AxisKind::Y, AxisSlot::Primary)
    }

    #[must_use]
    pub fn anchor(&self) -> Anchor {
        self.anchor.unwrap_or_else(|| self.kind.default_anchor())
    }

    #[must_use]
    pub fn panel_name(&self) -> &'static str {
        panel_name(self.kind, self.slot)
    }

    #[must_use]
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    #[must_use]
    pub fn with_axis_size(mut self, axis_size: Option<f64>) -> Self {
        self.axis_size = axis_size;
        self
    }

    #[must_use]
    pub fn with_axis_size_max(mut self, axis_size_max: Option<f64>) -> Self {
        self.axis_size_max = axis_size_max;
        self
    }

    #[must_use]
    pub fn with_desired_tick_count(mut self, desired_tick_count: Option<usize>) -> Self {
        self.desired_tick_count = desired_tick_count;
        self
    }

    #[must_use]
    pub fn with_tick_exponents(mut self, min: Option<i32>, max: Option<i32>) -> Self {
        self.tick_exponent_min = min;
        self.tick_exponent_max = max;
        self
    }

    #[must_use]
    pub fn with_domain_round_mode(mut self, mode: DomainRoundMode) -> Self {
        self.domain_round_mode = mode;
        self
    }

    #[must_use]
    pub fn with_minor_ticks(mut self, minor_ticks: bool) -> Self {
        self.minor_ticks = minor_ticks;
        self
    }

    #[must_use]
    pub fn with_label_spacing_min(mut self, em: f64) -> Self {
        self.label_spacing_min = em;
        self
    }

    /// Enables discrete label hiding with the given tolerated overlap fraction.
    #[must_use]
    pub fn with_overlapped_labels_hide(mut self, hide: bool, max_pct: f64) -> Self {
        self.overlapped_labels_hide = hide;
        self.overlapped_labels_max_pct = max_pct;
        self
    }

    #[must_use]
    pub fn with_tick_length(mut self, tick_length: f64) -> Self {
        self.tick_length = tick_length;
        self
    }

    #[must_use]
    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }

    #[must_use]
    pub fn with_full_grid(mut self, full_grid: bool) -> Self {
        self.full_grid = full_grid;
        self
    }

    #[must_use]
    pub fn with_full_grid_crosses_margin(mut self, crosses: bool) -> Self {
        self.full_grid_crosses_margin = crosses;
        self
    }

    #[must_use]
    pub fn with_rule_crosses_margin(mut self, crosses: bool) -> Self {
        self.rule_crosses_margin = crosses;
        self
    }

    #[must_use]
    pub fn with_composite_axis(mut self, use_composite_axis: bool) -> Self {
        self.use_composite_axis = use_composite_axis;
        self
    }

    /// Scale tick options implied by the rounding mode and exponent bounds.
    #[must_use]
    pub fn tick_options(&self) -> TickOptions {
        TickOptions {
            round_inside: self.domain_round_mode != DomainRoundMode::Tick,
            exponent_min: self.tick_exponent_min,
            exponent_max: self.tick_exponent_max,
        }
    }

    /// Overlap fraction clamped into `[0, 0.9]`.
    #[must_use]
    pub fn overlap_factor(&self) -> f64 {
        if self.overlapped_labels_max_pct.is_finite() {
            self.overlapped_labels_max_pct.clamp(0.0, 0.9)
        } else {
            0.0
        }
    }

    pub fn validate(&self) -> AxisResult<()> {
        validate_length("tick_length", Some(self.tick_length))?;
        validate_length("axis_size", self.axis_size)?;
        validate_length("axis_size_max", self.axis_size_max)?;
        validate_length("composite_axis_size", Some(self.composite_axis_size))?;
        if !self.label_spacing_min.is_finite() {
            return Err(AxisError::InvalidData(
                "label_spacing_min must be finite".to_owned(),
            ));
        }
        if !self.overlapped_labels_max_pct.is_finite() {
            return Err(AxisError::InvalidData(
                "overlapped_labels_max_pct must be finite".to_owned(),
            ));
        }
        if self.desired_tick_count == Some(0) {
            return Err(AxisError::InvalidData(
                "desired_tick_count must be >= 1".to_owned(),
            ));
        }
        if let (Some(min), Some(max)) = (self.tick_exponent_min, self.tick_exponent_max)
            && min > max
        {
            return Err(AxisError::InvalidData(format!(
                "tick_exponent_min ({min}) must not exceed tick_exponent_max ({max})"
            )));
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> AxisResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AxisError::InvalidData(format!("failed to serialize axis config: {e}")))
    }

    pub fn from_json_str(input: &str) -> AxisResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| AxisError::InvalidData(format!("failed to parse axis config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for AxisPanelConfig {
    fn default() -> Self {
        Self::x_axis()
    }
}

fn validate_length(name: &str, value: Option<f64>) -> AxisResult<()> {
    match value {
        Some(value) if !value.is_finite() || value < 0.0 => Err(AxisError::InvalidData(format!(
            "{name} must be finite and >= 0"
        ))),
        _ => Ok(()),
    }
}

fn default_minor_ticks() -> bool {
    true
}

fn default_label_spacing_min() -> f64 {
    1.0
}

fn default_overlapped_labels_max_pct() -> f64 {
    0.2
}

fn default_tick_length() -> f64 {
    6.0
}

fn default_true() -> bool {
    true
}

fn default_composite_axis_size() -> f64 {
    50.0
}
