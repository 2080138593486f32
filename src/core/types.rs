use serde::{Deserialize, Serialize};

use crate::error::{AxisError, AxisResult};

/// Available size of the plotting area handed to an axis panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClientSize {
    pub width: f64,
    pub height: f64,
}

impl ClientSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }

    pub fn validate(self) -> AxisResult<Self> {
        if !self.is_valid() {
            return Err(AxisError::InvalidClientSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    /// Length of the dimension the axis runs along.
    #[must_use]
    pub fn length_along(self, anchor: Anchor) -> f64 {
        match anchor.length_dimension() {
            Dimension::Width => self.width,
            Dimension::Height => self.height,
        }
    }

    /// Length of the dimension the axis band grows into.
    #[must_use]
    pub fn length_across(self, anchor: Anchor) -> f64 {
        match anchor.ortho_length_dimension() {
            Dimension::Width => self.width,
            Dimension::Height => self.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Width,
    Height,
}

/// Side of the plotting area an axis is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl Anchor {
    #[must_use]
    pub fn is_top_or_bottom(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    #[must_use]
    pub fn length_dimension(self) -> Dimension {
        if self.is_top_or_bottom() {
            Dimension::Width
        } else {
            Dimension::Height
        }
    }

    #[must_use]
    pub fn ortho_length_dimension(self) -> Dimension {
        if self.is_top_or_bottom() {
            Dimension::Height
        } else {
            Dimension::Width
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl std::str::FromStr for Anchor {
    type Err = AxisError;

    fn from_str(value: &str) -> AxisResult<Self> {
        match value {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(AxisError::InvalidData(format!(
                "unknown axis anchor `{other}`"
            ))),
        }
    }
}

/// Panel size requested by an axis: band thickness across, client length along.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchoredSize {
    pub width: f64,
    pub height: f64,
}

impl AnchoredSize {
    #[must_use]
    pub fn new(anchor: Anchor, axis_size: f64, client: ClientSize) -> Self {
        if anchor.is_top_or_bottom() {
            Self {
                width: client.width,
                height: axis_size,
            }
        } else {
            Self {
                width: axis_size,
                height: client.height,
            }
        }
    }
}
