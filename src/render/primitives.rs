use crate::error::{AxisError, AxisResult};
use crate::render::AxisLayer;
use crate::text::{FontSpec, TextAlign, TextBaseline};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses `#rgb`, `#rrggbb`, `rgb(r,g,b)`, `rgba(r,g,b,a)` and a few names.
    pub fn parse_css(input: &str) -> AxisResult<Self> {
        let value = input.trim();
        let invalid = || AxisError::InvalidData(format!("unsupported color `{input}`"));

        match value {
            "black" => return Ok(Self::BLACK),
            "white" => return Ok(Self::rgb(1.0, 1.0, 1.0)),
            "transparent" => return Ok(Self::TRANSPARENT),
            _ => {}
        }

        if let Some(hex) = value.strip_prefix('#') {
            let digits: Vec<u8> = hex
                .chars()
                .map(|ch| ch.to_digit(16).map(|digit| digit as u8))
                .collect::<Option<_>>()
                .ok_or_else(invalid)?;
            let channel = |high: u8, low: u8| f64::from(high * 16 + low) / 255.0;
            return match digits.as_slice() {
                [r, g, b] => Ok(Self::rgb(channel(*r, *r), channel(*g, *g), channel(*b, *b))),
                [r1, r2, g1, g2, b1, b2] => Ok(Self::rgb(
                    channel(*r1, *r2),
                    channel(*g1, *g2),
                    channel(*b1, *b2),
                )),
                _ => Err(invalid()),
            };
        }

        let (body, has_alpha) = if let Some(body) = value.strip_prefix("rgba(") {
            (body, true)
        } else if let Some(body) = value.strip_prefix("rgb(") {
            (body, false)
        } else {
            return Err(invalid());
        };
        let parts: Vec<f64> = body
            .strip_suffix(')')
            .ok_or_else(invalid)?
            .split(',')
            .map(|part| part.trim().parse::<f64>().map_err(|_| invalid()))
            .collect::<AxisResult<_>>()?;
        let color = match (parts.as_slice(), has_alpha) {
            ([r, g, b], false) => Self::rgb(r / 255.0, g / 255.0, b / 255.0),
            ([r, g, b, a], true) => Self::rgba(r / 255.0, g / 255.0, b / 255.0, *a),
            _ => return Err(invalid()),
        };
        color.validate()?;
        Ok(color)
    }

    pub fn validate(self) -> AxisResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(AxisError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
    pub layer: AxisLayer,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke_width: f64,
        color: Color,
        layer: AxisLayer,
    ) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
            layer,
        }
    }

    #[must_use]
    pub fn length(self) -> f64 {
        (self.x2 - self.x1).hypot(self.y2 - self.y1)
    }

    pub fn validate(self) -> AxisResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(AxisError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(AxisError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Draw command for one label anchored at `(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font: FontSpec,
    pub color: Color,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    /// Rotation around the anchor in radians, clockwise on screen.
    pub angle: f64,
    /// Extra distance between the anchor and the text box.
    pub margin: f64,
    pub layer: AxisLayer,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(text: impl Into<String>, x: f64, y: f64, font: FontSpec, color: Color) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font,
            color,
            align: TextAlign::Left,
            baseline: TextBaseline::Top,
            angle: 0.0,
            margin: 0.0,
            layer: AxisLayer::Labels,
        }
    }

    #[must_use]
    pub fn with_alignment(mut self, align: TextAlign, baseline: TextBaseline) -> Self {
        self.align = align;
        self.baseline = baseline;
        self
    }

    #[must_use]
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn validate(&self) -> AxisResult<()> {
        if self.text.is_empty() {
            return Err(AxisError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(AxisError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.angle.is_finite() || !self.margin.is_finite() {
            return Err(AxisError::InvalidData(
                "text angle and margin must be finite".to_owned(),
            ));
        }
        if !self.font.size_px.is_finite() || self.font.size_px <= 0.0 {
            return Err(AxisError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}
