use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AxisError, AxisResult};

const DEFAULT_FAMILY: &str = "sans-serif";
const PT_TO_PX: f64 = 4.0 / 3.0;

/// Font descriptor parsed from CSS shorthand such as `bold 10px "Open Sans"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FontSpec {
    pub size_px: f64,
    pub family: String,
    pub bold: bool,
    pub italic: bool,
}

impl FontSpec {
    #[must_use]
    pub fn new(size_px: f64, family: impl Into<String>) -> Self {
        Self {
            size_px,
            family: family.into(),
            bold: false,
            italic: false,
        }
    }

    pub fn parse(input: &str) -> AxisResult<Self> {
        let mut bold = false;
        let mut italic = false;
        let mut size_px = None;
        let mut family_tokens = Vec::new();

        for token in input.split_whitespace() {
            if size_px.is_some() {
                family_tokens.push(token);
                continue;
            }
            match token {
                "bold" | "bolder" => bold = true,
                "italic" | "oblique" => italic = true,
                "normal" | "lighter" | "small-caps" => {}
                weight if weight.parse::<u16>().is_ok_and(|w| w >= 600) => bold = true,
                weight if weight.parse::<u16>().is_ok() => {}
                size => size_px = Some(parse_size(size)?),
            }
        }

        let size_px = size_px.ok_or_else(|| {
            AxisError::InvalidData(format!("font `{input}` does not declare a size"))
        })?;
        let family = family_tokens
            .join(" ")
            .trim_matches(|ch| ch == '"' || ch == '\'')
            .to_owned();

        Ok(Self {
            size_px,
            family: if family.is_empty() {
                DEFAULT_FAMILY.to_owned()
            } else {
                family
            },
            bold,
            italic,
        })
    }

    #[must_use]
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        if self.italic {
            css.push_str("italic ");
        }
        if self.bold {
            css.push_str("bold ");
        }
        css.push_str(&format!("{}px {}", self.size_px, self.family));
        css
    }
}

fn parse_size(token: &str) -> AxisResult<f64> {
    // `10px/1.2` carries a line height we do not use.
    let size = token.split('/').next().unwrap_or(token);
    let (number, factor) = if let Some(number) = size.strip_suffix("px") {
        (number, 1.0)
    } else if let Some(number) = size.strip_suffix("pt") {
        (number, PT_TO_PX)
    } else {
        return Err(AxisError::InvalidData(format!(
            "unrecognized font token `{token}`"
        )));
    };
    let value: f64 = number
        .parse()
        .map_err(|_| AxisError::InvalidData(format!("invalid font size `{token}`")))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(AxisError::InvalidData(format!(
            "font size must be finite and > 0, got `{token}`"
        )));
    }
    Ok(value * factor)
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new(9.0, DEFAULT_FAMILY)
    }
}

impl FromStr for FontSpec {
    type Err = AxisError;

    fn from_str(input: &str) -> AxisResult<Self> {
        Self::parse(input)
    }
}

impl TryFrom<String> for FontSpec {
    type Error = AxisError;

    fn try_from(value: String) -> AxisResult<Self> {
        Self::parse(&value)
    }
}

impl From<FontSpec> for String {
    fn from(font: FontSpec) -> Self {
        font.to_css()
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_css_shorthand() {
        let font = FontSpec::parse("italic bold 12px \"Open Sans\"").expect("font");
        assert_eq!(font.size_px, 12.0);
        assert_eq!(font.family, "Open Sans");
        assert!(font.bold && font.italic);
    }

    #[test]
    fn points_and_line_height_are_normalized() {
        let font = FontSpec::parse("9pt/1.5 serif").expect("font");
        assert_eq!(font.size_px, 12.0);
        assert_eq!(font.family, "serif");
    }

    #[test]
    fn default_font_round_trips_through_css() {
        let font = FontSpec::default();
        assert_eq!(font.to_css(), "9px sans-serif");
        assert_eq!(FontSpec::parse(&font.to_css()).expect("font"), font);
    }

    #[test]
    fn missing_size_is_rejected() {
        assert!(FontSpec::parse("bold Arial").is_err());
    }
}
