use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{AxisError, AxisResult};

/// Property names recognized by axis layout and rendering.
pub mod property {
    pub const TEXT_ALIGN: &str = "textAlign";
    pub const TEXT_BASELINE: &str = "textBaseline";
    /// Label rotation in radians.
    pub const TEXT_ANGLE: &str = "textAngle";
    pub const TEXT_MARGIN: &str = "textMargin";
    pub const VISIBLE: &str = "visible";
    /// CSS-like color, `#rgb`, `#rrggbb` or `rgba(r,g,b,a)`.
    pub const STROKE_STYLE: &str = "strokeStyle";
}

/// Renderable part of an axis panel that accepts overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisPart {
    Label,
    Ticks,
    MinorTicks,
    Rule,
    Grid,
}

impl AxisPart {
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Label => "Label",
            Self::Ticks => "Ticks",
            Self::MinorTicks => "MinorTicks",
            Self::Rule => "Rule",
            Self::Grid => "Grid",
        }
    }

    /// Component id such as `xAxisLabel` for `panel_name = "xAxis"`.
    #[must_use]
    pub fn component(self, panel_name: &str) -> String {
        format!("{panel_name}{}", self.suffix())
    }
}

/// Constant override value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtensionValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl ExtensionValue {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) if value.is_finite() => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(value) => Some(*value),
            _ => None,
        }
    }
}

/// Per-item input handed to computed overrides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtensionContext<'a> {
    pub index: usize,
    pub count: usize,
    pub text: &'a str,
}

pub type ComputedExtension =
    Arc<dyn Fn(&ExtensionContext<'_>) -> Option<ExtensionValue> + Send + Sync>;

#[derive(Clone)]
pub enum ExtensionOverride {
    Constant(ExtensionValue),
    /// Evaluated per rendered item; `None` falls back to the default.
    Computed(ComputedExtension),
}

impl ExtensionOverride {
    #[must_use]
    pub fn evaluate(&self, context: &ExtensionContext<'_>) -> Option<ExtensionValue> {
        match self {
            Self::Constant(value) => Some(value.clone()),
            Self::Computed(compute) => compute(context),
        }
    }

    #[must_use]
    pub fn as_constant(&self) -> Option<&ExtensionValue> {
        match self {
            Self::Constant(value) => Some(value),
            Self::Computed(_) => None,
        }
    }
}

impl fmt::Debug for ExtensionOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Overrides keyed by `(component, property)`, resolved once per render setup.
///
/// Layout reads constants only (angle, margin, alignment); rendering may
/// also evaluate computed overrides per label or tick.
#[derive(Debug, Clone, Default)]
pub struct ExtensionTable {
    entries: IndexMap<(String, String), ExtensionOverride>,
}

impl ExtensionTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(
        &mut self,
        component: impl Into<String>,
        property: impl Into<String>,
        value: ExtensionOverride,
    ) -> &mut Self {
        self.entries
            .insert((component.into(), property.into()), value);
        self
    }

    #[must_use]
    pub fn with_constant(
        mut self,
        component: impl Into<String>,
        property: impl Into<String>,
        value: ExtensionValue,
    ) -> Self {
        self.set(component, property, ExtensionOverride::Constant(value));
        self
    }

    #[must_use]
    pub fn with_computed<F>(
        mut self,
        component: impl Into<String>,
        property: impl Into<String>,
        compute: F,
    ) -> Self
    where
        F: Fn(&ExtensionContext<'_>) -> Option<ExtensionValue> + Send + Sync + 'static,
    {
        self.set(
            component,
            property,
            ExtensionOverride::Computed(Arc::new(compute)),
        );
        self
    }

    #[must_use]
    pub fn get(&self, component: &str, property: &str) -> Option<&ExtensionOverride> {
        self.entries
            .get(&(component.to_owned(), property.to_owned()))
    }

    #[must_use]
    pub fn constant(&self, component: &str, property: &str) -> Option<&ExtensionValue> {
        self.get(component, property)
            .and_then(ExtensionOverride::as_constant)
    }

    #[must_use]
    pub fn number(&self, component: &str, property: &str) -> Option<f64> {
        self.constant(component, property)
            .and_then(ExtensionValue::as_number)
    }

    #[must_use]
    pub fn text(&self, component: &str, property: &str) -> Option<&str> {
        self.constant(component, property)
            .and_then(ExtensionValue::as_text)
    }

    #[must_use]
    pub fn resolve(
        &self,
        component: &str,
        property: &str,
        context: &ExtensionContext<'_>,
    ) -> Option<ExtensionValue> {
        self.get(component, property)
            .and_then(|value| value.evaluate(context))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Loads constant overrides from `{"xAxisLabel": {"textAngle": -0.78}}`.
    pub fn from_json_str(input: &str) -> AxisResult<Self> {
        let components: IndexMap<String, IndexMap<String, ExtensionValue>> =
            serde_json::from_str(input).map_err(|e| {
                AxisError::InvalidData(format!("failed to parse extension table: {e}"))
            })?;
        let mut table = Self::new();
        for (component, properties) in components {
            for (property, value) in properties {
                table.set(
                    component.clone(),
                    property,
                    ExtensionOverride::Constant(value),
                );
            }
        }
        Ok(table)
    }

    /// Serializes the constant overrides; computed ones are skipped.
    pub fn to_json_pretty(&self) -> AxisResult<String> {
        let mut components: IndexMap<&str, IndexMap<&str, &ExtensionValue>> = IndexMap::new();
        for ((component, property), value) in &self.entries {
            if let Some(value) = value.as_constant() {
                components
                    .entry(component.as_str())
                    .or_default()
                    .insert(property.as_str(), value);
            }
        }
        serde_json::to_string_pretty(&components).map_err(|e| {
            AxisError::InvalidData(format!("failed to serialize extension table: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_are_looked_up_by_component_and_property() {
        let table = ExtensionTable::new()
            .with_constant("xAxisLabel", property::TEXT_ANGLE, ExtensionValue::Number(-0.5))
            .with_constant(
                "xAxisLabel",
                property::TEXT_ALIGN,
                ExtensionValue::Text("right".to_owned()),
            );
        assert_eq!(table.number("xAxisLabel", property::TEXT_ANGLE), Some(-0.5));
        assert_eq!(table.text("xAxisLabel", property::TEXT_ALIGN), Some("right"));
        assert_eq!(table.number("yAxisLabel", property::TEXT_ANGLE), None);
    }

    #[test]
    fn computed_overrides_see_item_context() {
        let table = ExtensionTable::new().with_computed("xAxisLabel", property::VISIBLE, |ctx| {
            Some(ExtensionValue::Flag(ctx.index % 2 == 0))
        });
        let context = ExtensionContext {
            index: 3,
            count: 5,
            text: "x",
        };
        assert_eq!(
            table.resolve("xAxisLabel", property::VISIBLE, &context),
            Some(ExtensionValue::Flag(false))
        );
        assert!(table.constant("xAxisLabel", property::VISIBLE).is_none());
    }

    #[test]
    fn json_keeps_constants_in_order() {
        let table = ExtensionTable::from_json_str(
            r##"{"yAxisLabel": {"textMargin": 5, "visible": false}, "yAxisRule": {"strokeStyle": "#333"}}"##,
        )
        .expect("table");
        assert_eq!(table.len(), 3);
        assert_eq!(table.number("yAxisLabel", property::TEXT_MARGIN), Some(5.0));
        let json = table.to_json_pretty().expect("json");
        assert!(json.find("yAxisLabel") < json.find("yAxisRule"));
    }
}
