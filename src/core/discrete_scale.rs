use std::sync::Arc;

use crate::core::{AxisScale, ScaleKind, ScaleRange, TickOptions, TickSet, TickValue};
use crate::error::{AxisError, AxisResult};

const ABS_LABEL_SEPARATOR: &str = " ~ ";

/// One category of a discrete axis, possibly grouping sub-categories.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryNode {
    pub value: String,
    pub label: String,
    /// Label qualified by every ancestor label (`"2024 ~ Q1"`).
    pub abs_label: String,
    pub children: Vec<Arc<CategoryNode>>,
}

impl CategoryNode {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            value: value.into(),
            abs_label: label.clone(),
            label,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn leaf(value: impl Into<String>) -> Self {
        let value = value.into();
        Self::new(value.clone(), value)
    }

    /// Appends a child, qualifying its absolute labels with this node's label.
    #[must_use]
    pub fn with_child(mut self, child: CategoryNode) -> Self {
        self.children
            .push(Arc::new(child.qualified_by(&self.abs_label)));
        self
    }

    fn qualified_by(mut self, prefix: &str) -> Self {
        self.abs_label = format!("{prefix}{ABS_LABEL_SEPARATOR}{}", self.label);
        let abs_label = self.abs_label.clone();
        self.children = self
            .children
            .into_iter()
            .map(|child| Arc::new(Arc::unwrap_or_clone(child).qualified_by(&abs_label)))
            .collect();
        self
    }

    /// Number of levels below this node (0 for a leaf).
    #[must_use]
    pub fn tree_height(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.tree_height() + 1)
            .max()
            .unwrap_or(0)
    }

    pub(crate) fn collect_leaves(node: &Arc<Self>, out: &mut Vec<Arc<Self>>) {
        if node.children.is_empty() {
            out.push(Arc::clone(node));
        } else {
            for child in &node.children {
                Self::collect_leaves(child, out);
            }
        }
    }
}

/// Band scale over an ordered list of categories.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteScale {
    categories: Vec<Arc<CategoryNode>>,
    range: ScaleRange,
}

impl DiscreteScale {
    #[must_use]
    pub fn new(categories: Vec<CategoryNode>) -> Self {
        Self {
            categories: categories.into_iter().map(Arc::new).collect(),
            range: ScaleRange::new(0.0, 1.0),
        }
    }

    /// Builds a flat scale where each value is its own label.
    #[must_use]
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(values.into_iter().map(CategoryNode::leaf).collect())
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

    #[must_use]
    pub fn categories(&self) -> &[Arc<CategoryNode>] {
        &self.categories
    }

    /// Leaf categories in order, the innermost level of a composite axis.
    #[must_use]
    pub fn leaves(&self) -> Vec<Arc<CategoryNode>> {
        let mut leaves = Vec::new();
        for category in &self.categories {
            CategoryNode::collect_leaves(category, &mut leaves);
        }
        leaves
    }

    #[must_use]
    pub fn tree_height(&self) -> usize {
        self.categories
            .iter()
            .map(|category| category.tree_height() + 1)
            .max()
            .unwrap_or(0)
    }

    fn step(&self) -> f64 {
        if self.categories.is_empty() {
            return 0.0;
        }
        self.range.span() / self.categories.len() as f64
    }

    fn index_to_pixel(&self, index: f64) -> f64 {
        self.range.min + self.step() * (index + 0.5)
    }
}

impl AxisScale for DiscreteScale {
    fn kind(&self) -> ScaleKind {
        ScaleKind::Discrete
    }

    fn is_null(&self) -> bool {
        self.categories.is_empty()
    }

    fn domain(&self) -> Option<(TickValue, TickValue)> {
        let first = self.categories.first()?;
        let last = self.categories.last()?;
        Some((
            TickValue::Category(Arc::clone(first)),
            TickValue::Category(Arc::clone(last)),
        ))
    }

    fn ticks(&self, _desired_count: Option<usize>, _options: TickOptions) -> AxisResult<TickSet> {
        Ok(TickSet::new(
            self.categories
                .iter()
                .map(|category| TickValue::Category(Arc::clone(category)))
                .collect(),
        ))
    }

    fn tick_format(&self, tick: &TickValue) -> String {
        tick.as_category()
            .map(|category| category.abs_label.clone())
            .unwrap_or_default()
    }

    fn map(&self, tick: &TickValue) -> Option<f64> {
        let category = tick.as_category()?;
        let index = self
            .categories
            .iter()
            .position(|candidate| candidate.value == category.value)?;
        Some(self.index_to_pixel(index as f64))
    }

    fn map_number(&self, value: f64) -> Option<f64> {
        value.is_finite().then(|| self.index_to_pixel(value))
    }

    fn range(&self) -> ScaleRange {
        self.range
    }

    fn band_step(&self) -> Option<f64> {
        Some(self.step())
    }
}
