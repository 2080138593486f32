use serde::{Deserialize, Serialize};

/// Drawing layer of an axis primitive, painted from back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AxisLayer {
    /// Full grid lines behind the plot content.
    GridLines,
    /// Major and minor tick marks.
    Ticks,
    /// The axis rule.
    Rule,
    Labels,
}

impl AxisLayer {
    /// Stacking order relative to plot content at zero.
    #[must_use]
    pub fn z_order(self) -> i32 {
        match self {
            Self::GridLines => -12,
            Self::Ticks => 20,
            Self::Rule => 30,
            Self::Labels => 40,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AxisLayer;

    #[test]
    fn layers_paint_grid_first_and_labels_last() {
        let mut layers = vec![
            AxisLayer::Labels,
            AxisLayer::Rule,
            AxisLayer::GridLines,
            AxisLayer::Ticks,
        ];
        layers.sort_by_key(|layer| layer.z_order());
        assert_eq!(
            layers,
            vec![
                AxisLayer::GridLines,
                AxisLayer::Ticks,
                AxisLayer::Rule,
                AxisLayer::Labels,
            ]
        );
    }
}
