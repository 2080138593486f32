pub mod discrete_scale;
pub mod geometry;
pub mod linear_scale;
pub mod scale;
pub mod time_scale;
pub mod types;

pub use discrete_scale::{CategoryNode, DiscreteScale};
pub use geometry::{Vec2, line_intersect};
pub use linear_scale::LinearScale;
pub use scale::{AxisScale, ScaleKind, ScaleRange, TickOptions, TickSet, TickValue};
pub use time_scale::TimeSeriesScale;
pub use types::{AnchoredSize, Anchor, ClientSize, Dimension};
