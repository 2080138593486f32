//! chart-axis: axis layout for Rust charting.
//!
//! Given a scale, a text measurer and the client area, an [`AxisPanel`]
//! chooses how many ticks fit, sizes the label band, trims labels that would
//! not fit and emits a backend-agnostic [`render::RenderFrame`].

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod render;
pub mod telemetry;
pub mod text;

pub use api::{AxisLayout, AxisPanel, AxisPanelConfig, AxisPlacement, LayoutInfo};
pub use error::{AxisError, AxisResult};
