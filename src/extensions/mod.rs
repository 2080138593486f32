//! Render-time overrides for axis parts.
//!
//! Hosts register constants or per-item closures under a component id
//! (`xAxisLabel`, `yAxisRule`, ...) instead of patching rendering code.

pub mod overrides;

pub use overrides::{
    AxisPart, ComputedExtension, ExtensionContext, ExtensionOverride, ExtensionTable,
    ExtensionValue, property,
};
