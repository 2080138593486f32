//! Axis panel layout and the scene it hands to renderers.
//!
//! A layout pass runs in three phases: the tick planner picks ticks and their
//! labels, the label box sizer derives the band thickness, and the trim
//! resolver decides how wide labels may be. Discrete axes additionally hide
//! labels that would overlap when the scene is built.

mod axis_config;
mod axis_label_box_sizer;
mod axis_label_overlap_resolver;
mod axis_label_trim_resolver;
mod axis_layout_pass_resolver;
mod axis_panel;
mod axis_scene_builder;
mod axis_tick_planner;

pub use axis_config::{AxisKind, AxisPanelConfig, AxisSlot, DomainRoundMode, panel_name};
pub use axis_label_box_sizer::{
    DEFAULT_TEXT_MARGIN, LabelStyle, axis_size_from_label_bbox, label_bbox,
};
pub use axis_label_overlap_resolver::{
    MAX_OVERLAP_FACTOR, OverlapInput, is_label_in_stride, overlap_label_stride,
};
pub use axis_label_trim_resolver::max_text_width_that_fits;
pub use axis_layout_pass_resolver::{
    AxisLayout, LayoutInfo, available_ortho_length, normalize_max_text_width, resolve_axis_layout,
};
pub use axis_panel::AxisPanel;
pub use axis_scene_builder::{AxisPlacement, AxisSceneBuilder};
pub use axis_tick_planner::{TickPlan, TickPlanner, TicksInfo};
