use tracing::debug;

use crate::core::{AnchoredSize, Anchor, AxisScale, ClientSize, ScaleKind, TickValue};
use crate::error::AxisResult;
use crate::extensions::ExtensionTable;
use crate::text::{LabelBBox, TextMeasurer};

use super::axis_label_box_sizer::{LabelStyle, axis_size_from_label_bbox, label_bbox};
use super::axis_label_trim_resolver::max_text_width_that_fits;
use super::axis_tick_planner::{TEXT_HEIGHT_SAMPLE, TickPlanner};
use super::AxisPanelConfig;

/// Per-pass layout record shared with the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutInfo {
    /// Band thickness in pixels.
    pub axis_size: f64,
    pub client_size: ClientSize,
    pub ticks: Vec<TickValue>,
    /// One entry per tick.
    pub ticks_text: Vec<String>,
    /// Width labels are trimmed to; `None` renders them at natural width.
    pub max_text_width: Option<f64>,
    pub text_height: f64,
    /// Label box used while sizing; released before layout returns.
    pub label_bbox: Option<LabelBBox>,
    /// Scale tick requests issued by the tick planner.
    pub tick_iterations: usize,
}

impl LayoutInfo {
    fn empty(client_size: ClientSize) -> Self {
        Self {
            axis_size: 0.0,
            client_size,
            ticks: Vec::new(),
            ticks_text: Vec::new(),
            max_text_width: None,
            text_height: 0.0,
            label_bbox: None,
            tick_iterations: 0,
        }
    }
}

/// Completed layout of one axis panel.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLayout {
    pub anchor: Anchor,
    pub label_style: LabelStyle,
    pub info: LayoutInfo,
    /// Panel size requested from the hosting layout.
    pub anchored_size: AnchoredSize,
}

/// Runs the layout phases for one axis: ticks, band size, then trimming.
pub fn resolve_axis_layout(
    scale: &dyn AxisScale,
    measurer: &dyn TextMeasurer,
    config: &AxisPanelConfig,
    extensions: &ExtensionTable,
    client_size: ClientSize,
) -> AxisResult<AxisLayout> {
    config.validate()?;
    let client_size = client_size.validate()?;
    let anchor = config.anchor();
    let label_style = LabelStyle::resolve(anchor, config.panel_name(), extensions);

    let mut info = LayoutInfo::empty(client_size);
    if scale.is_null() {
        debug!(panel = config.panel_name(), "null scale, axis collapsed");
    } else if scale.kind() == ScaleKind::Discrete && config.use_composite_axis {
        composite_phase(&mut info, scale, measurer, config)?;
    } else {
        ticks_phase(&mut info, scale, measurer, config)?;
        sizing_phase(&mut info, measurer, config, anchor, label_style);
        trimming_phase(&mut info, config, anchor);
        info.label_bbox = None;
    }

    if let Some(axis_size_max) = config.axis_size_max {
        info.axis_size = info.axis_size.min(axis_size_max);
    }
    let anchored_size = AnchoredSize::new(anchor, info.axis_size, client_size);

    debug!(
        panel = config.panel_name(),
        anchor = anchor.as_str(),
        axis_size = info.axis_size,
        ticks = info.ticks.len(),
        max_text_width = ?info.max_text_width,
        "axis layout resolved"
    );

    Ok(AxisLayout {
        anchor,
        label_style,
        info,
        anchored_size,
    })
}

/// Orthogonal length the band may occupy, after the configured cap.
#[must_use]
pub fn available_ortho_length(config: &AxisPanelConfig, client_size: ClientSize) -> f64 {
    let across = client_size.length_across(config.anchor());
    match config.axis_size_max {
        Some(max) => across.min(max),
        None => across,
    }
}

fn composite_phase(
    info: &mut LayoutInfo,
    scale: &dyn AxisScale,
    measurer: &dyn TextMeasurer,
    config: &AxisPanelConfig,
) -> AxisResult<()> {
    info.axis_size = config.axis_size.unwrap_or(config.composite_axis_size);
    info.text_height = measurer.measure_height(TEXT_HEIGHT_SAMPLE, &config.font);
    info.ticks = scale.ticks(None, config.tick_options())?.values;
    info.ticks_text = info
        .ticks
        .iter()
        .map(|tick| scale.tick_format(tick))
        .collect();
    Ok(())
}

fn ticks_phase(
    info: &mut LayoutInfo,
    scale: &dyn AxisScale,
    measurer: &dyn TextMeasurer,
    config: &AxisPanelConfig,
) -> AxisResult<()> {
    let client_length = info.client_size.length_along(config.anchor());
    let plan = TickPlanner::new(scale, measurer, config, client_length).plan()?;
    info.ticks = plan.ticks;
    info.ticks_text = plan.ticks_text;
    info.max_text_width = Some(plan.max_text_width);
    info.text_height = plan.text_height;
    info.tick_iterations = plan.iterations;
    Ok(())
}

fn sizing_phase(
    info: &mut LayoutInfo,
    measurer: &dyn TextMeasurer,
    config: &AxisPanelConfig,
    anchor: Anchor,
    style: LabelStyle,
) {
    let bbox = label_bbox(
        measurer,
        info.max_text_width.unwrap_or(0.0),
        info.text_height,
        style,
    );
    info.axis_size = match config.axis_size {
        Some(fixed) => fixed,
        None => axis_size_from_label_bbox(anchor, &bbox, config.tick_length),
    };
    info.label_bbox = Some(bbox);
}

fn trimming_phase(info: &mut LayoutInfo, config: &AxisPanelConfig, anchor: Anchor) {
    let available = available_ortho_length(config, info.client_size);
    info.max_text_width = info.label_bbox.as_ref().and_then(|bbox| {
        max_text_width_that_fits(anchor, bbox, info.axis_size, available, config.tick_length)
    });
    info.max_text_width = normalize_max_text_width(info.max_text_width);
}

/// Non-finite widths mean "do not trim".
#[must_use]
pub fn normalize_max_text_width(width: Option<f64>) -> Option<f64> {
    width.filter(|width| width.is_finite())
}
