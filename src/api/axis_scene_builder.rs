use tracing::{debug, warn};

use crate::core::{Anchor, AxisScale, ClientSize, ScaleKind, ScaleRange, TickValue, Vec2};
use crate::error::AxisResult;
use crate::extensions::{AxisPart, ExtensionContext, ExtensionTable, property};
use crate::render::{AxisLayer, Color, LinePrimitive, RenderFrame, TextPrimitive};
use crate::text::{DEFAULT_ELLIPSIS, TextAlign, TextBaseline, TextMeasurer};

use super::axis_label_overlap_resolver::{OverlapInput, is_label_in_stride, overlap_label_stride};
use super::{AxisLayout, AxisPanelConfig};

const STROKE_WIDTH: f64 = 1.0;
const GRID_COLOR: Color = Color::rgba(240.0 / 255.0, 240.0 / 255.0, 240.0 / 255.0, 1.0);
/// Extra gap between continuous tick ends and their labels.
const CONTINUOUS_LABEL_OFFSET: f64 = 2.0;
const CONTINUOUS_LABEL_MARGIN: f64 = 0.5;

/// Where the axis panel sits on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisPlacement {
    /// Top-left corner of the axis panel.
    pub origin: Vec2,
    /// Root surface size; edge labels are kept inside it.
    pub surface: ClientSize,
    /// Pixel range of the orthogonal scale, used to size full grid lines.
    pub ortho_range: Option<ScaleRange>,
    pub ortho_full_grid_crosses_margin: bool,
}

impl AxisPlacement {
    #[must_use]
    pub fn new(origin: Vec2, surface: ClientSize) -> Self {
        Self {
            origin,
            surface,
            ortho_range: None,
            ortho_full_grid_crosses_margin: true,
        }
    }

    #[must_use]
    pub fn with_ortho_range(mut self, range: ScaleRange, crosses_margin: bool) -> Self {
        self.ortho_range = Some(range);
        self.ortho_full_grid_crosses_margin = crosses_margin;
        self
    }
}

/// Maps (position along the axis, depth away from the rule) to surface pixels.
///
/// Positive depth points away from the plot; vertical positions grow upwards.
#[derive(Debug, Clone, Copy)]
struct PanelFrame {
    anchor: Anchor,
    origin: Vec2,
    length: f64,
    thickness: f64,
}

impl PanelFrame {
    fn point(self, along: f64, depth: f64) -> Vec2 {
        let Vec2 { x, y } = self.origin;
        match self.anchor {
            Anchor::Bottom => Vec2::new(x + along, y + depth),
            Anchor::Top => Vec2::new(x + along, y + self.thickness - depth),
            Anchor::Left => Vec2::new(x + self.thickness - depth, y + self.length - along),
            Anchor::Right => Vec2::new(x + depth, y + self.length - along),
        }
    }

    fn segment(
        self,
        along: (f64, f64),
        depth: (f64, f64),
        color: Color,
        layer: AxisLayer,
    ) -> LinePrimitive {
        let start = self.point(along.0, depth.0);
        let end = self.point(along.1, depth.1);
        LinePrimitive::new(start.x, start.y, end.x, end.y, STROKE_WIDTH, color, layer)
    }
}

/// Turns a completed axis layout into draw commands.
pub struct AxisSceneBuilder<'a> {
    layout: &'a AxisLayout,
    scale: &'a dyn AxisScale,
    measurer: &'a dyn TextMeasurer,
    config: &'a AxisPanelConfig,
    extensions: &'a ExtensionTable,
}

impl<'a> AxisSceneBuilder<'a> {
    #[must_use]
    pub fn new(
        layout: &'a AxisLayout,
        scale: &'a dyn AxisScale,
        measurer: &'a dyn TextMeasurer,
        config: &'a AxisPanelConfig,
        extensions: &'a ExtensionTable,
    ) -> Self {
        Self {
            layout,
            scale,
            measurer,
            config,
            extensions,
        }
    }

    pub fn build(&self, placement: AxisPlacement) -> AxisResult<RenderFrame> {
        let mut frame = RenderFrame::new(placement.surface);
        if self.scale.is_null() {
            return Ok(frame);
        }

        let anchor = self.layout.anchor;
        let panel = PanelFrame {
            anchor,
            origin: placement.origin,
            length: self.layout.info.client_size.length_along(anchor),
            thickness: self.layout.info.axis_size,
        };

        let range = self.scale.range();
        let (rule_min, rule_size) = if self.config.rule_crosses_margin {
            (0.0, range.size)
        } else {
            (range.min, range.span())
        };

        if self.part_visible(AxisPart::Rule, 0, 1, "") {
            let color = self.part_color(AxisPart::Rule, Color::BLACK);
            frame.lines.push(panel.segment(
                (rule_min, rule_min + rule_size),
                (0.0, 0.0),
                color,
                AxisLayer::Rule,
            ));
        }

        if self.scale.kind() == ScaleKind::Discrete {
            self.push_discrete(&mut frame, panel, rule_size)?;
        } else {
            self.push_continuous(&mut frame, panel, placement)?;
        }
        if self.config.full_grid {
            self.push_grid(&mut frame, panel, placement);
        }

        debug!(
            panel = self.config.panel_name(),
            lines = frame.lines.len(),
            texts = frame.texts.len(),
            "axis scene built"
        );
        frame.validate()?;
        Ok(frame)
    }

    fn push_discrete(
        &self,
        frame: &mut RenderFrame,
        panel: PanelFrame,
        rule_size: f64,
    ) -> AxisResult<()> {
        let info = &self.layout.info;
        let count = info.ticks.len();
        let stride = overlap_label_stride(OverlapInput {
            enabled: self.config.overlapped_labels_hide,
            item_count: count,
            axis_length: rule_size,
            text_height: info.text_height,
            max_overlap_pct: self.config.overlapped_labels_max_pct,
        });

        // Band ticks exist for styling but stay invisible unless overridden.
        let tick_color = self.part_color(AxisPart::Ticks, Color::TRANSPARENT);
        let style = self.layout.label_style;

        for (index, (tick, text)) in info.ticks.iter().zip(&info.ticks_text).enumerate() {
            let Some(position) = self.scale.map(tick) else {
                continue;
            };
            if self.part_visible(AxisPart::Ticks, index, count, text) {
                frame.lines.push(panel.segment(
                    (position, position),
                    (0.0, self.config.tick_length),
                    tick_color,
                    AxisLayer::Ticks,
                ));
            }

            if !is_label_in_stride(index, stride)
                || !self.part_visible(AxisPart::Label, index, count, text)
            {
                continue;
            }
            let label = self.fit_text(text);
            if label.is_empty() {
                continue;
            }
            let anchor_point = panel.point(position, self.config.tick_length);
            frame.texts.push(
                TextPrimitive::new(
                    label,
                    anchor_point.x,
                    anchor_point.y,
                    self.config.font.clone(),
                    Color::BLACK,
                )
                .with_alignment(style.align, style.baseline)
                .with_angle(style.angle)
                .with_margin(style.margin),
            );
        }
        Ok(())
    }

    fn push_continuous(
        &self,
        frame: &mut RenderFrame,
        panel: PanelFrame,
        placement: AxisPlacement,
    ) -> AxisResult<()> {
        let info = &self.layout.info;
        let ticks = &info.ticks;
        let count = ticks.len();
        let tick_color = self.part_color(AxisPart::Ticks, Color::BLACK);
        let minor_color = self.part_color(AxisPart::MinorTicks, tick_color);
        let tick_step = match (ticks.first(), ticks.get(1)) {
            (Some(first), Some(second)) => first
                .as_number()
                .zip(second.as_number())
                .map(|(first, second)| (second - first).abs()),
            _ => None,
        };

        for (index, (tick, text)) in ticks.iter().zip(&info.ticks_text).enumerate() {
            let Some(position) = self.scale.map(tick) else {
                continue;
            };
            let major_visible = self.part_visible(AxisPart::Ticks, index, count, text);
            if major_visible {
                frame.lines.push(panel.segment(
                    (position, position),
                    (0.0, self.config.tick_length),
                    tick_color,
                    AxisLayer::Ticks,
                ));
            }

            if self.config.minor_ticks
                && major_visible
                && index + 1 < count
                && let Some(minor) = minor_position(self.scale, tick, tick_step)
                && self.part_visible(AxisPart::MinorTicks, index, count, text)
            {
                frame.lines.push(panel.segment(
                    (minor, minor),
                    (0.0, self.config.tick_length / 2.0),
                    minor_color,
                    AxisLayer::Ticks,
                ));
            }

            if !self.part_visible(AxisPart::Label, index, count, text) {
                continue;
            }
            let label = self.fit_text(text);
            if label.is_empty() {
                continue;
            }
            let anchor_point = panel.point(
                position,
                self.config.tick_length + CONTINUOUS_LABEL_OFFSET,
            );
            let (align, baseline) =
                self.edge_alignment(index, count, &label, anchor_point, placement.surface);
            frame.texts.push(
                TextPrimitive::new(
                    label,
                    anchor_point.x,
                    anchor_point.y,
                    self.config.font.clone(),
                    Color::BLACK,
                )
                .with_alignment(align, baseline)
                .with_angle(self.layout.label_style.angle)
                .with_margin(CONTINUOUS_LABEL_MARGIN),
            );
        }
        Ok(())
    }

    /// Keeps the first and last continuous labels from running off the surface.
    fn edge_alignment(
        &self,
        index: usize,
        count: usize,
        label: &str,
        anchor_point: Vec2,
        surface: ClientSize,
    ) -> (TextAlign, TextBaseline) {
        let style = self.layout.label_style;
        let is_first = index == 0;
        let is_last = index + 1 == count;

        if self.layout.anchor.is_top_or_bottom() {
            let half_width = self.measurer.measure_width(label, &self.config.font) / 2.0;
            let align = if is_first && anchor_point.x - half_width < 0.0 {
                TextAlign::Left
            } else if is_last && anchor_point.x + half_width > surface.width {
                TextAlign::Right
            } else {
                TextAlign::Center
            };
            (align, style.baseline)
        } else {
            let half_height = self.layout.info.text_height / 2.0;
            let baseline = if is_first && anchor_point.y + half_height > surface.height {
                TextBaseline::Bottom
            } else if is_last && anchor_point.y - half_height < 0.0 {
                TextBaseline::Top
            } else {
                TextBaseline::Middle
            };
            (style.align, baseline)
        }
    }

    fn push_grid(&self, frame: &mut RenderFrame, panel: PanelFrame, placement: AxisPlacement) {
        let ortho = placement.ortho_range.unwrap_or_else(|| {
            let across = self.layout.info.client_size.length_across(self.layout.anchor);
            ScaleRange::new(0.0, across)
        });
        let depth = if placement.ortho_full_grid_crosses_margin {
            (-ortho.size, 0.0)
        } else {
            (-ortho.max, -ortho.min)
        };
        let color = self.part_color(AxisPart::Grid, GRID_COLOR);
        let ticks = &self.layout.info.ticks;

        let positions: Vec<f64> = if self.scale.kind() == ScaleKind::Discrete {
            let half_step = self.scale.band_step().unwrap_or(0.0) / 2.0;
            let mut positions: Vec<f64> = ticks
                .iter()
                .filter_map(|tick| self.scale.map(tick))
                .map(|position| position - half_step)
                .collect();
            // Closing line after the last band.
            if let Some(last) = ticks.last().and_then(|tick| self.scale.map(tick)) {
                positions.push(last + half_step);
            }
            positions
        } else {
            ticks
                .iter()
                .filter_map(|tick| self.scale.map(tick))
                .collect()
        };

        let count = positions.len();
        for (index, position) in positions.into_iter().enumerate() {
            if self.part_visible(AxisPart::Grid, index, count, "") {
                frame.lines.push(panel.segment(
                    (position, position),
                    depth,
                    color,
                    AxisLayer::GridLines,
                ));
            }
        }
    }

    fn fit_text(&self, text: &str) -> String {
        match self.layout.info.max_text_width {
            Some(max_width) => {
                self.measurer
                    .trim_to_width(max_width, text, &self.config.font, DEFAULT_ELLIPSIS, true)
            }
            None => text.to_owned(),
        }
    }

    fn part_visible(&self, part: AxisPart, index: usize, count: usize, text: &str) -> bool {
        let component = part.component(self.config.panel_name());
        let context = ExtensionContext { index, count, text };
        self.extensions
            .resolve(&component, property::VISIBLE, &context)
            .and_then(|value| value.as_flag())
            .unwrap_or(true)
    }

    fn part_color(&self, part: AxisPart, default: Color) -> Color {
        let component = part.component(self.config.panel_name());
        match self.extensions.text(&component, property::STROKE_STYLE) {
            Some(css) => Color::parse_css(css).unwrap_or_else(|err| {
                warn!(%component, %err, "ignoring stroke style override");
                default
            }),
            None => default,
        }
    }
}

fn minor_position(scale: &dyn AxisScale, tick: &TickValue, step: Option<f64>) -> Option<f64> {
    let value = tick.as_number()? + step? / 2.0;
    scale.map_number(value)
}
