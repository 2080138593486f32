use tracing::trace;

use crate::core::{AnchoredSize, AxisScale, ClientSize, TickValue};
use crate::error::{AxisError, AxisResult};
use crate::extensions::ExtensionTable;
use crate::render::{RenderFrame, Renderer};
use crate::text::TextMeasurer;

use super::axis_scene_builder::{AxisPlacement, AxisSceneBuilder};
use super::{AxisLayout, AxisPanelConfig, LayoutInfo, resolve_axis_layout};

/// One axis band: its options, overrides and the result of the last layout.
#[derive(Debug, Clone)]
pub struct AxisPanel {
    config: AxisPanelConfig,
    extensions: ExtensionTable,
    layout: Option<AxisLayout>,
}

impl AxisPanel {
    pub fn new(config: AxisPanelConfig) -> AxisResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            extensions: ExtensionTable::new(),
            layout: None,
        })
    }

    #[must_use]
    pub fn with_extensions(mut self, extensions: ExtensionTable) -> Self {
        self.extensions = extensions;
        self.layout = None;
        self
    }

    #[must_use]
    pub fn config(&self) -> &AxisPanelConfig {
        &self.config
    }

    #[must_use]
    pub fn extensions(&self) -> &ExtensionTable {
        &self.extensions
    }

    /// Replaces the options; the previous layout no longer applies.
    pub fn set_config(&mut self, config: AxisPanelConfig) -> AxisResult<()> {
        config.validate()?;
        self.config = config;
        self.layout = None;
        Ok(())
    }

    /// Computes ticks, band size and label trimming for the given client area.
    ///
    /// Returns the size the panel asks its host for.
    pub fn layout(
        &mut self,
        scale: &dyn AxisScale,
        measurer: &dyn TextMeasurer,
        client_size: ClientSize,
    ) -> AxisResult<AnchoredSize> {
        let layout = resolve_axis_layout(
            scale,
            measurer,
            &self.config,
            &self.extensions,
            client_size,
        )?;
        let anchored_size = layout.anchored_size;
        self.layout = Some(layout);
        Ok(anchored_size)
    }

    #[must_use]
    pub fn axis_layout(&self) -> Option<&AxisLayout> {
        self.layout.as_ref()
    }

    #[must_use]
    pub fn layout_info(&self) -> Option<&LayoutInfo> {
        self.layout.as_ref().map(|layout| &layout.info)
    }

    /// Ticks chosen by the last layout, empty before the first one.
    #[must_use]
    pub fn ticks(&self) -> &[TickValue] {
        self.layout_info()
            .map(|info| info.ticks.as_slice())
            .unwrap_or_default()
    }

    pub fn build_scene(
        &self,
        scale: &dyn AxisScale,
        measurer: &dyn TextMeasurer,
        placement: AxisPlacement,
    ) -> AxisResult<RenderFrame> {
        let layout = self.layout.as_ref().ok_or_else(|| {
            AxisError::InvalidData(format!(
                "axis panel `{}` must be laid out before rendering",
                self.config.panel_name()
            ))
        })?;
        AxisSceneBuilder::new(layout, scale, measurer, &self.config, &self.extensions)
            .build(placement)
    }

    pub fn render<R: Renderer>(
        &self,
        renderer: &mut R,
        scale: &dyn AxisScale,
        measurer: &dyn TextMeasurer,
        placement: AxisPlacement,
    ) -> AxisResult<()> {
        let frame = self.build_scene(scale, measurer, placement)?;
        trace!(
            panel = self.config.panel_name(),
            lines = frame.lines.len(),
            texts = frame.texts.len(),
            "rendering axis panel"
        );
        renderer.render(&frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LinearScale, Vec2};
    use crate::render::NullRenderer;
    use crate::text::HeuristicTextMeasurer;

    #[test]
    fn rendering_before_layout_is_rejected() {
        let panel = AxisPanel::new(AxisPanelConfig::x_axis()).expect("panel");
        let scale = LinearScale::new(0.0, 1.0).expect("scale");
        let placement = AxisPlacement::new(Vec2::default(), ClientSize::new(100.0, 100.0));
        let err = panel
            .build_scene(&scale, &HeuristicTextMeasurer::new(), placement)
            .expect_err("not laid out");
        assert!(matches!(err, AxisError::InvalidData(_)));
        assert!(panel.ticks().is_empty());
    }

    #[test]
    fn layout_then_render_reaches_the_backend() {
        let mut panel = AxisPanel::new(AxisPanelConfig::y_axis()).expect("panel");
        let scale = LinearScale::new(0.0, 50.0)
            .and_then(|scale| scale.with_range(0.0, 200.0))
            .expect("scale");
        let measurer = HeuristicTextMeasurer::new();
        let size = panel
            .layout(&scale, &measurer, ClientSize::new(300.0, 200.0))
            .expect("layout");
        assert_eq!(size.height, 200.0);
        assert!(size.width > 0.0);
        assert!(!panel.ticks().is_empty());

        let mut renderer = NullRenderer::default();
        let placement = AxisPlacement::new(Vec2::default(), ClientSize::new(300.0, 200.0));
        panel
            .render(&mut renderer, &scale, &measurer, placement)
            .expect("render");
        assert_eq!(renderer.frames_rendered, 1);
        assert_eq!(renderer.last_text_count, panel.ticks().len());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = AxisPanelConfig::x_axis().with_tick_length(f64::NAN);
        assert!(AxisPanel::new(config).is_err());
    }
}
