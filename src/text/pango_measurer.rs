use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::error::{AxisError, AxisResult};
use crate::text::{FontSpec, TextMeasurer};

/// Text metrics from Pango, laid out on a scratch 1x1 Cairo surface.
///
/// Use this together with `CairoRenderer` so layout measures text with the
/// same font machinery that draws it.
#[derive(Debug)]
pub struct PangoTextMeasurer {
    context: Context,
}

impl PangoTextMeasurer {
    pub fn new() -> AxisResult<Self> {
        let surface = ImageSurface::create(Format::ARgb32, 1, 1).map_err(|err| {
            AxisError::Backend(format!("failed to create measuring surface: {err}"))
        })?;
        let context = Context::new(&surface).map_err(|err| {
            AxisError::Backend(format!("failed to create measuring context: {err}"))
        })?;
        Ok(Self { context })
    }

    fn layout_size(&self, text: &str, font: &FontSpec) -> (f64, f64) {
        let layout = pangocairo::functions::create_layout(&self.context);
        layout.set_font_description(Some(&font_description(font)));
        layout.set_text(text);
        let (width, height) = layout.size();
        let scale = f64::from(pango::SCALE);
        (f64::from(width) / scale, f64::from(height) / scale)
    }
}

pub(crate) fn font_description(font: &FontSpec) -> FontDescription {
    let mut description = FontDescription::new();
    description.set_family(&font.family);
    description.set_absolute_size(font.size_px * f64::from(pango::SCALE));
    if font.bold {
        description.set_weight(pango::Weight::Bold);
    }
    if font.italic {
        description.set_style(pango::Style::Italic);
    }
    description
}

impl TextMeasurer for PangoTextMeasurer {
    fn measure_width(&self, text: &str, font: &FontSpec) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        self.layout_size(text, font).0
    }

    fn measure_height(&self, sample: &str, font: &FontSpec) -> f64 {
        self.layout_size(sample, font).1
    }
}
