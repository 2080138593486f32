use crate::core::ClientSize;
use crate::error::{AxisError, AxisResult};
use crate::render::{AxisLayer, LinePrimitive, TextPrimitive};

/// Backend-agnostic scene for one axis draw pass.
///
/// Coordinates are in root-surface pixels; `surface` is the root size used
/// to keep edge labels on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub surface: ClientSize,
    pub lines: Vec<LinePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(surface: ClientSize) -> Self {
        Self {
            surface,
            lines: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    pub fn validate(&self) -> AxisResult<()> {
        if !self.surface.is_valid() {
            return Err(AxisError::InvalidClientSize {
                width: self.surface.width,
                height: self.surface.height,
            });
        }

        for line in &self.lines {
            line.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.texts.is_empty()
    }

    pub fn lines_in(&self, layer: AxisLayer) -> impl Iterator<Item = &LinePrimitive> {
        self.lines.iter().filter(move |line| line.layer == layer)
    }

    /// Lines sorted back to front; ties keep insertion order.
    #[must_use]
    pub fn lines_in_paint_order(&self) -> Vec<&LinePrimitive> {
        let mut lines: Vec<&LinePrimitive> = self.lines.iter().collect();
        lines.sort_by_key(|line| line.layer.z_order());
        lines
    }
}
