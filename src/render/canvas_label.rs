use tracing::trace;

use crate::api::{AxisLabelSpec, PlotHost};
use crate::core::{
    AxisPosition, BlockSize, BoundingBox, LINE_HEIGHT_RATIO, LabelAlignment, LineBreakResult,
    estimate_block_size, measure, wrap_to_fit,
};
use crate::error::AxisLabelResult;

use super::{AxisLabelRenderer, CanvasSurface, RendererKind};

/// Vertical metrics shared by every line of one canvas label block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLineLayout {
    pub font_size_px: f64,
    pub line_padding: f64,
    pub line_count: usize,
    /// Width of the widest line; multi-line alignment is relative to it.
    pub widest_width: f64,
}

impl CanvasLineLayout {
    /// Offset of line `index` from the box edge it is stacked against.
    fn stack_offset(self, index: usize) -> f64 {
        let index = index as f64;
        self.font_size_px * (index + 1.0) * LINE_HEIGHT_RATIO + self.line_padding * index
    }

    /// Surface-space origin of line `index` before rotation.
    #[must_use]
    pub fn origin(
        self,
        position: AxisPosition,
        alignment: LabelAlignment,
        bbox: BoundingBox,
        index: usize,
        line_width: f64,
    ) -> (f64, f64) {
        let half_widest = self.widest_width / 2.0;
        match position {
            AxisPosition::Top | AxisPosition::Bottom => {
                let x = match alignment {
                    LabelAlignment::Left => bbox.center_x() - half_widest,
                    LabelAlignment::Right => bbox.center_x() + half_widest - line_width,
                    LabelAlignment::Center => bbox.center_x() - line_width / 2.0,
                };
                let y = if position == AxisPosition::Top {
                    bbox.top + self.stack_offset(index)
                } else {
                    let from_bottom = self.line_count.saturating_sub(index) as f64;
                    bbox.bottom()
                        - self.font_size_px * from_bottom * LINE_HEIGHT_RATIO
                        - self.line_padding * (from_bottom - 1.0)
                };
                (x, y)
            }
            // Rotated -90°: text runs bottom to top, so "left" is the bottom end.
            AxisPosition::Left => {
                let x = bbox.left + self.stack_offset(index);
                let y = match alignment {
                    LabelAlignment::Left => bbox.center_y() + half_widest,
                    LabelAlignment::Right => bbox.center_y() - half_widest + line_width,
                    LabelAlignment::Center => bbox.center_y() + line_width / 2.0,
                };
                (x, y)
            }
            AxisPosition::Right => {
                let x = bbox.right() - self.stack_offset(index);
                let y = match alignment {
                    LabelAlignment::Left => bbox.center_y() - half_widest,
                    LabelAlignment::Right => bbox.center_y() + half_widest - line_width,
                    LabelAlignment::Center => bbox.center_y() - line_width / 2.0,
                };
                (x, y)
            }
        }
    }
}

/// Label drawn as rotated text on the shared drawing surface.
#[derive(Debug, Clone)]
pub struct CanvasAxisLabel {
    spec: AxisLabelSpec,
    text: String,
}

impl CanvasAxisLabel {
    #[must_use]
    pub fn new(spec: AxisLabelSpec) -> Self {
        let text = spec.text.clone();
        Self { spec, text }
    }

    fn draw_lines(
        &self,
        canvas: &mut dyn CanvasSurface,
        bbox: BoundingBox,
        measured: &LineBreakResult,
    ) -> AxisLabelResult<()> {
        let style = &self.spec.style;
        let layout = CanvasLineLayout {
            font_size_px: style.font.size_px,
            line_padding: style.line_padding,
            line_count: measured.line_count(),
            widest_width: measured.widest_width,
        };
        let angle = self.spec.position.rotation_radians();

        for (index, line) in measured.lines.iter().enumerate() {
            canvas.save();
            canvas.set_font(&style.font);
            canvas.set_fill_color(&style.colour);
            let width = canvas.measure_text(line);
            let (x, y) = layout.origin(self.spec.position, style.alignment, bbox, index, width);
            trace!(axis = %self.spec.axis_name, index, x, y, width, "draw canvas label line");
            canvas.translate(x, y);
            canvas.rotate(angle);
            let filled = canvas.fill_text(line, 0.0, 0.0);
            canvas.restore();
            filled?;
        }
        Ok(())
    }
}

impl AxisLabelRenderer for CanvasAxisLabel {
    fn kind(&self) -> RendererKind {
        RendererKind::Canvas
    }

    fn spec(&self) -> &AxisLabelSpec {
        &self.spec
    }

    fn label_text(&self) -> &str {
        &self.text
    }

    fn adjust_label(&mut self, plot: &mut dyn PlotHost, bbox: BoundingBox) -> AxisLabelResult<bool> {
        bbox.validate()?;
        let max_extent = bbox.extent_along(self.spec.position);
        let canvas = plot.canvas();
        canvas.save();
        let wrapped = wrap_to_fit(&self.text, max_extent, &self.spec.style.font, &mut *canvas);
        canvas.restore();
        let changed = wrapped != self.text;
        self.text = wrapped;
        Ok(changed)
    }

    fn calculate_size(&mut self, _plot: &mut dyn PlotHost) -> AxisLabelResult<BlockSize> {
        let style = &self.spec.style;
        Ok(estimate_block_size(
            self.text.split('\n').count(),
            style.font.size_px,
            style.line_padding,
            style.padding,
            self.spec.position.is_vertical(),
        ))
    }

    fn draw(&mut self, plot: &mut dyn PlotHost, bbox: BoundingBox) -> AxisLabelResult<()> {
        bbox.validate()?;
        let canvas = plot.canvas();
        canvas.save();
        let measured = measure(&self.text, &self.spec.style.font, &mut *canvas);
        let drawn = self.draw_lines(canvas, bbox, &measured);
        canvas.restore();
        drawn
    }
}
