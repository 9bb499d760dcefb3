mod canvas_label;
mod container;
mod css_transform_label;
mod html_label;
mod legacy_transform_label;
mod selection;
mod surface;

pub use canvas_label::{CanvasAxisLabel, CanvasLineLayout};
pub use container::{DomContainer, ElementHandle, LabelElement, MemoryContainer};
pub use css_transform_label::{CssTransformAxisLabel, TransformOffsets, transform_style};
pub use html_label::{HtmlAxisLabel, LABEL_CLASS, measure_natural_label_box};
pub use legacy_transform_label::{LegacyTransformAxisLabel, legacy_rotation_index};
pub use selection::{RendererKind, RendererOverrides, select_renderer};
pub use surface::{CanvasOp, CanvasSurface, DrawnText, RecordingCanvas};

use crate::api::{AxisLabelSpec, PlotHost};
use crate::core::{BlockSize, BoundingBox};
use crate::error::AxisLabelResult;

/// Contract shared by every axis-label backend.
///
/// A renderer is built for one axis per measure pass. It sizes the label
/// before the host lays out its grid and draws it once the final axis box is
/// known. The host is handed in on every call; renderers never keep it.
pub trait AxisLabelRenderer: std::fmt::Debug {
    fn kind(&self) -> RendererKind;

    fn spec(&self) -> &AxisLabelSpec;

    /// Text as it will be drawn, including inserted line breaks.
    fn label_text(&self) -> &str {
        &self.spec().text
    }

    /// Wraps the label to fit along `bbox`. Returns `true` when the text
    /// changed; backends that cannot wrap leave it untouched.
    fn adjust_label(&mut self, _plot: &mut dyn PlotHost, _bbox: BoundingBox) -> AxisLabelResult<bool> {
        Ok(false)
    }

    /// Space the label needs next to the axis' tick labels.
    fn calculate_size(&mut self, plot: &mut dyn PlotHost) -> AxisLabelResult<BlockSize>;

    fn draw(&mut self, plot: &mut dyn PlotHost, bbox: BoundingBox) -> AxisLabelResult<()>;

    /// Releases resources owned by the renderer.
    fn cleanup(&mut self, _plot: &mut dyn PlotHost) {}

    /// Native size of the rendered label box, once measured.
    fn label_box(&self) -> Option<(f64, f64)> {
        None
    }
}

#[must_use]
pub fn create_renderer(kind: RendererKind, spec: AxisLabelSpec) -> Box<dyn AxisLabelRenderer> {
    match kind {
        RendererKind::Canvas => Box::new(CanvasAxisLabel::new(spec)),
        RendererKind::Html => Box::new(HtmlAxisLabel::new(spec)),
        RendererKind::CssTransform => Box::new(CssTransformAxisLabel::new(spec)),
        RendererKind::LegacyTransform => Box::new(LegacyTransformAxisLabel::new(spec)),
    }
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::CairoCanvas;
