use crate::api::{AxisLabelSpec, PlotHost};
use crate::core::{AxisPosition, BlockSize, BoundingBox};
use crate::error::{AxisLabelError, AxisLabelResult};

use super::{AxisLabelRenderer, DomContainer, ElementHandle, LabelElement, RendererKind};

/// Class carried by every DOM label element.
pub const LABEL_CLASS: &str = "axisLabels";

pub(super) fn px(value: f64) -> String {
    format!("{value}px")
}

/// Absolutely positioned element carrying the label text and font styling.
pub(super) fn label_element(spec: &AxisLabelSpec) -> LabelElement {
    let style = &spec.style;
    LabelElement::new(spec.text.clone())
        .with_class(LABEL_CLASS)
        .with_style("position", "absolute")
        .with_style("font-size", px(style.font.size_px))
        .with_style("font-family", style.font.family.clone())
        .with_style("color", style.colour.clone())
}

/// Measures the label's natural outer box with a throwaway element.
///
/// The probe is appended, measured and removed again before returning.
pub fn measure_natural_label_box(
    container: &mut dyn DomContainer,
    spec: &AxisLabelSpec,
) -> AxisLabelResult<(f64, f64)> {
    let probe = container.append(label_element(spec));
    let size = container.outer_size(probe);
    container.remove(probe);
    size.ok_or_else(|| {
        AxisLabelError::Backend(format!(
            "container dropped the measurement element for axis `{}`",
            spec.axis_name
        ))
    })
}

/// Label rendered as an unrotated, absolutely positioned DOM element.
#[derive(Debug, Clone)]
pub struct HtmlAxisLabel {
    spec: AxisLabelSpec,
    label_box: Option<(f64, f64)>,
    element: Option<ElementHandle>,
}

impl HtmlAxisLabel {
    #[must_use]
    pub fn new(spec: AxisLabelSpec) -> Self {
        Self {
            spec,
            label_box: None,
            element: None,
        }
    }

    /// Top-left corner of the element inside `bbox`.
    #[must_use]
    pub fn element_origin(&self, bbox: BoundingBox, label_box: (f64, f64)) -> (f64, f64) {
        let (label_width, label_height) = label_box;
        match self.spec.position {
            AxisPosition::Top => (bbox.center_x() - label_width / 2.0, bbox.top),
            AxisPosition::Bottom => (
                bbox.center_x() - label_width / 2.0,
                bbox.bottom() - label_height,
            ),
            AxisPosition::Left => (bbox.left, bbox.center_y() - label_height / 2.0),
            AxisPosition::Right => (
                bbox.right() - label_width,
                bbox.center_y() - label_height / 2.0,
            ),
        }
    }
}

impl AxisLabelRenderer for HtmlAxisLabel {
    fn kind(&self) -> RendererKind {
        RendererKind::Html
    }

    fn spec(&self) -> &AxisLabelSpec {
        &self.spec
    }

    fn calculate_size(&mut self, plot: &mut dyn PlotHost) -> AxisLabelResult<BlockSize> {
        let (label_width, label_height) = measure_natural_label_box(plot.placeholder(), &self.spec)?;
        self.label_box = Some((label_width, label_height));
        let extent = if self.spec.position.is_vertical() {
            label_width
        } else {
            label_height
        };
        Ok(BlockSize::across(self.spec.position, extent + self.spec.padding()))
    }

    fn draw(&mut self, plot: &mut dyn PlotHost, bbox: BoundingBox) -> AxisLabelResult<()> {
        bbox.validate()?;
        let container = plot.placeholder();
        let label_box = match self.label_box {
            Some(label_box) => label_box,
            None => measure_natural_label_box(container, &self.spec)?,
        };
        self.label_box = Some(label_box);

        let element_id = self.spec.element_id();
        container.remove_by_id(&element_id);
        if let Some(stale) = self.element.take() {
            container.remove(stale);
        }

        let (left, top) = self.element_origin(bbox, label_box);
        let element = label_element(&self.spec)
            .with_id(element_id)
            .with_style("left", px(left))
            .with_style("top", px(top));
        self.element = Some(container.append(element));
        Ok(())
    }

    fn cleanup(&mut self, plot: &mut dyn PlotHost) {
        if let Some(element) = self.element.take() {
            plot.placeholder().remove(element);
        }
    }

    fn label_box(&self) -> Option<(f64, f64)> {
        self.label_box
    }
}
