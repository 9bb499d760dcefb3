use crate::api::{AxisLabelSpec, PlotHost};
use crate::core::{AxisPosition, BlockSize, BoundingBox};
use crate::error::AxisLabelResult;

use super::html_label::label_element;
use super::{
    AxisLabelRenderer, DomContainer, ElementHandle, RendererKind, measure_natural_label_box,
};

const TRANSFORM_PROPERTIES: [&str; 5] = [
    "transform",
    "-moz-transform",
    "-webkit-transform",
    "-o-transform",
    "-ms-transform",
];

/// Translation and rotation applied to a DOM label element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformOffsets {
    pub x: f64,
    pub y: f64,
    pub degrees: i32,
}

/// Offsets for an element rotated about its center.
///
/// Rotated labels are translated so that, after turning, their pre-rotation
/// height lies flush against the box edge.
pub(super) fn css_offsets(
    position: AxisPosition,
    bbox: BoundingBox,
    label_box: (f64, f64),
) -> TransformOffsets {
    let (label_width, label_height) = label_box;
    let degrees = position.rotation_degrees();
    match position {
        AxisPosition::Bottom => TransformOffsets {
            x: bbox.center_x() - label_width / 2.0,
            y: bbox.bottom() - label_height,
            degrees,
        },
        AxisPosition::Top => TransformOffsets {
            x: bbox.center_x() - label_width / 2.0,
            y: bbox.top,
            degrees,
        },
        AxisPosition::Left => TransformOffsets {
            x: bbox.left - label_width / 2.0 + label_height / 2.0,
            y: bbox.center_y(),
            degrees,
        },
        AxisPosition::Right => TransformOffsets {
            x: bbox.right() - label_width / 2.0 - label_height / 2.0,
            y: bbox.center_y(),
            degrees,
        },
    }
}

/// Style declarations placing an element through CSS transforms.
///
/// Emits the standard property plus vendor-prefixed copies; zero translation
/// and zero rotation are left out of the transform list.
#[must_use]
pub fn transform_style(degrees: i32, x: f64, y: f64) -> Vec<(String, String)> {
    let mut parts = Vec::with_capacity(2);
    if x != 0.0 || y != 0.0 {
        parts.push(format!("translate({x}px, {y}px)"));
    }
    if degrees != 0 {
        parts.push(format!("rotate({degrees}deg)"));
    }

    let mut style = vec![
        ("top".to_owned(), "0".to_owned()),
        ("left".to_owned(), "0".to_owned()),
    ];
    if !parts.is_empty() {
        let transform = parts.join(" ");
        style.extend(
            TRANSFORM_PROPERTIES
                .iter()
                .map(|property| ((*property).to_owned(), transform.clone())),
        );
    }
    style
}

pub(super) fn remove_label_elements(
    container: &mut dyn DomContainer,
    spec: &AxisLabelSpec,
    owned: &mut Option<ElementHandle>,
) {
    container.remove_by_class(&spec.element_id());
    if let Some(stale) = owned.take() {
        container.remove(stale);
    }
}

/// DOM label positioned and rotated through CSS transforms.
#[derive(Debug, Clone)]
pub struct CssTransformAxisLabel {
    spec: AxisLabelSpec,
    label_box: Option<(f64, f64)>,
    element: Option<ElementHandle>,
}

impl CssTransformAxisLabel {
    #[must_use]
    pub fn new(spec: AxisLabelSpec) -> Self {
        Self {
            spec,
            label_box: None,
            element: None,
        }
    }

    #[must_use]
    pub fn calculate_offsets(&self, bbox: BoundingBox, label_box: (f64, f64)) -> TransformOffsets {
        css_offsets(self.spec.position, bbox, label_box)
    }
}

impl AxisLabelRenderer for CssTransformAxisLabel {
    fn kind(&self) -> RendererKind {
        RendererKind::CssTransform
    }

    fn spec(&self) -> &AxisLabelSpec {
        &self.spec
    }

    fn calculate_size(&mut self, plot: &mut dyn PlotHost) -> AxisLabelResult<BlockSize> {
        let label_box = measure_natural_label_box(plot.placeholder(), &self.spec)?;
        self.label_box = Some(label_box);
        // Rotated or not, the footprint across the axis is the element height.
        Ok(BlockSize::across(
            self.spec.position,
            label_box.1 + self.spec.padding(),
        ))
    }

    fn draw(&mut self, plot: &mut dyn PlotHost, bbox: BoundingBox) -> AxisLabelResult<()> {
        bbox.validate()?;
        let container = plot.placeholder();
        let label_box = match self.label_box {
            Some(label_box) => label_box,
            None => measure_natural_label_box(container, &self.spec)?,
        };
        self.label_box = Some(label_box);
        remove_label_elements(container, &self.spec, &mut self.element);

        let offsets = self.calculate_offsets(bbox, label_box);
        let mut element = label_element(&self.spec).with_class(self.spec.element_id());
        for (property, value) in transform_style(offsets.degrees, offsets.x, offsets.y) {
            element = element.with_style(property, value);
        }
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
