use tracing::trace;

use crate::api::{AxisLabelSpec, PlotHost};
use crate::core::{AxisPosition, BlockSize, BoundingBox};
use crate::error::AxisLabelResult;

use super::css_transform_label::{css_offsets, remove_label_elements};
use super::html_label::{label_element, px};
use super::{
    AxisLabelRenderer, ElementHandle, RendererKind, TransformOffsets, measure_natural_label_box,
};

/// Quarter-turn index understood by the legacy rotation filter, in `0..=3`.
#[must_use]
pub fn legacy_rotation_index(degrees: i32) -> i32 {
    (degrees / 90).rem_euclid(4)
}

/// Label for engines without CSS transforms.
///
/// Rotation goes through the engine's image filter and translation through
/// plain `left`/`top`; the offsets are empirical corrections of the CSS ones.
#[derive(Debug, Clone)]
pub struct LegacyTransformAxisLabel {
    spec: AxisLabelSpec,
    label_box: Option<(f64, f64)>,
    element: Option<ElementHandle>,
    requires_resize: bool,
}

impl LegacyTransformAxisLabel {
    #[must_use]
    pub fn new(spec: AxisLabelSpec) -> Self {
        Self {
            spec,
            label_box: None,
            element: None,
            requires_resize: false,
        }
    }

    #[must_use]
    pub fn calculate_offsets(&self, bbox: BoundingBox, label_box: (f64, f64)) -> TransformOffsets {
        let (label_width, label_height) = label_box;
        let mut offsets = css_offsets(self.spec.position, bbox, label_box);
        match self.spec.position {
            // Exactly at the box top the engine flips the label to the bottom.
            AxisPosition::Top => offsets.y = bbox.top + 1.0,
            AxisPosition::Left => {
                offsets.x = bbox.left;
                offsets.y = bbox.center_y() - label_width / 2.0;
            }
            AxisPosition::Right => {
                offsets.x = bbox.right() - label_height;
                offsets.y = bbox.center_y() - label_width / 2.0;
            }
            AxisPosition::Bottom => {}
        }
        offsets
    }

    /// Style declarations for `offsets`; records whether the element must be
    /// resized after it is appended.
    pub fn transform_style(&mut self, offsets: TransformOffsets) -> Vec<(String, String)> {
        let mut style = Vec::with_capacity(3);
        self.requires_resize = false;
        if offsets.degrees != 0 {
            style.push((
                "filter".to_owned(),
                format!(
                    "progid:DXImageTransform.Microsoft.BasicImage(rotation={})",
                    legacy_rotation_index(offsets.degrees)
                ),
            ));
            // Text wraps before the filter rotates it; only the right side
            // ends up with a wrapped box.
            self.requires_resize = self.spec.position == AxisPosition::Right;
        }
        if offsets.x != 0.0 {
            style.push(("left".to_owned(), px(offsets.x)));
        }
        if offsets.y != 0.0 {
            style.push(("top".to_owned(), px(offsets.y)));
        }
        style
    }

    #[must_use]
    pub fn requires_resize(&self) -> bool {
        self.requires_resize
    }
}

impl AxisLabelRenderer for LegacyTransformAxisLabel {
    fn kind(&self) -> RendererKind {
        RendererKind::LegacyTransform
    }

    fn spec(&self) -> &AxisLabelSpec {
        &self.spec
    }

    fn calculate_size(&mut self, plot: &mut dyn PlotHost) -> AxisLabelResult<BlockSize> {
        let label_box = measure_natural_label_box(plot.placeholder(), &self.spec)?;
        self.label_box = Some(label_box);
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
        for (property, value) in self.transform_style(offsets) {
            element = element.with_style(property, value);
        }
        let handle = container.append(element);
        if self.requires_resize {
            trace!(axis = %self.spec.axis_name, "resetting legacy label box after rotation");
            container.set_style(handle, "width", &px(label_box.0));
            container.set_style(handle, "height", &px(label_box.1));
        }
        self.element = Some(handle);
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

#[cfg(test)]
mod tests {
    use super::{LegacyTransformAxisLabel, legacy_rotation_index};
    use crate::api::{AxisLabelDefaults, AxisLabelOptions, AxisLabelSpec};
    use crate::core::{AxisPosition, BoundingBox};

    fn label(position: AxisPosition) -> LegacyTransformAxisLabel {
        let spec = AxisLabelSpec::resolve(
            "y2axis",
            position,
            &AxisLabelOptions::new("Volume"),
            &AxisLabelDefaults::default(),
        )
        .expect("label spec");
        LegacyTransformAxisLabel::new(spec)
    }

    #[test]
    fn rotation_index_is_non_negative() {
        assert_eq!(legacy_rotation_index(-90), 3);
        assert_eq!(legacy_rotation_index(90), 1);
        assert_eq!(legacy_rotation_index(0), 0);
    }

    #[test]
    fn only_rotated_right_labels_need_resize() {
        let bbox = BoundingBox::new(500.0, 10.0, 30.0, 200.0);
        let label_box = (60.0, 16.0);

        let mut right = label(AxisPosition::Right);
        let offsets = right.calculate_offsets(bbox, label_box);
        assert_eq!(offsets.x, 530.0 - 16.0);
        assert_eq!(offsets.y, 110.0 - 30.0);
        let style = right.transform_style(offsets);
        assert!(right.requires_resize());
        assert_eq!(
            style[0].1,
            "progid:DXImageTransform.Microsoft.BasicImage(rotation=1)"
        );

        let mut left = label(AxisPosition::Left);
        let offsets = left.calculate_offsets(bbox, label_box);
        left.transform_style(offsets);
        assert!(!left.requires_resize());
    }

    #[test]
    fn top_label_is_nudged_below_box_edge() {
        let top = label(AxisPosition::Top);
        let offsets = top.calculate_offsets(BoundingBox::new(0.0, 0.0, 100.0, 20.0), (40.0, 16.0));
        assert_eq!(offsets.y, 1.0);
        assert_eq!(offsets.degrees, 0);
    }

    #[test]
    fn left_label_hugs_box_left_edge() {
        let mut left = label(AxisPosition::Left);
        let bbox = BoundingBox::new(4.0, 10.0, 30.0, 200.0);
        let offsets = left.calculate_offsets(bbox, (60.0, 16.0));
        assert_eq!(offsets.x, 4.0);
        assert_eq!(offsets.y, 110.0 - 30.0);
        assert_eq!(offsets.degrees, -90);

        let style = left.transform_style(offsets);
        assert_eq!(
            style[0].1,
            "progid:DXImageTransform.Microsoft.BasicImage(rotation=3)"
        );
        assert_eq!(style[1], ("left".to_owned(), "4px".to_owned()));
        assert_eq!(style[2], ("top".to_owned(), "80px".to_owned()));
    }
}
