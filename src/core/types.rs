use serde::{Deserialize, Serialize};

use crate::error::{AxisLabelError, AxisLabelResult};

/// Side of the plot an axis is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisPosition {
    Top,
    Bottom,
    Left,
    Right,
}

impl AxisPosition {
    /// Left/right axes run vertically; their labels are rotated.
    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Canvas rotation applied to every label line, in radians.
    #[must_use]
    pub fn rotation_radians(self) -> f64 {
        match self {
            Self::Top | Self::Bottom => 0.0,
            Self::Left => -std::f64::consts::FRAC_PI_2,
            Self::Right => std::f64::consts::FRAC_PI_2,
        }
    }

    /// Rotation used by the DOM transform renderers, in degrees.
    #[must_use]
    pub fn rotation_degrees(self) -> i32 {
        match self {
            Self::Top | Self::Bottom => 0,
            Self::Left => -90,
            Self::Right => 90,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Alignment of the lines of a multi-line label against the widest line.
///
/// Only `"left"` and `"right"` are recognised when parsing; every other
/// string, `"middle"` included, centers the lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum LabelAlignment {
    Left,
    #[default]
    Center,
    Right,
}

impl From<&str> for LabelAlignment {
    fn from(value: &str) -> Self {
        match value {
            "left" => Self::Left,
            "right" => Self::Right,
            _ => Self::Center,
        }
    }
}

impl From<String> for LabelAlignment {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

/// Screen region owned by one axis, in surface/container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[must_use]
    pub fn center_x(self) -> f64 {
        self.left + self.width / 2.0
    }

    #[must_use]
    pub fn center_y(self) -> f64 {
        self.top + self.height / 2.0
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    /// Extent along which a label on `position` runs.
    #[must_use]
    pub fn extent_along(self, position: AxisPosition) -> f64 {
        if position.is_vertical() {
            self.height
        } else {
            self.width
        }
    }

    pub fn validate(self) -> AxisLabelResult<()> {
        let finite = [self.left, self.top, self.width, self.height]
            .iter()
            .all(|value| value.is_finite());
        if !finite || self.width < 0.0 || self.height < 0.0 {
            return Err(AxisLabelError::InvalidBox {
                left: self.left,
                top: self.top,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Width/height a label contributes to its axis' tick-label space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockSize {
    pub width: f64,
    pub height: f64,
}

impl BlockSize {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Puts `extent` on the dimension perpendicular to the axis.
    #[must_use]
    pub fn across(position: AxisPosition, extent: f64) -> Self {
        if position.is_vertical() {
            Self::new(extent, 0.0)
        } else {
            Self::new(0.0, extent)
        }
    }
}

/// Drawing surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisPosition, BlockSize, BoundingBox, LabelAlignment};

    #[test]
    fn middle_alignment_normalizes_to_center() {
        let alignment: LabelAlignment = serde_json::from_str("\"middle\"").expect("parse");
        assert_eq!(alignment, LabelAlignment::Center);
    }

    #[test]
    fn unrecognised_alignment_centers_lines() {
        for raw in ["\"justify\"", "\"CENTER\"", "\"Left\""] {
            let alignment: LabelAlignment = serde_json::from_str(raw).expect("parse");
            assert_eq!(alignment, LabelAlignment::Center, "{raw}");
        }
        let right: LabelAlignment = serde_json::from_str("\"right\"").expect("parse");
        assert_eq!(right, LabelAlignment::Right);
        assert_eq!(serde_json::to_string(&LabelAlignment::Left).expect("serialize"), "\"left\"");
    }

    #[test]
    fn block_size_lands_on_axis_cross_dimension() {
        assert_eq!(
            BlockSize::across(AxisPosition::Left, 12.0),
            BlockSize::new(12.0, 0.0)
        );
        assert_eq!(
            BlockSize::across(AxisPosition::Bottom, 12.0),
            BlockSize::new(0.0, 12.0)
        );
    }

    #[test]
    fn negative_or_nan_box_is_rejected() {
        assert!(BoundingBox::new(0.0, 0.0, -1.0, 10.0).validate().is_err());
        assert!(BoundingBox::new(f64::NAN, 0.0, 1.0, 10.0).validate().is_err());
        assert!(BoundingBox::new(0.0, 0.0, 0.0, 0.0).validate().is_ok());
    }
}
