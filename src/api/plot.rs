use serde::{Deserialize, Serialize};

use crate::core::{AxisPosition, BlockSize, BoundingBox, RuntimeEnvironment};
use crate::render::{CanvasSurface, DomContainer};

use super::AxisLabelOptions;

/// Extra space the host reserves next to an axis box for tick labels.
///
/// The grid layout reads these accumulators; axis labels add their own block
/// size on top and take it back out when released.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LabelSpace {
    pub width: f64,
    pub height: f64,
}

impl LabelSpace {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn reserve(&mut self, size: BlockSize) {
        self.width += size.width;
        self.height += size.height;
    }

    /// Takes `size` back out, never going below zero.
    pub fn release(&mut self, size: BlockSize) {
        self.width = (self.width - size.width).max(0.0);
        self.height = (self.height - size.height).max(0.0);
    }
}

/// One axis as seen by the label layout.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotAxis {
    pub name: String,
    pub position: AxisPosition,
    pub show: bool,
    /// Box computed by the host's last grid setup.
    pub bbox: BoundingBox,
    pub options: Option<AxisLabelOptions>,
    pub label_space: LabelSpace,
}

impl PlotAxis {
    #[must_use]
    pub fn new(name: impl Into<String>, position: AxisPosition) -> Self {
        Self {
            name: name.into(),
            position,
            show: true,
            bbox: BoundingBox::default(),
            options: None,
            label_space: LabelSpace::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: AxisLabelOptions) -> Self {
        self.options = Some(options);
        self
    }

    #[must_use]
    pub fn with_label_space(mut self, width: f64, height: f64) -> Self {
        self.label_space = LabelSpace::new(width, height);
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.show = false;
        self
    }
}

/// Chart host contract consumed by axis-label plugins.
///
/// The host owns axis geometry, the drawing surface and the DOM container;
/// plugins only read and adjust them from inside the draw hook.
pub trait PlotHost {
    /// Axis names in layout order.
    fn axis_names(&self) -> Vec<String>;
    fn axis(&self, name: &str) -> Option<&PlotAxis>;
    fn axis_mut(&mut self, name: &str) -> Option<&mut PlotAxis>;

    /// Plot-level option lookup used by hosts that keep axis options outside
    /// the axis objects.
    fn plot_options(&self, _axis_name: &str) -> Option<&AxisLabelOptions> {
        None
    }

    /// Recomputes axis boxes from the current label-space accumulators.
    fn setup_grid(&mut self);
    fn canvas(&mut self) -> &mut dyn CanvasSurface;
    fn placeholder(&mut self) -> &mut dyn DomContainer;
    fn environment(&self) -> &dyn RuntimeEnvironment;

    /// Options in effect for `name`: the axis' own, else the plot-level ones.
    fn effective_options(&self, name: &str) -> Option<&AxisLabelOptions> {
        self.axis(name)
            .and_then(|axis| axis.options.as_ref())
            .or_else(|| self.plot_options(name))
    }
}
