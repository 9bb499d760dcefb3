use std::fmt;

use indexmap::IndexMap;
use tracing::{trace, warn};

use crate::core::{AxisPosition, BoundingBox, RuntimeEnvironment, StaticEnvironment, Viewport};
use crate::error::{AxisLabelError, AxisLabelResult};
use crate::extensions::{HookOutcome, PlotPlugin};
use crate::render::{CanvasSurface, DomContainer, MemoryContainer, RecordingCanvas};

use super::{AxisLabelOptions, PlotAxis, PlotHost};

/// Upper bound on nested redraws triggered by plugin hooks within one
/// `draw` call.
pub const MAX_REDRAW_DEPTH: usize = 4;

/// Reference chart host: stacks axis boxes against the viewport edges and
/// runs registered plugins from its draw cycle.
pub struct ChartPlot<C: CanvasSurface = RecordingCanvas> {
    viewport: Viewport,
    axes: IndexMap<String, PlotAxis>,
    plot_options: IndexMap<String, AxisLabelOptions>,
    plot_area: BoundingBox,
    canvas: C,
    container: MemoryContainer,
    environment: StaticEnvironment,
    pub(super) plugins: Vec<Box<dyn PlotPlugin>>,
    draw_count: usize,
}

impl ChartPlot<RecordingCanvas> {
    /// Host drawing into a [`RecordingCanvas`].
    pub fn headless(viewport: Viewport) -> AxisLabelResult<Self> {
        Self::new(RecordingCanvas::new(), viewport)
    }
}

impl<C: CanvasSurface + 'static> ChartPlot<C> {
    pub fn new(canvas: C, viewport: Viewport) -> AxisLabelResult<Self> {
        if !viewport.is_valid() {
            return Err(AxisLabelError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let mut plot = Self {
            viewport,
            axes: IndexMap::new(),
            plot_options: IndexMap::new(),
            plot_area: BoundingBox::default(),
            canvas,
            container: MemoryContainer::new(),
            environment: StaticEnvironment::modern(),
            plugins: Vec::new(),
            draw_count: 0,
        };
        plot.layout_grid();
        Ok(plot)
    }

    /// Environment reported to plugins. Takes effect for plugins registered
    /// afterwards.
    #[must_use]
    pub fn with_environment(mut self, environment: StaticEnvironment) -> Self {
        self.environment = environment;
        self
    }

    #[must_use]
    pub fn with_container(mut self, container: MemoryContainer) -> Self {
        self.container = container;
        self
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Area left for series once every axis box is laid out.
    #[must_use]
    pub fn plot_area(&self) -> BoundingBox {
        self.plot_area
    }

    /// Adds or replaces an axis and lays the grid out again.
    pub fn add_axis(&mut self, axis: PlotAxis) {
        self.axes.insert(axis.name.clone(), axis);
        self.layout_grid();
    }

    /// Removes an axis. Label state tied to it is released on the next
    /// measure pass.
    pub fn remove_axis(&mut self, name: &str) -> Option<PlotAxis> {
        let removed = self.axes.shift_remove(name);
        if removed.is_some() {
            self.layout_grid();
        }
        removed
    }

    #[must_use]
    pub fn axis(&self, name: &str) -> Option<&PlotAxis> {
        self.axes.get(name)
    }

    pub fn axis_mut(&mut self, name: &str) -> Option<&mut PlotAxis> {
        self.axes.get_mut(name)
    }

    /// Replaces the label options of axis `name`. Returns `false` for unknown
    /// axes.
    pub fn set_axis_label(&mut self, name: &str, options: Option<AxisLabelOptions>) -> bool {
        match self.axes.get_mut(name) {
            Some(axis) => {
                axis.options = options;
                true
            }
            None => false,
        }
    }

    /// Plot-level options, used when the axis carries none of its own.
    pub fn set_plot_options(&mut self, name: impl Into<String>, options: AxisLabelOptions) {
        self.plot_options.insert(name.into(), options);
    }

    #[must_use]
    pub fn canvas_surface(&self) -> &C {
        &self.canvas
    }

    #[must_use]
    pub fn container(&self) -> &MemoryContainer {
        &self.container
    }

    /// Draw cycles run so far, nested redraws included.
    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.draw_count
    }

    /// Runs one draw cycle: clears the canvas and invokes every plugin hook.
    ///
    /// A hook asking for a redraw restarts the cycle once all hooks of the
    /// current one have run.
    pub fn draw(&mut self) -> AxisLabelResult<()> {
        let mut depth = 0;
        loop {
            if !self.draw_cycle()? {
                return Ok(());
            }
            depth += 1;
            if depth > MAX_REDRAW_DEPTH {
                warn!(depth, "plugins keep requesting redraws; giving up");
                return Ok(());
            }
            trace!(depth, "plugin requested redraw");
        }
    }

    fn draw_cycle(&mut self) -> AxisLabelResult<bool> {
        self.draw_count += 1;
        self.canvas.clear();

        // Plugins borrow the host mutably while they run.
        let mut plugins = std::mem::take(&mut self.plugins);
        let mut redraw = false;
        let mut outcome = Ok(());
        for plugin in &mut plugins {
            match plugin.on_draw(&mut *self) {
                Ok(HookOutcome::Done) => {}
                Ok(HookOutcome::RedrawRequested) => redraw = true,
                Err(err) => {
                    outcome = Err(err);
                    break;
                }
            }
        }
        self.plugins = plugins;
        outcome.map(|()| redraw)
    }

    /// Stacks axis boxes outward from the viewport edges in insertion
    /// order. Vertical boxes take the label-space width, horizontal ones the
    /// label-space height; both span the remaining plot area along the axis.
    fn layout_grid(&mut self) {
        let width = f64::from(self.viewport.width);
        let height = f64::from(self.viewport.height);
        let (mut left, mut right, mut top, mut bottom) = (0.0_f64, 0.0_f64, 0.0_f64, 0.0_f64);

        for axis in self.axes.values_mut().filter(|axis| axis.show) {
            let space = axis.label_space;
            match axis.position {
                AxisPosition::Left => {
                    axis.bbox = BoundingBox::new(left, 0.0, space.width, 0.0);
                    left += space.width;
                }
                AxisPosition::Right => {
                    right += space.width;
                    axis.bbox = BoundingBox::new(width - right, 0.0, space.width, 0.0);
                }
                AxisPosition::Top => {
                    axis.bbox = BoundingBox::new(0.0, top, 0.0, space.height);
                    top += space.height;
                }
                AxisPosition::Bottom => {
                    bottom += space.height;
                    axis.bbox = BoundingBox::new(0.0, height - bottom, 0.0, space.height);
                }
            }
        }

        let plot_width = (width - left - right).max(0.0);
        let plot_height = (height - top - bottom).max(0.0);
        self.plot_area = BoundingBox::new(left, top, plot_width, plot_height);

        for axis in self.axes.values_mut() {
            if !axis.show {
                axis.bbox = BoundingBox::default();
                continue;
            }
            if axis.position.is_vertical() {
                axis.bbox.top = top;
                axis.bbox.height = plot_height;
            } else {
                axis.bbox.left = left;
                axis.bbox.width = plot_width;
            }
        }
        trace!(plot_area = ?self.plot_area, "grid laid out");
    }
}

impl<C: CanvasSurface + 'static> PlotHost for ChartPlot<C> {
    fn axis_names(&self) -> Vec<String> {
        self.axes.keys().cloned().collect()
    }

    fn axis(&self, name: &str) -> Option<&PlotAxis> {
        self.axes.get(name)
    }

    fn axis_mut(&mut self, name: &str) -> Option<&mut PlotAxis> {
        self.axes.get_mut(name)
    }

    fn plot_options(&self, axis_name: &str) -> Option<&AxisLabelOptions> {
        self.plot_options.get(axis_name)
    }

    fn setup_grid(&mut self) {
        self.layout_grid();
    }

    fn canvas(&mut self) -> &mut dyn CanvasSurface {
        &mut self.canvas
    }

    fn placeholder(&mut self) -> &mut dyn DomContainer {
        &mut self.container
    }

    fn environment(&self) -> &dyn RuntimeEnvironment {
        &self.environment
    }
}

impl<C: CanvasSurface> fmt::Debug for ChartPlot<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartPlot")
            .field("viewport", &self.viewport)
            .field("axes", &self.axes)
            .field("plot_area", &self.plot_area)
            .field(
                "plugins",
                &self.plugins.iter().map(|plugin| plugin.name()).collect::<Vec<_>>(),
            )
            .field("draw_count", &self.draw_count)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::ChartPlot;
    use crate::api::PlotAxis;
    use crate::core::{AxisPosition, BoundingBox, Viewport};
    use crate::error::AxisLabelError;

    #[test]
    fn rejects_empty_viewport() {
        let err = ChartPlot::headless(Viewport::new(0, 300)).expect_err("empty viewport");
        assert!(matches!(err, AxisLabelError::InvalidViewport { width: 0, height: 300 }));
    }

    #[test]
    fn axis_boxes_stack_against_edges() {
        let mut plot = ChartPlot::headless(Viewport::new(400, 300)).expect("plot");
        plot.add_axis(PlotAxis::new("yaxis", AxisPosition::Left).with_label_space(30.0, 0.0));
        plot.add_axis(PlotAxis::new("xaxis", AxisPosition::Bottom).with_label_space(0.0, 20.0));
        plot.add_axis(PlotAxis::new("y2axis", AxisPosition::Right).with_label_space(25.0, 0.0));

        assert_eq!(plot.plot_area(), BoundingBox::new(30.0, 0.0, 345.0, 280.0));
        assert_eq!(
            plot.axis("yaxis").map(|axis| axis.bbox),
            Some(BoundingBox::new(0.0, 0.0, 30.0, 280.0))
        );
        assert_eq!(
            plot.axis("xaxis").map(|axis| axis.bbox),
            Some(BoundingBox::new(30.0, 280.0, 345.0, 20.0))
        );
        assert_eq!(
            plot.axis("y2axis").map(|axis| axis.bbox),
            Some(BoundingBox::new(375.0, 0.0, 25.0, 280.0))
        );
    }

    #[test]
    fn hidden_axes_take_no_space() {
        let mut plot = ChartPlot::headless(Viewport::new(200, 100)).expect("plot");
        plot.add_axis(
            PlotAxis::new("yaxis", AxisPosition::Left)
                .with_label_space(30.0, 0.0)
                .hidden(),
        );
        assert_eq!(plot.plot_area(), BoundingBox::new(0.0, 0.0, 200.0, 100.0));
    }
}
