use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{BlockSize, Capabilities, detect_capabilities};
use crate::error::AxisLabelResult;
use crate::extensions::{HookOutcome, PlotPlugin};
use crate::render::{
    AxisLabelRenderer, RendererKind, RendererOverrides, create_renderer, select_renderer,
};

use super::{AxisLabelDefaults, AxisLabelSpec, PlotHost};

pub const PLUGIN_NAME: &str = "axisLabels";
pub const PLUGIN_VERSION: &str = "2.0";

/// Which half of the two-pass label cycle the next draw hook runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutPhase {
    /// Size labels, reserve space, ask the host to lay out again.
    #[default]
    Measure,
    /// Draw labels into the final axis boxes.
    Draw,
}

impl LayoutPhase {
    /// Phase following a completed pass.
    ///
    /// A measure pass that produced no label stays in `Measure`: there is
    /// nothing to draw and no relayout to wait for.
    #[must_use]
    pub fn transition(self, produced_labels: bool) -> Self {
        match self {
            Self::Measure if produced_labels => Self::Draw,
            Self::Measure | Self::Draw => Self::Measure,
        }
    }
}

/// Per-axis label state kept between the measure and draw passes.
#[derive(Debug)]
pub struct LabelRenderState {
    reserved: BlockSize,
    renderer: Box<dyn AxisLabelRenderer>,
}

impl LabelRenderState {
    /// Space added to the axis' label-space accumulators.
    #[must_use]
    pub fn reserved(&self) -> BlockSize {
        self.reserved
    }

    #[must_use]
    pub fn kind(&self) -> RendererKind {
        self.renderer.kind()
    }

    #[must_use]
    pub fn label_text(&self) -> &str {
        self.renderer.label_text()
    }

    #[must_use]
    pub fn label_box(&self) -> Option<(f64, f64)> {
        self.renderer.label_box()
    }
}

/// Axis-label plugin driving the measure/draw cycle for one plot.
#[derive(Debug, Default)]
pub struct AxisLabelsPlugin {
    phase: LayoutPhase,
    labels: IndexMap<String, LabelRenderState>,
    defaults: AxisLabelDefaults,
    capabilities: Option<Capabilities>,
}

impl AxisLabelsPlugin {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_defaults(mut self, defaults: AxisLabelDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Pins the capability snapshot instead of detecting it on `init`.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    #[must_use]
    pub fn phase(&self) -> LayoutPhase {
        self.phase
    }

    #[must_use]
    pub fn capabilities(&self) -> Option<Capabilities> {
        self.capabilities
    }

    #[must_use]
    pub fn state(&self, axis_name: &str) -> Option<&LabelRenderState> {
        self.labels.get(axis_name)
    }

    #[must_use]
    pub fn reserved(&self, axis_name: &str) -> Option<BlockSize> {
        self.state(axis_name).map(LabelRenderState::reserved)
    }

    #[must_use]
    pub fn renderer_kind(&self, axis_name: &str) -> Option<RendererKind> {
        self.state(axis_name).map(LabelRenderState::kind)
    }

    #[must_use]
    pub fn label_text(&self, axis_name: &str) -> Option<&str> {
        self.state(axis_name).map(LabelRenderState::label_text)
    }

    pub fn active_axes(&self) -> impl Iterator<Item = &str> {
        self.labels.keys().map(String::as_str)
    }

    /// Runs the pass for the current phase and advances the state machine.
    pub fn run_pass(&mut self, plot: &mut dyn PlotHost) -> AxisLabelResult<HookOutcome> {
        match self.phase {
            LayoutPhase::Measure => {
                let produced = self.measure_pass(plot)?;
                self.phase = self.phase.transition(produced);
                if !produced {
                    return Ok(HookOutcome::Done);
                }
                debug!(labels = self.labels.len(), "axis labels measured; requesting relayout");
                plot.setup_grid();
                Ok(HookOutcome::RedrawRequested)
            }
            LayoutPhase::Draw => {
                let drawn = self.draw_pass(plot);
                self.phase = self.phase.transition(true);
                drawn.map(|()| HookOutcome::Done)
            }
        }
    }

    /// Drops every label state and gives its space back to the axes.
    pub fn release_all(&mut self, plot: &mut dyn PlotHost) {
        let names: Vec<String> = self.labels.keys().cloned().collect();
        for name in names {
            self.release(plot, &name);
        }
        self.phase = LayoutPhase::Measure;
    }

    fn resolve_capabilities(&mut self, plot: &dyn PlotHost) -> Capabilities {
        *self
            .capabilities
            .get_or_insert_with(|| detect_capabilities(plot.environment()))
    }

    fn release(&mut self, plot: &mut dyn PlotHost, axis_name: &str) -> bool {
        let Some(mut state) = self.labels.shift_remove(axis_name) else {
            return false;
        };
        if let Some(axis) = plot.axis_mut(axis_name) {
            axis.label_space.release(state.reserved);
        }
        state.renderer.cleanup(plot);
        trace!(axis = axis_name, reserved = ?state.reserved, "released axis label");
        true
    }

    /// Builds the label spec for an axis that is shown and declares a label,
    /// with the renderer choices its options force.
    fn label_spec(
        &self,
        plot: &dyn PlotHost,
        axis_name: &str,
    ) -> Option<(AxisLabelSpec, RendererOverrides)> {
        let axis = plot.axis(axis_name)?;
        if !axis.show {
            return None;
        }
        let options = plot.effective_options(axis_name)?;
        let spec = AxisLabelSpec::resolve(axis_name, axis.position, options, &self.defaults)?;
        Some((spec, options.renderer_overrides()))
    }

    fn measure_pass(&mut self, plot: &mut dyn PlotHost) -> AxisLabelResult<bool> {
        let capabilities = self.resolve_capabilities(plot);
        let axis_names = plot.axis_names();

        // Redraws started outside this plugin land here with state left over
        // from the previous cycle, possibly for axes the host no longer has.
        let previous: Vec<String> = self.labels.keys().cloned().collect();
        let mut released = false;
        for name in previous {
            released |= self.release(plot, &name);
        }
        // Wrapping must see the boxes without the old reservations.
        if released {
            plot.setup_grid();
        }

        let mut produced = false;
        for axis_name in axis_names {
            let Some((spec, overrides)) = self.label_spec(plot, &axis_name) else {
                continue;
            };
            let Some(bbox) = plot.axis(&axis_name).map(|axis| axis.bbox) else {
                continue;
            };

            let kind = select_renderer(&capabilities, overrides);
            debug!(axis = %axis_name, renderer = kind.as_str(), ?overrides, "selected axis label renderer");
            let adjust = spec.style.adjust;
            let mut renderer = create_renderer(kind, spec);
            if adjust && renderer.adjust_label(plot, bbox)? {
                debug!(axis = %axis_name, text = renderer.label_text(), "wrapped axis label");
            }

            let reserved = renderer.calculate_size(plot)?;
            if let Some(axis) = plot.axis_mut(&axis_name) {
                axis.label_space.reserve(reserved);
            }
            trace!(axis = %axis_name, ?reserved, "reserved axis label space");
            self.labels
                .insert(axis_name, LabelRenderState { reserved, renderer });
            produced = true;
        }
        Ok(produced)
    }

    fn draw_pass(&mut self, plot: &mut dyn PlotHost) -> AxisLabelResult<()> {
        for axis_name in plot.axis_names() {
            if self.label_spec(plot, &axis_name).is_none() {
                continue;
            }
            let Some(bbox) = plot.axis(&axis_name).map(|axis| axis.bbox) else {
                continue;
            };
            let Some(state) = self.labels.get_mut(&axis_name) else {
                warn!(axis = %axis_name, "axis label appeared between measure and draw; skipping");
                continue;
            };
            state.renderer.draw(plot, bbox)?;
        }
        Ok(())
    }
}

impl PlotPlugin for AxisLabelsPlugin {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn version(&self) -> &str {
        PLUGIN_VERSION
    }

    fn init(&mut self, plot: &dyn PlotHost) {
        let capabilities = self.resolve_capabilities(plot);
        debug!(?capabilities, "axis labels plugin attached");
    }

    fn on_draw(&mut self, plot: &mut dyn PlotHost) -> AxisLabelResult<HookOutcome> {
        self.run_pass(plot)
    }

    fn detach(&mut self, plot: &mut dyn PlotHost) {
        self.release_all(plot);
    }
}

#[cfg(test)]
mod tests {
    use super::LayoutPhase;

    #[test]
    fn phase_alternates_only_when_labels_exist() {
        assert_eq!(LayoutPhase::Measure.transition(true), LayoutPhase::Draw);
        assert_eq!(LayoutPhase::Measure.transition(false), LayoutPhase::Measure);
        assert_eq!(LayoutPhase::Draw.transition(true), LayoutPhase::Measure);
        assert_eq!(LayoutPhase::Draw.transition(false), LayoutPhase::Measure);
    }
}
