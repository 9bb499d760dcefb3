mod chart_plot;
mod options;
mod orchestrator;
mod plot;
mod plugin_registry;

pub use chart_plot::{ChartPlot, MAX_REDRAW_DEPTH};
pub use options::{
    AxisLabelDefaults, AxisLabelOptions, AxisLabelSpec, ResolvedLabelStyle, resolve_label_style,
};
pub use orchestrator::{
    AxisLabelsPlugin, LabelRenderState, LayoutPhase, PLUGIN_NAME, PLUGIN_VERSION,
};
pub use plot::{LabelSpace, PlotAxis, PlotHost};
