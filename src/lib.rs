//! chart-axis-labels: textual axis labels for charts.
//!
//! The crate sizes, wraps and positions axis labels around a plot's axis
//! boxes and renders them through interchangeable backends (canvas, DOM,
//! CSS transform, legacy transform). Layout runs as a two-pass cycle: the
//! first pass reserves label space and asks the host to re-layout, the second
//! pass draws into the final geometry.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod render;
pub mod telemetry;

pub use api::{AxisLabelOptions, AxisLabelsPlugin, ChartPlot, PlotHost};
pub use error::{AxisLabelError, AxisLabelResult};
