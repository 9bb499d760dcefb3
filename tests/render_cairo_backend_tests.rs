#![cfg(feature = "cairo-backend")]

use chart_axis_labels::AxisLabelError;
use chart_axis_labels::api::{AxisLabelsPlugin, ChartPlot, PlotAxis};
use chart_axis_labels::core::{AxisPosition, StaticEnvironment, Viewport};
use chart_axis_labels::render::CairoCanvas;
use chart_axis_labels::AxisLabelOptions;

#[test]
fn cairo_canvas_rejects_invalid_surface_size() {
    let err = CairoCanvas::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, AxisLabelError::InvalidData(_)));
}

#[test]
fn cairo_canvas_draws_wrapped_axis_labels() {
    let canvas = CairoCanvas::new(640, 360).expect("canvas");
    let mut plot = ChartPlot::new(canvas, Viewport::new(640, 360))
        .expect("plot init")
        .with_environment(StaticEnvironment::modern().with_style_transitions(false));
    plot.add_axis(
        PlotAxis::new("xaxis", AxisPosition::Bottom)
            .with_label_space(0.0, 20.0)
            .with_options(AxisLabelOptions::new("Time of day").with_colour("#336699")),
    );
    plot.add_axis(
        PlotAxis::new("yaxis", AxisPosition::Left)
            .with_label_space(40.0, 0.0)
            .with_options(AxisLabelOptions::new("Requests per second").with_adjustment(true)),
    );
    plot.register_plugin(Box::new(AxisLabelsPlugin::new()))
        .expect("register plugin");

    plot.draw().expect("draw");

    assert_eq!(plot.draw_count(), 2);
    assert_eq!(plot.canvas_surface().backend_name(), "cairo+pango+pangocairo");
    let xaxis = plot.axis("xaxis").expect("xaxis");
    assert!(xaxis.label_space.height > 20.0);
}
