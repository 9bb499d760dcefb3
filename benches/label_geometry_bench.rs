use chart_axis_labels::api::{AxisLabelsPlugin, ChartPlot, PlotAxis};
use chart_axis_labels::core::{
    AxisPosition, EstimatingTextMeasurer, FontSpec, StaticEnvironment, Viewport, wrap_to_fit,
};
use chart_axis_labels::AxisLabelOptions;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_wrap_long_label(c: &mut Criterion) {
    let text = "Quarterly revenue in millions of euros adjusted for inflation and currency effects";
    let font = FontSpec::new(14.0, "sans-serif");

    c.bench_function("wrap_long_label", |b| {
        b.iter(|| {
            let _ = wrap_to_fit(
                black_box(text),
                black_box(120.0),
                &font,
                &mut EstimatingTextMeasurer,
            );
        })
    });
}

fn bench_two_pass_draw(c: &mut Criterion) {
    let mut plot = ChartPlot::headless(Viewport::new(1920, 1080))
        .expect("plot init")
        .with_environment(StaticEnvironment::modern().with_style_transitions(false));
    for (name, position, text) in [
        ("xaxis", AxisPosition::Bottom, "Time"),
        ("x2axis", AxisPosition::Top, "Session"),
        ("yaxis", AxisPosition::Left, "Price in USD"),
        ("y2axis", AxisPosition::Right, "Volume"),
    ] {
        plot.add_axis(
            PlotAxis::new(name, position)
                .with_label_space(30.0, 20.0)
                .with_options(AxisLabelOptions::new(text).with_adjustment(true)),
        );
    }
    plot.register_plugin(Box::new(AxisLabelsPlugin::new()))
        .expect("register plugin");

    c.bench_function("two_pass_draw_4_axes", |b| {
        b.iter(|| {
            plot.draw().expect("draw");
        })
    });
}

criterion_group!(benches, bench_wrap_long_label, bench_two_pass_draw);
criterion_main!(benches);
