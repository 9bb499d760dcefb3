use chart_axis_labels::api::{AxisLabelsPlugin, ChartPlot, PlotAxis};
use chart_axis_labels::core::{AxisPosition, StaticEnvironment, Viewport, detect_capabilities};
use chart_axis_labels::extensions::PlotPlugin;
use chart_axis_labels::render::{RendererKind, RendererOverrides, select_renderer};
use chart_axis_labels::AxisLabelOptions;

fn selected_kind(environment: StaticEnvironment, options: AxisLabelOptions) -> Option<RendererKind> {
    let mut plot = ChartPlot::headless(Viewport::new(640, 480))
        .expect("plot init")
        .with_environment(environment);
    plot.add_axis(PlotAxis::new("xaxis", AxisPosition::Bottom).with_options(options));

    let mut plugin = AxisLabelsPlugin::new();
    plugin.init(&plot);
    plugin.run_pass(&mut plot).expect("measure pass");
    plugin.renderer_kind("xaxis")
}

#[test]
fn runtime_capabilities_pick_the_renderer() {
    let label = || AxisLabelOptions::new("Time");
    let cases = [
        (StaticEnvironment::modern(), RendererKind::CssTransform),
        (
            StaticEnvironment::modern().with_style_transitions(false),
            RendererKind::Canvas,
        ),
        (StaticEnvironment::headless(), RendererKind::Html),
        (StaticEnvironment::legacy(8.0), RendererKind::LegacyTransform),
        (StaticEnvironment::legacy(9.0), RendererKind::CssTransform),
    ];
    for (environment, expected) in cases {
        assert_eq!(
            selected_kind(environment.clone(), label()),
            Some(expected),
            "{environment:?}"
        );
    }
}

#[test]
fn option_overrides_win_over_capabilities() {
    assert_eq!(
        selected_kind(StaticEnvironment::modern(), AxisLabelOptions::new("Time").with_html()),
        Some(RendererKind::Html)
    );
    assert_eq!(
        selected_kind(StaticEnvironment::modern(), AxisLabelOptions::new("Time").with_canvas()),
        Some(RendererKind::Canvas)
    );
    assert_eq!(
        selected_kind(StaticEnvironment::legacy(7.0), AxisLabelOptions::new("Time").with_html()),
        Some(RendererKind::Html)
    );
}

#[test]
fn plot_level_overrides_force_the_renderer() {
    let mut plot = ChartPlot::headless(Viewport::new(640, 480)).expect("plot init");
    plot.add_axis(PlotAxis::new("yaxis", AxisPosition::Left));
    plot.set_plot_options("yaxis", AxisLabelOptions::new("Volume").with_canvas());

    let mut plugin = AxisLabelsPlugin::new();
    plugin.init(&plot);
    plugin.run_pass(&mut plot).expect("measure pass");
    assert_eq!(plugin.renderer_kind("yaxis"), Some(RendererKind::Canvas));
}

#[test]
fn options_parse_from_chart_json() {
    let options = AxisLabelOptions::from_json_str(
        r#"{"axisLabel": "Price", "axisLabelUseCanvas": true, "axisLabelFontSizePixels": 12}"#,
    )
    .expect("parse options");
    assert_eq!(options.label_text(), Some("Price"));
    assert_eq!(
        selected_kind(StaticEnvironment::modern(), options),
        Some(RendererKind::Canvas)
    );
}

#[test]
fn selection_is_total_over_every_capability_mix() {
    let environments = [
        StaticEnvironment::modern(),
        StaticEnvironment::headless(),
        StaticEnvironment::legacy(6.0),
        StaticEnvironment::legacy(10.0),
        StaticEnvironment::headless().with_style_transitions(true),
        StaticEnvironment::modern().with_canvas_text(false),
    ];
    for environment in &environments {
        let capabilities = detect_capabilities(environment);
        for use_html in [false, true] {
            for use_canvas in [false, true] {
                let overrides = RendererOverrides {
                    use_html,
                    use_canvas,
                };
                let kind = select_renderer(&capabilities, overrides);
                if use_html {
                    assert_eq!(kind, RendererKind::Html, "{environment:?}");
                }
                assert_eq!(kind, select_renderer(&capabilities, overrides));
            }
        }
    }
}
