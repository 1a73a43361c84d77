use equity_curve_wasm::domain::chart::scene::{
    ApproximateTextMeasurer, ChartScene, DrawCommand, PathSegment, TextAlign, TextBaseline,
    build_scene,
};
use equity_curve_wasm::domain::chart::{ChartOptions, EquityChart, LegendAlign, LegendPosition};
use equity_curve_wasm::domain::equity::{EquityRecord, EquitySeries};
use equity_curve_wasm::domain::errors::RenderingError;
use strum::IntoEnumIterator;

const TWO_DAYS: &str = r#"[
    {"time_close": "2026-01-01", "equity": 100, "equity_change": 0},
    {"time_close": "2026-01-02", "equity": 110, "equity_change": 10}
]"#;

fn chart(raw: &str, options: &ChartOptions) -> EquityChart {
    let series = EquitySeries::from_json(raw).unwrap();
    EquityChart::from_series(&series, options).unwrap()
}

fn scene(chart: &EquityChart) -> ChartScene {
    build_scene(chart, chart.width as f64, chart.height as f64, &ApproximateTextMeasurer).unwrap()
}

fn texts(scene: &ChartScene, wanted: TextAlign, wanted_baseline: TextBaseline) -> Vec<String> {
    scene
        .commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Text { text, align, baseline, .. }
                if *align == wanted && *baseline == wanted_baseline =>
            {
                Some(text.clone())
            }
            _ => None,
        })
        .collect()
}

fn daily_series(days: usize) -> EquitySeries {
    let records = (0..days)
        .map(|i| EquityRecord::new(format!("2026-{:02}-{:02}", 1 + i / 28, 1 + i % 28), 1000.0 + i as f64, 1.0))
        .collect();
    EquitySeries::new(records).unwrap()
}

#[test]
fn value_axis_labels_for_two_day_scenario() {
    let scene = scene(&chart(TWO_DAYS, &ChartOptions::default()));
    let labels = texts(&scene, TextAlign::Right, TextBaseline::Middle);
    insta::assert_snapshot!(labels.join(" | "), @"95 | 100 | 105 | 110 | 115.5");
    assert_eq!(scene.y_ticks.len(), 5);
}

#[test]
fn points_span_the_plot_from_edge_to_edge() {
    let scene = scene(&chart(TWO_DAYS, &ChartOptions::default()));
    let plot = scene.plot_area;
    assert_eq!(scene.points.len(), 2);
    assert!((scene.points[0].x - plot.x).abs() < 1e-9);
    assert!((scene.points[1].x - plot.right()).abs() < 1e-9);
    // higher equity sits higher on the surface
    assert!(scene.points[1].y < scene.points[0].y);
}

#[test]
fn lone_point_is_centered() {
    let raw = r#"[{"time_close": "2026-03-01", "equity": 100, "equity_change": 0}]"#;
    let scene = scene(&chart(raw, &ChartOptions::default()));
    let plot = scene.plot_area;
    let point = scene.points[0];
    assert!((point.x - (plot.x + plot.width / 2.0)).abs() < 1e-9);
    assert!((point.y - (plot.y + plot.height / 2.0)).abs() < 1e-9);
    assert!(!scene.commands.iter().any(|c| matches!(c, DrawCommand::Polyline { .. })));
    assert_eq!(
        scene.commands.iter().filter(|c| matches!(c, DrawCommand::Circle { .. })).count(),
        1
    );
}

#[test]
fn default_layout_has_title_and_right_aligned_legend() {
    let scene = scene(&chart(TWO_DAYS, &ChartOptions::default()));
    let title = scene.title_area.unwrap();
    let legend = scene.legend_item.unwrap();

    assert!(title.bottom() <= legend.y);
    assert!(legend.bottom() <= scene.plot_area.y);
    assert!((legend.right() - 780.0).abs() < 1e-9);
    assert!(texts(&scene, TextAlign::Center, TextBaseline::Middle).contains(&"Equity Curve".to_string()));
    assert!(texts(&scene, TextAlign::Left, TextBaseline::Middle).contains(&"2026".to_string()));
}

#[test]
fn every_legend_placement_stays_outside_the_plot() {
    for position in LegendPosition::iter() {
        for align in LegendAlign::iter() {
            let mut options = ChartOptions::default();
            options.legend.position = position;
            options.legend.align = align;
            let scene = scene(&chart(TWO_DAYS, &options));
            let item = scene.legend_item.unwrap();
            let plot = scene.plot_area;
            let overlaps = item.x < plot.right()
                && item.right() > plot.x
                && item.y < plot.bottom()
                && item.bottom() > plot.y;
            assert!(!overlaps, "{} {} legend overlaps the plot", position, align);
        }
    }
}

#[test]
fn hidden_decorations_produce_no_text() {
    let mut options = ChartOptions::default();
    options.title = String::new();
    options.legend.display = false;
    options.x_axis_title = String::new();
    options.y_axis_title = String::new();
    let scene = scene(&chart(TWO_DAYS, &options));

    assert!(scene.title_area.is_none());
    assert!(scene.legend_item.is_none());
    assert!(!texts(&scene, TextAlign::Center, TextBaseline::Middle).iter().any(|t| t == "Equity Curve"));
}

#[test]
fn y_axis_title_is_rotated() {
    let scene = scene(&chart(TWO_DAYS, &ChartOptions::default()));
    let rotated = scene.commands.iter().find_map(|command| match command {
        DrawCommand::Text { text, rotation, .. } if *rotation != 0.0 => Some(text.clone()),
        _ => None,
    });
    assert_eq!(rotated.as_deref(), Some("Equity ($)"));
}

#[test]
fn zero_tension_draws_straight_segments() {
    let mut options = ChartOptions::default();
    options.tension = 0.0;
    let scene = scene(&chart(TWO_DAYS, &options));
    let segments = scene.commands.iter().find_map(|command| match command {
        DrawCommand::Polyline { segments, .. } => Some(segments.clone()),
        _ => None,
    });
    let segments = segments.unwrap();
    assert!(segments.iter().all(|s| matches!(s, PathSegment::LineTo(_))));
}

#[test]
fn fill_option_adds_area_under_line() {
    let mut options = ChartOptions::default();
    assert!(!scene(&chart(TWO_DAYS, &options)).commands.iter().any(|c| matches!(c, DrawCommand::Area { .. })));
    options.fill = true;
    assert!(scene(&chart(TWO_DAYS, &options)).commands.iter().any(|c| matches!(c, DrawCommand::Area { .. })));
}

#[test]
fn dataset_drawing_is_clipped_to_plot() {
    let scene = scene(&chart(TWO_DAYS, &ChartOptions::default()));
    let push = scene.commands.iter().position(|c| matches!(c, DrawCommand::PushClip(_))).unwrap();
    let pop = scene.commands.iter().position(|c| matches!(c, DrawCommand::PopClip)).unwrap();
    assert!(push < pop);
    assert_eq!(scene.commands.first(), Some(&DrawCommand::Clear { width: 800.0, height: 400.0 }));
    for command in &scene.commands[push..pop] {
        assert!(!matches!(command, DrawCommand::Text { .. }));
    }
}

#[test]
fn crowded_dates_are_thinned_out() {
    let series = daily_series(300);
    let chart = EquityChart::from_series(&series, &ChartOptions::default()).unwrap();
    let scene = scene(&chart);

    assert!(scene.x_label_stride > 1);
    let shown = texts(&scene, TextAlign::Center, TextBaseline::Top)
        .into_iter()
        .filter(|t| t.starts_with("2026-"))
        .count();
    assert_eq!(shown, 300usize.div_ceil(scene.x_label_stride));
    assert!(scene.points.iter().all(|p| {
        let plot = scene.plot_area;
        p.x >= plot.x - 1e-6 && p.x <= plot.right() + 1e-6 && p.y >= plot.y - 1e-6 && p.y <= plot.bottom() + 1e-6
    }));
}

#[test]
fn tiny_surface_is_rejected() {
    let chart = chart(TWO_DAYS, &ChartOptions::default());
    assert_eq!(
        build_scene(&chart, 40.0, 40.0, &ApproximateTextMeasurer),
        Err(RenderingError::SurfaceTooSmall { width: 40, height: 40 })
    );
}

#[test]
fn container_sized_default_chart_keeps_a_usable_plot() {
    let chart = chart(TWO_DAYS, &ChartOptions::default());
    let scene = build_scene(&chart, 640.0, 320.0, &ApproximateTextMeasurer).unwrap();
    assert!(scene.plot_area.height > 150.0, "{:?}", scene.plot_area);
    assert!(scene.y_ticks.len() >= 3);
}
