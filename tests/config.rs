use equity_curve_wasm::config::DashboardConfig;
use equity_curve_wasm::domain::chart::{Color, LegendPosition};
use equity_curve_wasm::domain::errors::{AppError, ConfigurationError};

#[test]
fn empty_object_yields_page_defaults() {
    let config = DashboardConfig::from_json("{}").unwrap();
    assert_eq!(config, DashboardConfig::default());
    assert_eq!(config.canvas_id, "equityChart");
    assert_eq!(config.data_attribute, "data-equity");
    assert_eq!(config.output_id, "dailyPL");
    assert_eq!(config.currency_suffix, " $");
}

#[test]
fn nested_chart_options_override_selectively() {
    let config = DashboardConfig::from_json(
        r#"{"canvas_id": "curve", "chart": {"tension": 0.4, "legend": {"position": "bottom"}}}"#,
    )
    .unwrap();
    assert_eq!(config.canvas_id, "curve");
    assert_eq!(config.chart.tension, 0.4);
    assert_eq!(config.chart.legend.position, LegendPosition::Bottom);
    assert_eq!(config.chart.width, 800);
}

#[test]
fn unknown_fields_are_rejected() {
    assert!(matches!(
        DashboardConfig::from_json(r#"{"canvasId": "x"}"#),
        Err(AppError::Configuration(ConfigurationError::Malformed(_)))
    ));
}

#[test]
fn out_of_range_values_name_the_field() {
    let cases = [
        (r#"{"output_id": "  "}"#, "output_id"),
        (r#"{"chart": {"tension": 1.5}}"#, "tension"),
        (r#"{"chart": {"width": 0}}"#, "width/height"),
        (r#"{"chart": {"line_color": "blue"}}"#, "line_color"),
        (r#"{"chart": {"axis_padding": {"below": 1.0, "above": 0.05}}}"#, "axis_padding.below"),
    ];
    for (raw, expected) in cases {
        match DashboardConfig::from_json(raw) {
            Err(AppError::Configuration(ConfigurationError::InvalidParameter { field, .. })) => {
                assert_eq!(field, expected, "{}", raw)
            }
            other => panic!("{} should fail on {}, got {:?}", raw, expected, other),
        }
    }
}

#[test]
fn colors_parse_from_css_notation() {
    assert_eq!("#4bc0c0".parse::<Color>().unwrap(), Color::rgb(75, 192, 192));
    assert_eq!("rgb(75, 192, 192)".parse::<Color>().unwrap().to_css(), "rgb(75, 192, 192)");
    assert_eq!("rgba(0, 0, 0, 0.1)".parse::<Color>().unwrap(), Color::GRID);
    assert!("hsl(1, 2%, 3%)".parse::<Color>().is_err());
    assert!("#fff".parse::<Color>().is_err());
}
