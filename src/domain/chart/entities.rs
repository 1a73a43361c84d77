use super::options::ChartOptions;
use super::value_objects::{AxisRange, Color, FontSpec, LegendAlign, LegendPosition};
use crate::domain::equity::EquitySeries;
use crate::domain::errors::ConfigurationError;
use serde::Serialize;

/// Point fill used by the charting defaults
const POINT_FILL: Color = Color { r: 0, g: 0, b: 0, a: 0.1 };

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineDataset {
    pub label: String,
    pub values: Vec<f64>,
    pub border_color: Color,
    pub border_width: f64,
    pub fill: bool,
    pub tension: f64,
    pub point_radius: f64,
    pub point_fill: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartTitle {
    pub text: String,
    pub font: FontSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub position: LegendPosition,
    pub align: LegendAlign,
    pub box_width: f64,
    pub padding: f64,
    pub font: FontSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTitle {
    pub text: String,
    pub font: FontSpec,
}

/// Domain entity - fully resolved line chart of the equity curve
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityChart {
    pub title: Option<ChartTitle>,
    pub labels: Vec<String>,
    pub dataset: LineDataset,
    pub legend: Option<Legend>,
    pub x_axis: Option<AxisTitle>,
    pub y_axis: Option<AxisTitle>,
    pub y_range: AxisRange,
    pub responsive: bool,
    pub width: u32,
    pub height: u32,
}

impl EquityChart {
    pub const TICK_FONT_SIZE: f64 = 12.0;

    pub fn from_series(series: &EquitySeries, options: &ChartOptions) -> Result<Self, ConfigurationError> {
        options.validate()?;
        let border_color: Color = options.line_color.parse()?;

        let (low, high) = series.equity_bounds();
        let y_range = AxisRange::padded(low.value(), high.value(), options.axis_padding);

        let title = (!options.title.is_empty()).then(|| ChartTitle {
            text: options.title.clone(),
            font: FontSpec::bold(options.title_font_size),
        });
        let legend = options.legend.display.then(|| Legend {
            position: options.legend.position,
            align: options.legend.align,
            box_width: options.legend.box_width,
            padding: options.legend.padding,
            font: FontSpec::new(options.legend.font_size),
        });

        Ok(Self {
            title,
            labels: series.labels(),
            dataset: LineDataset {
                label: options.dataset_label.clone(),
                values: series.values(),
                border_color,
                border_width: options.line_width,
                fill: options.fill,
                tension: options.tension,
                point_radius: options.point_radius,
                point_fill: POINT_FILL,
            },
            legend,
            x_axis: axis_title(&options.x_axis_title),
            y_axis: axis_title(&options.y_axis_title),
            y_range,
            responsive: options.responsive,
            width: options.width,
            height: options.height,
        })
    }

    pub fn point_count(&self) -> usize {
        self.dataset.values.len()
    }

    pub fn tick_font() -> FontSpec {
        FontSpec::new(Self::TICK_FONT_SIZE)
    }
}

fn axis_title(text: &str) -> Option<AxisTitle> {
    (!text.is_empty()).then(|| AxisTitle {
        text: text.to_string(),
        font: FontSpec::new(EquityChart::TICK_FONT_SIZE),
    })
}
