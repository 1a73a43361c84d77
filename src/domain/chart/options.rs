use super::value_objects::{AxisPadding, Color, LegendAlign, LegendPosition};
use crate::domain::errors::ConfigurationError;
use serde::{Deserialize, Serialize};

/// Legend options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LegendOptions {
    pub display: bool,
    pub position: LegendPosition,
    pub align: LegendAlign,
    pub box_width: f64,
    pub padding: f64,
    pub font_size: f64,
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            display: true,
            position: LegendPosition::Top,
            align: LegendAlign::End,
            box_width: 20.0,
            padding: 10.0,
            font_size: 14.0,
        }
    }
}

/// Everything that shapes the equity chart apart from the data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartOptions {
    pub title: String,
    pub title_font_size: f64,
    pub dataset_label: String,
    pub line_color: String,
    pub line_width: f64,
    pub tension: f64,
    pub point_radius: f64,
    pub fill: bool,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub axis_padding: AxisPadding,
    pub responsive: bool,
    pub width: u32,
    pub height: u32,
    pub legend: LegendOptions,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: "Equity Curve".to_string(),
            title_font_size: 20.0,
            dataset_label: "2026".to_string(),
            line_color: "rgb(75, 192, 192)".to_string(),
            line_width: 3.0,
            tension: 0.1,
            point_radius: 3.0,
            fill: false,
            x_axis_title: "Date".to_string(),
            y_axis_title: "Equity ($)".to_string(),
            axis_padding: AxisPadding::default(),
            responsive: true,
            width: 800,
            height: 400,
            legend: LegendOptions::default(),
        }
    }
}

impl ChartOptions {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(0.0..=1.0).contains(&self.tension) {
            return Err(invalid("tension", format!("{} is outside [0, 1]", self.tension)));
        }
        for (field, value) in [
            ("axis_padding.below", self.axis_padding.below),
            ("axis_padding.above", self.axis_padding.above),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, format!("{} must be a finite, non-negative fraction", value)));
            }
        }
        if self.axis_padding.below >= 1.0 {
            return Err(invalid("axis_padding.below", "must be below 1.0".to_string()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(invalid("width/height", format!("{}x{} has no area", self.width, self.height)));
        }
        for (field, value) in [
            ("title_font_size", self.title_font_size),
            ("line_width", self.line_width),
            ("legend.font_size", self.legend.font_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, format!("{} must be positive", value)));
            }
        }
        for (field, value) in [
            ("point_radius", self.point_radius),
            ("legend.box_width", self.legend.box_width),
            ("legend.padding", self.legend.padding),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, format!("{} must not be negative", value)));
            }
        }
        self.line_color
            .parse::<Color>()
            .map(|_| ())
            .map_err(|_| invalid("line_color", format!("unsupported color `{}`", self.line_color)))
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigurationError {
    ConfigurationError::InvalidParameter { field, reason }
}
