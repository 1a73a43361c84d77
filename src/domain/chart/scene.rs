//! Backend-independent description of one painted chart.
//!
//! `build_scene` turns an [`EquityChart`] and a surface size into draw
//! commands. Painters only replay the commands, so layout is testable
//! without a canvas.

use super::entities::{EquityChart, Legend};
use super::services::{
    format_tick, label_stride, max_ticks_for, spline_control_points, value_ticks,
};
use super::value_objects::{Color, FontSpec, LegendAlign, LegendPosition, Point, Rect};
use crate::domain::errors::RenderingError;
use std::f64::consts::FRAC_PI_2;

pub const OUTER_PADDING: f64 = 10.0;
pub const TITLE_PADDING: f64 = 10.0;
pub const TICK_PADDING: f64 = 6.0;
pub const AXIS_TITLE_PADDING: f64 = 4.0;
pub const LABEL_GAP: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
}

impl TextBaseline {
    pub fn as_css(&self) -> &'static str {
        match self {
            TextBaseline::Top => "top",
            TextBaseline::Middle => "middle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    LineTo(Point),
    BezierTo { cp1: Point, cp2: Point, to: Point },
}

impl PathSegment {
    pub fn end(&self) -> Point {
        match self {
            PathSegment::LineTo(to) | PathSegment::BezierTo { to, .. } => *to,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f64, height: f64 },
    Text {
        text: String,
        position: Point,
        font: String,
        color: String,
        align: TextAlign,
        baseline: TextBaseline,
        /// Radians, applied around `position`
        rotation: f64,
    },
    Line { from: Point, to: Point, color: String, width: f64 },
    Polyline { start: Point, segments: Vec<PathSegment>, color: String, width: f64 },
    /// Closed area between the path and the horizontal line at `baseline`
    Area { start: Point, segments: Vec<PathSegment>, baseline: f64, color: String },
    Rect { rect: Rect, fill: Option<String>, stroke: Option<String>, line_width: f64 },
    Circle { center: Point, radius: f64, fill: Option<String>, stroke: Option<String>, line_width: f64 },
    PushClip(Rect),
    PopClip,
}

/// Text metrics provider; the canvas measures, tests approximate
pub trait TextMeasurer {
    fn text_width(&self, text: &str, font: &FontSpec) -> f64;
}

/// Character-count estimate for surfaces that cannot measure text
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateTextMeasurer;

impl TextMeasurer for ApproximateTextMeasurer {
    fn text_width(&self, text: &str, font: &FontSpec) -> f64 {
        text.chars().count() as f64 * font.size * 0.55
    }
}

/// Result of laying out one chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartScene {
    pub width: f64,
    pub height: f64,
    pub plot_area: Rect,
    pub title_area: Option<Rect>,
    /// Bounds of the legend item (color box plus label)
    pub legend_item: Option<Rect>,
    pub points: Vec<Point>,
    pub y_ticks: Vec<f64>,
    pub x_label_stride: usize,
    pub commands: Vec<DrawCommand>,
}

pub fn build_scene(
    chart: &EquityChart,
    width: f64,
    height: f64,
    measurer: &dyn TextMeasurer,
) -> Result<ChartScene, RenderingError> {
    let too_small = || RenderingError::SurfaceTooSmall {
        width: width.max(0.0) as u32,
        height: height.max(0.0) as u32,
    };
    let text_color = Color::TEXT.to_css();
    let grid_color = Color::GRID.to_css();
    let tick_font = EquityChart::tick_font();

    let mut commands = vec![DrawCommand::Clear { width, height }];
    let mut area = Rect::new(
        OUTER_PADDING,
        OUTER_PADDING,
        width - 2.0 * OUTER_PADDING,
        height - 2.0 * OUTER_PADDING,
    );

    // Title
    let title_area = chart.title.as_ref().map(|title| {
        let block = title.font.line_height() + 2.0 * TITLE_PADDING;
        let rect = Rect::new(area.x, area.y, area.width, block);
        commands.push(DrawCommand::Text {
            text: title.text.clone(),
            position: Point::new(rect.x + rect.width / 2.0, rect.y + block / 2.0),
            font: title.font.to_css(),
            color: text_color.clone(),
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
            rotation: 0.0,
        });
        area.y += block;
        area.height -= block;
        rect
    });

    // Legend
    let legend_item = chart
        .legend
        .as_ref()
        .map(|legend| place_legend(legend, &chart.dataset.label, &mut area, measurer));
    if let (Some(legend), Some(item)) = (chart.legend.as_ref(), legend_item) {
        let box_rect = Rect::new(item.x, item.y, legend.box_width, legend.font.size);
        commands.push(DrawCommand::Rect {
            rect: box_rect,
            fill: Some(chart.dataset.point_fill.to_css()),
            stroke: Some(chart.dataset.border_color.to_css()),
            line_width: chart.dataset.border_width,
        });
        commands.push(DrawCommand::Text {
            text: chart.dataset.label.clone(),
            position: Point::new(
                box_rect.right() + legend.font.size / 2.0,
                item.y + item.height / 2.0,
            ),
            font: legend.font.to_css(),
            color: text_color.clone(),
            align: TextAlign::Left,
            baseline: TextBaseline::Middle,
            rotation: 0.0,
        });
    }

    // Bottom axis block
    let x_tick_block = tick_font.line_height() + TICK_PADDING;
    let x_title_block = chart
        .x_axis
        .as_ref()
        .map_or(0.0, |axis| axis.font.line_height() + 2.0 * AXIS_TITLE_PADDING);
    area.height -= x_tick_block + x_title_block;
    if area.height <= 0.0 {
        return Err(too_small());
    }

    // Left axis block, sized from the tick labels of the remaining height
    let (y_ticks, step) = value_ticks(&chart.y_range, max_ticks_for(area.height));
    let y_labels: Vec<String> = y_ticks.iter().map(|v| format_tick(*v, step)).collect();
    let y_tick_block = y_labels
        .iter()
        .map(|label| measurer.text_width(label, &tick_font))
        .fold(0.0, f64::max)
        + TICK_PADDING;
    let y_title_block = chart
        .y_axis
        .as_ref()
        .map_or(0.0, |axis| axis.font.line_height() + 2.0 * AXIS_TITLE_PADDING);

    let label_widths: Vec<f64> = chart
        .labels
        .iter()
        .map(|label| measurer.text_width(label, &tick_font))
        .collect();
    // the last label is centred on the right edge of the plot
    let right_overhang = label_widths
        .last()
        .map_or(0.0, |w| (w / 2.0 - OUTER_PADDING).max(0.0));

    let plot_area = Rect::new(
        area.x + y_title_block + y_tick_block,
        area.y,
        area.width - y_title_block - y_tick_block - right_overhang,
        area.height,
    );
    if plot_area.width <= 0.0 || plot_area.height <= 0.0 {
        return Err(too_small());
    }

    // Value grid and labels
    for (value, label) in y_ticks.iter().zip(y_labels) {
        let y = value_to_y(&plot_area, chart, *value);
        commands.push(DrawCommand::Line {
            from: Point::new(plot_area.x, y),
            to: Point::new(plot_area.right(), y),
            color: grid_color.clone(),
            width: 1.0,
        });
        commands.push(DrawCommand::Text {
            text: label,
            position: Point::new(plot_area.x - TICK_PADDING, y),
            font: tick_font.to_css(),
            color: text_color.clone(),
            align: TextAlign::Right,
            baseline: TextBaseline::Middle,
            rotation: 0.0,
        });
    }

    // Category grid and labels
    let points: Vec<Point> = chart
        .dataset
        .values
        .iter()
        .enumerate()
        .map(|(i, value)| Point::new(index_to_x(&plot_area, i, chart.point_count()), value_to_y(&plot_area, chart, *value)))
        .collect();
    let x_label_stride = label_stride(&label_widths, plot_area.width, LABEL_GAP);
    for (i, label) in chart.labels.iter().enumerate().step_by(x_label_stride) {
        let x = index_to_x(&plot_area, i, chart.labels.len());
        commands.push(DrawCommand::Line {
            from: Point::new(x, plot_area.y),
            to: Point::new(x, plot_area.bottom()),
            color: grid_color.clone(),
            width: 1.0,
        });
        commands.push(DrawCommand::Text {
            text: label.clone(),
            position: Point::new(x, plot_area.bottom() + TICK_PADDING),
            font: tick_font.to_css(),
            color: text_color.clone(),
            align: TextAlign::Center,
            baseline: TextBaseline::Top,
            rotation: 0.0,
        });
    }

    // Axis titles
    if let Some(axis) = &chart.x_axis {
        commands.push(DrawCommand::Text {
            text: axis.text.clone(),
            position: Point::new(
                plot_area.x + plot_area.width / 2.0,
                plot_area.bottom() + x_tick_block + AXIS_TITLE_PADDING,
            ),
            font: axis.font.to_css(),
            color: text_color.clone(),
            align: TextAlign::Center,
            baseline: TextBaseline::Top,
            rotation: 0.0,
        });
    }
    if let Some(axis) = &chart.y_axis {
        commands.push(DrawCommand::Text {
            text: axis.text.clone(),
            position: Point::new(area.x + y_title_block / 2.0, plot_area.y + plot_area.height / 2.0),
            font: axis.font.to_css(),
            color: text_color,
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
            rotation: -FRAC_PI_2,
        });
    }

    // Dataset, clipped to the plot
    commands.push(DrawCommand::PushClip(plot_area));
    if let Some((start, rest)) = points.split_first() {
        let segments = line_segments(&points, chart.dataset.tension, &plot_area);
        if chart.dataset.fill && !rest.is_empty() {
            commands.push(DrawCommand::Area {
                start: *start,
                segments: segments.clone(),
                baseline: plot_area.bottom(),
                color: chart.dataset.border_color.with_alpha(0.2).to_css(),
            });
        }
        if !rest.is_empty() {
            commands.push(DrawCommand::Polyline {
                start: *start,
                segments,
                color: chart.dataset.border_color.to_css(),
                width: chart.dataset.border_width,
            });
        }
        if chart.dataset.point_radius > 0.0 {
            for point in &points {
                commands.push(DrawCommand::Circle {
                    center: *point,
                    radius: chart.dataset.point_radius,
                    fill: Some(chart.dataset.point_fill.to_css()),
                    stroke: Some(chart.dataset.border_color.to_css()),
                    line_width: 1.0,
                });
            }
        }
    }
    commands.push(DrawCommand::PopClip);

    Ok(ChartScene {
        width,
        height,
        plot_area,
        title_area,
        legend_item,
        points,
        y_ticks,
        x_label_stride,
        commands,
    })
}

/// Reserve the legend block on `area` and return the item bounds.
fn place_legend(legend: &Legend, label: &str, area: &mut Rect, measurer: &dyn TextMeasurer) -> Rect {
    let item_height = legend.font.size;
    let item_width =
        legend.box_width + legend.font.size / 2.0 + measurer.text_width(label, &legend.font);

    match legend.position {
        LegendPosition::Top | LegendPosition::Bottom => {
            let block = item_height + 2.0 * legend.padding;
            let x = match legend.align {
                LegendAlign::Start => area.x + legend.padding,
                LegendAlign::Center => area.x + (area.width - item_width) / 2.0,
                LegendAlign::End => area.right() - legend.padding - item_width,
            };
            let y = if legend.position == LegendPosition::Top {
                let y = area.y + legend.padding;
                area.y += block;
                y
            } else {
                area.bottom() - block + legend.padding
            };
            area.height -= block;
            Rect::new(x, y, item_width, item_height)
        }
        LegendPosition::Left | LegendPosition::Right => {
            let block = item_width + 2.0 * legend.padding;
            let y = match legend.align {
                LegendAlign::Start => area.y + legend.padding,
                LegendAlign::Center => area.y + (area.height - item_height) / 2.0,
                LegendAlign::End => area.bottom() - legend.padding - item_height,
            };
            let x = if legend.position == LegendPosition::Left {
                let x = area.x + legend.padding;
                area.x += block;
                x
            } else {
                area.right() - block + legend.padding
            };
            area.width -= block;
            Rect::new(x, y, item_width, item_height)
        }
    }
}

fn value_to_y(plot: &Rect, chart: &EquityChart, value: f64) -> f64 {
    plot.bottom() - chart.y_range.normalize(value) * plot.height
}

/// A lone point sits in the middle; otherwise points span the full width.
fn index_to_x(plot: &Rect, index: usize, count: usize) -> f64 {
    if count <= 1 {
        plot.x + plot.width / 2.0
    } else {
        plot.x + index as f64 * plot.width / (count - 1) as f64
    }
}

fn line_segments(points: &[Point], tension: f64, bounds: &Rect) -> Vec<PathSegment> {
    if tension <= 0.0 {
        return points.iter().skip(1).map(|p| PathSegment::LineTo(*p)).collect();
    }
    let handles = spline_control_points(points, tension);
    let clamp = |p: Point| {
        Point::new(
            p.x.clamp(bounds.x, bounds.right()),
            p.y.clamp(bounds.y, bounds.bottom()),
        )
    };
    points
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, to)| PathSegment::BezierTo {
            cp1: clamp(handles[i - 1].next),
            cp2: clamp(handles[i].previous),
            to: *to,
        })
        .collect()
}
