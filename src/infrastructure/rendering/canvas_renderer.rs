use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::application::ports::ChartSurface;
use crate::domain::{
    chart::{
        EquityChart, FontSpec, Point,
        scene::{ApproximateTextMeasurer, ChartScene, DrawCommand, PathSegment, TextMeasurer, build_scene},
    },
    errors::{AppResult, RenderingError},
    logging::{LogComponent, get_logger},
};
use crate::infrastructure::dom::canvas_by_id;

/// Canvas 2D renderer for the equity chart - Infrastructure implementation
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, RenderingError> {
        let context = canvas
            .get_context("2d")
            .map_err(|e| RenderingError::ContextUnavailable(js_message(&e)))?
            .ok_or_else(|| RenderingError::ContextUnavailable("getContext returned null".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RenderingError::ContextUnavailable("not a 2D context".to_string()))?;

        Ok(Self { canvas, context })
    }

    pub fn by_id(canvas_id: &str) -> AppResult<Self> {
        let canvas = canvas_by_id(canvas_id)?;
        Ok(Self::new(canvas)?)
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Backing-store size for this render.
    ///
    /// Responsive charts follow the width of the containing element and keep
    /// the configured aspect ratio; otherwise, or without a laid-out parent,
    /// the configured size is used.
    fn resolve_size(&self, chart: &EquityChart) -> (u32, u32) {
        let container_width = self
            .canvas
            .parent_element()
            .map_or(0, |parent| parent.client_width());
        if !chart.responsive || container_width <= 0 {
            return (chart.width, chart.height);
        }
        let width = container_width as u32;
        let height = (width as f64 * chart.height as f64 / chart.width as f64).round() as u32;
        (width, height.max(1))
    }

    /// Replay a scene onto the 2D context
    pub fn paint(&self, scene: &ChartScene) -> Result<(), RenderingError> {
        let ctx = &self.context;
        for command in &scene.commands {
            match command {
                DrawCommand::Clear { width, height } => ctx.clear_rect(0.0, 0.0, *width, *height),
                DrawCommand::Text { text, position, font, color, align, baseline, rotation } => {
                    ctx.save();
                    ctx.set_font(font);
                    ctx.set_fill_style_str(color);
                    ctx.set_text_align(align.as_css());
                    ctx.set_text_baseline(baseline.as_css());
                    let drawn = if *rotation != 0.0 {
                        ctx.translate(position.x, position.y)
                            .and_then(|_| ctx.rotate(*rotation))
                            .and_then(|_| ctx.fill_text(text, 0.0, 0.0))
                    } else {
                        ctx.fill_text(text, position.x, position.y)
                    };
                    ctx.restore();
                    drawn.map_err(draw_failed)?;
                }
                DrawCommand::Line { from, to, color, width } => {
                    ctx.begin_path();
                    ctx.move_to(from.x, from.y);
                    ctx.line_to(to.x, to.y);
                    ctx.set_stroke_style_str(color);
                    ctx.set_line_width(*width);
                    ctx.stroke();
                }
                DrawCommand::Polyline { start, segments, color, width } => {
                    ctx.begin_path();
                    ctx.move_to(start.x, start.y);
                    trace(ctx, segments);
                    ctx.set_stroke_style_str(color);
                    ctx.set_line_width(*width);
                    ctx.set_line_join("round");
                    ctx.stroke();
                }
                DrawCommand::Area { start, segments, baseline, color } => {
                    let end = segments.last().map_or(*start, PathSegment::end);
                    ctx.begin_path();
                    ctx.move_to(start.x, *baseline);
                    ctx.line_to(start.x, start.y);
                    trace(ctx, segments);
                    ctx.line_to(end.x, *baseline);
                    ctx.close_path();
                    ctx.set_fill_style_str(color);
                    ctx.fill();
                }
                DrawCommand::Rect { rect, fill, stroke, line_width } => {
                    if let Some(fill) = fill {
                        ctx.set_fill_style_str(fill);
                        ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
                    }
                    if let Some(stroke) = stroke {
                        ctx.set_stroke_style_str(stroke);
                        ctx.set_line_width(*line_width);
                        ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
                    }
                }
                DrawCommand::Circle { center, radius, fill, stroke, line_width } => {
                    ctx.begin_path();
                    ctx.arc(center.x, center.y, *radius, 0.0, TAU).map_err(draw_failed)?;
                    if let Some(fill) = fill {
                        ctx.set_fill_style_str(fill);
                        ctx.fill();
                    }
                    if let Some(stroke) = stroke {
                        ctx.set_stroke_style_str(stroke);
                        ctx.set_line_width(*line_width);
                        ctx.stroke();
                    }
                }
                DrawCommand::PushClip(rect) => {
                    ctx.save();
                    ctx.begin_path();
                    ctx.rect(rect.x, rect.y, rect.width, rect.height);
                    ctx.clip();
                }
                DrawCommand::PopClip => ctx.restore(),
            }
        }
        Ok(())
    }
}

impl ChartSurface for CanvasRenderer {
    fn mount(&mut self, chart: &EquityChart) -> AppResult<()> {
        let (width, height) = self.resolve_size(chart);
        let measurer = CanvasTextMeasurer { context: &self.context };
        let scene = build_scene(chart, width as f64, height as f64, &measurer)?;

        // resizing clears the bitmap; nothing below may reject the chart
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        get_logger().debug(
            LogComponent::Infrastructure("CanvasRenderer"),
            &format!(
                "Painting {} commands on {}x{} (label stride {})",
                scene.commands.len(),
                width,
                height,
                scene.x_label_stride
            ),
        );

        self.paint(&scene)?;
        Ok(())
    }
}

/// Measures with the live context; falls back to the estimate if the call throws
struct CanvasTextMeasurer<'a> {
    context: &'a CanvasRenderingContext2d,
}

impl TextMeasurer for CanvasTextMeasurer<'_> {
    fn text_width(&self, text: &str, font: &FontSpec) -> f64 {
        self.context.set_font(&font.to_css());
        self.context
            .measure_text(text)
            .map(|metrics| metrics.width())
            .unwrap_or_else(|_| ApproximateTextMeasurer.text_width(text, font))
    }
}

fn trace(ctx: &CanvasRenderingContext2d, segments: &[PathSegment]) {
    for segment in segments {
        match segment {
            PathSegment::LineTo(Point { x, y }) => ctx.line_to(*x, *y),
            PathSegment::BezierTo { cp1, cp2, to } => {
                ctx.bezier_curve_to(cp1.x, cp1.y, cp2.x, cp2.y, to.x, to.y)
            }
        }
    }
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn draw_failed(value: JsValue) -> RenderingError {
    RenderingError::DrawFailed(js_message(&value))
}
