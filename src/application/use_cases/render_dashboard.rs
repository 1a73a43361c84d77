use crate::application::ports::{ChartSurface, TextTarget};
use crate::config::DashboardConfig;
use crate::domain::{
    chart::{AxisRange, EquityChart},
    equity::EquitySeries,
    errors::{AppError, AppResult},
    logging::{LogComponent, get_logger},
};
use crate::log_error;

/// What a successful render produced
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardReport {
    pub point_count: usize,
    pub axis_range: AxisRange,
    pub daily_pnl: String,
}

/// Use Case: draw the equity curve and publish the latest daily P&L.
///
/// The series is validated and the chart resolved before either output is
/// touched, so a failure leaves surface and target as they were.
pub struct RenderEquityDashboardUseCase<S: ChartSurface, T: TextTarget> {
    config: DashboardConfig,
    surface: S,
    target: T,
}

impl<S: ChartSurface, T: TextTarget> RenderEquityDashboardUseCase<S, T> {
    pub fn new(config: DashboardConfig, surface: S, target: T) -> Self {
        Self { config, surface, target }
    }

    /// Parse `raw_series` and render it.
    pub fn execute(&mut self, raw_series: &str) -> AppResult<DashboardReport> {
        get_logger().info(
            LogComponent::Application("RenderEquityDashboard"),
            "📈 Rendering equity dashboard",
        );

        let series = EquitySeries::from_json(raw_series).map_err(|e| {
            log_error!(
                LogComponent::Application("RenderEquityDashboard"),
                "❌ Rejected equity data: {}",
                e
            );
            AppError::from(e)
        })?;

        self.render_series(&series)
    }

    pub fn render_series(&mut self, series: &EquitySeries) -> AppResult<DashboardReport> {
        let chart = EquityChart::from_series(series, &self.config.chart)?;
        let daily_pnl = series
            .daily_pnl()
            .format_with_suffix(&self.config.currency_suffix);

        self.surface.mount(&chart)?;
        self.target.write_text(&daily_pnl)?;

        get_logger().info(
            LogComponent::Application("RenderEquityDashboard"),
            &format!(
                "✅ Rendered {} points, axis {:.2}..{:.2}, daily P&L {}",
                chart.point_count(),
                chart.y_range.min,
                chart.y_range.max,
                daily_pnl
            ),
        );

        Ok(DashboardReport {
            point_count: chart.point_count(),
            axis_range: chart.y_range,
            daily_pnl,
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn into_parts(self) -> (S, T) {
        (self.surface, self.target)
    }
}
