use wasm_bindgen::prelude::*;

use crate::application::{
    BuildDailyEquitySeriesUseCase, ports::EquitySource, RenderEquityDashboardUseCase,
};
use crate::config::DashboardConfig;
use crate::domain::{
    chart::EquityChart,
    equity::EquitySeries,
    errors::{AppResult, ConfigurationError},
    logging::{LogComponent, get_logger},
};
use crate::infrastructure::{
    dom::element_by_id, CanvasRenderer, DataAttributeSource, ElementTextTarget,
};

/// Equity dashboard API exposed to JavaScript.
///
/// Holds only configuration; elements are looked up on every call so the
/// page may replace them between renders.
#[wasm_bindgen]
pub struct EquityDashboardApi {
    config: DashboardConfig,
}

#[wasm_bindgen]
impl EquityDashboardApi {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { config: DashboardConfig::default() }
    }

    /// Build from a JSON configuration; omitted fields keep their defaults
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config_json: &str) -> Result<EquityDashboardApi, JsValue> {
        let config = DashboardConfig::from_json(config_json)?;
        Ok(Self { config })
    }

    /// Read the data attribute from the configured canvas, draw, and return the P&L text
    pub fn render(&self) -> Result<String, JsValue> {
        let raw = self.read_embedded_series()?;
        Ok(self.render_raw(&raw)?)
    }

    /// Same as `render` but with the records passed in directly
    #[wasm_bindgen(js_name = renderJson)]
    pub fn render_json(&self, series_json: &str) -> Result<String, JsValue> {
        Ok(self.render_raw(series_json)?)
    }

    /// Resolved chart (labels, dataset, axis range, options) as JSON, without drawing
    #[wasm_bindgen(js_name = chartConfigJson)]
    pub fn chart_config_json(&self, series_json: &str) -> Result<String, JsValue> {
        Ok(self.resolve_chart_json(series_json)?)
    }
}

impl Default for EquityDashboardApi {
    fn default() -> Self {
        Self::new()
    }
}

impl EquityDashboardApi {
    fn read_embedded_series(&self) -> AppResult<String> {
        let canvas = element_by_id(&self.config.canvas_id)?;
        DataAttributeSource::new(canvas, self.config.data_attribute.clone()).read_series_json()
    }

    fn resolve_chart_json(&self, series_json: &str) -> AppResult<String> {
        let series = EquitySeries::from_json(series_json)?;
        let chart = EquityChart::from_series(&series, &self.config.chart)?;
        serde_json::to_string(&chart)
            .map_err(|e| ConfigurationError::Malformed(e.to_string()).into())
    }

    fn render_raw(&self, raw: &str) -> AppResult<String> {
        let surface = CanvasRenderer::by_id(&self.config.canvas_id)?;
        let target = ElementTextTarget::by_id(&self.config.output_id)?;
        let mut use_case = RenderEquityDashboardUseCase::new(self.config.clone(), surface, target);
        let report = use_case.execute(raw)?;
        Ok(report.daily_pnl)
    }
}

/// Render the dashboard with the default element ids and return the P&L text
#[wasm_bindgen(js_name = renderEquityDashboard)]
pub fn render_equity_dashboard() -> Result<String, JsValue> {
    get_logger().debug(
        LogComponent::Presentation("renderEquityDashboard"),
        "Rendering with default configuration",
    );
    EquityDashboardApi::new().render()
}

/// Forward-filled daily equity series (JSON) from account snapshots (JSON)
#[wasm_bindgen(js_name = buildDailyEquitySeries)]
pub fn build_daily_equity_series(
    snapshots_json: &str,
    starting_capital: f64,
    start_date: &str,
    end_date: &str,
) -> Result<String, JsValue> {
    let use_case = BuildDailyEquitySeriesUseCase::new(starting_capital, start_date, end_date)?;
    Ok(use_case.execute_json(snapshots_json)?)
}
