use crate::domain::chart::ChartOptions;
use crate::domain::errors::{AppError, ConfigurationError};
use serde::{Deserialize, Serialize};

/// Page wiring plus chart options.
///
/// Every field has a default matching the statistics page, so `{}` is a
/// complete configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Canvas that carries the data attribute and receives the chart
    pub canvas_id: String,
    /// Attribute holding the serialized equity records
    pub data_attribute: String,
    /// Element whose text becomes the daily P&L
    pub output_id: String,
    pub currency_suffix: String,
    pub chart: ChartOptions,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            canvas_id: "equityChart".to_string(),
            data_attribute: "data-equity".to_string(),
            output_id: "dailyPL".to_string(),
            currency_suffix: " $".to_string(),
            chart: ChartOptions::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| ConfigurationError::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (field, value) in [
            ("canvas_id", &self.canvas_id),
            ("data_attribute", &self.data_attribute),
            ("output_id", &self.output_id),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigurationError::InvalidParameter {
                    field,
                    reason: "must not be empty".to_string(),
                });
            }
        }
        self.chart.validate()
    }
}
