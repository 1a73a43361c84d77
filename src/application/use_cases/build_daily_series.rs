use crate::domain::{
    equity::{AccountSnapshot, DailyEquityBuilder, EquitySeries},
    errors::{AppResult, DomainError},
    logging::LogComponent,
};
use crate::log_info;
use chrono::NaiveDate;

/// Use Case: turn raw account snapshots into the daily series the chart consumes
pub struct BuildDailyEquitySeriesUseCase {
    builder: DailyEquityBuilder,
}

impl BuildDailyEquitySeriesUseCase {
    /// Dates are `YYYY-MM-DD`, both ends inclusive.
    pub fn new(starting_capital: f64, start: &str, end: &str) -> AppResult<Self> {
        let builder = DailyEquityBuilder::new(starting_capital, parse_day(start)?, parse_day(end)?)?;
        Ok(Self { builder })
    }

    pub fn execute(&self, snapshots: &[AccountSnapshot]) -> AppResult<EquitySeries> {
        let series = self.builder.build(snapshots)?;
        log_info!(
            LogComponent::Application("BuildDailyEquitySeries"),
            "🗓️ Daily series ready: {} days",
            series.len()
        );
        Ok(series)
    }

    /// JSON in, JSON out, in the shape the chart page embeds.
    pub fn execute_json(&self, snapshots_json: &str) -> AppResult<String> {
        let snapshots: Vec<AccountSnapshot> = serde_json::from_str(snapshots_json)
            .map_err(|e| DomainError::InvalidInputData(e.to_string()))?;
        let series = self.execute(&snapshots)?;
        serde_json::to_string(&series)
            .map_err(|e| DomainError::InvalidInputData(e.to_string()).into())
    }
}

fn parse_day(raw: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| DomainError::InvalidInputData(format!("bad date `{}`: {}", raw, e)))
}
