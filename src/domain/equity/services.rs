use super::entities::{CloseTime, EquityRecord, EquitySeries};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::logging::LogComponent;
use crate::log_debug;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Account state as recorded by the trading terminal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub time_last_update: DateTime<Utc>,
    pub equity: Option<f64>,
}

impl AccountSnapshot {
    pub fn new(time_last_update: DateTime<Utc>, equity: Option<f64>) -> Self {
        Self { time_last_update, equity }
    }
}

/// Builds a one-record-per-day equity series out of irregular account snapshots.
///
/// Days without a snapshot repeat the previous equity; the opening value is the
/// last snapshot before the window, or the starting capital when there is none.
#[derive(Debug, Clone)]
pub struct DailyEquityBuilder {
    starting_capital: f64,
    start: NaiveDate,
    end: NaiveDate,
}

impl DailyEquityBuilder {
    pub fn new(starting_capital: f64, start: NaiveDate, end: NaiveDate) -> DomainResult<Self> {
        if !starting_capital.is_finite() {
            return Err(DomainError::InvalidInputData(format!(
                "starting capital must be finite, got {}",
                starting_capital
            )));
        }
        if start > end {
            return Err(DomainError::InvalidDateWindow { start, end });
        }
        Ok(Self { starting_capital, start, end })
    }

    pub fn build(&self, snapshots: &[AccountSnapshot]) -> DomainResult<EquitySeries> {
        let closing_by_day = self.closing_equity_by_day(snapshots);

        let mut equity = closing_by_day
            .range(..self.start)
            .next_back()
            .map(|(_, value)| *value)
            .unwrap_or(self.starting_capital);
        let mut previous: Option<f64> = None;
        let mut records = Vec::new();

        for day in self.start.iter_days().take_while(|day| *day <= self.end) {
            if let Some(value) = closing_by_day.get(&day) {
                equity = *value;
            }
            let change = previous.map_or(0.0, |prev| round_cents(equity - prev));
            records.push(EquityRecord::new(
                CloseTime::Text(day.format("%Y-%m-%d").to_string()),
                equity,
                change,
            ));
            previous = Some(equity);
        }

        log_debug!(
            LogComponent::Domain("DailyEquityBuilder"),
            "Built {} daily records from {} snapshots",
            records.len(),
            snapshots.len()
        );

        EquitySeries::new(records)
    }

    /// Last known equity of each UTC day, rounded to cents
    fn closing_equity_by_day(&self, snapshots: &[AccountSnapshot]) -> BTreeMap<NaiveDate, f64> {
        let mut ordered: Vec<&AccountSnapshot> = snapshots.iter().collect();
        ordered.sort_by_key(|snapshot| snapshot.time_last_update);

        let mut last_equity = self.starting_capital;
        let mut by_day = BTreeMap::new();
        for snapshot in ordered {
            if let Some(value) = snapshot.equity.filter(|v| v.is_finite()) {
                last_equity = round_cents(value);
            }
            by_day.insert(snapshot.time_last_update.date_naive(), last_equity);
        }
        by_day
    }
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_cents_rounds_half_away_from_zero() {
        assert_eq!(round_cents(1.005_1), 1.01);
        assert_eq!(round_cents(-2.499), -2.5);
        assert_eq!(round_cents(10.0), 10.0);
    }
}
