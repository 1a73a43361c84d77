pub use super::value_objects::{CloseTime, DailyPnl, Equity, EquityChange};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::logging::LogComponent;
use crate::log_debug;
use serde::{Deserialize, Serialize};

/// Domain entity - one point of the equity curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityRecord {
    pub time_close: CloseTime,
    pub equity: Equity,
    pub equity_change: EquityChange,
}

impl EquityRecord {
    pub fn new(
        time_close: impl Into<CloseTime>,
        equity: impl Into<Equity>,
        equity_change: impl Into<EquityChange>,
    ) -> Self {
        Self {
            time_close: time_close.into(),
            equity: equity.into(),
            equity_change: equity_change.into(),
        }
    }
}

/// Domain entity - chronological, never empty sequence of records.
///
/// Order is whatever the producer delivered; nothing here re-sorts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<EquityRecord>", into = "Vec<EquityRecord>")]
pub struct EquitySeries {
    records: Vec<EquityRecord>,
}

impl EquitySeries {
    pub fn new(records: Vec<EquityRecord>) -> DomainResult<Self> {
        if records.is_empty() {
            return Err(DomainError::EmptySeries);
        }

        for (index, record) in records.iter().enumerate() {
            if !record.equity.value().is_finite() {
                return Err(DomainError::NonFiniteValue { index, field: "equity" });
            }
            if !record.equity_change.value().is_finite() {
                return Err(DomainError::NonFiniteValue { index, field: "equity_change" });
            }
        }

        Ok(Self { records })
    }

    /// Parse the serialized array embedded in the page.
    pub fn from_json(raw: &str) -> DomainResult<Self> {
        let records: Vec<EquityRecord> = serde_json::from_str(raw.trim())
            .map_err(|e| DomainError::InvalidInputData(e.to_string()))?;

        log_debug!(
            LogComponent::Domain("EquitySeries"),
            "Parsed {} equity records",
            records.len()
        );

        Self::new(records)
    }

    pub fn records(&self) -> &[EquityRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed series
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// X axis labels, one per record, in input order
    pub fn labels(&self) -> Vec<String> {
        self.records.iter().map(|r| r.time_close.to_string()).collect()
    }

    /// Y values, one per record, in input order
    pub fn values(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.equity.value()).collect()
    }

    pub fn latest(&self) -> &EquityRecord {
        // non-empty is enforced by `new`
        &self.records[self.records.len() - 1]
    }

    pub fn daily_pnl(&self) -> DailyPnl {
        DailyPnl::from(self.latest().equity_change)
    }

    /// Lowest and highest equity of the series
    pub fn equity_bounds(&self) -> (Equity, Equity) {
        let first = self.records[0].equity;
        self.records.iter().skip(1).fold((first, first), |(min, max), record| {
            let value = record.equity;
            (
                if value < min { value } else { min },
                if value > max { value } else { max },
            )
        })
    }
}

impl TryFrom<Vec<EquityRecord>> for EquitySeries {
    type Error = DomainError;

    fn try_from(records: Vec<EquityRecord>) -> Result<Self, Self::Error> {
        Self::new(records)
    }
}

impl From<EquitySeries> for Vec<EquityRecord> {
    fn from(series: EquitySeries) -> Self {
        series.records
    }
}
