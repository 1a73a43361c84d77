use derive_more::{Constructor, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Value Object - account equity at a point in time
#[derive(Debug, Clone, Copy, PartialEq, From, Into, Deref, Constructor, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Equity(f64);

impl Equity {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialOrd for Equity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

/// Value Object - equity change over the record's period
#[derive(Debug, Clone, Copy, PartialEq, From, Into, Deref, Constructor, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquityChange(f64);

impl EquityChange {
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Value Object - close time as delivered by the page.
///
/// Kept verbatim: it is only ever shown as an axis label, so no parsing happens here.
#[derive(Debug, Clone, PartialEq, Display, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CloseTime {
    #[display(fmt = "{}", _0)]
    Text(String),
    #[display(fmt = "{}", _0)]
    Numeric(serde_json::Number),
}

impl From<&str> for CloseTime {
    fn from(value: &str) -> Self {
        CloseTime::Text(value.to_string())
    }
}

impl From<String> for CloseTime {
    fn from(value: String) -> Self {
        CloseTime::Text(value)
    }
}

impl From<i64> for CloseTime {
    fn from(value: i64) -> Self {
        CloseTime::Numeric(value.into())
    }
}

/// Value Object - the most recent period's profit or loss
#[derive(Debug, Clone, Copy, PartialEq, From, Into, Constructor)]
pub struct DailyPnl(f64);

impl DailyPnl {
    pub const DEFAULT_SUFFIX: &'static str = " $";

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Two decimals followed by `suffix`, e.g. `-123.40 $`.
    ///
    /// Ties round away from zero, like the page's `toFixed(2)`.
    pub fn format_with_suffix(&self, suffix: &str) -> String {
        format!("{}{}", to_fixed_cents(self.0), suffix)
    }
}

/// Two-decimal text decided on the exact decimal expansion of `value`.
///
/// `0.125` becomes `0.13`, while `2.675` (stored as `2.67499...`) stays `2.67`.
fn to_fixed_cents(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    // a finite f64 terminates within 1074 fraction digits, so this is exact
    let exact = format!("{:.1074}", value.abs());
    let (integer, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let mut digits: Vec<u8> = integer
        .bytes()
        .chain(fraction.bytes().chain(std::iter::repeat(b'0')).take(2))
        .collect();
    if fraction.as_bytes().get(2).is_some_and(|digit| *digit >= b'5') {
        increment_digits(&mut digits);
    }

    let (whole, cents) = digits.split_at(digits.len() - 2);
    // -0.0 is not negative here, so it prints as "0.00"
    let sign = if value < 0.0 { "-" } else { "" };
    format!(
        "{}{}.{}",
        sign,
        whole.iter().map(|d| *d as char).collect::<String>(),
        cents.iter().map(|d| *d as char).collect::<String>()
    )
}

fn increment_digits(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

impl From<EquityChange> for DailyPnl {
    fn from(change: EquityChange) -> Self {
        Self(change.value())
    }
}

impl std::fmt::Display for DailyPnl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_with_suffix(Self::DEFAULT_SUFFIX))
    }
}
