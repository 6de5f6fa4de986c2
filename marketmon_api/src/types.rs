//! Price-history types: the public bar/range model and the provider's
//! wire envelope.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day of open/high/low/close prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// An inclusive calendar-date interval, `end >= start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Unix-second bounds for the provider query: midnight UTC at `start`,
    /// midnight UTC the day after `end` so the end date itself is included.
    pub fn period_bounds(&self) -> (i64, i64) {
        let start = self.start.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp());
        let end = self
            .end
            .succ_opt()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc().timestamp());
        (start.unwrap_or(0), end.unwrap_or(i64::MAX))
    }
}

/// Top-level response envelope from the chart endpoint.
#[derive(Debug, Deserialize)]
pub struct ChartEnvelope {
    pub chart: Chart,
}

/// Either a result list or a provider error object; never both populated.
#[derive(Debug, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

/// Provider-side failure (unknown symbol, no data in range).
#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

/// One symbol's bar data: parallel arrays indexed by timestamp.
#[derive(Debug, Deserialize)]
pub struct ChartResult {
    /// Unix seconds per bar. Absent when the range holds no trading days.
    pub timestamp: Option<Vec<i64>>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    pub quote: Vec<Quote>,
}

/// OHLC arrays aligned with `timestamp`. Individual entries are null for
/// days the provider has no quote (halts, partial listings); the whole
/// block is an empty object when the range holds no trading days.
#[derive(Debug, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}
