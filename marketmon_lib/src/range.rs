//! Timeframe labels and date-range resolution.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, Utc};

use marketmon_api::DateRange;

/// A user-selectable lookback window. Closed set: these four labels are the
/// whole timeframe selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeframe {
    OneMonth,
    #[default]
    ThreeMonths,
    SixMonths,
    OneYear,
}

impl Timeframe {
    /// Lookback depth in calendar days.
    pub fn days(&self) -> i64 {
        match self {
            Timeframe::OneMonth => 30,
            Timeframe::ThreeMonths => 90,
            Timeframe::SixMonths => 180,
            Timeframe::OneYear => 365,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::OneMonth => "1 month",
            Timeframe::ThreeMonths => "3 months",
            Timeframe::SixMonths => "6 months",
            Timeframe::OneYear => "1 year",
        }
    }

    /// Resolves to an absolute interval ending today (UTC wall clock).
    pub fn resolve(&self) -> DateRange {
        self.resolve_at(Utc::now().date_naive())
    }

    /// Resolves against an explicit end date. Split out so tests don't
    /// depend on the wall clock.
    pub fn resolve_at(&self, end: NaiveDate) -> DateRange {
        DateRange::new(end - Duration::days(self.days()), end)
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1 month" | "1m" | "1mo" => Ok(Timeframe::OneMonth),
            "3 months" | "3m" | "3mo" => Ok(Timeframe::ThreeMonths),
            "6 months" | "6m" | "6mo" => Ok(Timeframe::SixMonths),
            "1 year" | "1y" => Ok(Timeframe::OneYear),
            _ => Err(format!(
                "unknown timeframe '{}'. Valid values: 1 month (1m), 3 months (3m), 6 months (6m), 1 year (1y)",
                s
            )),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
