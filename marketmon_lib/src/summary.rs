//! Latest-close summary metrics per ticker.

use serde::Serialize;

use marketmon_api::PriceBar;

use crate::error::MarketMonError;

/// Latest close, prior close, and day-over-day percentage change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub symbol: String,
    pub last_close: f64,
    pub prior_close: f64,
    pub pct_change: f64,
}

/// Derives the summary from an ascending bar series.
///
/// Needs at least two bars; fewer is `InsufficientHistory`, which callers
/// treat as degraded output for the ticker, never as a fatal failure.
pub fn compute(symbol: &str, bars: &[PriceBar]) -> Result<Summary, MarketMonError> {
    let [.., prior, last] = bars else {
        return Err(MarketMonError::InsufficientHistory(bars.len()));
    };
    Ok(Summary {
        symbol: symbol.to_string(),
        last_close: last.close,
        prior_close: prior.close,
        pct_change: (last.close - prior.close) / prior.close * 100.0,
    })
}
