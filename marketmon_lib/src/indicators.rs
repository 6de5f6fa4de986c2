//! Simple moving averages over the closing-price column.

use serde::Serialize;

use marketmon_api::PriceBar;

/// Window for the short moving average.
pub const SMA_SHORT_WINDOW: usize = 20;
/// Window for the long moving average.
pub const SMA_LONG_WINDOW: usize = 50;

/// A fetched bar series augmented with its moving-average columns.
///
/// The SMA columns are index-aligned with `bars`; entries are `None` until
/// the trailing window is full. Bars are never mutated after this point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    pub symbol: String,
    pub bars: Vec<PriceBar>,
    pub sma_short: Vec<Option<f64>>,
    pub sma_long: Vec<Option<f64>>,
}

/// Trailing simple moving average: the value at index `i` is the mean of
/// `values[i - window + 1 ..= i]` once `i >= window - 1`, `None` before.
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (i, value) in values.iter().enumerate() {
        sum += value;
        if i >= window {
            sum -= values[i - window];
        }
        if i + 1 >= window {
            out.push(Some(sum / window as f64));
        } else {
            out.push(None);
        }
    }
    out
}

/// Builds the augmented series for one symbol. Pure: the same bars always
/// produce the same columns, so recomputation is idempotent.
pub fn attach_indicators(symbol: &str, bars: Vec<PriceBar>) -> PriceSeries {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    PriceSeries {
        symbol: symbol.to_string(),
        sma_short: sma(&closes, SMA_SHORT_WINDOW),
        sma_long: sma(&closes, SMA_LONG_WINDOW),
        bars,
    }
}
