//! HTTP client for the Yahoo Finance v8 chart API.

use std::time::Duration;

use chrono::DateTime;
use url::Url;

use crate::types::{ChartEnvelope, DateRange, PriceBar};
use crate::user_agent::get_user_agent;
use crate::Error;

/// Default request timeout. A hung provider call fails the request
/// instead of stalling the whole dashboard pass.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for daily OHLC price history.
///
/// Sends browser-like headers with a randomized user agent to avoid being
/// blocked. The request timeout is fixed at construction time.
pub struct Client {
    client: reqwest::Client,
    base_api_url: String,
}

impl Client {
    /// Creates a new client pointing at the production chart API.
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        Self::with_base_url("https://query1.finance.yahoo.com", timeout)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_api_url: base_url.to_string(),
        })
    }

    fn chart_url(&self, symbol: &str, range: &DateRange) -> Result<Url, Error> {
        let mut url =
            Url::parse(&format!("{}/v8/finance/chart/{}", self.base_api_url, symbol)).map_err(
                |e| {
                    tracing::error!("Invalid URL constructed: {}", e);
                    Error::ParseFailed(format!("invalid request URL: {}", e))
                },
            )?;
        let (period1, period2) = range.period_bounds();
        url.query_pairs_mut()
            .append_pair("period1", &period1.to_string())
            .append_pair("period2", &period2.to_string())
            .append_pair("interval", "1d")
            .append_pair("events", "history");
        Ok(url)
    }

    /// Fetches daily OHLC bars for `symbol` over `range`, ascending by date.
    ///
    /// Returns `Ok(vec![])` when the provider answers successfully but the
    /// range contains no trading days; the caller decides whether an empty
    /// series is an error. Provider-side failures (unknown symbol, rate
    /// limit, malformed body) map onto the [`Error`] variants.
    pub async fn daily_history(
        &self,
        symbol: &str,
        range: &DateRange,
    ) -> Result<Vec<PriceBar>, Error> {
        let url = self.chart_url(symbol, range)?;
        let resp = self
            .client
            .get(url)
            .header("accept", "application/json, text/plain, */*")
            .header("accept-language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch history for {}: {}", symbol, e);
                Error::Network(e)
            })?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited);
        }

        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body for {}: {}", symbol, e);
            Error::Network(e)
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request for {} failed with status {}: {}", symbol, status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let envelope = serde_json::from_str::<ChartEnvelope>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse chart response: {} | body: {}", e, snippet);
            Error::ParseFailed(format!("{} | body: {}", e, snippet))
        })?;

        if let Some(err) = envelope.chart.error {
            return Err(Error::NoData {
                symbol: symbol.to_string(),
                reason: format!("{}: {}", err.code, err.description),
            });
        }

        let result = envelope
            .chart
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
            .ok_or_else(|| Error::NoData {
                symbol: symbol.to_string(),
                reason: "response carried neither result nor error".to_string(),
            })?;

        let timestamps = match result.timestamp {
            Some(ts) => ts,
            None => return Ok(Vec::new()),
        };
        let quote = result.indicators.quote.into_iter().next().ok_or_else(|| {
            Error::ParseFailed("chart result is missing its quote block".to_string())
        })?;

        let mut bars = Vec::with_capacity(timestamps.len());
        for (i, ts) in timestamps.iter().enumerate() {
            let date = match DateTime::from_timestamp(*ts, 0) {
                Some(dt) => dt.date_naive(),
                None => continue,
            };
            let (open, high, low, close) = match (
                quote.open.get(i).copied().flatten(),
                quote.high.get(i).copied().flatten(),
                quote.low.get(i).copied().flatten(),
                quote.close.get(i).copied().flatten(),
            ) {
                (Some(o), Some(h), Some(l), Some(c)) => (o, h, l, c),
                // Null entries are the provider's placeholder for days
                // without a quote; drop the row.
                _ => continue,
            };
            bars.push(PriceBar {
                date,
                open,
                high,
                low,
                close,
            });
        }
        bars.sort_by_key(|bar| bar.date);
        Ok(bars)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        format!("{}...[truncated]", &body[..MAX])
    }
}
