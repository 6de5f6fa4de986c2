//! The per-ticker dashboard pipeline: fetch, validate, derive, chart.
//!
//! Each requested symbol maps to exactly one [`TickerOutcome`]; failures are
//! confined to the ticker that raised them and never abort the batch.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use marketmon_api::DateRange;

use crate::chart::{self, Figure};
use crate::client::CachedClient;
use crate::error::MarketMonError;
use crate::indicators;
use crate::summary::{self, Summary};

/// How a successful fetch that returned zero bars is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyPolicy {
    /// Omit the ticker from rendering without reporting an error.
    #[default]
    Skip,
    /// Report the empty series as a data failure.
    Error,
}

/// Pipeline tuning knobs, surfaced as CLI flags.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    pub empty_policy: EmptyPolicy,
    /// Maximum tickers in flight at once; 1 means strictly sequential in
    /// input order.
    pub concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            empty_policy: EmptyPolicy::Skip,
            concurrency: 1,
        }
    }
}

/// A renderable dashboard panel for one ticker.
///
/// `summary` is absent when the series is too short for a day-over-day
/// change; the chart still renders.
#[derive(Debug, Clone, Serialize)]
pub struct TickerPanel {
    pub symbol: String,
    pub bar_count: usize,
    pub summary: Option<Summary>,
    pub figure: Figure,
}

/// The outcome of running the pipeline for one requested symbol. Exactly
/// one outcome per symbol: a panel, a deliberate skip, or a reported
/// failure — never silently nothing.
#[derive(Debug)]
pub enum TickerOutcome {
    Panel(Box<TickerPanel>),
    Skipped {
        symbol: String,
    },
    Failed {
        symbol: String,
        error: MarketMonError,
    },
}

impl TickerOutcome {
    pub fn symbol(&self) -> &str {
        match self {
            TickerOutcome::Panel(panel) => &panel.symbol,
            TickerOutcome::Skipped { symbol } => symbol,
            TickerOutcome::Failed { symbol, .. } => symbol,
        }
    }

    pub fn is_panel(&self) -> bool {
        matches!(self, TickerOutcome::Panel(_))
    }
}

/// Runs the full pipeline for one symbol: cached fetch, emptiness policy,
/// indicators, summary, figure. Every failure is captured in the returned
/// outcome.
pub async fn process_ticker(
    client: &CachedClient,
    symbol: &str,
    range: &DateRange,
    policy: EmptyPolicy,
) -> TickerOutcome {
    let bars = match client.daily_history(symbol, range).await {
        Ok(bars) => bars,
        Err(error) => {
            tracing::warn!("{}: {}", symbol, error);
            return TickerOutcome::Failed {
                symbol: symbol.to_string(),
                error,
            };
        }
    };

    if bars.is_empty() {
        return match policy {
            EmptyPolicy::Skip => {
                tracing::warn!("{}: empty series, skipping panel", symbol);
                TickerOutcome::Skipped {
                    symbol: symbol.to_string(),
                }
            }
            EmptyPolicy::Error => TickerOutcome::Failed {
                symbol: symbol.to_string(),
                error: MarketMonError::DataUnavailable(marketmon_api::Error::NoData {
                    symbol: symbol.to_string(),
                    reason: "provider returned an empty series for the range".to_string(),
                }),
            },
        };
    }

    let series = indicators::attach_indicators(symbol, bars);
    let summary = match summary::compute(symbol, &series.bars) {
        Ok(summary) => Some(summary),
        Err(error) => {
            tracing::warn!("{}: {}", symbol, error);
            None
        }
    };
    let figure = chart::build_figure(&series);

    TickerOutcome::Panel(Box::new(TickerPanel {
        symbol: symbol.to_string(),
        bar_count: series.bars.len(),
        summary,
        figure,
    }))
}

/// Processes every symbol and returns one outcome per symbol in input order.
///
/// With `concurrency == 1` tickers run strictly sequentially. A higher
/// limit fans the fetches out over independent tasks bounded by a
/// semaphore; outcomes are still collected in input order.
pub async fn run_dashboard(
    client: Arc<CachedClient>,
    symbols: &[String],
    range: &DateRange,
    config: &PipelineConfig,
) -> Vec<TickerOutcome> {
    if config.concurrency <= 1 {
        let mut outcomes = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            outcomes.push(process_ticker(&client, symbol, range, config.empty_policy).await);
        }
        return outcomes;
    }

    let semaphore = Arc::new(Semaphore::new(config.concurrency));
    let mut set = JoinSet::new();
    for (idx, symbol) in symbols.iter().enumerate() {
        let client = Arc::clone(&client);
        let semaphore = Arc::clone(&semaphore);
        let symbol = symbol.clone();
        let range = *range;
        let policy = config.empty_policy;
        set.spawn(async move {
            let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
            (idx, process_ticker(&client, &symbol, &range, policy).await)
        });
    }

    let mut slots: Vec<Option<TickerOutcome>> = symbols.iter().map(|_| None).collect();
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((idx, outcome)) => slots[idx] = Some(outcome),
            Err(join_error) => {
                tracing::error!("ticker task failed: {}", join_error);
            }
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(idx, slot)| {
            slot.unwrap_or_else(|| TickerOutcome::Failed {
                symbol: symbols[idx].clone(),
                error: MarketMonError::Unexpected("ticker task did not complete".to_string()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use chrono::NaiveDate;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn chart_body(closes: &[f64]) -> serde_json::Value {
        // Consecutive daily bars starting 2024-06-03T13:30Z.
        let timestamps: Vec<i64> = (0..closes.len() as i64)
            .map(|i| 1717421400 + i * 86400)
            .collect();
        serde_json::json!({
            "chart": {
                "result": [{
                    "meta": { "currency": "USD" },
                    "timestamp": timestamps,
                    "indicators": {
                        "quote": [{
                            "open": closes,
                            "high": closes.iter().map(|c| c + 1.0).collect::<Vec<_>>(),
                            "low": closes.iter().map(|c| c - 1.0).collect::<Vec<_>>(),
                            "close": closes
                        }]
                    }
                }],
                "error": null
            }
        })
    }

    fn empty_body() -> serde_json::Value {
        serde_json::json!({
            "chart": {
                "result": [{
                    "meta": { "currency": "USD" },
                    "indicators": { "quote": [{}] }
                }],
                "error": null
            }
        })
    }

    fn no_data_body() -> serde_json::Value {
        serde_json::json!({
            "chart": {
                "result": null,
                "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
            }
        })
    }

    fn test_range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 7).unwrap(),
        )
    }

    fn test_client(server: &MockServer, ttl: Duration) -> Arc<CachedClient> {
        Arc::new(
            CachedClient::with_base_url(
                &server.uri(),
                MemoryCache::new(ttl),
                Duration::from_secs(5),
            )
            .unwrap(),
        )
    }

    // -- Failure isolation --

    #[tokio::test]
    async fn bad_ticker_does_not_abort_batch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/AAPL"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(&[100.0, 105.0])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/BADTICKER"))
            .respond_with(ResponseTemplate::new(200).set_body_json(no_data_body()))
            .mount(&server)
            .await;

        let client = test_client(&server, Duration::from_secs(300));
        let symbols = vec!["AAPL".to_string(), "BADTICKER".to_string()];
        let outcomes = run_dashboard(
            client,
            &symbols,
            &test_range(),
            &PipelineConfig::default(),
        )
        .await;

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].is_panel());
        match &outcomes[1] {
            TickerOutcome::Failed { symbol, error } => {
                assert_eq!(symbol, "BADTICKER");
                assert!(error.to_string().contains("BADTICKER"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    // -- Panel contents --

    #[tokio::test]
    async fn panel_carries_summary_and_figure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/AAPL"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(&[100.0, 105.0])))
            .mount(&server)
            .await;

        let client = test_client(&server, Duration::from_secs(300));
        let outcome =
            process_ticker(&client, "AAPL", &test_range(), EmptyPolicy::Skip).await;

        match outcome {
            TickerOutcome::Panel(panel) => {
                assert_eq!(panel.symbol, "AAPL");
                assert_eq!(panel.bar_count, 2);
                let summary = panel.summary.expect("two bars give a summary");
                assert_eq!(summary.pct_change, 5.0);
                assert_eq!(panel.figure.data.len(), 3);
            }
            other => panic!("expected panel, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn single_bar_renders_without_summary() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/AAPL"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(&[100.0])))
            .mount(&server)
            .await;

        let client = test_client(&server, Duration::from_secs(300));
        let outcome =
            process_ticker(&client, "AAPL", &test_range(), EmptyPolicy::Skip).await;

        match outcome {
            TickerOutcome::Panel(panel) => {
                assert_eq!(panel.bar_count, 1);
                assert!(panel.summary.is_none());
            }
            other => panic!("expected degraded panel, got {:?}", other),
        }
    }

    // -- Empty policy --

    #[tokio::test]
    async fn empty_series_skipped_by_default() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/THIN"))
            .respond_with(ResponseTemplate::new(200).set_body_json(empty_body()))
            .mount(&server)
            .await;

        let client = test_client(&server, Duration::from_secs(300));
        let outcome = process_ticker(&client, "THIN", &test_range(), EmptyPolicy::Skip).await;
        assert!(matches!(outcome, TickerOutcome::Skipped { symbol } if symbol == "THIN"));
    }

    #[tokio::test]
    async fn empty_series_reported_under_error_policy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/THIN"))
            .respond_with(ResponseTemplate::new(200).set_body_json(empty_body()))
            .mount(&server)
            .await;

        let client = test_client(&server, Duration::from_secs(300));
        let outcome = process_ticker(&client, "THIN", &test_range(), EmptyPolicy::Error).await;
        assert!(matches!(
            outcome,
            TickerOutcome::Failed {
                error: MarketMonError::DataUnavailable(_),
                ..
            }
        ));
    }

    // -- Cache behavior --

    #[tokio::test]
    async fn repeat_fetch_within_ttl_hits_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/AAPL"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(&[100.0, 105.0])))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server, Duration::from_secs(300));
        let range = test_range();
        let first = client.daily_history("AAPL", &range).await.unwrap();
        let second = client.daily_history("AAPL", &range).await.unwrap();
        assert_eq!(first, second);
        // MockServer verifies the expect(1) on drop.
    }

    #[tokio::test]
    async fn fetch_after_ttl_expiry_refetches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/AAPL"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(&[100.0, 105.0])))
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server, Duration::from_millis(10));
        let range = test_range();
        client.daily_history("AAPL", &range).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        client.daily_history("AAPL", &range).await.unwrap();
    }

    // -- Concurrent fan-out --

    #[tokio::test]
    async fn concurrent_run_preserves_input_order() {
        let server = MockServer::start().await;
        for (symbol, delay_ms, close) in
            [("AAPL", 80u64, 100.0), ("MSFT", 10, 200.0), ("GOOGL", 40, 300.0)]
        {
            Mock::given(method("GET"))
                .and(path(format!("/v8/finance/chart/{}", symbol)))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(chart_body(&[close, close + 1.0]))
                        .set_delay(Duration::from_millis(delay_ms)),
                )
                .mount(&server)
                .await;
        }

        let client = test_client(&server, Duration::from_secs(300));
        let symbols = vec![
            "AAPL".to_string(),
            "MSFT".to_string(),
            "GOOGL".to_string(),
        ];
        let config = PipelineConfig {
            empty_policy: EmptyPolicy::Skip,
            concurrency: 3,
        };
        let outcomes = run_dashboard(client, &symbols, &test_range(), &config).await;

        let ordered: Vec<&str> = outcomes.iter().map(|o| o.symbol()).collect();
        assert_eq!(ordered, vec!["AAPL", "MSFT", "GOOGL"]);
        assert!(outcomes.iter().all(|o| o.is_panel()));
    }
}
