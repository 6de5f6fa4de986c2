mod html;
mod output;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use marketmon_lib::cache::MemoryCache;
use marketmon_lib::pipeline::{self, EmptyPolicy, PipelineConfig};
use marketmon_lib::{validation, CachedClient, Timeframe};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "marketmon")]
#[command(about = "Render a candlestick dashboard for a list of equity tickers")]
struct Cli {
    /// Tickers to monitor, comma-separated (e.g. "AAPL, MSFT, GOOGL")
    tickers: String,

    /// Lookback window: 1 month (1m), 3 months (3m), 6 months (6m), 1 year (1y)
    #[arg(long, default_value = "3 months")]
    timeframe: String,

    /// Output format: table or json
    #[arg(long, default_value = "table")]
    output: String,

    /// Write an interactive HTML dashboard to this path
    #[arg(long)]
    html: Option<PathBuf>,

    /// Report tickers with an empty price series as errors instead of skipping them
    #[arg(long)]
    empty_as_error: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout_secs: u64,

    /// Cache time-to-live in seconds
    #[arg(long, default_value = "300")]
    ttl_secs: u64,

    /// Maximum tickers fetched at once (1 = strictly sequential)
    #[arg(long, default_value = "1")]
    concurrency: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("marketmon=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };
    let timeframe: Timeframe = cli
        .timeframe
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let symbols = validation::parse_tickers(&cli.tickers)
        .context("could not parse the ticker list")?;
    let range = timeframe.resolve();

    let cache = MemoryCache::new(Duration::from_secs(cli.ttl_secs));
    let client = Arc::new(
        CachedClient::new(cache, Duration::from_secs(cli.timeout_secs))
            .context("could not build the provider client")?,
    );

    let config = PipelineConfig {
        empty_policy: if cli.empty_as_error {
            EmptyPolicy::Error
        } else {
            EmptyPolicy::Skip
        },
        concurrency: cli.concurrency.max(1),
    };

    let outcomes = if config.concurrency <= 1 {
        // Sequential pass with a progress bar; the concurrent path reports
        // nothing until all tickers resolve.
        let pb = ProgressBar::new(symbols.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos:>2}/{len:2} {msg}").unwrap(),
        );
        let mut outcomes = Vec::with_capacity(symbols.len());
        for symbol in &symbols {
            pb.set_message(symbol.clone());
            outcomes
                .push(pipeline::process_ticker(&client, symbol, &range, config.empty_policy).await);
            pb.inc(1);
        }
        pb.finish_and_clear();
        outcomes
    } else {
        pipeline::run_dashboard(Arc::clone(&client), &symbols, &range, &config).await
    };

    match format {
        OutputFormat::Table => output::print_dashboard(&outcomes, timeframe),
        OutputFormat::Json => output::print_json(&outcomes),
    }

    if let Some(path) = &cli.html {
        html::write_dashboard(path, &outcomes, timeframe)?;
        tracing::info!("dashboard written to {}", path.display());
    }

    Ok(())
}
