use marketmon_lib::pipeline::TickerOutcome;
use marketmon_lib::{Summary, Timeframe};
use serde::Serialize;
use tabled::{Table, Tabled};

/// Static footer shown under every rendering of the dashboard.
pub const DISCLAIMER: &str =
    "Confidential - internal quant desk reference only. Market data may be delayed up to 15 minutes.";

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled, Serialize)]
struct PanelRow {
    #[tabled(rename = "Ticker")]
    #[serde(rename = "Ticker")]
    symbol: String,
    #[tabled(rename = "Last Close")]
    #[serde(rename = "Last Close")]
    last_close: String,
    #[tabled(rename = "Change")]
    #[serde(rename = "Change")]
    change: String,
    #[tabled(rename = "Bars")]
    #[serde(rename = "Bars")]
    bars: usize,
}

/// One outcome in machine-readable form, for `--output json`.
#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum OutcomeJson<'a> {
    Ok {
        symbol: &'a str,
        bars: usize,
        summary: Option<&'a Summary>,
    },
    Skipped {
        symbol: &'a str,
    },
    Error {
        symbol: &'a str,
        message: String,
    },
}

// -- Row builders --

fn build_panel_rows(outcomes: &[TickerOutcome]) -> Vec<PanelRow> {
    outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            TickerOutcome::Panel(panel) => Some(PanelRow {
                symbol: panel.symbol.clone(),
                last_close: panel
                    .summary
                    .as_ref()
                    .map(|s| format_price(s.last_close))
                    .unwrap_or_else(|| "n/a".to_string()),
                change: panel
                    .summary
                    .as_ref()
                    .map(|s| format_pct(s.pct_change))
                    .unwrap_or_else(|| "n/a".to_string()),
                bars: panel.bar_count,
            }),
            _ => None,
        })
        .collect()
}

fn build_outcome_json(outcomes: &[TickerOutcome]) -> Vec<OutcomeJson<'_>> {
    outcomes
        .iter()
        .map(|outcome| match outcome {
            TickerOutcome::Panel(panel) => OutcomeJson::Ok {
                symbol: &panel.symbol,
                bars: panel.bar_count,
                summary: panel.summary.as_ref(),
            },
            TickerOutcome::Skipped { symbol } => OutcomeJson::Skipped { symbol },
            TickerOutcome::Failed { symbol, error } => OutcomeJson::Error {
                symbol,
                message: error.to_string(),
            },
        })
        .collect()
}

// -- Table output --

pub fn print_dashboard(outcomes: &[TickerOutcome], timeframe: Timeframe) {
    println!("Market monitor - {}", timeframe);

    let rows = build_panel_rows(outcomes);
    if rows.is_empty() {
        println!("no tickers produced a panel");
    } else {
        println!("{}", Table::new(rows));
    }

    for outcome in outcomes {
        match outcome {
            TickerOutcome::Failed { symbol, error } => {
                println!("error: could not load {}: {}", symbol, error);
            }
            TickerOutcome::Skipped { symbol } => {
                println!("note: {} returned no data for this range, panel omitted", symbol);
            }
            TickerOutcome::Panel(_) => {}
        }
    }

    println!();
    println!("{}", DISCLAIMER);
}

// -- JSON output --

pub fn print_json(outcomes: &[TickerOutcome]) {
    match serde_json::to_string_pretty(&build_outcome_json(outcomes)) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

pub fn format_price(value: f64) -> String {
    format!("${:.2}", value)
}

pub fn format_pct(value: f64) -> String {
    format!("{:+.2}%", value)
}
