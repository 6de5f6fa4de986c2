//! Writes the dashboard as a single self-contained HTML page.
//!
//! Figure specs are serialized to JSON and mounted client-side by the
//! charting library's JS runtime, loaded from its CDN. The page itself
//! carries the column grid, the per-panel metric blocks, and inline error
//! panels for failed tickers.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use marketmon_lib::chart::BACKGROUND;
use marketmon_lib::layout;
use marketmon_lib::pipeline::TickerOutcome;
use marketmon_lib::Timeframe;

use crate::output::{format_pct, format_price, DISCLAIMER};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.32.0.min.js";

pub fn write_dashboard(
    path: &Path,
    outcomes: &[TickerOutcome],
    timeframe: Timeframe,
) -> Result<()> {
    let page = render_page(outcomes, timeframe)?;
    fs::write(path, page)
        .with_context(|| format!("could not write dashboard to {}", path.display()))?;
    Ok(())
}

fn render_page(outcomes: &[TickerOutcome], timeframe: Timeframe) -> Result<String> {
    let grid = layout::assign_columns(outcomes);

    let mut page = String::new();
    let _ = write!(
        page,
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Market monitor - {timeframe}</title>\n\
         <script src=\"{PLOTLY_CDN}\"></script>\n\
         <style>\n\
         body {{ background: {BACKGROUND}; color: white; font-family: monospace; margin: 16px; }}\n\
         .grid {{ display: flex; gap: 16px; align-items: flex-start; }}\n\
         .column {{ flex: 1; min-width: 0; }}\n\
         .panel {{ margin-bottom: 16px; }}\n\
         .metric {{ font-size: 18px; margin: 4px 0 8px 0; }}\n\
         .up {{ color: #26a69a; }}\n\
         .down {{ color: #ef5350; }}\n\
         .error {{ color: #ef5350; border: 1px solid #ef5350; padding: 8px; }}\n\
         .footer {{ margin-top: 24px; font-size: 12px; color: #888; }}\n\
         </style>\n</head>\n<body>\n\
         <h2>Market monitor - {timeframe}</h2>\n<div class=\"grid\">\n"
    );

    let mut panel_id = 0usize;
    let mut scripts = String::new();
    for column in &grid.columns {
        page.push_str("<div class=\"column\">\n");
        for outcome in column {
            match outcome {
                TickerOutcome::Panel(panel) => {
                    let div_id = format!("chart-{}", panel_id);
                    panel_id += 1;

                    let _ = write!(page, "<div class=\"panel\">\n<h3>{}</h3>\n", panel.symbol);
                    match &panel.summary {
                        Some(summary) => {
                            let direction = if summary.pct_change >= 0.0 { "up" } else { "down" };
                            let _ = write!(
                                page,
                                "<div class=\"metric\">{} <span class=\"{}\">{}</span></div>\n",
                                format_price(summary.last_close),
                                direction,
                                format_pct(summary.pct_change),
                            );
                        }
                        None => {
                            page.push_str(
                                "<div class=\"metric\">not enough history for a change figure</div>\n",
                            );
                        }
                    }
                    let _ = write!(page, "<div id=\"{}\"></div>\n</div>\n", div_id);

                    let figure_json = serde_json::to_string(&panel.figure)
                        .context("could not serialize chart figure")?;
                    let _ = write!(
                        scripts,
                        "var fig_{id} = {json};\n\
                         Plotly.newPlot(\"{div}\", fig_{id}.data, fig_{id}.layout, {{responsive: true}});\n",
                        id = panel_id - 1,
                        json = figure_json,
                        div = div_id,
                    );
                }
                TickerOutcome::Failed { symbol, error } => {
                    let _ = write!(
                        page,
                        "<div class=\"panel error\">could not load {}: {}</div>\n",
                        escape(symbol),
                        escape(&error.to_string()),
                    );
                }
                TickerOutcome::Skipped { .. } => {}
            }
        }
        page.push_str("</div>\n");
    }

    let _ = write!(
        page,
        "</div>\n<script>\n{}</script>\n<div class=\"footer\">{}</div>\n</body>\n</html>\n",
        scripts, DISCLAIMER
    );
    Ok(page)
}

/// Minimal HTML escaping for provider-supplied text.
fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
