//! Column assignment for the dashboard grid.

use crate::pipeline::TickerOutcome;

/// The grid never grows beyond three columns regardless of ticker count.
pub const MAX_COLUMNS: usize = 3;

/// Outcomes distributed round-robin across up to [`MAX_COLUMNS`] columns,
/// input order preserved within each column.
#[derive(Debug)]
pub struct Grid<'a> {
    pub columns: Vec<Vec<&'a TickerOutcome>>,
}

impl Grid<'_> {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Distributes outcomes into the column grid.
///
/// Panels and failures both occupy grid slots (a failure renders as an
/// inline error panel); skipped tickers are omitted from the grid entirely
/// and do not consume a slot. Purely presentational: no reordering by
/// outcome, no retries.
pub fn assign_columns(outcomes: &[TickerOutcome]) -> Grid<'_> {
    let rendered: Vec<&TickerOutcome> = outcomes
        .iter()
        .filter(|o| !matches!(o, TickerOutcome::Skipped { .. }))
        .collect();

    let cols = rendered.len().min(MAX_COLUMNS);
    let mut columns: Vec<Vec<&TickerOutcome>> = vec![Vec::new(); cols];
    for (i, outcome) in rendered.into_iter().enumerate() {
        columns[i % cols].push(outcome);
    }
    Grid { columns }
}
