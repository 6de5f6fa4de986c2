//! Candlestick figure specs in the charting library's JSON schema.
//!
//! The interactive charting library is an external collaborator consumed at
//! its JSON boundary: we build a serializable figure (traces + layout) and
//! hand it over for rendering; no data flows back.

use serde::Serialize;

use crate::indicators::PriceSeries;

/// Fixed panel height in pixels.
pub const PANEL_HEIGHT: u32 = 300;
/// Near-black terminal tone used for both the paper and the plot area.
pub const BACKGROUND: &str = "rgba(17, 17, 17, 1)";
const TEXT_COLOR: &str = "white";
const MARGIN: u32 = 20;
const SMA_SHORT_COLOR: &str = "orange";
const SMA_LONG_COLOR: &str = "royalblue";
const SMA_LINE_WIDTH: u32 = 1;

/// A complete renderable figure: one candlestick trace plus the two
/// moving-average overlays, under the dark layout.
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

/// A single plotted trace, tagged with its chart type on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Candlestick {
        x: Vec<String>,
        open: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
        close: Vec<f64>,
        name: String,
    },
    Scatter {
        x: Vec<String>,
        /// `None` serializes as null: the overlay starts where the
        /// moving-average window first fills.
        y: Vec<Option<f64>>,
        mode: String,
        line: Line,
        name: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct Line {
    pub color: String,
    pub width: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub margin: Margin,
    pub height: u32,
    pub plot_bgcolor: String,
    pub paper_bgcolor: String,
    pub font: Font,
    pub xaxis: XAxis,
}

#[derive(Debug, Clone, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Font {
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct XAxis {
    pub rangeslider: RangeSlider,
}

#[derive(Debug, Clone, Serialize)]
pub struct RangeSlider {
    pub visible: bool,
}

fn dark_layout() -> Layout {
    Layout {
        margin: Margin {
            l: MARGIN,
            r: MARGIN,
            t: MARGIN,
            b: MARGIN,
        },
        height: PANEL_HEIGHT,
        plot_bgcolor: BACKGROUND.to_string(),
        paper_bgcolor: BACKGROUND.to_string(),
        font: Font {
            color: TEXT_COLOR.to_string(),
        },
        xaxis: XAxis {
            rangeslider: RangeSlider { visible: false },
        },
    }
}

/// Builds the candlestick figure with SMA overlays for one series.
///
/// Pure transformation from validated data; this step has no failure mode.
pub fn build_figure(series: &PriceSeries) -> Figure {
    let dates: Vec<String> = series
        .bars
        .iter()
        .map(|bar| bar.date.format("%Y-%m-%d").to_string())
        .collect();

    let candles = Trace::Candlestick {
        x: dates.clone(),
        open: series.bars.iter().map(|b| b.open).collect(),
        high: series.bars.iter().map(|b| b.high).collect(),
        low: series.bars.iter().map(|b| b.low).collect(),
        close: series.bars.iter().map(|b| b.close).collect(),
        name: series.symbol.clone(),
    };
    let sma_short = Trace::Scatter {
        x: dates.clone(),
        y: series.sma_short.clone(),
        mode: "lines".to_string(),
        line: Line {
            color: SMA_SHORT_COLOR.to_string(),
            width: SMA_LINE_WIDTH,
        },
        name: "SMA 20".to_string(),
    };
    let sma_long = Trace::Scatter {
        x: dates,
        y: series.sma_long.clone(),
        mode: "lines".to_string(),
        line: Line {
            color: SMA_LONG_COLOR.to_string(),
            width: SMA_LINE_WIDTH,
        },
        name: "SMA 50".to_string(),
    };

    Figure {
        data: vec![candles, sma_short, sma_long],
        layout: dark_layout(),
    }
}
