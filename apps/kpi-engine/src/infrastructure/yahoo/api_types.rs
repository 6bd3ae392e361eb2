//! Yahoo Finance chart API response types.

use serde::Deserialize;

/// Top-level chart response.
#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    /// Chart envelope.
    pub chart: Chart,
}

/// Chart envelope: either results or an error description.
#[derive(Debug, Deserialize)]
pub struct Chart {
    /// Result blocks; one per requested symbol.
    pub result: Option<Vec<ChartResult>>,
    /// Upstream error, populated instead of results.
    pub error: Option<ChartError>,
}

/// Upstream chart error.
#[derive(Debug, Deserialize)]
pub struct ChartError {
    /// Machine-readable code.
    pub code: String,
    /// Human-readable description.
    pub description: String,
}

/// One symbol's chart data.
#[derive(Debug, Deserialize)]
pub struct ChartResult {
    /// Observation timestamps, unix seconds.
    #[serde(default)]
    pub timestamp: Vec<i64>,
    /// Price indicator blocks.
    pub indicators: Indicators,
}

/// Price indicators.
#[derive(Debug, Deserialize)]
pub struct Indicators {
    /// Quote blocks; the first carries the close series.
    pub quote: Vec<QuoteBlock>,
}

/// A block of parallel OHLCV arrays. Only closes are consumed; gaps in
/// the series arrive as nulls.
#[derive(Debug, Deserialize)]
pub struct QuoteBlock {
    /// Closing prices, parallel to the timestamps, with nulls for
    /// missing bars.
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}
