use chrono::NaiveDate;
use thiserror::Error;

/// Fatal input conditions for an analysis call.
///
/// Insufficient history is never fatal: short series degrade per field
/// (absent performance windows, neutral RSI, false MA flags).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("no price data available for the requested symbol")]
    EmptySeries,

    #[error("invalid close price {price} on {date}")]
    InvalidPrice { date: NaiveDate, price: f64 },
}
