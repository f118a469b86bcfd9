//! Percent-return calculations over fixed trading-day lookback windows.

use serde::Serialize;

use crate::series::PriceSeries;

pub const ONE_WEEK_BARS: usize = 5;
pub const ONE_MONTH_BARS: usize = 22;
pub const THREE_MONTH_BARS: usize = 66;
pub const SIX_MONTH_BARS: usize = 126;
pub const ONE_YEAR_BARS: usize = 252;

/// Percent returns per lookback window; `None` when the series is
/// shorter than the window's bar count.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct PerformanceMetrics {
    #[serde(rename = "1_week")]
    pub one_week: Option<f64>,
    #[serde(rename = "1_month")]
    pub one_month: Option<f64>,
    #[serde(rename = "3_months")]
    pub three_months: Option<f64>,
    #[serde(rename = "6_months")]
    pub six_months: Option<f64>,
    #[serde(rename = "1_year")]
    pub one_year: Option<f64>,
}

pub fn calculate(series: &PriceSeries) -> PerformanceMetrics {
    let closes = series.closes();
    PerformanceMetrics {
        one_week: window_return(&closes, ONE_WEEK_BARS),
        one_month: window_return(&closes, ONE_MONTH_BARS),
        three_months: window_return(&closes, THREE_MONTH_BARS),
        six_months: window_return(&closes, SIX_MONTH_BARS),
        one_year: window_return(&closes, ONE_YEAR_BARS),
    }
}

/// Percent change from the close `window` bars back to the latest close.
pub fn window_return(closes: &[f64], window: usize) -> Option<f64> {
    if window == 0 || closes.len() < window {
        return None;
    }
    let current = closes[closes.len() - 1];
    let start = closes[closes.len() - window];
    Some((current - start) / start * 100.0)
}
