//! Technical indicators evaluated at the most recent bar: a short-window
//! candle-color tally, RSI(14) and moving-average position flags.

use serde::Serialize;
use ta::Next;
use ta::indicators::SimpleMovingAverage;

use crate::series::PriceSeries;

const CANDLE_WINDOW: usize = 20;
const RSI_PERIOD: usize = 14;

/// Reported when the RSI is undefined (short or flat history).
pub const RSI_NEUTRAL: f64 = 50.0;

pub const MA_SHORT: usize = 20;
pub const MA_MEDIUM: usize = 50;
pub const MA_LONG: usize = 150;

/// Indicator snapshot for the last bar of a series.
///
/// The MA flags are plain booleans and default to `false` when the
/// series is too short for the average. This is a different policy from
/// `PerformanceMetrics`, where undefined windows are absent instead.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct TechnicalIndicators {
    pub green_candle_count: u32,
    pub rsi: f64,
    pub above_ma20: bool,
    pub above_ma50: bool,
    pub above_ma150: bool,
}

pub fn calculate(series: &PriceSeries) -> TechnicalIndicators {
    let closes = series.closes();
    let Some(&current) = closes.last() else {
        return TechnicalIndicators {
            green_candle_count: 0,
            rsi: RSI_NEUTRAL,
            above_ma20: false,
            above_ma50: false,
            above_ma150: false,
        };
    };

    let above = |period: usize| match trailing_sma(&closes, period) {
        Some(ma) => current > ma,
        None => false,
    };

    TechnicalIndicators {
        green_candle_count: green_candle_count(series),
        rsi: rsi(&closes).unwrap_or(RSI_NEUTRAL),
        above_ma20: above(MA_SHORT),
        above_ma50: above(MA_MEDIUM),
        above_ma150: above(MA_LONG),
    }
}

/// Bars with `close > open` in the most recent (up to) 20 bars.
fn green_candle_count(series: &PriceSeries) -> u32 {
    let bars = series.bars();
    let tail_start = bars.len().saturating_sub(CANDLE_WINDOW);
    bars[tail_start..]
        .iter()
        .filter(|bar| bar.close > bar.open)
        .count() as u32
}

/// RSI(14) over close-to-close deltas, smoothed with a simple 14-period
/// average of gains and losses. `None` when fewer than 15 closes exist
/// or the last 14 deltas are all zero (flat price).
fn rsi(closes: &[f64]) -> Option<f64> {
    if closes.len() < RSI_PERIOD + 1 {
        return None;
    }

    let tail = &closes[closes.len() - RSI_PERIOD - 1..];
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for delta in tail.windows(2).map(|pair| pair[1] - pair[0]) {
        if delta > 0.0 {
            gain_sum += delta;
        } else {
            loss_sum += -delta;
        }
    }

    let avg_gain = gain_sum / RSI_PERIOD as f64;
    let avg_loss = loss_sum / RSI_PERIOD as f64;

    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            // no net gain or loss: RS is 0/0, undefined
            return None;
        }
        // losses absent: RS is infinite, RSI saturates
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}

/// Simple moving average over the trailing `period` closes, evaluated at
/// the last bar. `None` when the series is shorter than the period.
fn trailing_sma(closes: &[f64], period: usize) -> Option<f64> {
    if closes.len() < period {
        return None;
    }

    let mut sma = SimpleMovingAverage::new(period).ok()?;
    let mut last = None;
    for &close in closes {
        last = Some(sma.next(close));
    }
    last
}
