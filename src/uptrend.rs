//! Heuristic flag for sustained multi-month appreciation.

use crate::series::PriceSeries;

const SIX_MONTH_BARS: usize = 120;
const SIX_MONTH_THRESHOLD: f64 = 0.20;
const THREE_MONTH_BARS: usize = 60;
const THREE_MONTH_THRESHOLD: f64 = 0.15;

/// True when the series shows a > 20% gain over the last 120 bars, or
/// failing that a > 15% gain over the last 60 bars. Thresholds are
/// strict; a series too short for both checks is never an uptrend.
pub fn detect(series: &PriceSeries) -> bool {
    let closes = series.closes();
    let Some(&current) = closes.last() else {
        return false;
    };

    if closes.len() >= SIX_MONTH_BARS {
        let start = closes[closes.len() - SIX_MONTH_BARS];
        if (current - start) / start > SIX_MONTH_THRESHOLD {
            return true;
        }
    }

    if closes.len() >= THREE_MONTH_BARS {
        let start = closes[closes.len() - THREE_MONTH_BARS];
        if (current - start) / start > THREE_MONTH_THRESHOLD {
            return true;
        }
    }

    false
}
