//! Price history input types shared by all calculators.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// One day's open/high/low/close record.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Ordered daily bars for one symbol, oldest first.
///
/// Dates must be strictly increasing with no duplicates; the analyzer
/// never mutates the series once it has been handed over.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PriceSeries {
    bars: Vec<DailyBar>,
}

impl PriceSeries {
    pub fn new(bars: Vec<DailyBar>) -> Self {
        Self { bars }
    }

    pub fn bars(&self) -> &[DailyBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|bar| bar.close)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|bar| bar.date)
    }

    /// Fatal input checks: at least one bar, every close finite and positive.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.bars.is_empty() {
            return Err(AnalysisError::EmptySeries);
        }
        for bar in &self.bars {
            if !bar.close.is_finite() || bar.close <= 0.0 {
                return Err(AnalysisError::InvalidPrice {
                    date: bar.date,
                    price: bar.close,
                });
            }
        }
        Ok(())
    }
}

/// Company metadata passed through to the result unmodified.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CompanyInfo {
    pub market_cap: u64,
    pub sector: String,
    pub display_name: String,
}

impl CompanyInfo {
    /// Fallback when the metadata provider has nothing for the symbol.
    pub fn unknown(symbol: &str) -> Self {
        Self {
            market_cap: 0,
            sector: "Unknown".to_string(),
            display_name: symbol.to_string(),
        }
    }
}
