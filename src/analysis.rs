//! The core analysis pipeline: runs the performance, indicator and
//! uptrend calculators over one immutable series and folds the outputs
//! through the scoring rules into a single result.

use serde::Serialize;

use crate::error::AnalysisError;
use crate::indicators::{self, TechnicalIndicators};
use crate::performance::{self, PerformanceMetrics};
use crate::scoring::{self, MAX_SCORE, ScoringInput};
use crate::series::{CompanyInfo, PriceSeries};
use crate::uptrend;

/// Everything the presentation layer needs, with no formatting applied.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub symbol: String,
    pub current_price: f64,
    pub entry_score: f64,
    pub max_score: f64,
    pub supporting_factors: Vec<String>,
    pub risk_factors: Vec<String>,
    pub performance: PerformanceMetrics,
    pub uptrend: bool,
    pub technical: TechnicalIndicators,
    pub company_info: CompanyInfo,
}

/// Analyzes one snapshot of price history.
///
/// Pure function of its inputs: the same series and metadata always
/// produce an identical result. Fails only on the fatal input checks;
/// short history degrades per metric instead.
pub fn analyze(
    symbol: &str,
    series: &PriceSeries,
    company_info: CompanyInfo,
) -> Result<AnalysisResult, AnalysisError> {
    series.validate()?;
    let current_price = series.last_close().ok_or(AnalysisError::EmptySeries)?;

    // The three calculators are independent of each other
    let performance = performance::calculate(series);
    let technical = indicators::calculate(series);
    let uptrend = uptrend::detect(series);

    let card = scoring::evaluate(&ScoringInput {
        performance: &performance,
        technical: &technical,
        uptrend,
    });

    Ok(AnalysisResult {
        symbol: symbol.to_string(),
        current_price,
        entry_score: card.entry_score,
        max_score: MAX_SCORE,
        supporting_factors: card.supporting_factors,
        risk_factors: card.risk_factors,
        performance,
        uptrend,
        technical,
        company_info,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::DailyBar;
    use chrono::NaiveDate;

    fn series_from_closes(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| DailyBar {
                date: start + chrono::Days::new(i as u64),
                open: close,
                high: close,
                low: close,
                close,
            })
            .collect();
        PriceSeries::new(bars)
    }

    #[test]
    fn empty_series_aborts_with_no_partial_result() {
        let result = analyze("TEST", &PriceSeries::new(Vec::new()), CompanyInfo::unknown("TEST"));
        assert_eq!(result, Err(AnalysisError::EmptySeries));
    }

    #[test]
    fn invalid_close_aborts() {
        let series = series_from_closes(&[100.0, -1.0, 100.0]);
        let result = analyze("TEST", &series, CompanyInfo::unknown("TEST"));
        assert!(matches!(result, Err(AnalysisError::InvalidPrice { .. })));
    }

    #[test]
    fn company_info_passes_through_unmodified() {
        let series = series_from_closes(&[100.0; 30]);
        let info = CompanyInfo {
            market_cap: 2_500_000_000,
            sector: "Technology".to_string(),
            display_name: "Test Corp".to_string(),
        };
        let result = analyze("TEST", &series, info.clone()).unwrap();
        assert_eq!(result.company_info, info);
        assert_eq!(result.symbol, "TEST");
        assert_eq!(result.current_price, 100.0);
        assert_eq!(result.max_score, 8.0);
    }

    #[test]
    fn score_stays_in_bounds_across_inputs() {
        let shapes: [Vec<f64>; 4] = [
            vec![100.0; 300],
            (0..300).map(|i| 100.0 + i as f64).collect(),
            (0..300).map(|i| 400.0 - i as f64).collect(),
            (0..10).map(|i| 100.0 + (i % 3) as f64).collect(),
        ];
        for closes in &shapes {
            let series = series_from_closes(closes);
            let result = analyze("TEST", &series, CompanyInfo::unknown("TEST")).unwrap();
            assert!(result.entry_score >= 0.0 && result.entry_score <= result.max_score);
        }
    }
}
