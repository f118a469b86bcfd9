//! End-to-end scenarios over the analysis pipeline with synthetic series.

use chrono::NaiveDate;

use entry_analyzer::analysis::{self, AnalysisResult};
use entry_analyzer::scoring::Recommendation;
use entry_analyzer::series::{CompanyInfo, DailyBar, PriceSeries};

fn series_from_closes(closes: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
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

fn analyze(series: &PriceSeries) -> AnalysisResult {
    analysis::analyze("TEST", series, CompanyInfo::unknown("TEST")).expect("analysis must succeed")
}

#[test]
fn flat_series_scores_only_the_rsi_bonus() {
    let series = series_from_closes(&vec![100.0; 300]);
    let result = analyze(&series);

    // every window is defined and flat
    assert_eq!(result.performance.one_week, Some(0.0));
    assert_eq!(result.performance.one_month, Some(0.0));
    assert_eq!(result.performance.three_months, Some(0.0));
    assert_eq!(result.performance.six_months, Some(0.0));
    assert_eq!(result.performance.one_year, Some(0.0));

    // no net gain or loss: RSI falls back to the neutral default
    assert_eq!(result.technical.rsi, 50.0);
    assert!(!result.uptrend);

    // price equals, not exceeds, each average
    assert!(!result.technical.above_ma20);
    assert!(!result.technical.above_ma50);
    assert!(!result.technical.above_ma150);

    assert_eq!(result.entry_score, 1.0);
    assert_eq!(result.supporting_factors, vec!["optimal RSI: 50.0".to_string()]);
    assert_eq!(
        result.risk_factors,
        vec![
            "no clear uptrend".to_string(),
            "price below most moving averages".to_string(),
        ]
    );
    assert_eq!(
        Recommendation::for_score(result.entry_score),
        Recommendation::NotRecommended
    );
}

#[test]
fn six_month_boundary_still_detects_uptrend_via_three_month_tier() {
    // 130 bars: the close 120 bars back is 100, current 120, so the
    // six-month return is exactly 0.20 and fails the strict check; the
    // close 60 bars back is also 100, so the three-month tier fires
    let mut closes = vec![100.0; 130];
    let last = closes.len() - 1;
    closes[last] = 120.0;
    let result = analyze(&series_from_closes(&closes));

    assert!(result.uptrend);
    assert!(result.supporting_factors.contains(&"strong uptrend".to_string()));
}

#[test]
fn analysis_is_deterministic() {
    let closes: Vec<f64> = (0..300)
        .map(|i| 100.0 + (i as f64 * 0.31).sin() * 8.0 + i as f64 * 0.05)
        .collect();
    let series = series_from_closes(&closes);

    let first = analyze(&series);
    let second = analyze(&series);
    assert_eq!(first, second);
}

#[test]
fn absent_windows_and_false_flags_use_distinct_policies() {
    // 60 bars: long windows are undefined. Performance reports them as
    // absent, while the MA150 flag degrades to a plain false.
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
    let result = analyze(&series_from_closes(&closes));

    assert!(result.performance.one_week.is_some());
    assert!(result.performance.three_months.is_none());
    assert!(result.performance.six_months.is_none());
    assert!(result.performance.one_year.is_none());

    // rising hard, yet still "not above" the undefined MA150
    assert!(result.technical.above_ma20);
    assert!(result.technical.above_ma50);
    assert!(!result.technical.above_ma150);
}

#[test]
fn full_history_defines_every_performance_window() {
    let closes: Vec<f64> = (0..252).map(|i| 80.0 + (i as f64 * 0.17).cos() * 5.0).collect();
    let result = analyze(&series_from_closes(&closes));

    assert!(result.performance.one_week.is_some());
    assert!(result.performance.one_month.is_some());
    assert!(result.performance.three_months.is_some());
    assert!(result.performance.six_months.is_some());
    assert!(result.performance.one_year.is_some());
}

#[test]
fn strong_rally_earns_an_ideal_entry() {
    // steady climb, then a calm two-week drift so the RSI settles into
    // the optimal band while the price holds above its averages
    let mut closes: Vec<f64> = (0..286).map(|i| 100.0 + i as f64 * 2.5).collect();
    let mut price = 812.5;
    for i in 0..14 {
        price += if i % 2 == 0 { 0.5 } else { -0.4 };
        closes.push(price);
    }
    let result = analyze(&series_from_closes(&closes));

    // six-month window: far above 50%
    assert!(result.performance.six_months.unwrap() > 50.0);
    assert!(result.uptrend);
    assert!(result.technical.above_ma20);
    assert!(result.technical.above_ma50);
    assert!(result.technical.above_ma150);
    assert!((40.0..=60.0).contains(&result.technical.rsi));

    assert_eq!(result.entry_score, 7.0);
    assert_eq!(
        Recommendation::for_score(result.entry_score),
        Recommendation::IdealEntry
    );
    assert!(result.risk_factors.is_empty());
}
