//! Entry-score aggregation: an ordered rule table folds the computed
//! metrics into a bounded score plus supporting and risk factor lines.

use crate::indicators::TechnicalIndicators;
use crate::performance::PerformanceMetrics;

/// Upper bound of the entry score. The rule deltas sum to at most 7, so
/// no clamping is needed to stay inside `[0, MAX_SCORE]`.
pub const MAX_SCORE: f64 = 8.0;

/// Metrics shared by every scoring rule.
pub struct ScoringInput<'a> {
    pub performance: &'a PerformanceMetrics,
    pub technical: &'a TechnicalIndicators,
    pub uptrend: bool,
}

enum Factor {
    Supporting(String),
    Risk(String),
}

/// Outcome of one rule: a score delta and at most one factor line.
struct Verdict {
    delta: f64,
    factor: Option<Factor>,
}

impl Verdict {
    fn supporting(delta: f64, text: String) -> Self {
        Self {
            delta,
            factor: Some(Factor::Supporting(text)),
        }
    }

    fn risk(text: String) -> Self {
        Self {
            delta: 0.0,
            factor: Some(Factor::Risk(text)),
        }
    }

    fn neutral() -> Self {
        Self {
            delta: 0.0,
            factor: None,
        }
    }
}

type Rule = fn(&ScoringInput) -> Verdict;

/// Evaluated in order; factor lines keep this order in the result.
const RULES: [Rule; 4] = [
    six_month_performance,
    uptrend_strength,
    moving_average_position,
    rsi_band,
];

fn six_month_performance(input: &ScoringInput) -> Verdict {
    match input.performance.six_months {
        Some(pct) if pct > 50.0 => {
            Verdict::supporting(2.0, format!("exceptional 6-month performance: {pct:.1}%"))
        }
        Some(pct) if pct > 25.0 => {
            Verdict::supporting(1.0, format!("excellent 6-month performance: {pct:.1}%"))
        }
        _ => Verdict::neutral(),
    }
}

fn uptrend_strength(input: &ScoringInput) -> Verdict {
    if input.uptrend {
        Verdict::supporting(2.0, "strong uptrend".to_string())
    } else {
        Verdict::risk("no clear uptrend".to_string())
    }
}

fn moving_average_position(input: &ScoringInput) -> Verdict {
    let technical = input.technical;
    let above = [
        technical.above_ma20,
        technical.above_ma50,
        technical.above_ma150,
    ]
    .iter()
    .filter(|&&flag| flag)
    .count();

    match above {
        3 => Verdict::supporting(2.0, "price above all moving averages".to_string()),
        2 => Verdict::supporting(1.0, "price above most moving averages".to_string()),
        _ => Verdict::risk("price below most moving averages".to_string()),
    }
}

fn rsi_band(input: &ScoringInput) -> Verdict {
    let rsi = input.technical.rsi;
    if (40.0..=60.0).contains(&rsi) {
        Verdict::supporting(1.0, format!("optimal RSI: {rsi:.1}"))
    } else if rsi > 70.0 {
        Verdict::risk(format!("RSI too high: {rsi:.1}"))
    } else if rsi < 30.0 {
        Verdict::risk(format!("RSI too low: {rsi:.1}"))
    } else {
        Verdict::neutral()
    }
}

/// Aggregated scoring output, before result assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCard {
    pub entry_score: f64,
    pub supporting_factors: Vec<String>,
    pub risk_factors: Vec<String>,
}

pub fn evaluate(input: &ScoringInput) -> ScoreCard {
    let mut card = ScoreCard {
        entry_score: 0.0,
        supporting_factors: Vec::new(),
        risk_factors: Vec::new(),
    };

    for rule in RULES {
        let verdict = rule(input);
        card.entry_score += verdict.delta;
        match verdict.factor {
            Some(Factor::Supporting(text)) => card.supporting_factors.push(text),
            Some(Factor::Risk(text)) => card.risk_factors.push(text),
            None => {}
        }
    }

    card
}

/// Three-tier bucketing of the score percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    IdealEntry,
    PossibleWithCaution,
    NotRecommended,
}

impl Recommendation {
    pub fn for_score(entry_score: f64) -> Self {
        let percentage = entry_score / MAX_SCORE * 100.0;
        if percentage >= 75.0 {
            Self::IdealEntry
        } else if percentage >= 50.0 {
            Self::PossibleWithCaution
        } else {
            Self::NotRecommended
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::IdealEntry => "ideal entry",
            Self::PossibleWithCaution => "possible entry with caution",
            Self::NotRecommended => "not recommended",
        }
    }
}
