//! Terminal presentation of an `AnalysisResult`. Formatting only; every
//! number here was computed by the analysis pipeline.

use chrono::NaiveDate;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table,
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_BORDERS_ONLY,
};

use crate::analysis::AnalysisResult;
use crate::performance::{self, ONE_YEAR_BARS};
use crate::scoring::Recommendation;
use crate::series::PriceSeries;

pub fn render(result: &AnalysisResult, series: &PriceSeries, reference: Option<&PriceSeries>) {
    let info = &result.company_info;
    println!("\n{} ({}) - {}", info.display_name, result.symbol, info.sector);
    println!(
        "Current price: ${:.2} | Market cap: {}",
        result.current_price,
        format_market_cap(info.market_cap)
    );
    if let Some(date) = series.last_date() {
        println!("{}", data_as_of(date));
    }

    println!("\n{}", performance_table(result));
    println!("\n{}", technical_table(result));
    println!("\n{}", factor_table(result));

    if let Some(reference) = reference {
        let closes = reference.closes();
        match performance::window_return(&closes, ONE_YEAR_BARS) {
            Some(pct) => println!("\nS&P 500 1-year move: {pct:+.1}%"),
            None => println!("\nS&P 500 1-year move: n/a"),
        }
    }

    let percentage = result.entry_score / result.max_score * 100.0;
    let recommendation = Recommendation::for_score(result.entry_score);
    println!(
        "\nEntry score: {:.1}/{:.1} ({:.1}%) - {}",
        result.entry_score,
        result.max_score,
        percentage,
        recommendation.label()
    );
}

fn data_as_of(date: NaiveDate) -> String {
    format!("(Data as of {})", date.format("%d-%m-%Y"))
}

fn base_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_BORDERS_ONLY)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .into_iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );
    table
}

fn performance_table(result: &AnalysisResult) -> Table {
    let mut table = base_table(vec!["Period", "Return"]);
    let rows = [
        ("1 week", result.performance.one_week),
        ("1 month", result.performance.one_month),
        ("3 months", result.performance.three_months),
        ("6 months", result.performance.six_months),
        ("1 year", result.performance.one_year),
    ];

    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), percent_cell(value)]);
    }
    table
}

fn percent_cell(value: Option<f64>) -> Cell {
    match value {
        Some(pct) => {
            let color = if pct >= 0.0 { Color::Green } else { Color::Red };
            Cell::new(format!("{pct:+.1}%"))
                .fg(color)
                .set_alignment(CellAlignment::Right)
        }
        None => Cell::new("n/a")
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right),
    }
}

fn technical_table(result: &AnalysisResult) -> Table {
    let technical = &result.technical;
    let mut table = base_table(vec!["Indicator", "Value"]);
    table.add_row(vec![
        Cell::new("Green candles (20 days)"),
        Cell::new(technical.green_candle_count).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("RSI"),
        Cell::new(format!("{:.1}", technical.rsi)).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![Cell::new("Above MA20"), flag_cell(technical.above_ma20)]);
    table.add_row(vec![Cell::new("Above MA50"), flag_cell(technical.above_ma50)]);
    table.add_row(vec![
        Cell::new("Above MA150"),
        flag_cell(technical.above_ma150),
    ]);
    table.add_row(vec![Cell::new("Uptrend"), flag_cell(result.uptrend)]);
    table
}

fn flag_cell(flag: bool) -> Cell {
    if flag {
        Cell::new("yes")
            .fg(Color::Green)
            .set_alignment(CellAlignment::Right)
    } else {
        Cell::new("no")
            .fg(Color::Red)
            .set_alignment(CellAlignment::Right)
    }
}

fn factor_table(result: &AnalysisResult) -> Table {
    let mut table = base_table(vec!["", "Factor"]);
    for factor in &result.supporting_factors {
        table.add_row(vec![Cell::new("+").fg(Color::Green), Cell::new(factor)]);
    }
    for factor in &result.risk_factors {
        table.add_row(vec![Cell::new("!").fg(Color::Yellow), Cell::new(factor)]);
    }
    table
}

/// Compact market-cap rendering: $3.10T, $950.00B, $25.00M.
fn format_market_cap(cap: u64) -> String {
    const TRILLION: f64 = 1e12;
    const BILLION: f64 = 1e9;
    const MILLION: f64 = 1e6;

    if cap == 0 {
        return "n/a".to_string();
    }
    let cap = cap as f64;
    if cap >= TRILLION {
        format!("${:.2}T", cap / TRILLION)
    } else if cap >= BILLION {
        format!("${:.2}B", cap / BILLION)
    } else if cap >= MILLION {
        format!("${:.2}M", cap / MILLION)
    } else {
        format!("${cap:.0}")
    }
}
