use anyhow::{Result, anyhow};

use entry_analyzer::market_data::{MarketData, REFERENCE_INDEX, YahooMarketData};
use entry_analyzer::series::CompanyInfo;
use entry_analyzer::{analysis, report};

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let symbol = args
        .next()
        .filter(|arg| !arg.starts_with('-'))
        .map(|arg| arg.to_uppercase())
        .ok_or_else(|| anyhow!("usage: entry-analyzer <SYMBOL> [--json] (e.g. AAPL, MSFT, GOOGL)"))?;
    let as_json = args.any(|arg| arg == "--json");

    let provider = YahooMarketData::new()?;

    // Step 1: Fetch Market Data
    println!("\n--- Step 1: Fetching Market Data for {symbol} ---");
    let (history, company, reference) = futures::future::join3(
        provider.price_history(&symbol),
        provider.company_info(&symbol),
        provider.price_history(REFERENCE_INDEX),
    )
    .await;

    let series = history?;
    let company = company.unwrap_or_else(|e| {
        eprintln!("Company info unavailable: {e}");
        CompanyInfo::unknown(&symbol)
    });
    let reference = match reference {
        Ok(series) => Some(series),
        Err(e) => {
            eprintln!("Reference index unavailable: {e}");
            None
        }
    };

    // Step 2: Score Entry Conditions
    println!("\n--- Step 2: Scoring Entry Conditions ---");
    let result = analysis::analyze(&symbol, &series, company).map_err(|e| {
        anyhow!(e).context("analysis failed; check that the symbol is spelled correctly")
    })?;

    // Step 3: Display Report
    println!("\n--- Step 3: Displaying Report ---");
    if as_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        report::render(&result, &series, reference.as_ref());
    }

    Ok(())
}
