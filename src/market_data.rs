//! Market data acquisition. The analytics core never touches the
//! network; everything it consumes arrives through the `MarketData`
//! capability, so tests can feed synthetic series instead.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;

use crate::series::{CompanyInfo, DailyBar, PriceSeries};

/// Broad market benchmark shown alongside the analyzed symbol.
pub const REFERENCE_INDEX: &str = "^GSPC";

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const QUOTE_SUMMARY_URL: &str = "https://query1.finance.yahoo.com/v10/finance/quoteSummary";
const HISTORY_RANGE: &str = "1y";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; entry-analyzer/0.1)";

#[async_trait]
pub trait MarketData: Send + Sync {
    /// Daily bars for the symbol, oldest first.
    async fn price_history(&self, symbol: &str) -> Result<PriceSeries>;

    /// Company metadata; fields the provider cannot supply fall back to
    /// the `CompanyInfo::unknown` defaults.
    async fn company_info(&self, symbol: &str) -> Result<CompanyInfo>;
}

/// Yahoo Finance client over the chart and quoteSummary endpoints.
pub struct YahooMarketData {
    client: Client,
}

impl YahooMarketData {
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl MarketData for YahooMarketData {
    async fn price_history(&self, symbol: &str) -> Result<PriceSeries> {
        let url = format!("{CHART_URL}/{symbol}");
        let response: ChartResponse = self
            .client
            .get(&url)
            .query(&[("range", HISTORY_RANGE), ("interval", "1d")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .with_context(|| format!("unexpected chart payload for {symbol}"))?;

        let result = response
            .chart
            .result
            .and_then(|mut results| {
                if results.is_empty() {
                    None
                } else {
                    Some(results.remove(0))
                }
            })
            .ok_or_else(|| anyhow!("no chart data returned for {symbol}"))?;

        let timestamps = result.timestamp.unwrap_or_default();
        let quote = result
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("chart data for {symbol} has no quote block"))?;

        let mut bars = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            // Yahoo pads rows with nulls on halted days; skip incomplete rows
            let (Some(open), Some(high), Some(low), Some(close)) = (
                field(&quote.open, i),
                field(&quote.high, i),
                field(&quote.low, i),
                field(&quote.close, i),
            ) else {
                continue;
            };
            let Some(date) = DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()) else {
                continue;
            };
            bars.push(DailyBar {
                date,
                open,
                high,
                low,
                close,
            });
        }

        Ok(PriceSeries::new(bars))
    }

    async fn company_info(&self, symbol: &str) -> Result<CompanyInfo> {
        let url = format!("{QUOTE_SUMMARY_URL}/{symbol}");
        let response: SummaryResponse = self
            .client
            .get(&url)
            .query(&[("modules", "price,assetProfile")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .with_context(|| format!("unexpected quote summary payload for {symbol}"))?;

        let result = response
            .quote_summary
            .result
            .and_then(|mut results| {
                if results.is_empty() {
                    None
                } else {
                    Some(results.remove(0))
                }
            })
            .ok_or_else(|| anyhow!("no quote summary returned for {symbol}"))?;

        let defaults = CompanyInfo::unknown(symbol);
        let price = result.price.unwrap_or_default();

        Ok(CompanyInfo {
            market_cap: price
                .market_cap
                .and_then(|cap| cap.raw)
                .unwrap_or(defaults.market_cap),
            sector: result
                .asset_profile
                .and_then(|profile| profile.sector)
                .unwrap_or(defaults.sector),
            display_name: price.short_name.unwrap_or(defaults.display_name),
        })
    }
}

fn field(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}

// --- Yahoo response shapes ---

#[derive(Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartResult>>,
}

#[derive(Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
}

#[derive(Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Deserialize)]
struct SummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: SummaryEnvelope,
}

#[derive(Deserialize)]
struct SummaryEnvelope {
    result: Option<Vec<SummaryResult>>,
}

#[derive(Deserialize)]
struct SummaryResult {
    price: Option<PriceModule>,
    #[serde(rename = "assetProfile")]
    asset_profile: Option<AssetProfile>,
}

#[derive(Deserialize, Default)]
struct PriceModule {
    #[serde(rename = "shortName")]
    short_name: Option<String>,
    #[serde(rename = "marketCap")]
    market_cap: Option<RawValue>,
}

#[derive(Deserialize)]
struct RawValue {
    raw: Option<u64>,
}

#[derive(Deserialize)]
struct AssetProfile {
    sector: Option<String>,
}
