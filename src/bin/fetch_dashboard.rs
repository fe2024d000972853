//! Fetch the dashboard payload from a running reporting API
//!
//! Usage: fetch_dashboard [BASE_URL]
//!
//! Pulls metadata and the combined dashboard payload, printing an empty
//! state when the API is unreachable or returns nothing usable.

use anyhow::Result;
use ifrs17_reporting::format::{format_amount, format_percent, trend_text};
use ifrs17_reporting::ApiClient;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:8000".to_string());

    let client = ApiClient::with_default_timeout(&base_url)?;

    if let Some(meta) = client.metadata().await {
        if let Some(date) = meta.reporting_date {
            println!("Reporting date: {}", date);
        }
        if let Some(currency) = &meta.currency {
            println!("Currency: {}", currency);
        }
        println!("Portfolios: {}", meta.portfolios.join(", "));
        println!();
    }

    let payload = match client.dashboard().await {
        Some(p) => p,
        None => {
            println!("No data available from {}", base_url);
            return Ok(());
        }
    };

    let s = &payload.summary;
    println!("Insurance liability: {}", format_amount(s.insurance_liability));
    if let Some(t) = s.liability_trend_pct {
        println!("  {}", trend_text(Some(t)));
    }
    println!("Closing CSM:         {}", format_amount(s.closing_csm));
    if let Some(t) = s.csm_trend_pct {
        println!("  {}", trend_text(Some(t)));
    }
    println!("Gross premium:       {}", format_amount(s.gross_premium));
    println!("Claims incurred:     {}", format_amount(s.claims_incurred));
    println!("Loss ratio:          {}", format_percent(s.loss_ratio_pct));
    println!("Contracts:           {}", s.contracts_count);

    println!("\nLiability by cohort year:");
    for (label, value) in payload
        .liability_trend
        .labels
        .iter()
        .zip(&payload.liability_trend.values)
    {
        println!("  {:>6} {:>16}", label, format_amount(*value));
    }

    println!("\nPortfolio comparison:");
    for row in &payload.portfolio_comparison {
        println!(
            "  {:<12} {:>4} contracts {:>14} premium {:>8} loss",
            row.portfolio,
            row.contracts,
            format_amount(row.gross_premium),
            format_percent(row.loss_ratio_pct)
        );
    }

    Ok(())
}
