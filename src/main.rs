//! IFRS 17 Reporting CLI
//!
//! Loads a snapshot document and prints dashboard summaries,
//! reconciliations, and filtered raw data, or exports them as CSV.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use ifrs17_reporting::aggregate::{csm_reconciliation, liability_reconciliation};
use ifrs17_reporting::charts::{BarChartItem, ChartRenderer, ChartSurface, DonutChartItem, LineSeries};
use ifrs17_reporting::export::export_all;
use ifrs17_reporting::format::{dashboard_view_model, format_amount};
use ifrs17_reporting::records::loader::{self, load_snapshot};
use ifrs17_reporting::SnapshotStore;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ifrs17-reporting", version, about = "IFRS 17 reporting dashboard")]
struct Cli {
    /// Path to the snapshot JSON document
    #[arg(long, default_value = loader::DEFAULT_DATA_PATH)]
    data: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print dashboard cards, trends, and the portfolio comparison table
    Dashboard,
    /// Print a reconciliation table
    Reconcile {
        #[arg(value_enum)]
        kind: ReconKind,
    },
    /// Print record counts, optionally narrowed by portfolio or cohort
    Data {
        #[arg(long)]
        portfolio: Option<String>,
        #[arg(long)]
        cohort_year: Option<i32>,
    },
    /// Export comparison and reconciliation tables as CSV
    Export {
        /// Output directory
        #[arg(long, default_value = "reports")]
        out: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ReconKind {
    Liability,
    Csm,
}

/// Text renderer for terminal output
struct ConsoleRenderer;

impl ChartRenderer for ConsoleRenderer {
    fn line(&self, series: &[LineSeries], labels: &[String]) {
        for s in series {
            println!("  {}", s.name);
            for (label, value) in labels.iter().zip(&s.data) {
                println!("    {:>6} {:>16}", label, format_amount(*value));
            }
        }
    }

    fn bar(&self, items: &[BarChartItem]) {
        for item in items {
            println!("    {:<12} {:>16}", item.label, format_amount(item.value));
        }
    }

    fn donut(&self, items: &[DonutChartItem]) {
        let total: f64 = items.iter().map(|i| i.value).sum();
        for item in items {
            let share = if total > 0.0 {
                format!("{:.1}%", item.value / total * 100.0)
            } else {
                String::new()
            };
            println!("    {:<12} {:>16} {:>7}", item.label, format_amount(item.value), share);
        }
    }
}

fn print_dashboard(store: &SnapshotStore) {
    let vm = dashboard_view_model(store.snapshot());
    let surface = ChartSurface::new(Box::new(ConsoleRenderer));

    for card in &vm.stat_cards {
        if card.value_subtext.is_empty() {
            println!("{:<24} {}", card.title, card.value);
        } else {
            println!("{:<24} {}  ({})", card.title, card.value, card.value_subtext);
        }
    }

    println!("\nLiability by cohort year:");
    surface.draw_line(vec![vm.liability_series], &vm.liability_labels);

    println!("\nCSM by cohort year:");
    surface.draw_line(vec![vm.csm_series], &vm.csm_labels);

    println!("\nGross premium by portfolio:");
    surface.draw_bar(&vm.premium_bars);

    println!("\nClosing liability share:");
    surface.draw_donut(&vm.liability_donut);

    println!("\nPortfolio comparison:");
    println!(
        "{:<12} {:>10} {:>16} {:>16} {:>10} {:>18} {:>14}",
        "Portfolio", "Contracts", "GrossPremium", "Claims", "LossRatio", "ClosingLiability", "ClosingCSM"
    );
    println!("{}", "-".repeat(102));
    for row in &vm.comparison_table {
        println!(
            "{:<12} {:>10} {:>16} {:>16} {:>10} {:>18} {:>14}",
            row.portfolio,
            row.contracts,
            row.gross_premium,
            row.claims,
            row.loss_ratio,
            row.closing_liability,
            row.closing_csm
        );
    }
}

fn print_liability_reconciliation(store: &SnapshotStore) {
    let recon = liability_reconciliation(store.snapshot());
    println!(
        "{:<12} {:>6} {:>14} {:>12} {:>12} {:>12} {:>12} {:>12} {:>14}",
        "Portfolio", "Cohort", "Opening", "NewBus", "Premiums", "Claims", "CSMRel", "ExpVar", "Closing"
    );
    println!("{}", "-".repeat(112));
    for r in &recon.rows {
        println!(
            "{:<12} {:>6} {:>14.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>14.2}",
            r.portfolio,
            r.cohort_year,
            r.opening_balance,
            r.new_contracts,
            r.premiums_received,
            r.claims_incurred,
            r.csm_release,
            r.experience_variance,
            r.closing_balance
        );
    }
    let t = &recon.totals;
    println!("{}", "-".repeat(112));
    println!(
        "{:<12} {:>6} {:>14.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>14.2}",
        "TOTAL",
        "",
        t.opening_balance,
        t.new_contracts,
        t.premiums_received,
        t.claims_incurred,
        t.csm_release,
        t.experience_variance,
        t.closing_balance
    );
}

fn print_csm_reconciliation(store: &SnapshotStore) {
    let recon = csm_reconciliation(store.snapshot());
    println!(
        "{:<12} {:>6} {:>14} {:>14} {:>14} {:>12} {:>14}",
        "Portfolio", "Cohort", "Opening", "InitRecog", "Estimates", "Release", "Closing"
    );
    println!("{}", "-".repeat(92));
    for r in &recon.rows {
        println!(
            "{:<12} {:>6} {:>14.2} {:>14.2} {:>14.2} {:>12.2} {:>14.2}",
            r.portfolio,
            r.cohort_year,
            r.opening_csm,
            r.initial_recognition,
            r.changes_in_estimates,
            r.csm_release_to_pl,
            r.closing_csm
        );
    }
    let t = &recon.totals;
    println!("{}", "-".repeat(92));
    println!(
        "{:<12} {:>6} {:>14.2} {:>14.2} {:>14.2} {:>12.2} {:>14.2}",
        "TOTAL", "", t.opening_csm, t.initial_recognition, t.changes_in_estimates, t.csm_release_to_pl, t.closing_csm
    );
    println!(
        "\nInsurance revenue from CSM release: {}",
        format_amount(recon.insurance_revenue_from_csm_release)
    );
}

fn print_data(store: &SnapshotStore, portfolio: Option<&str>, cohort_year: Option<i32>) {
    let view = store.filtered(portfolio, cohort_year);
    if let Some(date) = view.metadata.reporting_date {
        println!("Reporting date: {}", date);
    }
    if let Some(currency) = &view.metadata.currency {
        println!("Currency: {}", currency);
    }
    println!("Portfolios: {}", view.metadata.portfolios.join(", "));
    println!();
    println!("{:<22} {:>6}", "Collection", "Count");
    println!("{}", "-".repeat(29));
    println!("{:<22} {:>6}", "contracts", view.contracts.len());
    println!("{:<22} {:>6}", "premiums", view.premiums.len());
    println!("{:<22} {:>6}", "claims", view.claims.len());
    println!("{:<22} {:>6}", "acquisition_costs", view.acquisition_costs.len());
    println!("{:<22} {:>6}", "reinsurance", view.reinsurance.len());
    println!("{:<22} {:>6}", "liability_movements", view.liability_movements.len());
    println!("{:<22} {:>6}", "csm_movements", view.csm_movements.len());
    println!("{:<22} {:>6}", "assumptions", view.assumptions.len());
    println!("{:<22} {:>6}", "discount_rates", view.discount_rates.len());
    println!("{:<22} {:>6}", "claims_development", view.claims_development.len());
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let snapshot = match load_snapshot(&cli.data) {
        Ok(s) => s,
        Err(e) => {
            // Absent or broken source renders an empty state, not a crash
            println!("No data available: {}", e);
            return Ok(());
        }
    };
    let store = SnapshotStore::new(snapshot);

    match cli.command {
        Command::Dashboard => print_dashboard(&store),
        Command::Reconcile { kind } => match kind {
            ReconKind::Liability => print_liability_reconciliation(&store),
            ReconKind::Csm => print_csm_reconciliation(&store),
        },
        Command::Data {
            portfolio,
            cohort_year,
        } => print_data(&store, portfolio.as_deref(), cohort_year),
        Command::Export { out } => {
            export_all(store.snapshot(), &out).map_err(|e| anyhow::anyhow!(e.to_string()))?;
            println!("Exported tables to {}", out.display());
        }
    }

    Ok(())
}
