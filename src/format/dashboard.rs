//! Dashboard view models: cards, chart inputs, and table rows

use super::{format_amount, format_count, format_money, format_percent, trend_down, trend_text};
use crate::aggregate::{
    csm_trend, dashboard_summary, liability_trend, portfolio_comparison, DashboardSummary,
};
use crate::charts::{BarChartItem, DonutChartItem, LineSeries};
use crate::records::Snapshot;
use serde::{Deserialize, Serialize};

/// Card accent themes recognized by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardTheme {
    Default,
    Green,
    Blue,
    Purple,
    Orange,
}

/// A stat card ready for rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub value_subtext: String,
    pub trend_down: bool,
    pub theme: CardTheme,
}

/// Comparison table row with every cell formatted for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRowView {
    pub portfolio: String,
    pub contracts: String,
    pub gross_premium: String,
    pub claims: String,
    pub loss_ratio: String,
    pub closing_liability: String,
    pub closing_csm: String,
}

/// Everything the dashboard needs, pre-formatted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardViewModel {
    pub stat_cards: Vec<StatCard>,
    /// Closing liability by cohort year
    pub liability_series: LineSeries,
    pub liability_labels: Vec<String>,
    /// Closing CSM by cohort year
    pub csm_series: LineSeries,
    pub csm_labels: Vec<String>,
    /// Gross premium per portfolio
    pub premium_bars: Vec<BarChartItem>,
    /// Closing liability share per portfolio
    pub liability_donut: Vec<DonutChartItem>,
    pub comparison_table: Vec<ComparisonRowView>,
}

// Slice palette cycled across portfolios
const DONUT_COLORS: [&str; 5] = ["#22C55E", "#86EFAC", "#F97316", "#3B82F6", "#A855F7"];

const LINE_GREEN: &str = "#22C55E";
const LINE_BLUE: &str = "#3B82F6";

fn stat_cards(summary: &DashboardSummary, currency: Option<&str>) -> Vec<StatCard> {
    vec![
        StatCard {
            title: "Insurance liability".to_string(),
            value: format_money(summary.insurance_liability, currency),
            value_subtext: trend_text(summary.liability_trend_pct),
            trend_down: trend_down(summary.liability_trend_pct),
            theme: CardTheme::Green,
        },
        StatCard {
            title: "Closing CSM".to_string(),
            value: format_money(summary.closing_csm, currency),
            value_subtext: trend_text(summary.csm_trend_pct),
            trend_down: trend_down(summary.csm_trend_pct),
            theme: CardTheme::Purple,
        },
        StatCard {
            title: "Gross premium".to_string(),
            value: format_money(summary.gross_premium, currency),
            value_subtext: format!("{} contracts", format_count(summary.contracts_count)),
            trend_down: false,
            theme: CardTheme::Blue,
        },
        StatCard {
            title: "Loss ratio".to_string(),
            value: format_percent(summary.loss_ratio_pct),
            value_subtext: format!(
                "{} claims incurred",
                format_money(summary.claims_incurred, currency)
            ),
            trend_down: false,
            theme: CardTheme::Orange,
        },
    ]
}

/// Build the full dashboard view model from a snapshot
pub fn dashboard_view_model(snapshot: &Snapshot) -> DashboardViewModel {
    let summary = dashboard_summary(snapshot);
    let currency = snapshot.metadata.currency.as_deref();

    let liability = liability_trend(snapshot);
    let csm = csm_trend(snapshot);

    let premium_bars: Vec<BarChartItem> = summary
        .portfolios
        .iter()
        .map(|p| BarChartItem {
            label: p.clone(),
            value: summary.by_portfolio.get(p).map_or(0.0, |t| t.premium),
        })
        .collect();

    let liability_donut: Vec<DonutChartItem> = summary
        .portfolios
        .iter()
        .enumerate()
        .map(|(i, p)| DonutChartItem {
            label: p.clone(),
            value: summary.by_portfolio.get(p).map_or(0.0, |t| t.liability),
            color: DONUT_COLORS[i % DONUT_COLORS.len()].to_string(),
        })
        .collect();

    let comparison_table: Vec<ComparisonRowView> = portfolio_comparison(snapshot)
        .into_iter()
        .map(|row| ComparisonRowView {
            portfolio: row.portfolio,
            contracts: format_count(row.contracts),
            gross_premium: format_amount(row.gross_premium),
            claims: format_amount(row.claims),
            loss_ratio: format_percent(row.loss_ratio_pct),
            closing_liability: format_amount(row.closing_liability),
            closing_csm: format_amount(row.closing_csm),
        })
        .collect();

    DashboardViewModel {
        stat_cards: stat_cards(&summary, currency),
        liability_series: LineSeries {
            name: "Closing liability".to_string(),
            data: liability.values,
            color: Some(LINE_GREEN.to_string()),
        },
        liability_labels: liability.labels,
        csm_series: LineSeries {
            name: "Closing CSM".to_string(),
            data: csm.values,
            color: Some(LINE_BLUE.to_string()),
        },
        csm_labels: csm.labels,
        premium_bars,
        liability_donut,
        comparison_table,
    }
}
