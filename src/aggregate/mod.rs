//! Pure aggregation folds over a reporting snapshot
//!
//! Everything in this module is deterministic and side-effect free: the
//! same snapshot always produces the same output. Indeterminate ratios
//! (division by zero) leave this module as `None`, never as NaN or
//! infinity, so formatting can render a placeholder instead of garbage.

mod reconciliation;

pub use reconciliation::{
    csm_reconciliation, liability_reconciliation, CsmReconciliation, CsmReconciliationRow,
    CsmTotals, LiabilityReconciliation, LiabilityReconciliationRow, LiabilityTotals,
};

use crate::records::Snapshot;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Sum a numeric field across a record collection; empty collection is 0
pub fn total_of<T, F>(records: &[T], amount: F) -> f64
where
    F: Fn(&T) -> f64,
{
    records.iter().map(amount).sum()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Percentage ratio rounded to one decimal place
///
/// A zero denominator yields `None` for every numerator, including zero.
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(round1(numerator / denominator * 100.0))
    }
}

/// Percentage change of closing vs opening, rounded to one decimal place
///
/// The sign carries direction. A zero opening balance yields `None`.
pub fn trend_percent(closing: f64, opening: f64) -> Option<f64> {
    if opening == 0.0 {
        None
    } else {
        Some(round1((closing - opening) / opening * 100.0))
    }
}

/// Per-portfolio accumulator
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    /// Gross premium written
    pub premium: f64,

    /// Claims incurred
    pub claims: f64,

    /// Closing insurance contract liability
    pub liability: f64,

    /// Closing contractual service margin
    pub csm: f64,

    /// Number of contracts
    pub count: usize,

    /// Opening insurance contract liability
    pub opening: f64,
}

/// Fold the snapshot into one accumulator per recognized portfolio
///
/// Output has exactly one entry per portfolio in the metadata list, in
/// metadata order, even when a portfolio has no matching records. Records
/// naming an unrecognized portfolio, and premium/claim records whose
/// contract reference does not resolve, are excluded.
pub fn group_by_portfolio(snapshot: &Snapshot) -> Vec<(String, PortfolioTotals)> {
    let portfolios = &snapshot.metadata.portfolios;
    let index: HashMap<&str, usize> = portfolios
        .iter()
        .enumerate()
        .map(|(i, p)| (p.as_str(), i))
        .collect();
    let mut buckets = vec![PortfolioTotals::default(); portfolios.len()];
    let contracts_by_id = snapshot.contracts_by_id();
    let mut dropped = 0usize;

    for contract in &snapshot.contracts {
        match index.get(contract.portfolio.as_str()) {
            Some(&i) => buckets[i].count += 1,
            None => dropped += 1,
        }
    }

    for premium in &snapshot.premiums {
        let bucket = contracts_by_id
            .get(&premium.contract_id)
            .and_then(|c| index.get(c.portfolio.as_str()));
        match bucket {
            Some(&i) => buckets[i].premium += premium.gross_premium,
            None => dropped += 1,
        }
    }

    for claim in &snapshot.claims {
        let bucket = contracts_by_id
            .get(&claim.contract_id)
            .and_then(|c| index.get(c.portfolio.as_str()));
        match bucket {
            Some(&i) => buckets[i].claims += claim.incurred_amount,
            None => dropped += 1,
        }
    }

    for movement in &snapshot.liability_movements {
        match index.get(movement.portfolio.as_str()) {
            Some(&i) => {
                buckets[i].liability += movement.closing_balance;
                buckets[i].opening += movement.opening_balance;
            }
            None => dropped += 1,
        }
    }

    for movement in &snapshot.csm_movements {
        match index.get(movement.portfolio.as_str()) {
            Some(&i) => buckets[i].csm += movement.closing_csm,
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        log::debug!("group_by_portfolio excluded {} unresolved records", dropped);
    }

    portfolios.iter().cloned().zip(buckets).collect()
}

/// Sum a selected field per cohort year over a fixed year axis
///
/// Output length always equals `years.len()`; years with no matching
/// records contribute 0, never omission.
pub fn group_by_cohort_year<T, Y, F>(records: &[T], years: &[i32], year_of: Y, amount: F) -> Vec<f64>
where
    Y: Fn(&T) -> i32,
    F: Fn(&T) -> f64,
{
    years
        .iter()
        .map(|&year| {
            records
                .iter()
                .filter(|r| year_of(r) == year)
                .map(&amount)
                .sum()
        })
        .collect()
}

/// Sorted distinct cohort years present in a record collection
pub fn cohort_years<T, Y>(records: &[T], year_of: Y) -> Vec<i32>
where
    Y: Fn(&T) -> i32,
{
    records
        .iter()
        .map(year_of)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Labeled time series over cohort years
///
/// `values.len()` always equals `labels.len()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CohortSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

fn cohort_series<T, Y, F>(records: &[T], year_of: Y, amount: F) -> CohortSeries
where
    Y: Fn(&T) -> i32 + Copy,
    F: Fn(&T) -> f64,
{
    let years = cohort_years(records, year_of);
    let values = group_by_cohort_year(records, &years, year_of, amount);
    CohortSeries {
        labels: years.iter().map(|y| y.to_string()).collect(),
        values,
    }
}

/// Closing liability by cohort year
pub fn liability_trend(snapshot: &Snapshot) -> CohortSeries {
    cohort_series(
        &snapshot.liability_movements,
        |m| m.cohort_year,
        |m| m.closing_balance,
    )
}

/// Closing CSM by cohort year
pub fn csm_trend(snapshot: &Snapshot) -> CohortSeries {
    cohort_series(&snapshot.csm_movements, |m| m.cohort_year, |m| m.closing_csm)
}

/// Dashboard totals, trends, and the per-portfolio breakdown
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Total closing insurance contract liability
    pub insurance_liability: f64,

    /// Total opening insurance contract liability
    pub insurance_liability_opening: f64,

    /// Liability change vs opening, percent
    pub liability_trend_pct: Option<f64>,

    /// Total reinsurance contract asset balance
    pub reinsurance_asset: f64,

    /// Total closing CSM
    pub closing_csm: f64,

    /// CSM change vs opening, percent
    pub csm_trend_pct: Option<f64>,

    /// Total gross written premium
    pub gross_premium: f64,

    /// Total premium net of reinsurance
    pub net_premium: f64,

    /// Total claims incurred
    pub claims_incurred: f64,

    /// Claims incurred over net premium, percent
    pub loss_ratio_pct: Option<f64>,

    /// Number of contracts in the snapshot
    pub contracts_count: usize,

    /// Insurance revenue from CSM release to profit or loss
    pub insurance_revenue_csm_release: f64,

    /// Total acquisition costs
    pub acquisition_costs_total: f64,

    /// Total claims paid
    pub claims_paid: f64,

    /// Total outstanding claim reserves
    pub claims_outstanding_reserve: f64,

    /// Accumulators keyed by portfolio name
    pub by_portfolio: BTreeMap<String, PortfolioTotals>,

    /// Recognized portfolio names in metadata order
    pub portfolios: Vec<String>,
}

/// Compute the dashboard summary for a snapshot
pub fn dashboard_summary(snapshot: &Snapshot) -> DashboardSummary {
    let liability_close = total_of(&snapshot.liability_movements, |m| m.closing_balance);
    let liability_open = total_of(&snapshot.liability_movements, |m| m.opening_balance);
    let csm_close = total_of(&snapshot.csm_movements, |m| m.closing_csm);
    let csm_open = total_of(&snapshot.csm_movements, |m| m.opening_csm);
    let csm_release = total_of(&snapshot.csm_movements, |m| {
        m.csm_release_to_pl.unwrap_or(0.0)
    });
    let gross_premium = total_of(&snapshot.premiums, |p| p.gross_premium);
    let net_premium = total_of(&snapshot.premiums, |p| p.net_premium);
    let claims_incurred = total_of(&snapshot.claims, |c| c.incurred_amount);
    let claims_paid = total_of(&snapshot.claims, |c| c.paid_amount.unwrap_or(0.0));
    let claims_outstanding = total_of(&snapshot.claims, |c| c.outstanding_reserve.unwrap_or(0.0));
    let acquisition_total = total_of(&snapshot.acquisition_costs, |a| a.total);
    let reinsurance_asset = total_of(&snapshot.reinsurance, |r| r.reinsurance_asset_balance);

    let by_portfolio: BTreeMap<String, PortfolioTotals> =
        group_by_portfolio(snapshot).into_iter().collect();

    DashboardSummary {
        insurance_liability: liability_close,
        insurance_liability_opening: liability_open,
        liability_trend_pct: trend_percent(liability_close, liability_open),
        reinsurance_asset,
        closing_csm: csm_close,
        csm_trend_pct: trend_percent(csm_close, csm_open),
        gross_premium,
        net_premium,
        claims_incurred,
        loss_ratio_pct: ratio(claims_incurred, net_premium),
        contracts_count: snapshot.contract_count(),
        insurance_revenue_csm_release: csm_release,
        acquisition_costs_total: acquisition_total,
        claims_paid,
        claims_outstanding_reserve: claims_outstanding,
        by_portfolio,
        portfolios: snapshot.metadata.portfolios.clone(),
    }
}

/// One row of the portfolio comparison table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub portfolio: String,
    pub contracts: usize,
    pub gross_premium: f64,
    pub claims: f64,
    pub loss_ratio_pct: Option<f64>,
    pub closing_liability: f64,
    pub closing_csm: f64,
}

/// Portfolio comparison table, one row per portfolio in metadata order
pub fn portfolio_comparison(snapshot: &Snapshot) -> Vec<ComparisonRow> {
    group_by_portfolio(snapshot)
        .into_iter()
        .map(|(portfolio, totals)| ComparisonRow {
            loss_ratio_pct: ratio(totals.claims, totals.premium),
            portfolio,
            contracts: totals.count,
            gross_premium: totals.premium,
            claims: totals.claims,
            closing_liability: totals.liability,
            closing_csm: totals.csm,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::loader::load_snapshot_from_str;
    use approx::assert_abs_diff_eq;

    fn motor_snapshot() -> Snapshot {
        load_snapshot_from_str(
            r#"{
                "metadata": {"portfolios": ["Motor", "Property", "Life"]},
                "contracts": [{"contract_id": 1, "portfolio": "Motor", "cohort_year": 2024}],
                "premiums": [{"contract_id": 1, "gross_premium": 100.0, "net_premium": 100.0}],
                "claims": [{"contract_id": 1, "incurred_amount": 40.0}]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_total_of_empty_is_zero() {
        let premiums: Vec<crate::records::PremiumRecord> = Vec::new();
        assert_eq!(total_of(&premiums, |p| p.gross_premium), 0.0);
    }

    #[test]
    fn test_total_of_sums_selected_field() {
        let snapshot = motor_snapshot();
        assert_abs_diff_eq!(total_of(&snapshot.premiums, |p| p.gross_premium), 100.0);
        assert_abs_diff_eq!(total_of(&snapshot.claims, |c| c.incurred_amount), 40.0);
    }

    #[test]
    fn test_ratio_zero_denominator_is_none() {
        assert_eq!(ratio(10.0, 0.0), None);
        assert_eq!(ratio(0.0, 0.0), None);
        assert_eq!(ratio(-5.0, 0.0), None);
    }

    #[test]
    fn test_ratio_rounds_to_one_decimal() {
        assert_eq!(ratio(1.0, 3.0), Some(33.3));
        assert_eq!(ratio(40.0, 100.0), Some(40.0));
    }

    #[test]
    fn test_trend_zero_opening_is_none() {
        assert_eq!(trend_percent(500.0, 0.0), None);
        assert_eq!(trend_percent(0.0, 0.0), None);
    }

    #[test]
    fn test_trend_sign_carries_direction() {
        assert_eq!(trend_percent(110.0, 100.0), Some(10.0));
        assert_eq!(trend_percent(90.0, 100.0), Some(-10.0));
    }

    #[test]
    fn test_group_by_portfolio_motor_bucket() {
        let grouped = group_by_portfolio(&motor_snapshot());
        assert_eq!(grouped.len(), 3);
        let (name, motor) = &grouped[0];
        assert_eq!(name, "Motor");
        assert_eq!(
            *motor,
            PortfolioTotals {
                premium: 100.0,
                claims: 40.0,
                liability: 0.0,
                csm: 0.0,
                count: 1,
                opening: 0.0,
            }
        );
    }

    #[test]
    fn test_group_by_portfolio_covers_every_metadata_portfolio() {
        let grouped = group_by_portfolio(&motor_snapshot());
        let names: Vec<&str> = grouped.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(names, vec!["Motor", "Property", "Life"]);
        // Portfolios with no records get an all-zero accumulator
        assert_eq!(grouped[1].1, PortfolioTotals::default());
        assert_eq!(grouped[2].1, PortfolioTotals::default());
    }

    #[test]
    fn test_unresolved_reference_excluded_from_grouping_only() {
        let snapshot = load_snapshot_from_str(
            r#"{
                "metadata": {"portfolios": ["Motor"]},
                "contracts": [{"contract_id": 1, "portfolio": "Motor", "cohort_year": 2024}],
                "premiums": [
                    {"contract_id": 1, "gross_premium": 100.0, "net_premium": 90.0},
                    {"contract_id": 99, "gross_premium": 50.0, "net_premium": 45.0}
                ]
            }"#,
        )
        .unwrap();

        // Raw totals still see the orphan premium
        assert_abs_diff_eq!(total_of(&snapshot.premiums, |p| p.gross_premium), 150.0);

        // Portfolio grouping drops it
        let grouped = group_by_portfolio(&snapshot);
        assert_abs_diff_eq!(grouped[0].1.premium, 100.0);
    }

    #[test]
    fn test_unrecognized_portfolio_dropped() {
        let snapshot = load_snapshot_from_str(
            r#"{
                "metadata": {"portfolios": ["Motor"]},
                "contracts": [
                    {"contract_id": 1, "portfolio": "Motor", "cohort_year": 2024},
                    {"contract_id": 2, "portfolio": "Marine", "cohort_year": 2024}
                ],
                "liability_movements": [
                    {"portfolio": "Marine", "cohort_year": 2024, "opening_balance": 10.0, "closing_balance": 20.0}
                ]
            }"#,
        )
        .unwrap();

        let grouped = group_by_portfolio(&snapshot);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].1.count, 1);
        assert_eq!(grouped[0].1.liability, 0.0);
    }

    #[test]
    fn test_group_by_cohort_year_fixed_axis() {
        let snapshot = load_snapshot_from_str(
            r#"{
                "metadata": {"portfolios": ["Motor"]},
                "liability_movements": [
                    {"portfolio": "Motor", "cohort_year": 2022, "closing_balance": 100.0},
                    {"portfolio": "Motor", "cohort_year": 2024, "closing_balance": 300.0},
                    {"portfolio": "Motor", "cohort_year": 2024, "closing_balance": 50.0}
                ]
            }"#,
        )
        .unwrap();

        let values = group_by_cohort_year(
            &snapshot.liability_movements,
            &[2022, 2023, 2024],
            |m| m.cohort_year,
            |m| m.closing_balance,
        );
        assert_eq!(values.len(), 3);
        assert_abs_diff_eq!(values[0], 100.0);
        assert_abs_diff_eq!(values[1], 0.0);
        assert_abs_diff_eq!(values[2], 350.0);
    }

    #[test]
    fn test_cohort_series_labels_match_values() {
        let snapshot = load_snapshot_from_str(
            r#"{
                "liability_movements": [
                    {"portfolio": "Motor", "cohort_year": 2023, "closing_balance": 10.0},
                    {"portfolio": "Motor", "cohort_year": 2021, "closing_balance": 5.0}
                ]
            }"#,
        )
        .unwrap();

        let series = liability_trend(&snapshot);
        assert_eq!(series.labels, vec!["2021", "2023"]);
        assert_eq!(series.values.len(), series.labels.len());
        assert_abs_diff_eq!(series.values[0], 5.0);
    }

    #[test]
    fn test_dashboard_summary_ratios_and_trends() {
        let snapshot = load_snapshot_from_str(
            r#"{
                "metadata": {"portfolios": ["Motor"]},
                "contracts": [{"contract_id": 1, "portfolio": "Motor", "cohort_year": 2024}],
                "premiums": [{"contract_id": 1, "gross_premium": 120.0, "net_premium": 100.0}],
                "claims": [{"contract_id": 1, "incurred_amount": 40.0, "paid_amount": 25.0, "outstanding_reserve": 15.0}],
                "liability_movements": [
                    {"portfolio": "Motor", "cohort_year": 2024, "opening_balance": 200.0, "closing_balance": 220.0}
                ],
                "csm_movements": [
                    {"portfolio": "Motor", "cohort_year": 2024, "opening_csm": 50.0, "csm_release_to_pl": 5.0, "closing_csm": 45.0}
                ],
                "reinsurance": [{"contract_id": 1, "reinsurance_asset_balance": 30.0}],
                "acquisition_costs": [{"contract_id": 1, "commission": 8.0, "underwriting": 2.0, "total": 10.0}]
            }"#,
        )
        .unwrap();

        let summary = dashboard_summary(&snapshot);
        assert_abs_diff_eq!(summary.insurance_liability, 220.0);
        assert_eq!(summary.liability_trend_pct, Some(10.0));
        assert_eq!(summary.csm_trend_pct, Some(-10.0));
        assert_eq!(summary.loss_ratio_pct, Some(40.0));
        assert_abs_diff_eq!(summary.claims_paid, 25.0);
        assert_abs_diff_eq!(summary.claims_outstanding_reserve, 15.0);
        assert_abs_diff_eq!(summary.insurance_revenue_csm_release, 5.0);
        assert_abs_diff_eq!(summary.acquisition_costs_total, 10.0);
        assert_abs_diff_eq!(summary.reinsurance_asset, 30.0);
        assert_eq!(summary.contracts_count, 1);
        assert_eq!(summary.by_portfolio["Motor"].count, 1);
    }

    #[test]
    fn test_summary_trend_none_when_opening_zero() {
        let snapshot = load_snapshot_from_str(
            r#"{
                "metadata": {"portfolios": ["Motor"]},
                "liability_movements": [
                    {"portfolio": "Motor", "cohort_year": 2024, "opening_balance": 0.0, "closing_balance": 500.0}
                ]
            }"#,
        )
        .unwrap();

        let summary = dashboard_summary(&snapshot);
        assert_abs_diff_eq!(summary.insurance_liability, 500.0);
        assert_eq!(summary.liability_trend_pct, None);
    }

    #[test]
    fn test_portfolio_comparison_rows() {
        let rows = portfolio_comparison(&motor_snapshot());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].portfolio, "Motor");
        assert_eq!(rows[0].contracts, 1);
        assert_eq!(rows[0].loss_ratio_pct, Some(40.0));
        // Empty portfolio: zero premium means the loss ratio is indeterminate
        assert_eq!(rows[1].loss_ratio_pct, None);
        assert_eq!(rows[1].contracts, 0);
    }
}
