//! Opening-to-closing reconciliation tables
//!
//! A reconciliation restates each (portfolio, cohort) movement record as a
//! table row and appends a totals row summing every movement column.

use crate::records::{CsmMovement, LiabilityMovement, Snapshot};
use serde::{Deserialize, Serialize};

/// One row of the liability reconciliation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiabilityReconciliationRow {
    pub portfolio: String,
    pub cohort_year: i32,
    pub opening_balance: f64,
    pub new_contracts: f64,
    pub premiums_received: f64,
    pub claims_incurred: f64,
    pub csm_release: f64,
    pub experience_variance: f64,
    pub closing_balance: f64,
}

impl From<&LiabilityMovement> for LiabilityReconciliationRow {
    fn from(m: &LiabilityMovement) -> Self {
        Self {
            portfolio: m.portfolio.clone(),
            cohort_year: m.cohort_year,
            opening_balance: m.opening_balance,
            new_contracts: m.new_contracts,
            premiums_received: m.premiums_received,
            claims_incurred: m.claims_incurred,
            csm_release: m.csm_release,
            experience_variance: m.experience_variance,
            closing_balance: m.closing_balance,
        }
    }
}

/// Column totals across all liability reconciliation rows
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LiabilityTotals {
    pub opening_balance: f64,
    pub new_contracts: f64,
    pub premiums_received: f64,
    pub claims_incurred: f64,
    pub csm_release: f64,
    pub experience_variance: f64,
    pub closing_balance: f64,
}

/// Liability reconciliation: per-(portfolio, cohort) rows plus totals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LiabilityReconciliation {
    pub rows: Vec<LiabilityReconciliationRow>,
    pub totals: LiabilityTotals,
}

/// Build the liability reconciliation for a snapshot
pub fn liability_reconciliation(snapshot: &Snapshot) -> LiabilityReconciliation {
    let rows: Vec<LiabilityReconciliationRow> = snapshot
        .liability_movements
        .iter()
        .map(LiabilityReconciliationRow::from)
        .collect();

    let mut totals = LiabilityTotals::default();
    for row in &rows {
        totals.opening_balance += row.opening_balance;
        totals.new_contracts += row.new_contracts;
        totals.premiums_received += row.premiums_received;
        totals.claims_incurred += row.claims_incurred;
        totals.csm_release += row.csm_release;
        totals.experience_variance += row.experience_variance;
        totals.closing_balance += row.closing_balance;
    }

    LiabilityReconciliation { rows, totals }
}

/// One row of the CSM reconciliation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsmReconciliationRow {
    pub portfolio: String,
    pub cohort_year: i32,
    pub opening_csm: f64,
    pub initial_recognition: f64,
    pub changes_in_estimates: f64,
    pub csm_release_to_pl: f64,
    pub closing_csm: f64,
}

impl From<&CsmMovement> for CsmReconciliationRow {
    fn from(m: &CsmMovement) -> Self {
        Self {
            portfolio: m.portfolio.clone(),
            cohort_year: m.cohort_year,
            opening_csm: m.opening_csm,
            initial_recognition: m.initial_recognition,
            changes_in_estimates: m.changes_in_estimates,
            csm_release_to_pl: m.csm_release_to_pl.unwrap_or(0.0),
            closing_csm: m.closing_csm,
        }
    }
}

/// Column totals across all CSM reconciliation rows
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CsmTotals {
    pub opening_csm: f64,
    pub initial_recognition: f64,
    pub changes_in_estimates: f64,
    pub csm_release_to_pl: f64,
    pub closing_csm: f64,
}

/// CSM reconciliation: rows, totals, and revenue from CSM release
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CsmReconciliation {
    pub rows: Vec<CsmReconciliationRow>,
    pub totals: CsmTotals,
    /// Insurance revenue recognized from CSM release over the period
    pub insurance_revenue_from_csm_release: f64,
}

/// Build the CSM reconciliation for a snapshot
pub fn csm_reconciliation(snapshot: &Snapshot) -> CsmReconciliation {
    let rows: Vec<CsmReconciliationRow> = snapshot
        .csm_movements
        .iter()
        .map(CsmReconciliationRow::from)
        .collect();

    let mut totals = CsmTotals::default();
    for row in &rows {
        totals.opening_csm += row.opening_csm;
        totals.initial_recognition += row.initial_recognition;
        totals.changes_in_estimates += row.changes_in_estimates;
        totals.csm_release_to_pl += row.csm_release_to_pl;
        totals.closing_csm += row.closing_csm;
    }

    CsmReconciliation {
        insurance_revenue_from_csm_release: totals.csm_release_to_pl,
        rows,
        totals,
    }
}
