//! CSV export of comparison and reconciliation tables

use crate::aggregate::{
    csm_reconciliation, liability_reconciliation, portfolio_comparison, ComparisonRow,
    CsmReconciliation, LiabilityReconciliation,
};
use crate::records::Snapshot;
use std::error::Error;
use std::io::Write;
use std::path::Path;

/// Write the portfolio comparison table as CSV
pub fn write_portfolio_comparison<W: Write>(
    rows: &[ComparisonRow],
    writer: W,
) -> Result<(), Box<dyn Error>> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "Portfolio",
        "Contracts",
        "GrossPremium",
        "Claims",
        "LossRatioPct",
        "ClosingLiability",
        "ClosingCSM",
    ])?;
    for row in rows {
        csv.write_record([
            row.portfolio.clone(),
            row.contracts.to_string(),
            format!("{:.2}", row.gross_premium),
            format!("{:.2}", row.claims),
            row.loss_ratio_pct.map_or(String::new(), |p| format!("{:.1}", p)),
            format!("{:.2}", row.closing_liability),
            format!("{:.2}", row.closing_csm),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// Write the liability reconciliation (rows plus a TOTAL row) as CSV
pub fn write_liability_reconciliation<W: Write>(
    recon: &LiabilityReconciliation,
    writer: W,
) -> Result<(), Box<dyn Error>> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "Portfolio",
        "CohortYear",
        "OpeningBalance",
        "NewContracts",
        "PremiumsReceived",
        "ClaimsIncurred",
        "CsmRelease",
        "ExperienceVariance",
        "ClosingBalance",
    ])?;
    for row in &recon.rows {
        csv.write_record([
            row.portfolio.clone(),
            row.cohort_year.to_string(),
            format!("{:.2}", row.opening_balance),
            format!("{:.2}", row.new_contracts),
            format!("{:.2}", row.premiums_received),
            format!("{:.2}", row.claims_incurred),
            format!("{:.2}", row.csm_release),
            format!("{:.2}", row.experience_variance),
            format!("{:.2}", row.closing_balance),
        ])?;
    }
    let t = &recon.totals;
    csv.write_record([
        "TOTAL".to_string(),
        String::new(),
        format!("{:.2}", t.opening_balance),
        format!("{:.2}", t.new_contracts),
        format!("{:.2}", t.premiums_received),
        format!("{:.2}", t.claims_incurred),
        format!("{:.2}", t.csm_release),
        format!("{:.2}", t.experience_variance),
        format!("{:.2}", t.closing_balance),
    ])?;
    csv.flush()?;
    Ok(())
}

/// Write the CSM reconciliation (rows plus a TOTAL row) as CSV
pub fn write_csm_reconciliation<W: Write>(
    recon: &CsmReconciliation,
    writer: W,
) -> Result<(), Box<dyn Error>> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "Portfolio",
        "CohortYear",
        "OpeningCSM",
        "InitialRecognition",
        "ChangesInEstimates",
        "CsmReleaseToPL",
        "ClosingCSM",
    ])?;
    for row in &recon.rows {
        csv.write_record([
            row.portfolio.clone(),
            row.cohort_year.to_string(),
            format!("{:.2}", row.opening_csm),
            format!("{:.2}", row.initial_recognition),
            format!("{:.2}", row.changes_in_estimates),
            format!("{:.2}", row.csm_release_to_pl),
            format!("{:.2}", row.closing_csm),
        ])?;
    }
    let t = &recon.totals;
    csv.write_record([
        "TOTAL".to_string(),
        String::new(),
        format!("{:.2}", t.opening_csm),
        format!("{:.2}", t.initial_recognition),
        format!("{:.2}", t.changes_in_estimates),
        format!("{:.2}", t.csm_release_to_pl),
        format!("{:.2}", t.closing_csm),
    ])?;
    csv.flush()?;
    Ok(())
}

/// Export comparison and both reconciliations into a directory
///
/// Writes `portfolio_comparison.csv`, `liability_reconciliation.csv`, and
/// `csm_reconciliation.csv`.
pub fn export_all<P: AsRef<Path>>(snapshot: &Snapshot, dir: P) -> Result<(), Box<dyn Error>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let comparison = portfolio_comparison(snapshot);
    write_portfolio_comparison(
        &comparison,
        std::fs::File::create(dir.join("portfolio_comparison.csv"))?,
    )?;

    write_liability_reconciliation(
        &liability_reconciliation(snapshot),
        std::fs::File::create(dir.join("liability_reconciliation.csv"))?,
    )?;

    write_csm_reconciliation(
        &csm_reconciliation(snapshot),
        std::fs::File::create(dir.join("csm_reconciliation.csv"))?,
    )?;

    log::info!("exported 3 tables to {}", dir.display());
    Ok(())
}
