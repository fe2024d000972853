//! Record types matching the IFRS 17 reporting snapshot format

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Reporting metadata carried with every snapshot
///
/// The `portfolios` list is the authoritative enumeration for all
/// per-portfolio grouping: records naming a portfolio outside this list do
/// not contribute to grouped aggregates, and grouped output preserves this
/// order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportingMetadata {
    /// Reporting date of the snapshot
    #[serde(default)]
    pub reporting_date: Option<NaiveDate>,

    /// ISO currency code for all monetary amounts
    #[serde(default)]
    pub currency: Option<String>,

    /// Ordered list of recognized portfolio names
    #[serde(default)]
    pub portfolios: Vec<String>,

    /// Free-text description of the data set
    #[serde(default)]
    pub description: Option<String>,
}

/// A single insurance contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    /// Unique contract identifier
    pub contract_id: u32,

    /// Portfolio (business line) the contract belongs to
    pub portfolio: String,

    /// Underwriting-year cohort
    pub cohort_year: i32,

    /// Product name
    #[serde(default)]
    pub product: Option<String>,

    /// Coverage units for CSM release allocation
    #[serde(default)]
    pub coverage_units: Option<f64>,

    /// Measurement model (GMM or PAA)
    #[serde(default)]
    pub measurement_model: Option<String>,
}

/// Premium written against a contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PremiumRecord {
    /// Contract this premium belongs to
    pub contract_id: u32,

    /// Gross written premium
    #[serde(default)]
    pub gross_premium: f64,

    /// Premium net of reinsurance
    #[serde(default)]
    pub net_premium: f64,
}

/// Claim incurred against a contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// Contract this claim belongs to
    pub contract_id: u32,

    /// Total incurred amount
    #[serde(default)]
    pub incurred_amount: f64,

    /// Amount paid to date
    #[serde(default)]
    pub paid_amount: Option<f64>,

    /// Case reserve still outstanding
    #[serde(default)]
    pub outstanding_reserve: Option<f64>,
}

/// Acquisition costs attributable to a contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquisitionCostRecord {
    /// Contract the costs were incurred for
    pub contract_id: u32,

    /// Commission component
    #[serde(default)]
    pub commission: f64,

    /// Underwriting expense component
    #[serde(default)]
    pub underwriting: f64,

    /// Total acquisition cost
    #[serde(default)]
    pub total: f64,
}

/// Insurance contract liability roll-forward for one (portfolio, cohort)
///
/// Closing balance is expected to equal opening plus the signed movement
/// components; the aggregator does not enforce this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiabilityMovement {
    /// Portfolio the movement applies to
    pub portfolio: String,

    /// Underwriting-year cohort
    pub cohort_year: i32,

    /// Liability at the start of the period
    #[serde(default)]
    pub opening_balance: f64,

    /// Liability recognized on new contracts
    #[serde(default)]
    pub new_contracts: f64,

    /// Premiums received during the period
    #[serde(default)]
    pub premiums_received: f64,

    /// Claims incurred during the period
    #[serde(default)]
    pub claims_incurred: f64,

    /// CSM released to profit or loss
    #[serde(default)]
    pub csm_release: f64,

    /// Experience variance against expected cashflows
    #[serde(default)]
    pub experience_variance: f64,

    /// Liability at the end of the period
    #[serde(default)]
    pub closing_balance: f64,
}

/// Contractual service margin roll-forward for one (portfolio, cohort)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsmMovement {
    /// Portfolio the movement applies to
    pub portfolio: String,

    /// Underwriting-year cohort
    pub cohort_year: i32,

    /// CSM at the start of the period
    #[serde(default)]
    pub opening_csm: f64,

    /// CSM recognized on initial recognition of new business
    #[serde(default)]
    pub initial_recognition: f64,

    /// Changes in estimates relating to future service
    #[serde(default)]
    pub changes_in_estimates: f64,

    /// CSM released to profit or loss for services provided
    #[serde(default)]
    pub csm_release_to_pl: Option<f64>,

    /// CSM at the end of the period
    #[serde(default)]
    pub closing_csm: f64,
}

/// Reinsurance held balances for a ceded contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReinsuranceRecord {
    /// Underlying contract identifier
    pub contract_id: u32,

    /// Premium ceded year to date
    #[serde(default)]
    pub ceded_premium_ytd: f64,

    /// Recoveries received year to date
    #[serde(default)]
    pub recoveries_ytd: f64,

    /// Reinsurance contract asset balance
    #[serde(default)]
    pub reinsurance_asset_balance: f64,
}

/// Actuarial assumption set for a portfolio
///
/// Carried for filtered data views; never aggregated. Only the filter key
/// is typed, everything else rides along untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssumptionRecord {
    pub portfolio: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Discount rate curve point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountRateRecord {
    #[serde(default)]
    pub cohort_year: Option<i32>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Claims development triangle entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimsDevelopmentRecord {
    pub cohort_year: i32,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One atomic reporting snapshot
///
/// Loaded as a unit and treated as immutable for the lifetime of a view;
/// a fresh snapshot fully replaces the previous one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub metadata: ReportingMetadata,

    #[serde(default)]
    pub contracts: Vec<Contract>,

    #[serde(default)]
    pub premiums: Vec<PremiumRecord>,

    #[serde(default)]
    pub claims: Vec<ClaimRecord>,

    #[serde(default)]
    pub acquisition_costs: Vec<AcquisitionCostRecord>,

    #[serde(default)]
    pub reinsurance: Vec<ReinsuranceRecord>,

    #[serde(default)]
    pub liability_movements: Vec<LiabilityMovement>,

    #[serde(default)]
    pub csm_movements: Vec<CsmMovement>,

    #[serde(default)]
    pub assumptions: Vec<AssumptionRecord>,

    #[serde(default)]
    pub discount_rates: Vec<DiscountRateRecord>,

    #[serde(default)]
    pub claims_development: Vec<ClaimsDevelopmentRecord>,
}

impl Snapshot {
    /// Index contracts by identifier for reference resolution
    pub fn contracts_by_id(&self) -> HashMap<u32, &Contract> {
        self.contracts.iter().map(|c| (c.contract_id, c)).collect()
    }

    /// Number of contracts in the snapshot
    pub fn contract_count(&self) -> usize {
        self.contracts.len()
    }
}
