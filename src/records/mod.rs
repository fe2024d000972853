//! Snapshot record types and loading

mod data;
pub mod loader;

pub use data::{
    AcquisitionCostRecord, AssumptionRecord, ClaimRecord, ClaimsDevelopmentRecord, Contract,
    CsmMovement, DiscountRateRecord, LiabilityMovement, PremiumRecord, ReinsuranceRecord,
    ReportingMetadata, Snapshot,
};
pub use loader::{load_default_snapshot, load_snapshot, load_snapshot_from_reader, DataUnavailable};
