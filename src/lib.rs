//! IFRS 17 Reporting Core - Snapshot aggregation engine for dashboard reporting
//!
//! This library provides:
//! - Atomic snapshot loading from JSON documents or a REST API
//! - Pure aggregation folds: totals, ratios, trends, per-portfolio and
//!   per-cohort breakdowns
//! - Liability and CSM reconciliation tables
//! - Display formatting and dashboard view models
//! - Chart input shapes with an injectable renderer seam

pub mod aggregate;
pub mod charts;
pub mod client;
pub mod export;
pub mod format;
pub mod records;
pub mod store;

// Re-export commonly used types
pub use aggregate::{dashboard_summary, portfolio_comparison, DashboardSummary};
pub use client::ApiClient;
pub use records::{load_snapshot, DataUnavailable, Snapshot};
pub use store::SnapshotStore;
