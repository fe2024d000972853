//! Snapshot store: one immutable snapshot, many pure readers
//!
//! The store owns the currently loaded snapshot and exposes read-only
//! access. Replacing the snapshot is the only mutation; registered
//! observers are notified with the new snapshot so downstream consumers
//! can recompute. There is no per-record mutation, creation, or deletion.

use crate::records::{ReportingMetadata, Snapshot};
use std::collections::HashSet;

/// Observer invoked with the new snapshot after a replacement
pub type SnapshotObserver = Box<dyn Fn(&Snapshot) + Send + Sync>;

/// Holds the loaded snapshot and notifies observers on replacement
pub struct SnapshotStore {
    snapshot: Snapshot,
    observers: Vec<SnapshotObserver>,
}

impl SnapshotStore {
    /// Create a store over an explicitly supplied snapshot
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            observers: Vec::new(),
        }
    }

    /// The current snapshot
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Reporting metadata of the current snapshot
    pub fn metadata(&self) -> &ReportingMetadata {
        &self.snapshot.metadata
    }

    /// Register an observer called after every snapshot replacement
    pub fn subscribe(&mut self, observer: SnapshotObserver) {
        self.observers.push(observer);
    }

    /// Replace the snapshot wholesale and notify observers
    pub fn replace(&mut self, snapshot: Snapshot) {
        log::debug!(
            "replacing snapshot: {} contracts, {} portfolios",
            snapshot.contracts.len(),
            snapshot.metadata.portfolios.len()
        );
        self.snapshot = snapshot;
        for observer in &self.observers {
            observer(&self.snapshot);
        }
    }

    /// Snapshot narrowed to one portfolio and/or cohort year
    ///
    /// Contract-keyed collections keep only records whose contract survives
    /// the filter; (portfolio, cohort)-keyed collections are narrowed by
    /// their own key fields. Discount rates pass through unfiltered.
    pub fn filtered(&self, portfolio: Option<&str>, cohort_year: Option<i32>) -> Snapshot {
        if portfolio.is_none() && cohort_year.is_none() {
            return self.snapshot.clone();
        }

        let keep = |c: &crate::records::Contract| {
            portfolio.map_or(true, |p| c.portfolio == p)
                && cohort_year.map_or(true, |y| c.cohort_year == y)
        };
        let contract_ids: HashSet<u32> = self
            .snapshot
            .contracts
            .iter()
            .filter(|c| keep(c))
            .map(|c| c.contract_id)
            .collect();

        Snapshot {
            metadata: self.snapshot.metadata.clone(),
            contracts: self
                .snapshot
                .contracts
                .iter()
                .filter(|c| keep(c))
                .cloned()
                .collect(),
            premiums: self
                .snapshot
                .premiums
                .iter()
                .filter(|r| contract_ids.contains(&r.contract_id))
                .cloned()
                .collect(),
            claims: self
                .snapshot
                .claims
                .iter()
                .filter(|r| contract_ids.contains(&r.contract_id))
                .cloned()
                .collect(),
            acquisition_costs: self
                .snapshot
                .acquisition_costs
                .iter()
                .filter(|r| contract_ids.contains(&r.contract_id))
                .cloned()
                .collect(),
            reinsurance: self
                .snapshot
                .reinsurance
                .iter()
                .filter(|r| contract_ids.contains(&r.contract_id))
                .cloned()
                .collect(),
            liability_movements: self
                .snapshot
                .liability_movements
                .iter()
                .filter(|r| {
                    portfolio.map_or(true, |p| r.portfolio == p)
                        && cohort_year.map_or(true, |y| r.cohort_year == y)
                })
                .cloned()
                .collect(),
            csm_movements: self
                .snapshot
                .csm_movements
                .iter()
                .filter(|r| {
                    portfolio.map_or(true, |p| r.portfolio == p)
                        && cohort_year.map_or(true, |y| r.cohort_year == y)
                })
                .cloned()
                .collect(),
            assumptions: self
                .snapshot
                .assumptions
                .iter()
                .filter(|r| portfolio.map_or(true, |p| r.portfolio == p))
                .cloned()
                .collect(),
            discount_rates: self.snapshot.discount_rates.clone(),
            claims_development: self
                .snapshot
                .claims_development
                .iter()
                .filter(|r| cohort_year.map_or(true, |y| r.cohort_year == y))
                .cloned()
                .collect(),
        }
    }
}
