//! Load reporting snapshots from JSON documents
//!
//! Loading is all-or-nothing: either the full document parses into a
//! [`Snapshot`] or the caller gets [`DataUnavailable`] and renders an
//! empty state. No partial snapshot is ever exposed.

use super::Snapshot;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default path to the sample snapshot document
pub const DEFAULT_DATA_PATH: &str = "data/ifrs17_sample_data.json";

/// The snapshot source was absent, unreadable, or malformed
#[derive(Debug, Error)]
pub enum DataUnavailable {
    #[error("snapshot document not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("failed to read snapshot document: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed snapshot document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Load a snapshot from a JSON file
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Snapshot, DataUnavailable> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DataUnavailable::Missing {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path)?;
    load_snapshot_from_reader(file)
}

/// Load a snapshot from any reader (e.g., string buffer, network stream)
pub fn load_snapshot_from_reader<R: Read>(reader: R) -> Result<Snapshot, DataUnavailable> {
    let snapshot = serde_json::from_reader(reader)?;
    Ok(snapshot)
}

/// Load a snapshot from an in-memory JSON string
pub fn load_snapshot_from_str(json: &str) -> Result<Snapshot, DataUnavailable> {
    let snapshot = serde_json::from_str(json)?;
    Ok(snapshot)
}

/// Load the sample snapshot from the default location
pub fn load_default_snapshot() -> Result<Snapshot, DataUnavailable> {
    load_snapshot(DEFAULT_DATA_PATH)
}
