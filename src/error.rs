//! Error taxonomy for the catalog core.
//!
//! Three recoverable failure classes cross the crate boundary:
//! - `ScanError`: the directory listing source could not be read
//! - `CatalogError::DuplicateAsset`: identity collision while building the registry
//! - `PersistenceError`: the rotation backend failed a read or a durable write

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The directory listing source could not be read.
///
/// A failed scan never replaces a previously published catalog; the caller
/// keeps the last good one and surfaces this error.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot read video listing at {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A rotation-state read or durable write failed.
///
/// Staged writes in the `RotationStore` survive a failed flush, so the
/// caller may retry without re-collecting user intent.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("rotation database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("rotation file error: {0}")]
    Io(#[from] io::Error),

    #[error("rotation file encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level error for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Two scanned entries resolved to the same asset identity. The earlier
    /// entry stays in the registry; the later one is rejected.
    #[error("duplicate asset identity {id:?}: {rejected:?} collides with {existing:?}")]
    DuplicateAsset {
        id: String,
        existing: String,
        rejected: String,
    },

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
