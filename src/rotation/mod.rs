//! Rotation state: which clips the user keeps in the active playback set.
//!
//! `RotationStore` owns the staging and flush semantics; the durable side is
//! a pluggable `PersistenceBackend`:
//! - `SqliteBackend`: the default durable store, under the user data directory
//! - `JsonFileBackend`: a single JSON file, rewritten atomically on flush
//! - `MemoryBackend`: in-memory, for tests and previews

pub mod json;
pub mod memory;
pub mod sqlite;
pub mod store;

pub use json::JsonFileBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;
pub use store::RotationStore;

use crate::error::PersistenceError;

/// Durable key-value backend for rotation flags.
///
/// `set` may stage internally; only `flush` guarantees durability. A backend
/// whose writes are durable per `set` call implements `flush` as a no-op.
pub trait PersistenceBackend {
    fn get(&self, id: &str) -> Result<Option<bool>, PersistenceError>;

    fn set(&mut self, id: &str, in_rotation: bool) -> Result<(), PersistenceError>;

    fn flush(&mut self) -> Result<(), PersistenceError>;
}
