//! The rotation store: staged writes over a durable backend.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use log::debug;

use crate::error::PersistenceError;
use crate::rotation::PersistenceBackend;

/// Maps asset identity to the user's "in rotation" flag.
///
/// Writes are staged in memory and become durable on [`flush`](Self::flush);
/// a write issued with `synchronize = true` is flushed immediately. Reads
/// resolve staged values first, then the backend, then the configured
/// default for identities that were never set.
///
/// The store is safe to share between logical writers (a bulk operation and
/// a single checkbox toggle in flight together): all methods take `&self`
/// and serialize on an internal lock, so a staged write is either included
/// in a given flush or deferred to the next one, never split. For writes to
/// the same identity, the last `set` to reach the store before a flush wins.
///
/// A failed flush keeps every staged write, so it is safe to retry without
/// re-collecting user intent.
pub struct RotationStore<B: PersistenceBackend> {
    default_in_rotation: bool,
    inner: Mutex<Inner<B>>,
}

struct Inner<B> {
    backend: B,
    staged: HashMap<String, bool>,
}

impl<B: PersistenceBackend> RotationStore<B> {
    /// Create a store over a backend.
    ///
    /// `default_in_rotation` is the documented value returned for
    /// identities that were never set. The screensaver convention is `true`:
    /// every clip plays until the user unchecks it.
    pub fn new(backend: B, default_in_rotation: bool) -> Self {
        Self {
            default_in_rotation,
            inner: Mutex::new(Inner {
                backend,
                staged: HashMap::new(),
            }),
        }
    }

    /// The value reported for identities that were never set.
    pub fn default_in_rotation(&self) -> bool {
        self.default_in_rotation
    }

    /// Whether the asset is in the active playback set.
    pub fn get(&self, id: &str) -> Result<bool, PersistenceError> {
        let inner = self.lock();
        if let Some(&staged) = inner.staged.get(id) {
            return Ok(staged);
        }
        Ok(inner.backend.get(id)?.unwrap_or(self.default_in_rotation))
    }

    /// Stage a flag; flush immediately when `synchronize` is set.
    ///
    /// A synchronized write flushes the whole staged batch, so any writes
    /// staged before it become durable at the same time.
    pub fn set(&self, id: &str, in_rotation: bool, synchronize: bool) -> Result<(), PersistenceError> {
        let mut inner = self.lock();
        inner.staged.insert(id.to_string(), in_rotation);
        if synchronize {
            flush_staged(&mut inner)?;
        }
        Ok(())
    }

    /// Durably commit all staged writes. Safe no-op with nothing staged;
    /// safe to retry after a failure.
    pub fn flush(&self) -> Result<(), PersistenceError> {
        flush_staged(&mut self.lock())
    }

    /// Stage a flag for every id, then flush exactly once.
    ///
    /// Equivalent in final persisted state to synchronized individual sets,
    /// without the per-id durable round trips.
    pub fn set_all<I, S>(&self, ids: I, in_rotation: bool) -> Result<(), PersistenceError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut inner = self.lock();
        for id in ids {
            inner.staged.insert(id.into(), in_rotation);
        }
        flush_staged(&mut inner)
    }

    /// Number of writes staged but not yet durable.
    pub fn staged_len(&self) -> usize {
        self.lock().staged.len()
    }

    // A poisoned lock only means another writer panicked mid-operation; the
    // staged map is still a valid map, so recover the guard.
    fn lock(&self) -> MutexGuard<'_, Inner<B>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn flush_staged<B: PersistenceBackend>(inner: &mut Inner<B>) -> Result<(), PersistenceError> {
    let Inner { backend, staged } = inner;
    if staged.is_empty() {
        return Ok(());
    }
    for (id, &in_rotation) in staged.iter() {
        backend.set(id, in_rotation)?;
    }
    backend.flush()?;
    debug!("flushed {} rotation writes", staged.len());
    staged.clear();
    Ok(())
}

impl<B: PersistenceBackend> std::fmt::Debug for RotationStore<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotationStore")
            .field("default_in_rotation", &self.default_in_rotation)
            .field("staged", &self.staged_len())
            .finish()
    }
}
