//! In-memory rotation backend for tests and previews.

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::PersistenceError;
use crate::rotation::PersistenceBackend;

/// A backend that persists nothing.
///
/// `set` stages into an in-memory map; `flush` copies it to a separate
/// "durable" map and counts the call. Clones share state, so a test can keep
/// a handle while the store owns the backend and then inspect what actually
/// became durable.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<State>>,
}

#[derive(Debug, Default)]
struct State {
    values: HashMap<String, bool>,
    flushed: HashMap<String, bool>,
    flush_count: usize,
    fail_next_flush: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// The durably flushed value for an id, if any.
    pub fn durable(&self, id: &str) -> Option<bool> {
        self.state().flushed.get(id).copied()
    }

    /// Number of successful flushes so far.
    pub fn flush_count(&self) -> usize {
        self.state().flush_count
    }

    /// Make the next `flush` fail once with an I/O error.
    pub fn fail_next_flush(&self) {
        self.state().fail_next_flush = true;
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PersistenceBackend for MemoryBackend {
    fn get(&self, id: &str) -> Result<Option<bool>, PersistenceError> {
        Ok(self.state().values.get(id).copied())
    }

    fn set(&mut self, id: &str, in_rotation: bool) -> Result<(), PersistenceError> {
        self.state().values.insert(id.to_string(), in_rotation);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), PersistenceError> {
        let mut state = self.state();
        if state.fail_next_flush {
            state.fail_next_flush = false;
            return Err(PersistenceError::Io(io::Error::new(
                io::ErrorKind::Other,
                "injected flush failure",
            )));
        }
        state.flushed = state.values.clone();
        state.flush_count += 1;
        Ok(())
    }
}
