use super::backend::PrefsBackend;
use crate::error::{PrefsError, Result};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::io;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded.
/// This keeps the `PrefsBackend` trait on `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    stored: RefCell<Option<Map<String, Value>>>,
    saves: RefCell<usize>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that already holds persisted entries.
    pub fn seeded(entries: Map<String, Value>) -> Self {
        Self {
            stored: RefCell::new(Some(entries)),
            ..Self::default()
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// The entries as last saved, if any save happened or the backend was seeded.
    pub fn stored(&self) -> Option<Map<String, Value>> {
        self.stored.borrow().clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl PrefsBackend for MemBackend {
    fn load(&self) -> Result<Option<Map<String, Value>>> {
        Ok(self.stored.borrow().clone())
    }

    fn save(&self, entries: &Map<String, Value>) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(PrefsError::Io(io::Error::other("Simulated write error")));
        }
        *self.stored.borrow_mut() = Some(entries.clone());
        *self.saves.borrow_mut() += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}
