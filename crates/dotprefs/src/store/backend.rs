use crate::error::Result;
use serde_json::{Map, Value};

/// Abstract interface for raw preferences I/O.
///
/// The backend only moves the flat map in and out of storage. [`Prefs`]
/// owns the key semantics (flattening, prefix lookups, ordering).
///
/// [`Prefs`]: super::Prefs
pub trait PrefsBackend {
    /// Load the persisted entries.
    /// Returns Ok(None) when nothing has been persisted yet.
    /// Returns Err when stored data exists but cannot be read or parsed.
    fn load(&self) -> Result<Option<Map<String, Value>>>;

    /// Replace the persisted entries with `entries`.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save(&self, entries: &Map<String, Value>) -> Result<()>;

    /// Human readable location, used in log messages.
    fn location(&self) -> String;
}
