//! # dotprefs
//!
//! A persistent, file-backed preferences store for desktop applications.
//! Nested settings are addressed with dot paths (`window.width`), kept as a
//! flat ordered map, and written to a JSON file after every change.
//!
//! ```no_run
//! use dotprefs::{Prefs, PrefsOptions, UserDataDir};
//! use serde_json::json;
//!
//! let options = PrefsOptions::new()
//!     .with_file_name("settings.json")
//!     .with_defaults(json!({ "window": { "width": 600, "height": 300 } }));
//! let mut prefs = Prefs::for_app(&UserDataDir::new("my-editor"), options);
//!
//! assert_eq!(prefs.get("window"), Some(json!({ "width": 600, "height": 300 })));
//! prefs.set("window.width", 700)?;
//! # Ok::<(), dotprefs::PrefsError>(())
//! ```
//!
//! ## Layering
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │  Prefs (store/mod.rs)                          │
//! │  - get / set / delete / has / clear / entries │
//! │  - defaults + persisted overlay               │
//! └───────────────────────────────────────────────┘
//!          │ flatten / unflatten       │ load / save
//!          ▼                           ▼
//! ┌──────────────────┐     ┌──────────────────────────────┐
//! │  flatten.rs      │     │  PrefsBackend                │
//! │  pure functions  │     │  FsBackend │ MemBackend      │
//! └──────────────────┘     └──────────────────────────────┘
//! ```
//!
//! The directory of the backing file is either configured in
//! [`PrefsOptions`] or produced by a resolver function such as
//! [`UserDataDir::resolve`]. The store itself never consults the environment.

pub mod error;
pub mod flatten;
pub mod options;
pub mod paths;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use error::{PrefsError, Result};
pub use options::{PrefsOptions, DEFAULT_FILE_NAME};
pub use paths::UserDataDir;
pub use store::backend::PrefsBackend;
pub use store::fs_backend::FsBackend;
pub use store::mem_backend::MemBackend;
pub use store::Prefs;
