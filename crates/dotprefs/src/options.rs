//! # Store Options
//!
//! [`PrefsOptions`] is everything a store needs at construction time:
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `file_name` | `prefs` | Name of the backing file inside the directory |
//! | `file_path` | resolved | Directory holding the backing file |
//! | `defaults` | `{}` | Nested object flattened into the initial entries |
//!
//! When `file_path` is unset the directory comes from the resolver handed to
//! [`Prefs::open_with`](crate::Prefs::open_with), so platform lookups stay
//! outside the store.

use crate::error::Result;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::PathBuf;

pub const DEFAULT_FILE_NAME: &str = "prefs";

#[derive(Debug, Clone, PartialEq)]
pub struct PrefsOptions {
    pub file_name: String,
    pub file_path: Option<PathBuf>,
    pub defaults: Value,
}

impl Default for PrefsOptions {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
            file_path: None,
            defaults: Value::Object(Map::new()),
        }
    }
}

impl PrefsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file_name(mut self, name: &str) -> Self {
        self.file_name = name.to_string();
        self
    }

    pub fn with_file_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.file_path = Some(dir.into());
        self
    }

    pub fn with_defaults(mut self, defaults: Value) -> Self {
        self.defaults = defaults;
        self
    }

    /// Use a serializable value (typically a settings struct) as defaults.
    pub fn with_defaults_from<T: Serialize + ?Sized>(self, defaults: &T) -> Result<Self> {
        let value = serde_json::to_value(defaults)?;
        Ok(self.with_defaults(value))
    }

    /// The backing file name. An empty name falls back to [`DEFAULT_FILE_NAME`].
    pub fn file_name(&self) -> &str {
        if self.file_name.is_empty() {
            DEFAULT_FILE_NAME
        } else {
            &self.file_name
        }
    }

    /// The configured directory, or the one `resolve` yields when none is set.
    /// `resolve` is not called when a directory is configured.
    pub fn resolve_dir<F>(&self, resolve: F) -> PathBuf
    where
        F: FnOnce() -> PathBuf,
    {
        match &self.file_path {
            Some(dir) => dir.clone(),
            None => resolve(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_options() {
        let options = PrefsOptions::default();
        assert_eq!(options.file_name(), "prefs");
        assert_eq!(options.file_path, None);
        assert_eq!(options.defaults, json!({}));
    }

    #[test]
    fn test_empty_file_name_falls_back_to_default() {
        let options = PrefsOptions::new().with_file_name("");
        assert_eq!(options.file_name(), DEFAULT_FILE_NAME);

        let options = PrefsOptions::new().with_file_name("config.js");
        assert_eq!(options.file_name(), "config.js");
    }

    #[test]
    fn test_resolve_dir_prefers_configured_path() {
        let options = PrefsOptions::new().with_file_path("/tmp/app");
        let dir = options.resolve_dir(|| panic!("resolver must not run"));
        assert_eq!(dir, PathBuf::from("/tmp/app"));
    }

    #[test]
    fn test_resolve_dir_uses_resolver_when_unset() {
        let options = PrefsOptions::new();
        let dir = options.resolve_dir(|| PathBuf::from("/resolved"));
        assert_eq!(dir, PathBuf::from("/resolved"));
    }

    #[test]
    fn test_defaults_from_struct() {
        #[derive(Serialize)]
        struct Window {
            width: u32,
            height: u32,
        }
        #[derive(Serialize)]
        struct Settings {
            window: Window,
            theme: String,
        }

        let options = PrefsOptions::new()
            .with_defaults_from(&Settings {
                window: Window {
                    width: 600,
                    height: 300,
                },
                theme: "dark".to_string(),
            })
            .unwrap();

        assert_eq!(
            options.defaults,
            json!({ "window": { "width": 600, "height": 300 }, "theme": "dark" })
        );
    }
}
