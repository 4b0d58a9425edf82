use super::backend::PrefsBackend;
use crate::error::{PrefsError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Stores the flat map as a single JSON object at `<dir>/<file_name>`.
///
/// Every call opens, reads or writes, and closes the file; no handle is held
/// between calls.
pub struct FsBackend {
    dir: PathBuf,
    file_name: String,
}

impl FsBackend {
    pub fn new(dir: impl Into<PathBuf>, file_name: &str) -> Self {
        Self {
            dir: dir.into(),
            file_name: file_name.to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Absolute path of the backing file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(PrefsError::Io)?;
        }
        Ok(())
    }
}

impl PrefsBackend for FsBackend {
    fn load(&self) -> Result<Option<Map<String, Value>>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(PrefsError::Io)?;
        let parsed: Value = serde_json::from_str(&content).map_err(PrefsError::Serialization)?;
        match parsed {
            Value::Object(entries) => Ok(Some(entries)),
            other => Err(PrefsError::Store(format!(
                "{} does not hold a JSON object (found {})",
                path.display(),
                json_kind(&other)
            ))),
        }
    }

    fn save(&self, entries: &Map<String, Value>) -> Result<()> {
        self.ensure_dir()?;

        let content = serde_json::to_string_pretty(entries).map_err(PrefsError::Serialization)?;

        // Atomic write
        let tmp_path = self
            .dir
            .join(format!(".{}-{}.tmp", self.file_name, Uuid::new_v4()));
        let written =
            fs::write(&tmp_path, content).and_then(|()| fs::rename(&tmp_path, self.path()));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(PrefsError::Io(e));
        }

        Ok(())
    }

    fn location(&self) -> String {
        self.path().display().to_string()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
