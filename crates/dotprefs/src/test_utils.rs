use crate::options::PrefsOptions;
use crate::store::fs_backend::FsBackend;
use crate::store::Prefs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Opens a store whose backing file lives in this environment's temp dir.
    pub fn open(&self, options: PrefsOptions) -> Prefs<FsBackend> {
        Prefs::open(options.with_file_path(self.root.clone()))
    }
}
