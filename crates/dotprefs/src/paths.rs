//! # User Data Directory
//!
//! Desktop applications keep their preferences in a per-user, per-application
//! data directory. [`UserDataDir`] resolves it in this order:
//!
//! 1. The OS-appropriate data directory from the `directories` crate
//!    (e.g. `~/.local/share/<app>` on Linux,
//!    `~/Library/Application Support/<qualifier>.<org>.<app>` on macOS,
//!    `%APPDATA%\<org>\<app>\data` on Windows).
//! 2. The `APPDATA` environment variable, used verbatim.
//! 3. A platform default: `$HOME/Library/Preferences` on macOS, `/var/local`
//!    everywhere else.
//!
//! Step 1 only fails when no home directory can be determined, which happens
//! in stripped-down service environments.
//!
//! The store never calls into this module on its own. Callers pass
//! `|| dir.resolve()` (or any other function) to
//! [`Prefs::open_with`](crate::Prefs::open_with).

use directories::ProjectDirs;
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::{debug, warn};

pub const DEFAULT_APP_NAME: &str = "dotprefs";
pub const APPDATA_ENV: &str = "APPDATA";

const MACOS_PREFERENCES: [&str; 2] = ["Library", "Preferences"];
const SHARED_LOCAL_DIR: &str = "/var/local";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDataDir {
    qualifier: String,
    organization: String,
    application: String,
}

impl UserDataDir {
    pub fn new(application: &str) -> Self {
        Self {
            qualifier: String::new(),
            organization: String::new(),
            application: application.to_string(),
        }
    }

    pub fn with_qualifier(mut self, qualifier: &str) -> Self {
        self.qualifier = qualifier.to_string();
        self
    }

    pub fn with_organization(mut self, organization: &str) -> Self {
        self.organization = organization.to_string();
        self
    }

    pub fn application(&self) -> &str {
        &self.application
    }

    pub fn resolve(&self) -> PathBuf {
        if let Some(dirs) =
            ProjectDirs::from(&self.qualifier, &self.organization, &self.application)
        {
            let dir = dirs.data_dir().to_path_buf();
            debug!(app = %self.application, dir = %dir.display(), "Resolved user data directory");
            return dir;
        }

        let dir = fallback_dir(|name| env::var_os(name), cfg!(target_os = "macos"));
        warn!(
            app = %self.application,
            dir = %dir.display(),
            "No home directory for the platform data dir; using fallback"
        );
        dir
    }
}

impl Default for UserDataDir {
    fn default() -> Self {
        Self::new(DEFAULT_APP_NAME)
    }
}

/// The data directory of the default application identity.
pub fn default_user_data_dir() -> PathBuf {
    UserDataDir::default().resolve()
}

/// Steps 2 and 3 of the resolution order, with the environment injected.
pub fn fallback_dir<F>(env: F, macos: bool) -> PathBuf
where
    F: Fn(&str) -> Option<OsString>,
{
    let non_empty = |name: &str| env(name).filter(|value| !value.is_empty());

    if let Some(dir) = non_empty(APPDATA_ENV) {
        return PathBuf::from(dir);
    }
    if macos {
        if let Some(home) = non_empty("HOME") {
            return MACOS_PREFERENCES
                .iter()
                .fold(PathBuf::from(home), |path, part| path.join(part));
        }
    }
    PathBuf::from(SHARED_LOCAL_DIR)
}
