use std::{env, path::PathBuf};

use ftrack_config::Config;

/// Environment variable that relocates every file the tracker writes.
pub const APP_HOME_ENV: &str = "FINANCE_TRACKER_HOME";

/// Application directory: `$FINANCE_TRACKER_HOME` when set and non-empty, else the
/// platform data directory.
pub fn app_dir() -> PathBuf {
    match env::var_os(APP_HOME_ENV) {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => Config::default_app_dir(),
    }
}
