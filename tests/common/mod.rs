#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use finance_tracker::cli::{CliMode, ShellContext};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh application directory that is removed when the test binary exits.
pub fn app_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Script-mode shell rooted at `dir`, so confirmations are accepted automatically.
pub fn shell_at(dir: &std::path::Path) -> ShellContext {
    ShellContext::with_app_dir(CliMode::Script, dir.to_path_buf()).expect("create shell context")
}

/// Runs each line through the shell, failing the test on the first command error.
pub fn run(shell: &mut ShellContext, lines: &[&str]) {
    for line in lines {
        shell
            .process_line(line)
            .unwrap_or_else(|err| panic!("`{}` failed: {}", line, err));
    }
}
