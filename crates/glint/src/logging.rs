//! File logging. The terminal belongs to the UI, so nothing goes to stderr.

use std::fs::{self, OpenOptions};
use std::str::FromStr;
use std::sync::Mutex;

use tracing::Level;

/// Install a subscriber writing to the log file at `level` (default `info`).
///
/// If the file cannot be opened the app runs without logging.
pub fn init(level: &str) {
    let level = Level::from_str(level).unwrap_or(Level::INFO);
    let Ok(path) = glint_config::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}
