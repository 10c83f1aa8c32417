//! Tracing subscriber setup.
//!
//! Filter comes from `OB_LOG` (e.g. `OB_LOG=ops_board=debug`), defaulting to `info`.
//! The TUI owns the terminal, so while it runs logs go to a file instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{BoardError, Result};

const LOG_ENV: &str = "OB_LOG";
const DEFAULT_LEVEL: &str = "info";

fn env_filter() -> EnvFilter {
    // Fall back to the default level if the variable is unset or invalid.
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(DEFAULT_LEVEL))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Log to stderr. Used by the plain CLI commands.
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Append logs to `path`. Used while the board TUI is on screen.
pub fn init_file(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| BoardError::io(dir, e))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| BoardError::io(path, e))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
