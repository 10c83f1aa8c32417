//! Board configuration.
//!
//! Settings live in `<data-dir>/config.json`. Every field has a default, so a
//! missing file or a partial one is fine; command-line flags win over the file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};
use crate::fields::UnknownStatusPolicy;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_RECENT_COMPLETED_LIMIT: usize = 10;
pub const DEFAULT_SHOW_MORE_DELAY_MS: u64 = 250;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Cards revealed per lane initially and per "show more".
    pub page_size: usize,
    /// Completed tasks kept on the board; older ones go to the archive.
    pub recent_completed_limit: usize,
    /// Loading pause before a "show more" lands. Zero applies it immediately.
    pub show_more_delay_ms: u64,
    pub unknown_status: UnknownStatusPolicy,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            page_size: DEFAULT_PAGE_SIZE,
            recent_completed_limit: DEFAULT_RECENT_COMPLETED_LIMIT,
            show_more_delay_ms: DEFAULT_SHOW_MORE_DELAY_MS,
            unknown_status: UnknownStatusPolicy::default(),
        }
    }
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub page_size: Option<usize>,
    pub recent_completed_limit: Option<usize>,
}

impl BoardConfig {
    /// Load from a JSON file, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(BoardConfig::default());
        }
        let raw = fs::read_to_string(path).map_err(|e| BoardError::io(path, e))?;
        let config: BoardConfig = serde_json::from_str(&raw).map_err(|e| BoardError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(config.normalised())
    }

    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(n) = overrides.page_size {
            self.page_size = n;
        }
        if let Some(n) = overrides.recent_completed_limit {
            self.recent_completed_limit = n;
        }
        self.normalised()
    }

    pub fn show_more_delay(&self) -> Duration {
        Duration::from_millis(self.show_more_delay_ms)
    }

    // A zero page would make "show more" a no-op forever.
    fn normalised(mut self) -> Self {
        self.page_size = self.page_size.max(1);
        self
    }
}

/// Filesystem locations used by the binary.
#[derive(Debug, Clone)]
pub struct Paths {
    pub data_dir: PathBuf,
    pub tasks_file: PathBuf,
}

impl Paths {
    pub fn new(data_dir: Option<PathBuf>, tasks_file: Option<PathBuf>) -> Self {
        let data_dir = data_dir.unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".ob")
        });
        let tasks_file = tasks_file.unwrap_or_else(|| data_dir.join("tasks.json"));
        Paths { data_dir, tasks_file }
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join("config.json")
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("ob.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BoardConfig::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, BoardConfig::default());
        assert_eq!(config.page_size, 10);
        assert_eq!(config.recent_completed_limit, 10);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"page_size": 5, "unknown_status": "reject"}"#).unwrap();

        let config = BoardConfig::load(&path).unwrap();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.unknown_status, UnknownStatusPolicy::Reject);
        assert_eq!(config.recent_completed_limit, DEFAULT_RECENT_COMPLETED_LIMIT);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ page_size: ").unwrap();
        assert!(matches!(BoardConfig::load(&path), Err(BoardError::Config { .. })));
    }

    #[test]
    fn overrides_win_and_zero_page_is_clamped() {
        let config = BoardConfig::default().with_overrides(&ConfigOverrides {
            page_size: Some(0),
            recent_completed_limit: Some(3),
        });
        assert_eq!(config.page_size, 1);
        assert_eq!(config.recent_completed_limit, 3);
    }
}
