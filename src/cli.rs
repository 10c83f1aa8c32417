use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;
use crate::config::ConfigOverrides;

/// Kanban board for startup-operations tasks.
/// Tasks are read from <data-dir>/tasks.json unless --tasks is given.
#[derive(Parser)]
#[command(name = "ob", version, about = "Startup operations task board")]
pub struct Cli {
    /// Directory holding config.json, tasks.json and the log file. Defaults to ~/.ob.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to the task file (a `{"data": [...]}` API payload).
    #[arg(long, global = true)]
    pub tasks: Option<PathBuf>,

    /// Cards revealed per lane and per "show more".
    #[arg(long, global = true)]
    pub page_size: Option<usize>,

    /// Completed tasks kept on the board before the rest are archived.
    #[arg(long, global = true)]
    pub recent_limit: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            page_size: self.page_size,
            recent_completed_limit: self.recent_limit,
        }
    }
}
