//! # OB - Operations Board
//!
//! A terminal kanban board for startup-operations tasks: fundraising follow-ups,
//! investor paperwork, ESOP admin and everything else a small team tracks.
//!
//! ## Key Features
//!
//! - **Five fixed lanes**: To Do, In Progress, In Review, Blocked, Completed,
//!   each sorted by due date with undated cards last
//! - **Reveal windows**: lanes show one page of cards and grow a page at a time
//! - **Archive**: only the most recently completed tasks stay on the board; the
//!   rest live in a separate archive view
//! - **Keyboard drag**: pick a card up, carry it to another slot, drop it; the
//!   move is applied immediately and rolled back if the API refuses it
//! - **Scriptable**: every view is also a CLI command
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the board
//! ob ui
//!
//! # Print lanes, or the archive
//! ob lanes --status todo
//! ob archive
//!
//! # Move a task as if it had been dragged
//! ob move 64f1c2 in_review --position 0
//! ```
//!
//! Data lives in `~/.ob/`: `tasks.json` holds the task payload exactly as the
//! API returns it (`{"data": [...]}`), `config.json` holds board settings and
//! `ob.log` collects logs while the board is open.

use clap::Parser;

pub mod api;
pub mod board;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod fields;
pub mod logging;
pub mod store;
pub mod task;
pub mod tui {
    pub mod board;
    pub mod board_run;
    pub mod colors;
    pub mod enums;
}

use cli::Cli;
use cmd::*;
use config::{BoardConfig, Paths};
use error::Result;
use store::FileTaskApi;

fn main() {
    let cli = Cli::parse();
    let paths = Paths::new(cli.data_dir.clone(), cli.tasks.clone());

    if matches!(cli.command, Commands::Ui) {
        if let Err(e) = logging::init_file(&paths.log_file()) {
            eprintln!("Failed to open log file: {e}");
            std::process::exit(1);
        }
    } else {
        logging::init_stderr();
    }

    if let Err(e) = run(cli, paths) {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, paths: Paths) -> Result<()> {
    let config = BoardConfig::load(&paths.config_file())?.with_overrides(&cli.overrides());
    let mut api = FileTaskApi::new(&paths.tasks_file, config.recent_completed_limit);
    tracing::debug!(tasks = %api.path().display(), ?config, "starting");

    match cli.command {
        Commands::Ui => cmd_ui(api, config),
        Commands::Lanes { status, all } => cmd_lanes(&api, &config, status, all),
        Commands::Archive => cmd_archive(&api, &config),
        Commands::Show { id } => cmd_show(&api, &config, id),
        Commands::Move { id, status, position } => cmd_move(&mut api, &config, id, status, position),
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    }
}
