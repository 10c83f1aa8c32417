//! Command implementations for the CLI interface.
//!
//! Each command runs the same derivation pipeline as the board TUI and prints
//! the result, so lanes, archive and moves can be scripted.

use std::io;

use chrono::Local;
use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::api::{fetch_tasks, screen_statuses, TaskApi};
use crate::board::{BoardState, DragEnd, LanePosition};
use crate::cli::Cli;
use crate::config::BoardConfig;
use crate::error::{BoardError, Result};
use crate::fields::*;
use crate::task::{format_due_relative, truncate, Task, TaskId};
use crate::tui::board_run::run_board_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive kanban board.
    Ui,

    /// Print the board lanes with their first page of cards.
    Lanes {
        /// Only print this lane.
        #[arg(long, value_enum)]
        status: Option<Status>,
        /// Print every card instead of the first page.
        #[arg(long)]
        all: bool,
    },

    /// Print completed tasks that fell off the board.
    Archive,

    /// View a single task by ID.
    Show {
        /// Task ID.
        id: String,
    },

    /// Move a task to a lane, as if it had been dragged there.
    Move {
        /// Task ID.
        id: String,
        /// Destination lane.
        #[arg(value_enum)]
        status: Status,
        /// Slot within the destination lane (0 = top).
        #[arg(long, default_value_t = 0)]
        position: usize,
    },

    /// Generate shell completion scripts.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Fetch the collection into a fresh board state.
fn load_board<A: TaskApi>(api: &A, config: &BoardConfig) -> Result<BoardState> {
    let mut state = BoardState::new(config);
    state.replace_tasks(fetch_tasks(api, config.unknown_status)?);
    Ok(state)
}

pub fn cmd_ui<A: TaskApi>(api: A, config: BoardConfig) -> Result<()> {
    run_board_tui(api, config).map_err(|e| BoardError::io("terminal", e))
}

pub fn cmd_lanes<A: TaskApi>(api: &A, config: &BoardConfig, only: Option<Status>, all: bool) -> Result<()> {
    let state = load_board(api, config)?;
    let view = state.view();

    for status in Status::LANES.into_iter().filter(|s| only.map_or(true, |o| o == *s)) {
        let window = state.window(&view, status);
        let rows: &[&Task] = if all { view.lanes.get(status) } else { window.visible };
        println!("== {} ({}) ==", status.title(), window.total);
        if rows.is_empty() {
            println!("  (empty)");
        } else {
            print_table(rows);
        }
        if window.has_more && !all {
            println!("  … {} more (use --all)", window.hidden());
        }
        println!();
    }
    if view.lanes.dropped() > 0 {
        println!("{} task(s) with an unrecognized status are not shown.", view.lanes.dropped());
    }
    Ok(())
}

pub fn cmd_archive<A: TaskApi>(api: &A, config: &BoardConfig) -> Result<()> {
    let state = load_board(api, config)?;
    let view = state.view();
    if view.archived.is_empty() {
        println!("No archived tasks.");
        return Ok(());
    }
    println!("== Archive ({}) ==", view.archived.len());
    print_table(&view.archived);
    Ok(())
}

pub fn cmd_show<A: TaskApi>(api: &A, config: &BoardConfig, id: String) -> Result<()> {
    let state = load_board(api, config)?;
    let id = TaskId::from(id);
    let task = state.task(&id).ok_or(BoardError::TaskNotFound(id))?;
    print_task(task);
    Ok(())
}

pub fn cmd_move<A: TaskApi>(
    api: &mut A,
    config: &BoardConfig,
    id: String,
    status: Status,
    position: usize,
) -> Result<()> {
    let mut state = load_board(api, config)?;
    let id = TaskId::from(id);

    let source = {
        let view = state.view();
        if let Some((lane, index)) = view.lanes.position_of(&id) {
            LanePosition::new(lane, index)
        } else if let Some(i) = view.archived.iter().position(|t| t.id == id) {
            // Archived cards sit below the completed lane.
            LanePosition::new(Status::Completed, view.lanes.get(Status::Completed).len() + i)
        } else {
            let task = state.task(&id).ok_or_else(|| BoardError::TaskNotFound(id.clone()))?;
            return Err(BoardError::UnknownStatus {
                task_id: id.clone(),
                status: task.status.to_string(),
            });
        }
    };

    let drag = DragEnd {
        task_id: id.clone(),
        source,
        destination: Some(LanePosition::new(status, position)),
    };
    let Some(pending) = state.drag_end(&drag)? else {
        println!("Task {id} is already at {status}[{position}]");
        return Ok(());
    };

    let intent = pending.intent.clone();
    let result = api
        .update_task_status(&intent)
        .and_then(|tasks| screen_statuses(tasks, config.unknown_status));
    state.settle(pending, result)?;
    println!("Moved task {} to {} at position {}", intent.task_id, intent.new_status.title(), intent.new_position);
    Ok(())
}

pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

/// Print tasks in a formatted table.
pub fn print_table(tasks: &[&Task]) {
    println!(
        "  {:<14} {:<9} {:<10} {:<14} {}",
        "ID", "Priority", "Due", "Assignee", "Title"
    );
    let today = Local::now().date_naive();
    for t in tasks {
        let assignee = t.assignee.as_ref().map(|a| a.name.as_str()).unwrap_or("-");
        println!(
            "  {:<14} {:<9} {:<10} {:<14} {}",
            truncate(t.id.as_str(), 14),
            format_priority(t.priority),
            format_due_relative(t.due_date, today),
            truncate(assignee, 14),
            t.title
        );
    }
}

fn print_task(task: &Task) {
    let today = Local::now().date_naive();
    let date = |d: Option<chrono::DateTime<chrono::Utc>>| {
        d.map(|d| d.to_rfc3339()).unwrap_or_else(|| "-".to_string())
    };
    println!("Task {}: {}", task.id, task.title);
    println!("  Status:      {}", task.status);
    println!("  Priority:    {}", format_priority(task.priority));
    println!("  Due:         {}", format_due_relative(task.due_date, today));
    println!("  Completed:   {}", date(task.completed_at));
    println!("  Updated:     {}", date(task.updated_at));
    println!("  Created:     {}", date(task.created_at));
    println!(
        "  Assignee:    {}",
        task.assignee.as_ref().map(|a| a.name.as_str()).unwrap_or("-")
    );
    println!("  Category:    {}", task.category.as_deref().unwrap_or("-"));
    println!("  Subcategory: {}", task.subcategory.as_deref().unwrap_or("-"));
    println!(
        "  Subtasks: {}  Comments: {}  Attachments: {}",
        task.subtasks.len(),
        task.comments.len(),
        task.attachments.len()
    );
    if let Some(desc) = &task.description {
        println!();
        println!("{desc}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::memory::MemoryApi;
    use crate::task::fixtures::*;

    fn config() -> BoardConfig {
        BoardConfig { show_more_delay_ms: 0, ..BoardConfig::default() }
    }

    #[test]
    fn move_command_persists_through_api() {
        let mut api = MemoryApi::new(vec![task("a", Status::Todo), task("b", Status::Blocked)]);
        cmd_move(&mut api, &config(), "a".into(), Status::Blocked, 1).unwrap();

        assert_eq!(api.received.len(), 1);
        assert_eq!(api.received[0].new_status, Status::Blocked);
        assert_eq!(api.received[0].new_position, 1);
        assert!(api.tasks.iter().find(|t| t.id.as_str() == "a").unwrap().status.is(Status::Blocked));
    }

    #[test]
    fn move_to_same_slot_sends_nothing() {
        let mut api = MemoryApi::new(vec![task("a", Status::Todo)]);
        cmd_move(&mut api, &config(), "a".into(), Status::Todo, 0).unwrap();
        assert!(api.received.is_empty());
    }

    #[test]
    fn move_of_archived_task_reopens_it() {
        let mut tasks: Vec<Task> = (1..=11)
            .map(|d| completed(&format!("c{d}"), date(2024, 4, d)))
            .collect();
        tasks.push(task("x", Status::Todo));
        let mut api = MemoryApi::new(tasks);

        cmd_move(&mut api, &config(), "c1".into(), Status::Todo, 0).unwrap();
        let reopened = api.tasks.iter().find(|t| t.id.as_str() == "c1").unwrap();
        assert!(reopened.status.is(Status::Todo));
        assert_eq!(reopened.completed_at, None);
    }

    #[test]
    fn move_of_unknown_status_task_is_refused() {
        let mut api = MemoryApi::new(vec![with_status("z", "cancelled")]);
        let err = cmd_move(&mut api, &config(), "z".into(), Status::Todo, 0).unwrap_err();
        assert!(matches!(err, BoardError::UnknownStatus { .. }));
        assert!(api.received.is_empty());
    }

    #[test]
    fn failed_write_surfaces_error() {
        let mut api = MemoryApi::new(vec![task("a", Status::Todo)]);
        api.fail_writes = true;
        let err = cmd_move(&mut api, &config(), "a".into(), Status::InProgress, 0).unwrap_err();
        assert!(matches!(err, BoardError::Persist { .. }));
    }

    #[test]
    fn show_missing_task_is_not_found() {
        let api = MemoryApi::new(vec![task("a", Status::Todo)]);
        assert!(matches!(
            cmd_show(&api, &config(), "nope".into()),
            Err(BoardError::TaskNotFound(_))
        ));
    }
}
