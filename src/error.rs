//! Error type shared by the store, config loader and board.

use std::path::PathBuf;

use thiserror::Error;

use crate::task::TaskId;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed task payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to fetch tasks: {reason}")]
    Fetch { reason: String },

    #[error("Failed to persist move of task {task_id}: {reason}")]
    Persist { task_id: TaskId, reason: String },

    #[error("Task {0} not found")]
    TaskNotFound(TaskId),

    #[error("Task {task_id} has unrecognized status '{status}'")]
    UnknownStatus { task_id: TaskId, status: String },

    #[error("Invalid configuration in {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

impl BoardError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BoardError::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, BoardError>;
