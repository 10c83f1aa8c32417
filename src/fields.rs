//! Enumerations and field types for board tasks.
//!
//! This module defines the closed set of lane statuses, task priorities and the
//! wire-level status field that tolerates values the board does not know about.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Lane status. The board has exactly one lane per variant, in declaration order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Status {
    Todo,
    InProgress,
    InReview,
    Blocked,
    Completed,
}

impl Status {
    /// All lanes in board order.
    pub const LANES: [Status; 5] = [
        Status::Todo,
        Status::InProgress,
        Status::InReview,
        Status::Blocked,
        Status::Completed,
    ];

    /// Position of this lane on the board.
    pub fn index(self) -> usize {
        match self {
            Status::Todo => 0,
            Status::InProgress => 1,
            Status::InReview => 2,
            Status::Blocked => 3,
            Status::Completed => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Status> {
        Status::LANES.get(index).copied()
    }

    /// Wire name, as sent to and received from the task API.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in_progress",
            Status::InReview => "in_review",
            Status::Blocked => "blocked",
            Status::Completed => "completed",
        }
    }

    /// Lane heading.
    pub fn title(self) -> &'static str {
        match self {
            Status::Todo => "To Do",
            Status::InProgress => "In Progress",
            Status::InReview => "In Review",
            Status::Blocked => "Blocked",
            Status::Completed => "Completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task importance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

/// The `status` field exactly as the API sent it.
///
/// Known values map onto a lane. Anything else is kept verbatim so the caller
/// can decide what to do with it instead of failing the whole payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskStatus {
    Known(Status),
    Unknown(String),
}

impl TaskStatus {
    /// The lane this status belongs to, if any.
    pub fn lane(&self) -> Option<Status> {
        match self {
            TaskStatus::Known(s) => Some(*s),
            TaskStatus::Unknown(_) => None,
        }
    }

    pub fn is(&self, status: Status) -> bool {
        self.lane() == Some(status)
    }
}

impl From<Status> for TaskStatus {
    fn from(s: Status) -> Self {
        TaskStatus::Known(s)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Known(s) => f.write_str(s.as_str()),
            TaskStatus::Unknown(raw) => write!(f, "{raw} (unknown)"),
        }
    }
}

/// What to do with tasks whose status is not one of the five lanes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownStatusPolicy {
    /// Keep them in the collection but place them in no lane.
    #[default]
    Drop,
    /// Refuse the payload at the API boundary.
    Reject,
}

/// Format a priority for display.
pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::Critical => "Critical",
        Priority::High => "High",
        Priority::Medium => "Medium",
        Priority::Low => "Low",
    }
}
