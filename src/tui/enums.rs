//! Enumerations for TUI state management.

use crate::board::{Anchor, LanePosition};
use crate::fields::Status;
use crate::task::TaskId;

/// What the board screen is currently doing with key presses.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BoardMode {
    Browse,
    Drag,
    Detail,
    Menu,
    Archive,
}

/// A card being carried with the keyboard.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DragCursor {
    pub task_id: TaskId,
    pub source: LanePosition,
    pub target: LanePosition,
}

/// Entries of a card's context menu.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MenuItem {
    Open,
    MoveTo(Status),
}

impl MenuItem {
    pub fn label(self) -> String {
        match self {
            MenuItem::Open => "Open details".to_string(),
            MenuItem::MoveTo(s) => format!("Move to {}", s.title()),
        }
    }
}

/// An open context menu.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TaskMenu {
    pub task_id: TaskId,
    pub source: LanePosition,
    pub anchor: Anchor,
    pub items: Vec<MenuItem>,
    pub selected: usize,
}

impl TaskMenu {
    pub fn new(task_id: TaskId, source: LanePosition, anchor: Anchor) -> Self {
        let mut items = vec![MenuItem::Open];
        items.extend(
            Status::LANES
                .into_iter()
                .filter(|&s| s != source.lane)
                .map(MenuItem::MoveTo),
        );
        TaskMenu { task_id, source, anchor, items, selected: 0 }
    }
}
