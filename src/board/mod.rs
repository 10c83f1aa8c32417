//! Kanban derivation pipeline.
//!
//! Tasks flow through [`partition`] (board vs archive), [`lanes::group`]
//! (status buckets sorted by due date) and [`reveal`] (visible prefix per lane).
//! Drags come back in through [`reconcile`] as move intents. [`state::BoardState`]
//! owns the collection and ties the stages together.

pub mod archive;
pub mod lanes;
pub mod partition;
pub mod reconcile;
pub mod reveal;
pub mod state;

pub use reconcile::{DragEnd, LanePosition, MoveIntent};
pub use state::{BoardState, BoardView, PendingMove};

use crate::task::TaskId;

/// Screen cell a card menu is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub x: u16,
    pub y: u16,
}

/// Intents the board emits to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// A drag finished, possibly outside every lane.
    DragEnd(DragEnd),
    /// A card was opened, on the board or in the archive.
    OpenTask(TaskId),
    /// The card's menu was requested.
    TaskMenu { task_id: TaskId, anchor: Anchor },
}
