//! Turn a finished drag into a move intent, and apply intents to a collection.
//!
//! The drag source is whatever front end produced the gesture; it only has to
//! describe where the card came from and where (if anywhere) it was dropped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::lanes::sort_by_due;
use crate::board::partition::partition;
use crate::error::{BoardError, Result};
use crate::fields::{Status, TaskStatus};
use crate::task::{Task, TaskId};

/// A slot on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanePosition {
    pub lane: Status,
    pub index: usize,
}

impl LanePosition {
    pub fn new(lane: Status, index: usize) -> Self {
        LanePosition { lane, index }
    }
}

/// End of a drag gesture. `destination` is `None` when the card was dropped
/// outside every lane or the drag was cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEnd {
    pub task_id: TaskId,
    pub source: LanePosition,
    pub destination: Option<LanePosition>,
}

/// What the API should persist for a drag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveIntent {
    pub task_id: TaskId,
    pub new_status: Status,
    pub new_position: usize,
}

/// Translate a drag into an intent. Dropping nowhere, or back onto the same
/// slot, yields nothing.
pub fn reconcile(drag: &DragEnd) -> Option<MoveIntent> {
    let destination = drag.destination?;
    if destination == drag.source {
        return None;
    }
    Some(MoveIntent {
        task_id: drag.task_id.clone(),
        new_status: destination.lane,
        new_position: destination.index,
    })
}

/// Apply `intent` to `tasks` in place.
///
/// The task takes the new status and is re-inserted in front of whichever
/// task currently occupies `new_position` in the destination lane as the
/// board shows it (archived completions excluded, see `recent_limit`), so
/// that among equally-dated cards it lands where it was dropped.
/// `completedAt` is stamped when a task enters the completed lane and
/// cleared when it leaves.
pub fn apply_move(
    tasks: &mut Vec<Task>,
    intent: &MoveIntent,
    recent_limit: usize,
    now: DateTime<Utc>,
) -> Result<()> {
    let from = tasks
        .iter()
        .position(|t| t.id == intent.task_id)
        .ok_or_else(|| BoardError::TaskNotFound(intent.task_id.clone()))?;

    let anchor: Option<TaskId> = {
        let mut lane: Vec<&Task> = partition(tasks, recent_limit)
            .current
            .into_iter()
            .filter(|t| t.id != intent.task_id && t.status.is(intent.new_status))
            .collect();
        sort_by_due(&mut lane);
        lane.get(intent.new_position).map(|t| t.id.clone())
    };

    let mut task = tasks.remove(from);
    let was_completed = task.status.is(Status::Completed);
    task.status = TaskStatus::Known(intent.new_status);
    task.updated_at = Some(now);
    match (was_completed, intent.new_status == Status::Completed) {
        (false, true) => task.completed_at = Some(now),
        (true, false) => task.completed_at = None,
        _ => {}
    }

    let to = anchor
        .and_then(|id| tasks.iter().position(|t| t.id == id))
        .unwrap_or(tasks.len());
    tasks.insert(to, task);
    Ok(())
}
