//! The board container: owns the task collection and all client-side board state.

use chrono::Utc;

use crate::board::archive::ArchiveView;
use crate::board::lanes::{group, Lanes};
use crate::board::partition::{partition, Partition};
use crate::board::reconcile::{apply_move, reconcile, DragEnd, MoveIntent};
use crate::board::reveal::{LaneWindow, RevealWindows};
use crate::config::BoardConfig;
use crate::error::Result;
use crate::fields::Status;
use crate::task::{Task, TaskId};

/// Everything derived from the collection for one render.
#[derive(Debug)]
pub struct BoardView<'a> {
    pub lanes: Lanes<'a>,
    pub archived: Vec<&'a Task>,
}

/// An optimistic move waiting for the API's answer.
///
/// Holds the collection as it was before the drag; hand it back to
/// [`BoardState::settle`] or [`BoardState::rollback`] once the result is known.
#[derive(Debug)]
#[must_use = "a pending move must be settled or rolled back"]
pub struct PendingMove {
    pub intent: MoveIntent,
    snapshot: Vec<Task>,
}

#[derive(Debug)]
pub struct BoardState {
    tasks: Vec<Task>,
    recent_limit: usize,
    reveal: RevealWindows,
    archive: ArchiveView,
}

impl BoardState {
    pub fn new(config: &BoardConfig) -> Self {
        BoardState {
            tasks: Vec::new(),
            recent_limit: config.recent_completed_limit,
            reveal: RevealWindows::new(config.page_size, config.show_more_delay()),
            archive: ArchiveView::default(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Swap in a freshly fetched collection. A different total means the list
    /// was refetched, so reveal windows go back to one page.
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        if tasks.len() != self.tasks.len() {
            tracing::debug!(old = self.tasks.len(), new = tasks.len(), "task total changed, resetting reveal windows");
            self.reveal.reset();
        }
        self.tasks = tasks;
    }

    pub fn view(&self) -> BoardView<'_> {
        let Partition { current, archived } = partition(&self.tasks, self.recent_limit);
        BoardView { lanes: group(current), archived }
    }

    pub fn window<'l, 'a>(&self, view: &'l BoardView<'a>, lane: Status) -> LaneWindow<'l, 'a> {
        self.reveal.window(lane, view.lanes.get(lane))
    }

    pub fn reveal(&self) -> &RevealWindows {
        &self.reveal
    }

    pub fn reveal_mut(&mut self) -> &mut RevealWindows {
        &mut self.reveal
    }

    pub fn archive(&self) -> &ArchiveView {
        &self.archive
    }

    pub fn archive_mut(&mut self) -> &mut ArchiveView {
        &mut self.archive
    }

    /// Reconcile a drag and, if it means anything, apply it optimistically.
    pub fn drag_end(&mut self, drag: &DragEnd) -> Result<Option<PendingMove>> {
        match reconcile(drag) {
            Some(intent) => self.begin_move(intent).map(Some),
            None => Ok(None),
        }
    }

    pub fn begin_move(&mut self, intent: MoveIntent) -> Result<PendingMove> {
        let snapshot = self.tasks.clone();
        apply_move(&mut self.tasks, &intent, self.recent_limit, Utc::now())?;
        tracing::debug!(task = %intent.task_id, lane = %intent.new_status, position = intent.new_position, "applied optimistic move");
        Ok(PendingMove { intent, snapshot })
    }

    /// Restore the collection as it was before `pending` was applied.
    pub fn rollback(&mut self, pending: PendingMove) {
        tracing::debug!(task = %pending.intent.task_id, "rolling back optimistic move");
        self.tasks = pending.snapshot;
    }

    /// Finish a pending move with the API's answer: adopt the authoritative
    /// collection on success, roll back and pass the error on failure.
    pub fn settle(&mut self, pending: PendingMove, result: Result<Vec<Task>>) -> Result<()> {
        match result {
            Ok(tasks) => {
                self.replace_tasks(tasks);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(task = %pending.intent.task_id, error = %e, "move was not persisted");
                self.rollback(pending);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::board::reconcile::LanePosition;
    use crate::error::BoardError;
    use crate::task::fixtures::*;

    fn config() -> BoardConfig {
        BoardConfig { show_more_delay_ms: 0, ..BoardConfig::default() }
    }

    fn board(tasks: Vec<Task>) -> BoardState {
        let mut b = BoardState::new(&config());
        b.replace_tasks(tasks);
        b
    }

    fn todo_lane(n: usize) -> Vec<Task> {
        (0..n).map(|i| task(&format!("t{i}"), Status::Todo)).collect()
    }

    #[test]
    fn view_splits_board_and_archive() {
        let mut tasks: Vec<Task> = (1..=12)
            .map(|d| completed(&format!("c{d}"), date(2024, 1, d)))
            .collect();
        tasks.push(task("open", Status::Blocked));
        let b = board(tasks);
        let view = b.view();
        assert_eq!(view.lanes[Status::Completed].len(), 10);
        assert_eq!(view.lanes[Status::Blocked].len(), 1);
        assert_eq!(ids(view.archived.iter().copied()), vec!["c2", "c1"]);
    }

    #[test]
    fn changed_total_resets_reveal() {
        let mut b = board(todo_lane(30));
        b.reveal_mut().show_more(Status::Todo);
        assert_eq!(b.reveal().visible_count(Status::Todo), 20);

        b.replace_tasks(todo_lane(30));
        assert_eq!(b.reveal().visible_count(Status::Todo), 20, "same total keeps the window");

        b.replace_tasks(todo_lane(31));
        assert_eq!(b.reveal().visible_count(Status::Todo), 10);
    }

    #[test]
    fn window_slices_visible_prefix() {
        let b = board(todo_lane(12));
        let view = b.view();
        let w = b.window(&view, Status::Todo);
        assert_eq!(w.visible.len(), 10);
        assert!(w.has_more);
        assert!(!b.window(&view, Status::Blocked).has_more);
    }

    #[test]
    fn failed_move_rolls_back_to_snapshot() {
        let tasks = todo_lane(4);
        let mut b = board(tasks.clone());
        let drag = DragEnd {
            task_id: "t2".into(),
            source: LanePosition::new(Status::Todo, 2),
            destination: Some(LanePosition::new(Status::InReview, 0)),
        };

        let pending = b.drag_end(&drag).unwrap().expect("intent");
        assert_eq!(pending.intent.new_status, Status::InReview);
        assert_eq!(b.view().lanes[Status::InReview].len(), 1);

        let err = b
            .settle(pending, Err(BoardError::Fetch { reason: "offline".into() }))
            .unwrap_err();
        assert!(matches!(err, BoardError::Fetch { .. }));
        assert_eq!(b.tasks(), tasks.as_slice());
    }

    #[test]
    fn successful_move_adopts_authoritative_list() {
        let mut b = board(todo_lane(2));
        let pending = b
            .begin_move(MoveIntent { task_id: "t0".into(), new_status: Status::Blocked, new_position: 0 })
            .unwrap();
        let mut server = todo_lane(2);
        server[0].status = Status::Blocked.into();
        b.settle(pending, Ok(server.clone())).unwrap();
        assert_eq!(b.tasks(), server.as_slice());
    }

    #[test]
    fn dropping_outside_changes_nothing() {
        let mut b = board(todo_lane(3));
        let drag = DragEnd {
            task_id: "t1".into(),
            source: LanePosition::new(Status::Todo, 1),
            destination: None,
        };
        assert!(b.drag_end(&drag).unwrap().is_none());
        assert_eq!(b.tasks(), todo_lane(3).as_slice());
    }

    #[test]
    fn reveal_delay_comes_from_config() {
        let b = BoardState::new(&BoardConfig { show_more_delay_ms: 40, ..BoardConfig::default() });
        let mut reveal = b.reveal().clone();
        let now = std::time::Instant::now();
        reveal.request_more(Status::Todo, now);
        assert!(reveal.is_loading(Status::Todo));
        assert_eq!(reveal.poll(now + Duration::from_millis(40)), Some(Status::Todo));
    }
}
