//! Task API boundary.
//!
//! The board never owns durable state. It asks a [`TaskApi`] for the
//! collection and hands it move intents; the API answers with the
//! authoritative list, which replaces whatever the board had.

use serde::{Deserialize, Serialize};

use crate::board::MoveIntent;
use crate::error::{BoardError, Result};
use crate::fields::{TaskStatus, UnknownStatusPolicy};
use crate::task::Task;

/// `{ "data": ... }` wrapper used by every API payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

pub trait TaskApi {
    fn get_tasks(&self) -> Result<Vec<Task>>;

    /// Persist a move and return the collection after it.
    fn update_task_status(&mut self, intent: &MoveIntent) -> Result<Vec<Task>>;
}

/// Apply the unknown-status policy to a freshly received collection.
///
/// Under `Drop` every task without a lane is logged here, once per payload;
/// the board derivations only count them.
pub fn screen_statuses(tasks: Vec<Task>, policy: UnknownStatusPolicy) -> Result<Vec<Task>> {
    for t in tasks.iter().filter(|t| t.lane().is_none()) {
        let status = match &t.status {
            TaskStatus::Unknown(raw) => raw.clone(),
            TaskStatus::Known(s) => s.to_string(),
        };
        match policy {
            UnknownStatusPolicy::Reject => {
                return Err(BoardError::UnknownStatus { task_id: t.id.clone(), status });
            }
            UnknownStatusPolicy::Drop => {
                tracing::warn!(task = %t.id, %status, "task has no lane, not shown");
            }
        }
    }
    Ok(tasks)
}

/// Fetch and screen in one step.
pub fn fetch_tasks<A: TaskApi + ?Sized>(api: &A, policy: UnknownStatusPolicy) -> Result<Vec<Task>> {
    let tasks = api.get_tasks()?;
    tracing::debug!(count = tasks.len(), "fetched tasks");
    screen_statuses(tasks, policy)
}

/// In-memory API for tests, optionally failing every write.
#[cfg(test)]
pub(crate) mod memory {
    use chrono::Utc;

    use super::*;
    use crate::board::reconcile::apply_move;

    #[derive(Debug, Default)]
    pub struct MemoryApi {
        pub tasks: Vec<Task>,
        pub fail_writes: bool,
        pub received: Vec<MoveIntent>,
        pub recent_limit: usize,
    }

    impl MemoryApi {
        pub fn new(tasks: Vec<Task>) -> Self {
            MemoryApi {
                tasks,
                recent_limit: crate::config::BoardConfig::default().recent_completed_limit,
                ..Default::default()
            }
        }
    }

    impl TaskApi for MemoryApi {
        fn get_tasks(&self) -> Result<Vec<Task>> {
            Ok(self.tasks.clone())
        }

        fn update_task_status(&mut self, intent: &MoveIntent) -> Result<Vec<Task>> {
            self.received.push(intent.clone());
            if self.fail_writes {
                return Err(BoardError::Persist {
                    task_id: intent.task_id.clone(),
                    reason: "server said no".into(),
                });
            }
            apply_move(&mut self.tasks, intent, self.recent_limit, Utc::now())?;
            Ok(self.tasks.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    use super::*;
    use crate::board::BoardState;
    use crate::config::BoardConfig;
    use crate::fields::Status;
    use crate::task::fixtures::*;

    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn count_warnings(f: impl FnOnce()) -> usize {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(Arc::clone(&count)));
        tracing::subscriber::with_default(subscriber, f);
        count.load(Ordering::SeqCst)
    }

    #[test]
    fn unknown_status_is_logged_once_per_payload() {
        let tasks = vec![task("a", Status::Todo), with_status("b", "cancelled")];

        let mut board = BoardState::new(&BoardConfig::default());
        let warned = count_warnings(|| {
            board.replace_tasks(screen_statuses(tasks, UnknownStatusPolicy::Drop).unwrap());
        });
        assert_eq!(warned, 1);

        let redraws = count_warnings(|| {
            for _ in 0..20 {
                assert_eq!(board.view().lanes.dropped(), 1);
            }
        });
        assert_eq!(redraws, 0);
    }

    #[test]
    fn drop_policy_keeps_unknown_statuses() {
        let tasks = vec![task("a", Status::Todo), with_status("b", "cancelled")];
        let screened = screen_statuses(tasks, UnknownStatusPolicy::Drop).unwrap();
        assert_eq!(screened.len(), 2);
    }

    #[test]
    fn reject_policy_refuses_unknown_statuses() {
        let tasks = vec![task("a", Status::Todo), with_status("b", "cancelled")];
        match screen_statuses(tasks, UnknownStatusPolicy::Reject) {
            Err(BoardError::UnknownStatus { task_id, status }) => {
                assert_eq!(task_id.as_str(), "b");
                assert_eq!(status, "cancelled");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn envelope_wraps_data() {
        let env: Envelope<Vec<Task>> =
            serde_json::from_str(r#"{"data": [{"_id": "a", "title": "A", "status": "blocked"}]}"#).unwrap();
        assert_eq!(env.data.len(), 1);
        assert!(env.data[0].status.is(Status::Blocked));
    }
}
