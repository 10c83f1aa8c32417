//! Split the task collection into what the board shows and what it archives.

use std::cmp::Reverse;

use crate::fields::Status;
use crate::task::Task;

/// Result of [`partition`]. Both sides borrow from the input collection.
#[derive(Debug, Default)]
pub struct Partition<'a> {
    /// Every non-completed task plus the most recently completed ones, in input order.
    pub current: Vec<&'a Task>,
    /// Older completed tasks, most recent first.
    pub archived: Vec<&'a Task>,
}

/// Keep the `recent_limit` most recently completed tasks on the board and move
/// the rest into the archive.
///
/// Completed tasks are ranked by [`Task::effective_completed_at`], newest first.
/// Tasks without any timestamp rank last. Ties keep input order.
pub fn partition(tasks: &[Task], recent_limit: usize) -> Partition<'_> {
    let mut completed: Vec<usize> = tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.status.is(Status::Completed))
        .map(|(i, _)| i)
        .collect();

    // `None < Some(_)`, so reversing puts undated completions at the end.
    completed.sort_by_key(|&i| Reverse(tasks[i].effective_completed_at()));

    let split = recent_limit.min(completed.len());
    let mut is_recent = vec![false; tasks.len()];
    for &i in &completed[..split] {
        is_recent[i] = true;
    }

    let current = tasks
        .iter()
        .enumerate()
        .filter(|(i, t)| !t.status.is(Status::Completed) || is_recent[*i])
        .map(|(_, t)| t)
        .collect();
    let archived = completed[split..].iter().map(|&i| &tasks[i]).collect();

    let out = Partition { current, archived };
    tracing::debug!(
        total = tasks.len(),
        current = out.current.len(),
        archived = out.archived.len(),
        "partitioned tasks"
    );
    out
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::task::fixtures::*;

    #[test]
    fn empty_input_gives_empty_partitions() {
        let p = partition(&[], 10);
        assert!(p.current.is_empty());
        assert!(p.archived.is_empty());
    }

    #[test]
    fn twelve_completed_leaves_two_in_archive() {
        let mut tasks: Vec<Task> = (1..=12)
            .map(|d| completed(&format!("c{d}"), date(2024, 3, d)))
            .collect();
        tasks.push(task("open", Status::Todo));

        let p = partition(&tasks, 10);
        assert_eq!(p.archived.len(), 2);
        assert_eq!(ids(p.archived.iter().copied()), vec!["c2", "c1"]);
        assert_eq!(p.current.len(), 11);
        assert!(p.current.iter().any(|t| t.id.as_str() == "open"));
        assert!(!p.current.iter().any(|t| t.id.as_str() == "c1" || t.id.as_str() == "c2"));
    }

    #[test]
    fn completion_falls_back_to_updated_then_created() {
        let mut by_updated = task("u", Status::Completed);
        by_updated.updated_at = Some(date(2024, 6, 1));
        let mut by_created = task("c", Status::Completed);
        by_created.created_at = Some(date(2024, 1, 1));
        let undated = task("n", Status::Completed);
        let recent = completed("r", date(2024, 5, 1));

        let tasks = vec![undated, by_created, recent, by_updated];
        let p = partition(&tasks, 2);
        assert_eq!(ids(p.archived.iter().copied()), vec!["c", "n"]);
        assert_eq!(ids(p.current.iter().copied()), vec!["r", "u"]);
    }

    #[test]
    fn unknown_status_stays_current() {
        let tasks = vec![with_status("x", "cancelled")];
        let p = partition(&tasks, 10);
        assert_eq!(p.current.len(), 1);
        assert!(p.archived.is_empty());
    }

    fn arb_task() -> impl Strategy<Value = Task> {
        (0usize..5, proptest::option::of(1u32..28), any::<bool>()).prop_map(|(s, day, unknown)| {
            let id = format!("t{s}-{day:?}");
            let mut t = task(&id, Status::LANES[s]);
            if unknown && s == 0 {
                t = with_status(&id, "cancelled");
            }
            t.completed_at = day.map(|d| date(2024, 2, d));
            t
        })
    }

    proptest! {
        #[test]
        fn every_task_lands_in_exactly_one_side(
            tasks in proptest::collection::vec(arb_task(), 0..40),
            limit in 0usize..15,
        ) {
            let p = partition(&tasks, limit);
            prop_assert_eq!(p.current.len() + p.archived.len(), tasks.len());

            for t in &tasks {
                let in_current = p.current.iter().filter(|c| std::ptr::eq(**c, t)).count();
                let in_archive = p.archived.iter().filter(|c| std::ptr::eq(**c, t)).count();
                prop_assert_eq!(in_current + in_archive, 1);
            }

            let completed_total = tasks.iter().filter(|t| t.status.is(Status::Completed)).count();
            let recent: Vec<&Task> = p
                .current
                .iter()
                .copied()
                .filter(|t| t.status.is(Status::Completed))
                .collect();
            prop_assert_eq!(recent.len(), limit.min(completed_total));

            for r in &recent {
                for a in &p.archived {
                    prop_assert!(r.effective_completed_at() >= a.effective_completed_at());
                }
            }
        }
    }
}
