//! Bucket current tasks into the five status lanes.

use std::ops::Index;

use crate::fields::Status;
use crate::task::Task;

/// Tasks grouped per lane, each lane ordered by due date.
#[derive(Debug, Default)]
pub struct Lanes<'a> {
    buckets: [Vec<&'a Task>; 5],
    dropped: usize,
}

impl<'a> Lanes<'a> {
    pub fn get(&self, status: Status) -> &[&'a Task] {
        &self.buckets[status.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Status, &[&'a Task])> {
        Status::LANES.into_iter().map(move |s| (s, self.get(s)))
    }

    /// Number of tasks that matched no lane.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Locate a task on the board.
    pub fn position_of(&self, id: &crate::task::TaskId) -> Option<(Status, usize)> {
        self.iter()
            .find_map(|(s, lane)| lane.iter().position(|t| &t.id == id).map(|i| (s, i)))
    }
}

impl<'a> Index<Status> for Lanes<'a> {
    type Output = [&'a Task];

    fn index(&self, status: Status) -> &Self::Output {
        self.get(status)
    }
}

/// Group tasks by status and sort each lane by due date ascending, undated last.
///
/// The sort is stable so equal and undated tasks keep their input order.
/// Tasks whose status is not a lane are skipped and counted in [`Lanes::dropped`].
pub fn group<'a, I>(tasks: I) -> Lanes<'a>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut lanes = Lanes::default();
    for task in tasks {
        match task.lane() {
            Some(s) => lanes.buckets[s.index()].push(task),
            None => lanes.dropped += 1,
        }
    }
    for bucket in lanes.buckets.iter_mut() {
        sort_by_due(bucket);
    }
    lanes
}

/// Stable sort, dated tasks first in ascending order.
pub fn sort_by_due(lane: &mut [&Task]) {
    lane.sort_by_key(|t| (t.due_date.is_none(), t.due_date));
}
