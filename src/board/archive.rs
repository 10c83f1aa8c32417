//! Toggle over the archived completed tasks.

use crate::task::Task;

/// Whether the archive grid is on screen. The grid shows every archived task
/// at once; there is no reveal window here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveView {
    shown: bool,
}

impl ArchiveView {
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn toggle(&mut self) -> bool {
        self.shown = !self.shown;
        self.shown
    }

    pub fn hide(&mut self) {
        self.shown = false;
    }

    /// Cards to draw: all of `archived` when shown, nothing otherwise.
    pub fn visible<'l, 'a>(&self, archived: &'l [&'a Task]) -> &'l [&'a Task] {
        if self.shown {
            archived
        } else {
            &[]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::partition::partition;
    use crate::task::fixtures::*;

    #[test]
    fn toggling_shows_exactly_the_archived_tasks() {
        let tasks: Vec<Task> = (1..=12)
            .map(|d| completed(&format!("c{d}"), date(2024, 8, d)))
            .collect();
        let p = partition(&tasks, 10);
        let mut view = ArchiveView::default();

        assert!(view.visible(&p.archived).is_empty());
        assert!(view.toggle());
        assert_eq!(ids(view.visible(&p.archived).iter().copied()), vec!["c2", "c1"]);
        assert!(!view.toggle());
        assert!(view.visible(&p.archived).is_empty());
    }
}
