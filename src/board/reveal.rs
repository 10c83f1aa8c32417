//! Per-lane reveal windows ("show more").

use std::time::{Duration, Instant};

use crate::fields::Status;
use crate::task::Task;

/// The visible prefix of one lane.
#[derive(Debug, Clone, Copy)]
pub struct LaneWindow<'l, 'a> {
    pub visible: &'l [&'a Task],
    pub total: usize,
    pub has_more: bool,
}

impl LaneWindow<'_, '_> {
    pub fn hidden(&self) -> usize {
        self.total - self.visible.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingReveal {
    lane: Status,
    ready_at: Instant,
}

/// Visible counts for every lane, growing a page at a time.
#[derive(Debug, Clone)]
pub struct RevealWindows {
    page_size: usize,
    delay: Duration,
    counts: [usize; 5],
    pending: Option<PendingReveal>,
}

impl RevealWindows {
    pub fn new(page_size: usize, delay: Duration) -> Self {
        let page_size = page_size.max(1);
        RevealWindows {
            page_size,
            delay,
            counts: [page_size; 5],
            pending: None,
        }
    }

    pub fn visible_count(&self, lane: Status) -> usize {
        self.counts[lane.index()]
    }

    /// Reveal one more page of `lane`. Other lanes are untouched.
    pub fn show_more(&mut self, lane: Status) {
        let count = &mut self.counts[lane.index()];
        *count = count.saturating_add(self.page_size);
        tracing::debug!(lane = %lane, visible = self.counts[lane.index()], "revealed more cards");
    }

    /// Ask for one more page of `lane`, landing after the configured delay.
    ///
    /// Returns `false` if another request is still loading. With no delay the
    /// page is revealed straight away.
    pub fn request_more(&mut self, lane: Status, now: Instant) -> bool {
        if self.pending.is_some() {
            return false;
        }
        if self.delay.is_zero() {
            self.show_more(lane);
        } else {
            self.pending = Some(PendingReveal { lane, ready_at: now + self.delay });
        }
        true
    }

    /// Land a pending request whose delay has elapsed. Returns the lane it grew.
    pub fn poll(&mut self, now: Instant) -> Option<Status> {
        match self.pending {
            Some(p) if now >= p.ready_at => {
                self.pending = None;
                self.show_more(p.lane);
                Some(p.lane)
            }
            _ => None,
        }
    }

    pub fn is_loading(&self, lane: Status) -> bool {
        self.pending.is_some_and(|p| p.lane == lane)
    }

    /// Back to one page per lane; any in-flight request is dropped.
    pub fn reset(&mut self) {
        self.counts = [self.page_size; 5];
        self.pending = None;
    }

    /// Slice `lane` down to its visible prefix.
    pub fn window<'l, 'a>(&self, status: Status, lane: &'l [&'a Task]) -> LaneWindow<'l, 'a> {
        let count = self.visible_count(status);
        LaneWindow {
            visible: &lane[..count.min(lane.len())],
            total: lane.len(),
            has_more: lane.len() > count,
        }
    }
}
