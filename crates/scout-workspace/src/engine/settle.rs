//! Deferred settle steps
//!
//! Some steps must wait for the host to lay out or animate first (a chart
//! re-measures after its container resized, badges are re-read after the
//! canvas transition ends). They are queued with a due time and run by
//! `tick(now_ms)`.

use crate::window::WindowId;
use super::ScoutWorkspace;

/// A deferred step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettleTask {
    /// Fit the view to the visible windows and refresh every overlay
    ResetView,
    /// Regenerate one window's badges
    RefreshOverlays(WindowId),
    /// Regenerate every window's badges
    RefreshAllOverlays,
}

/// Pending steps, one entry per distinct task
#[derive(Debug, Default)]
pub(crate) struct SettleQueue {
    tasks: Vec<(f64, SettleTask)>,
}

impl SettleQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a step; a step already queued keeps a single entry at the later due time
    pub fn schedule(&mut self, task: SettleTask, due_ms: f64) {
        match self.tasks.iter_mut().find(|(_, t)| *t == task) {
            Some(entry) => entry.0 = entry.0.max(due_ms),
            None => self.tasks.push((due_ms, task)),
        }
    }

    /// Remove and return every step due at `now_ms`, earliest first
    pub fn take_due(&mut self, now_ms: f64) -> Vec<SettleTask> {
        let mut due: Vec<(f64, SettleTask)> = Vec::new();
        self.tasks.retain(|&(at, task)| {
            if at <= now_ms {
                due.push((at, task));
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.0.total_cmp(&b.0));
        due.into_iter().map(|(_, task)| task).collect()
    }

    /// Drop steps targeting a window that went away
    pub fn cancel_for(&mut self, window: WindowId) {
        self.tasks.retain(|(_, t)| *t != SettleTask::RefreshOverlays(window));
    }

    pub fn pending(&self) -> impl Iterator<Item = SettleTask> + '_ {
        self.tasks.iter().map(|(_, t)| *t)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl ScoutWorkspace {
    /// Run every settle step due at `now_ms`
    ///
    /// Steps queued while this tick runs wait for the next tick. Returns
    /// whether anything ran.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let due = self.settle.take_due(now_ms);
        if due.is_empty() {
            return false;
        }
        for task in due {
            log::debug!("settle step {:?} at {}ms", task, now_ms);
            match task {
                SettleTask::ResetView => {
                    self.reset_view(now_ms);
                    self.refresh_all_overlays();
                }
                SettleTask::RefreshOverlays(id) => self.refresh_overlays(id),
                SettleTask::RefreshAllOverlays => self.refresh_all_overlays(),
            }
        }
        true
    }

    /// Steps still waiting to run
    pub fn pending_settle_tasks(&self) -> Vec<SettleTask> {
        self.settle.pending().collect()
    }

    /// Nothing is waiting to run
    pub fn is_settled(&self) -> bool {
        self.settle.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_dedupes() {
        let mut queue = SettleQueue::new();
        queue.schedule(SettleTask::RefreshAllOverlays, 100.0);
        queue.schedule(SettleTask::RefreshAllOverlays, 50.0);
        queue.schedule(SettleTask::RefreshAllOverlays, 600.0);
        assert_eq!(queue.pending().count(), 1);
        assert!(queue.take_due(599.0).is_empty());
        assert_eq!(queue.take_due(600.0), vec![SettleTask::RefreshAllOverlays]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_take_due_in_order() {
        let mut queue = SettleQueue::new();
        queue.schedule(SettleTask::RefreshAllOverlays, 500.0);
        queue.schedule(SettleTask::ResetView, 100.0);
        queue.schedule(SettleTask::RefreshOverlays(WindowId(1)), 2000.0);

        let due = queue.take_due(1000.0);
        assert_eq!(due, vec![SettleTask::ResetView, SettleTask::RefreshAllOverlays]);
        assert_eq!(queue.pending().count(), 1);
    }

    #[test]
    fn test_cancel_for_window() {
        let mut queue = SettleQueue::new();
        queue.schedule(SettleTask::RefreshOverlays(WindowId(1)), 50.0);
        queue.schedule(SettleTask::RefreshOverlays(WindowId(2)), 50.0);
        queue.cancel_for(WindowId(1));
        assert_eq!(queue.take_due(50.0), vec![SettleTask::RefreshOverlays(WindowId(2))]);
    }
}
