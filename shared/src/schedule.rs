//! Delayed tasks, cancellation and clocks

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use chrono::NaiveDate;

/// A unit of deferred work
pub type Task = Box<dyn FnOnce()>;

/// Runs tasks after a delay on the page's thread
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Task);
}

/// Source of the current calendar date
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Clock pinned to one date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

// ============================================================================
// Cancellation
// ============================================================================

/// Shared cancellation flag checked by scheduled tasks before they act.
///
/// Clones observe the same flag. Cancelling is permanent.
#[derive(Clone, Default)]
pub struct CancellationToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

impl fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancellationToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

// ============================================================================
// Virtual time
// ============================================================================

struct PendingTask {
    due: Duration,
    seq: u64,
    task: Task,
}

#[derive(Default)]
struct VirtualQueue {
    now: Duration,
    next_seq: u64,
    pending: Vec<PendingTask>,
}

/// Scheduler driven by explicit calls to [`VirtualScheduler::advance`].
///
/// Tasks due at the same instant run in scheduling order. A task scheduled
/// while time is advancing runs in the same `advance` call if it falls due
/// before the target instant.
#[derive(Clone, Default)]
pub struct VirtualScheduler {
    queue: Rc<RefCell<VirtualQueue>>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since creation
    pub fn now(&self) -> Duration {
        self.queue.borrow().now
    }

    /// Number of tasks not yet run
    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// Move time forward by `by`, running every task that falls due
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        while let Some(task) = self.pop_due(target) {
            task();
        }
        self.queue.borrow_mut().now = target;
    }

    // The borrow must end before the task runs; tasks may schedule more work.
    fn pop_due(&self, target: Duration) -> Option<Task> {
        let mut queue = self.queue.borrow_mut();
        let index = queue
            .pending
            .iter()
            .enumerate()
            .filter(|(_, pending)| pending.due <= target)
            .min_by_key(|(_, pending)| (pending.due, pending.seq))
            .map(|(index, _)| index)?;
        let next = queue.pending.swap_remove(index);
        queue.now = next.due;
        Some(next.task)
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        let mut queue = self.queue.borrow_mut();
        let due = queue.now + delay;
        let seq = queue.next_seq;
        queue.next_seq += 1;
        queue.pending.push(PendingTask { due, seq, task });
    }
}

impl fmt::Debug for VirtualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let queue = self.queue.borrow();
        f.debug_struct("VirtualScheduler")
            .field("now", &queue.now)
            .field("pending", &queue.pending.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Task) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let make = move |label: &'static str| -> Task {
            let sink = sink.clone();
            Box::new(move || sink.borrow_mut().push(label))
        };
        (log, make)
    }

    #[test]
    fn test_tasks_wait_for_their_delay() {
        let scheduler = VirtualScheduler::new();
        let (log, task) = recorder();
        scheduler.schedule(Duration::from_millis(100), task("a"));

        scheduler.advance(Duration::from_millis(99));
        assert!(log.borrow().is_empty());

        scheduler.advance(Duration::from_millis(1));
        assert_eq!(*log.borrow(), vec!["a"]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_tasks_run_in_due_then_schedule_order() {
        let scheduler = VirtualScheduler::new();
        let (log, task) = recorder();
        scheduler.schedule(Duration::from_millis(20), task("late"));
        scheduler.schedule(Duration::from_millis(10), task("first"));
        scheduler.schedule(Duration::from_millis(10), task("second"));

        scheduler.advance(Duration::from_secs(1));
        assert_eq!(*log.borrow(), vec!["first", "second", "late"]);
        assert_eq!(scheduler.now(), Duration::from_secs(1));
    }

    #[test]
    fn test_chained_task_runs_within_same_advance() {
        let scheduler = VirtualScheduler::new();
        let (log, task) = recorder();
        let inner = scheduler.clone();
        let follow_up = task("second");
        let first = task("first");
        scheduler.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                first();
                inner.schedule(Duration::from_millis(5), follow_up);
            }),
        );

        scheduler.advance(Duration::from_millis(14));
        assert_eq!(*log.borrow(), vec!["first"]);
        scheduler.advance(Duration::from_millis(1));
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_cancellation_token_is_shared() {
        let token = CancellationToken::new();
        let observer = token.clone();
        assert!(!observer.is_cancelled());
        token.cancel();
        assert!(observer.is_cancelled());
    }
}
