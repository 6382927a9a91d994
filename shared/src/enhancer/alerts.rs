//! Alert auto-dismissal
//!
//! Each alert goes through two scheduled phases: after `fade_delay` it gets an
//! opacity transition and fades to zero, and `fade_duration` later it is
//! removed. Both phases check the cancellation token before touching the page.

use std::rc::Rc;
use std::time::Duration;

use crate::dom::Alert;
use crate::schedule::{CancellationToken, Scheduler};

/// Phase of an alert's dismissal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissPhase {
    Fade,
    Remove,
}

/// Timings of the two dismissal phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissTimings {
    pub fade_delay: Duration,
    pub fade_duration: Duration,
}

impl Default for DismissTimings {
    fn default() -> Self {
        Self {
            fade_delay: Duration::from_millis(5000),
            fade_duration: Duration::from_millis(500),
        }
    }
}

impl DismissTimings {
    /// CSS transition applied when fading starts
    pub fn transition(&self) -> String {
        format!("opacity {}s", self.fade_duration.as_secs_f64())
    }
}

/// Schedules dismissal of the alerts present when it runs
#[derive(Clone)]
pub struct AlertDismisser {
    scheduler: Rc<dyn Scheduler>,
    timings: DismissTimings,
    cancel: CancellationToken,
}

impl AlertDismisser {
    pub fn new(
        scheduler: Rc<dyn Scheduler>,
        timings: DismissTimings,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            scheduler,
            timings,
            cancel,
        }
    }

    /// Schedule the fade phase for every alert, returns how many were scheduled
    pub fn dismiss_all(&self, alerts: Vec<Rc<dyn Alert>>) -> usize {
        let count = alerts.len();
        for alert in alerts {
            self.schedule_phase(alert, DismissPhase::Fade);
        }
        if count > 0 {
            tracing::debug!("Scheduled dismissal of {} alerts", count);
        }
        count
    }

    fn schedule_phase(&self, alert: Rc<dyn Alert>, phase: DismissPhase) {
        let delay = match phase {
            DismissPhase::Fade => self.timings.fade_delay,
            DismissPhase::Remove => self.timings.fade_duration,
        };
        let dismisser = self.clone();
        self.scheduler.schedule(
            delay,
            Box::new(move || dismisser.run_phase(alert, phase)),
        );
    }

    fn run_phase(&self, alert: Rc<dyn Alert>, phase: DismissPhase) {
        if self.cancel.is_cancelled() {
            return;
        }
        match phase {
            DismissPhase::Fade => {
                alert.set_style("transition", &self.timings.transition());
                alert.set_style("opacity", "0");
                self.schedule_phase(alert, DismissPhase::Remove);
            }
            DismissPhase::Remove => alert.remove(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_matches_fade_duration() {
        assert_eq!(DismissTimings::default().transition(), "opacity 0.5s");
        let slow = DismissTimings {
            fade_delay: Duration::from_secs(1),
            fade_duration: Duration::from_secs(2),
        };
        assert_eq!(slow.transition(), "opacity 2s");
    }
}
