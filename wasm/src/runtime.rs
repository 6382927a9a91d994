//! Timers, clock and diagnostics backed by the browser

use std::time::Duration;

use chrono::NaiveDate;
use gloo::timers::callback::Timeout;
use shared::schedule::{Clock, Scheduler, Task};
use shared::{DateBasis, TotalSink};

/// Longest delay `setTimeout` honors; larger values overflow and fire at once
pub const MAX_TIMEOUT_MS: u32 = i32::MAX as u32;

/// Schedules tasks with `setTimeout`
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        // Cancellation is handled by the task's token, not by clearing the timeout.
        Timeout::new(timeout_millis(delay), move || task()).forget();
    }
}

/// Delay in milliseconds, clamped to what `setTimeout` accepts
pub fn timeout_millis(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).map_or(MAX_TIMEOUT_MS, |millis| millis.min(MAX_TIMEOUT_MS))
}

/// Reads today's date from the JS `Date` object
#[derive(Debug, Clone, Copy)]
pub struct JsClock {
    basis: DateBasis,
}

impl JsClock {
    pub fn new(basis: DateBasis) -> Self {
        Self { basis }
    }
}

impl Clock for JsClock {
    fn today(&self) -> NaiveDate {
        let now = js_sys::Date::new_0();
        let (year, month, day) = match self.basis {
            DateBasis::Local => (now.get_full_year(), now.get_month(), now.get_date()),
            DateBasis::Utc => (
                now.get_utc_full_year(),
                now.get_utc_month(),
                now.get_utc_date(),
            ),
        };
        // JS months are 0-based
        NaiveDate::from_ymd_opt(year as i32, month + 1, day).unwrap_or_default()
    }
}

/// Writes totals to the browser console
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleTotalSink;

impl TotalSink for ConsoleTotalSink {
    fn record_total(&self, total: f64) {
        gloo::console::log!("Total calculated:", total);
    }
}
