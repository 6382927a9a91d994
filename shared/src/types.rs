//! Common types used across the form enhancer

use serde::{Deserialize, Serialize};

/// Page events the behaviors listen to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormEvent {
    /// Fired when a selection is committed
    Change,
    /// Fired on every edit of an input's value
    Input,
}

impl FormEvent {
    /// DOM event name
    pub fn as_str(&self) -> &'static str {
        match self {
            FormEvent::Change => "change",
            FormEvent::Input => "input",
        }
    }
}

/// Which calendar "today" is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DateBasis {
    /// The browser's local calendar date
    #[default]
    Local,
    /// The UTC calendar date
    Utc,
}

/// Summary of what an attach pass wired up
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachReport {
    pub alerts_scheduled: usize,
    pub dates_filled: usize,
    pub harvest_projector_wired: bool,
    pub sale_calculator_wired: bool,
}
