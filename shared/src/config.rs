//! Configuration for the form enhancer
//!
//! Every field has a default matching the farm templates, so an empty JSON
//! object (or no configuration at all) wires the standard pages:
//! 1. Default values in code
//! 2. Optional JSON overrides supplied by the page
//! 3. Validation before anything is attached
//!
//! "Today" for the date defaults is the browser's local date unless
//! `today_basis` is `"utc"`. Older farm pages filled dates with the UTC date,
//! so set `{"today_basis": "utc"}` to keep their behavior.
//!
//! Fade timings go to `setTimeout`, which only accepts delays up to
//! 2147483647 ms; larger values are rejected.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::FormResult;
use crate::types::DateBasis;

/// Main enhancer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct EnhancerConfig {
    /// Element ids of the form fields
    #[validate]
    pub fields: FieldIds,

    /// Data attribute on variety options holding days to harvest
    #[validate(length(min = 1))]
    pub days_attribute: String,

    /// CSS selector for notification banners
    #[validate(length(min = 1))]
    pub alert_selector: String,

    /// CSS selector for inputs that default to today
    #[validate(length(min = 1))]
    pub date_input_selector: String,

    /// Delay before an alert starts fading, in milliseconds
    #[validate(range(min = 1, max = 2147483647))]
    pub fade_delay_ms: u32,

    /// Fade transition length before removal, in milliseconds
    #[validate(range(max = 2147483647))]
    pub fade_duration_ms: u32,

    /// Calendar used for "today"
    pub today_basis: DateBasis,

    /// Optional id of an input that displays the sale total
    #[validate(length(min = 1))]
    pub total_field: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[validate(length(min = 1))]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct FieldIds {
    #[validate(length(min = 1))]
    pub variety: String,

    #[validate(length(min = 1))]
    pub planting_date: String,

    #[validate(length(min = 1))]
    pub expected_harvest: String,

    #[validate(length(min = 1))]
    pub quantity: String,

    #[validate(length(min = 1))]
    pub price_per_unit: String,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            fields: FieldIds::default(),
            days_attribute: "data-days".to_string(),
            alert_selector: ".alert".to_string(),
            date_input_selector: "input[type=\"date\"]".to_string(),
            fade_delay_ms: 5000,
            fade_duration_ms: 500,
            today_basis: DateBasis::Local,
            total_field: None,
            log_level: "info".to_string(),
        }
    }
}

impl Default for FieldIds {
    fn default() -> Self {
        Self {
            variety: "variety".to_string(),
            planting_date: "planting_date".to_string(),
            expected_harvest: "expected_harvest".to_string(),
            quantity: "quantity".to_string(),
            price_per_unit: "price_per_unit".to_string(),
        }
    }
}

impl EnhancerConfig {
    /// Load configuration from a JSON document, filling gaps with defaults
    pub fn from_json(json: &str) -> FormResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validated()
    }

    /// Validate and return self
    pub fn validated(self) -> FormResult<Self> {
        self.validate()?;
        Ok(self)
    }

    pub fn fade_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.fade_delay_ms))
    }

    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.fade_duration_ms))
    }
}
