//! Expected-harvest projection

use std::rc::Rc;

use chrono::NaiveDate;

use crate::dom::{Handler, InputField, Subscription, VarietySelector};
use crate::models::project_harvest_date;
use crate::parsing::format_form_date;
use crate::types::FormEvent;

/// Keeps the expected-harvest field in step with variety and planting date
pub struct HarvestProjector {
    variety: Rc<dyn VarietySelector>,
    planting_date: Rc<dyn InputField>,
    expected_harvest: Rc<dyn InputField>,
    days_attribute: String,
}

impl HarvestProjector {
    pub fn new(
        variety: Rc<dyn VarietySelector>,
        planting_date: Rc<dyn InputField>,
        expected_harvest: Rc<dyn InputField>,
        days_attribute: impl Into<String>,
    ) -> Self {
        Self {
            variety,
            planting_date,
            expected_harvest,
            days_attribute: days_attribute.into(),
        }
    }

    /// Recompute the expected harvest date.
    ///
    /// Writes the field and returns the date, or leaves the field untouched
    /// when either input is missing or unreadable.
    pub fn project(&self) -> Option<NaiveDate> {
        let days = self.variety.selected_option_attribute(&self.days_attribute);
        let planting = self.planting_date.value();

        match project_harvest_date(&planting, days.as_deref()) {
            Ok(harvest) => {
                let formatted = format_form_date(harvest);
                tracing::debug!("Expected harvest projected: {}", formatted);
                self.expected_harvest.set_value(&formatted);
                Some(harvest)
            }
            Err(e) => {
                tracing::debug!("Expected harvest left unchanged: {}", e);
                None
            }
        }
    }

    /// Recompute on variety change and planting-date input
    pub fn wire(self: Rc<Self>) -> Vec<Subscription> {
        let projector = self.clone();
        let handler: Handler = Rc::new(move || {
            projector.project();
        });
        vec![
            self.variety.subscribe(FormEvent::Change, handler.clone()),
            self.planting_date.subscribe(FormEvent::Input, handler),
        ]
    }
}
