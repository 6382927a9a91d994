//! Defaulting of empty date inputs

use std::rc::Rc;

use chrono::NaiveDate;

use crate::dom::InputField;
use crate::parsing::format_form_date;

/// Set every empty date input to `today`, except the one whose id is
/// `skip_id`. Returns how many inputs were filled.
pub fn fill_empty_dates(inputs: &[Rc<dyn InputField>], skip_id: &str, today: NaiveDate) -> usize {
    let today = format_form_date(today);
    let mut filled = 0;
    for input in inputs {
        if input.value().is_empty() && input.id() != skip_id {
            input.set_value(&today);
            filled += 1;
        }
    }
    filled
}
