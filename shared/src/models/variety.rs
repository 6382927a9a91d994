//! Variety models and harvest-date projection

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{FormError, FormResult};
use crate::parsing::{parse_form_date, parse_int_prefix, MIN_FORM_YEAR};

/// Calendar days from planting to expected harvest for a variety.
///
/// Never zero: a zero attribute reads the same as a missing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DaysToHarvest(i64);

impl DaysToHarvest {
    /// Create from a day count, returns None for zero
    pub fn new(days: i64) -> Option<Self> {
        (days != 0).then_some(Self(days))
    }

    /// Read the value of a variety option's days attribute
    pub fn parse(raw: &str) -> FormResult<Self> {
        parse_int_prefix(raw)
            .and_then(Self::new)
            .ok_or_else(|| FormError::MissingDaysToHarvest(raw.to_string()))
    }

    pub fn days(&self) -> i64 {
        self.0
    }

    /// Move `planting` forward by this many calendar days.
    ///
    /// Results before year 1 have no date-input form and are out of range.
    pub fn harvest_from(&self, planting: NaiveDate) -> FormResult<NaiveDate> {
        let shifted = if self.0 > 0 {
            planting.checked_add_days(Days::new(self.0.unsigned_abs()))
        } else {
            planting.checked_sub_days(Days::new(self.0.unsigned_abs()))
        };
        shifted.filter(|date| date.year() >= MIN_FORM_YEAR).ok_or(FormError::DateOutOfRange {
            date: planting,
            days: self.0,
        })
    }
}

/// Project the expected harvest date from raw form values.
///
/// `days_attribute` is the selected option's attribute, `None` when the
/// option carries none.
pub fn project_harvest_date(
    planting_date: &str,
    days_attribute: Option<&str>,
) -> FormResult<NaiveDate> {
    let days = DaysToHarvest::parse(days_attribute.unwrap_or_default())?;
    let planting = parse_form_date(planting_date)?;
    days.harvest_from(planting)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_zero_is_missing() {
        assert_eq!(DaysToHarvest::new(0), None);
        assert!(matches!(
            DaysToHarvest::parse("0"),
            Err(FormError::MissingDaysToHarvest(_))
        ));
    }

    #[test]
    fn test_days_parse_prefix() {
        assert_eq!(DaysToHarvest::parse("75").unwrap().days(), 75);
        assert_eq!(DaysToHarvest::parse("60d").unwrap().days(), 60);
        assert!(DaysToHarvest::parse("").is_err());
        assert!(DaysToHarvest::parse("unknown").is_err());
    }

    #[test]
    fn test_projection_month_rollover() {
        assert_eq!(
            project_harvest_date("2024-01-20", Some("14")).unwrap(),
            date(2024, 2, 3)
        );
    }

    #[test]
    fn test_projection_year_rollover() {
        assert_eq!(
            project_harvest_date("2024-12-25", Some("10")).unwrap(),
            date(2025, 1, 4)
        );
    }

    #[test]
    fn test_projection_leap_day() {
        assert_eq!(
            project_harvest_date("2024-02-28", Some("1")).unwrap(),
            date(2024, 2, 29)
        );
        assert_eq!(
            project_harvest_date("2023-02-28", Some("1")).unwrap(),
            date(2023, 3, 1)
        );
    }

    #[test]
    fn test_projection_negative_days_go_backwards() {
        assert_eq!(
            project_harvest_date("2024-03-01", Some("-1")).unwrap(),
            date(2024, 2, 29)
        );
    }

    #[test]
    fn test_projection_requires_both_values() {
        assert!(project_harvest_date("", Some("75")).is_err());
        assert!(project_harvest_date("2024-01-20", None).is_err());
        assert!(project_harvest_date("2024-01-20", Some("abc")).is_err());
    }

    #[test]
    fn test_projection_past_year_9999() {
        let harvest = project_harvest_date("9999-12-25", Some("10")).unwrap();
        assert_eq!(harvest, date(10000, 1, 4));
        assert_eq!(crate::parsing::format_form_date(harvest), "10000-01-04");
    }

    #[test]
    fn test_projection_accepts_five_digit_planting_year() {
        assert_eq!(
            project_harvest_date("10000-01-01", Some("31")).unwrap(),
            date(10000, 2, 1)
        );
    }

    #[test]
    fn test_projection_before_year_one_is_out_of_range() {
        let result = project_harvest_date("0001-01-05", Some("-10"));
        assert!(matches!(result, Err(FormError::DateOutOfRange { .. })));
    }

    #[test]
    fn test_projection_out_of_range() {
        let result = DaysToHarvest::new(i64::MAX)
            .unwrap()
            .harvest_from(date(2024, 1, 1));
        assert!(matches!(result, Err(FormError::DateOutOfRange { .. })));
    }
}
