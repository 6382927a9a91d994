//! Sale models

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::parsing::lenient_number;

/// Quantity and unit price read from a sales form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    pub quantity: f64,
    pub price_per_unit: f64,
}

impl SaleLine {
    /// Read a sale line from raw form values; unreadable values count as zero
    pub fn from_form(quantity: &str, price_per_unit: &str) -> Self {
        Self {
            quantity: lenient_number(quantity),
            price_per_unit: lenient_number(price_per_unit),
        }
    }

    /// Total amount of the line
    pub fn total(&self) -> f64 {
        self.quantity * self.price_per_unit
    }
}

/// Compute a sale total from raw form values
pub fn sale_total(quantity: &str, price_per_unit: &str) -> f64 {
    SaleLine::from_form(quantity, price_per_unit).total()
}

/// Render a total for display, rounded to two decimals.
///
/// Returns None for totals that have no decimal representation (NaN, infinite).
pub fn format_sale_total(total: f64) -> Option<String> {
    let amount = Decimal::try_from(total).ok()?;
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    Some(format!("{:.2}", rounded))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_total() {
        assert_eq!(sale_total("3", "2.5"), 7.5);
        assert_eq!(sale_total("", "4"), 0.0);
        assert_eq!(sale_total("10", ""), 0.0);
        assert_eq!(sale_total("2 kg", "1.5"), 3.0);
    }

    #[test]
    fn test_sale_total_negative_zero_quantity() {
        let total = sale_total("-0", "4");
        assert_eq!(total, 0.0);
        assert!(total.is_sign_positive());
    }

    #[test]
    fn test_sale_line_from_form() {
        let line = SaleLine::from_form("12", "abc");
        assert_eq!(line.quantity, 12.0);
        assert_eq!(line.price_per_unit, 0.0);
        assert_eq!(line.total(), 0.0);
    }

    #[test]
    fn test_format_sale_total() {
        assert_eq!(format_sale_total(7.5).as_deref(), Some("7.50"));
        assert_eq!(format_sale_total(0.0).as_deref(), Some("0.00"));
        assert_eq!(format_sale_total(0.1 * 3.0).as_deref(), Some("0.30"));
        assert_eq!(format_sale_total(2.125).as_deref(), Some("2.13"));
    }

    #[test]
    fn test_format_sale_total_non_finite() {
        assert_eq!(format_sale_total(f64::NAN), None);
        assert_eq!(format_sale_total(f64::INFINITY), None);
    }
}
