//! Permissive parsing of form values
//!
//! Form inputs hand us raw strings. Numbers are read by prefix the way a
//! browser does (`"75 days"` is 75), and anything unreadable is absent rather
//! than an error the user would see.

use chrono::{Datelike, NaiveDate};

use crate::error::{FormError, FormResult};

/// Earliest year a date input accepts
pub const MIN_FORM_YEAR: i32 = 1;

// ============================================================================
// Numbers
// ============================================================================

/// Parse the leading decimal integer of `raw`.
///
/// Leading whitespace and a single sign are accepted; parsing stops at the
/// first non-digit. Returns `None` if no digit was found.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits = count_digits(rest.as_bytes());
    if digits == 0 {
        return None;
    }
    let value: i64 = rest[..digits].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Parse the longest leading floating-point literal of `raw`.
///
/// Accepts `[sign] digits [. digits] [e [sign] digits]`, a bare fraction
/// such as `.5`, and `Infinity`. Returns `None` if no number starts the
/// string.
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().ok()
}

/// Parse a form number, treating empty or unreadable input as zero
pub fn lenient_number(raw: &str) -> f64 {
    // NaN and -0 both read as plain zero
    match parse_float_prefix(raw) {
        Some(value) if !value.is_nan() && value != 0.0 => value,
        _ => 0.0,
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

// ============================================================================
// Dates
// ============================================================================

/// Parse a form date: a year of four or more digits, then two-digit month
/// and day (`2024-03-09`, `10000-01-01`).
pub fn parse_form_date(raw: &str) -> FormResult<NaiveDate> {
    let invalid = || FormError::InvalidDate(raw.to_string());

    let mut parts = raw.trim().split('-');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };
    let all_digits = [year, month, day]
        .iter()
        .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()));
    if !all_digits || year.len() < 4 || month.len() != 2 || day.len() != 2 {
        return Err(invalid());
    }

    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let day: u32 = day.parse().map_err(|_| invalid())?;
    if year < MIN_FORM_YEAR {
        return Err(invalid());
    }
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Format a date the way date inputs expect it: zero-padded `YYYY-MM-DD`,
/// years past 9999 written out in full with no sign
pub fn format_form_date(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}
