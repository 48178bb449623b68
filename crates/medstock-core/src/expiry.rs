//! Expiry date strings in the fixed `MM/DD/YYYY` shape.
//!
//! Expiry dates are stored exactly as entered and are only required to have
//! the right *shape*: ten characters, slashes at positions 2 and 5, digits
//! everywhere else. Calendar validity is not checked, so `13/45/9999` is
//! accepted and displayed verbatim wherever it fails to parse as a date.

use chrono::NaiveDate;

/// The parse/render format for expiry strings.
const EXPIRY_FORMAT: &str = "%m/%d/%Y";

/// Check whether `s` has the `MM/DD/YYYY` shape.
///
/// # Examples
///
/// ```
/// use medstock_core::expiry;
///
/// assert!(expiry::is_valid_shape("01/02/2030"));
/// assert!(expiry::is_valid_shape("13/45/9999")); // shape only, not a real date
/// assert!(!expiry::is_valid_shape("1/2/2030"));
/// assert!(!expiry::is_valid_shape("01-02-2030"));
/// ```
#[must_use]
pub fn is_valid_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 10 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| match i {
        2 | 5 => *b == b'/',
        _ => b.is_ascii_digit(),
    })
}

/// Render an expiry string in long form, e.g. `"January 02, 2030"`.
///
/// Strings that do not parse as a calendar date under `MM/DD/YYYY` are
/// returned unchanged.
#[must_use]
pub fn display_long(s: &str) -> String {
    NaiveDate::parse_from_str(s, EXPIRY_FORMAT)
        .map_or_else(|_| s.to_string(), |d| d.format("%B %d, %Y").to_string())
}
