//! Input-formatting assist for expiry dates.

/// Reformat a free-typed date string into the `MM/DD/YYYY` shape.
///
/// Digits are extracted, slashes are inserted after the month and day
/// groups, and the result is truncated to ten characters, so `01022030`
/// becomes `01/02/2030` and already-shaped input passes through unchanged.
/// This is an assist, not validation: too few digits still produce a string
/// the store will reject.
#[must_use]
pub fn reformat_expiry(raw: &str) -> String {
    let mut out: Vec<char> = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if out.len() >= 2 {
        out.insert(2, '/');
    }
    if out.len() >= 5 {
        out.insert(5, '/');
    }
    out.into_iter().take(10).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_digits_are_shaped() {
        assert_eq!(reformat_expiry("01022030"), "01/02/2030");
    }

    #[test]
    fn test_shaped_input_is_unchanged() {
        assert_eq!(reformat_expiry("01/02/2030"), "01/02/2030");
    }

    #[test]
    fn test_overlong_input_truncates() {
        assert_eq!(reformat_expiry("010220309999"), "01/02/2030");
    }

    #[test]
    fn test_short_input_stays_short() {
        assert_eq!(reformat_expiry("01"), "01/");
        assert_eq!(reformat_expiry("1"), "1");
        assert_eq!(reformat_expiry(""), "");
    }

    #[test]
    fn test_stray_characters_are_dropped() {
        assert_eq!(reformat_expiry("01-02-2030"), "01/02/2030");
        assert_eq!(reformat_expiry("exp 01.02.2030"), "01/02/2030");
    }
}
