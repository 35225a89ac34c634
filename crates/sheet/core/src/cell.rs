//! Text conversion for numeric table cells.
//!
//! Cells are edited as free text. Parsing is tolerant so that partially typed
//! input (a lone `-`, a half-entered number) never resets the stored value:
//! blank text means `0`, a valid integer is taken as-is, anything else is
//! dropped and the previous value stays.

/// Unit suffix shown after positive weapon ranges.
pub const RANGE_SUFFIX: &str = "M";

/// Parses cell text.
///
/// Returns `None` when the edit should be dropped.
pub fn parse_cell<T>(text: &str) -> Option<T>
where
    T: std::str::FromStr + Default,
{
    let text = text.trim();
    if text.is_empty() {
        return Some(T::default());
    }
    text.parse().ok()
}

/// Parses a range cell, ignoring the unit suffix.
pub fn parse_range(text: &str) -> Option<i32> {
    parse_cell(&strip_range_suffix(text))
}

/// Removes every range suffix from user input.
pub fn strip_range_suffix(text: &str) -> String {
    text.replace(RANGE_SUFFIX, "")
}

/// The number when positive, empty otherwise.
pub fn format_positive(value: i32) -> String {
    if value > 0 {
        value.to_string()
    } else {
        String::new()
    }
}

/// Same as [`format_positive`] with the range suffix appended.
pub fn format_range(value: i32) -> String {
    if value > 0 {
        format!("{value}{RANGE_SUFFIX}")
    } else {
        String::new()
    }
}

/// Free-text cells store `None` instead of an empty string.
pub fn text_or_none(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_parses_as_zero() {
        assert_eq!(parse_cell::<i32>(""), Some(0));
        assert_eq!(parse_cell::<i32>("   "), Some(0));
        assert_eq!(parse_cell::<u32>(""), Some(0));
    }

    #[test]
    fn integers_parse() {
        assert_eq!(parse_cell::<i32>("12"), Some(12));
        assert_eq!(parse_cell::<i32>("-3"), Some(-3));
    }

    #[test]
    fn garbage_is_dropped() {
        assert_eq!(parse_cell::<i32>("abc"), None);
        assert_eq!(parse_cell::<i32>("-"), None);
        assert_eq!(parse_cell::<i32>("1.5"), None);
        // Unsigned stats refuse negative input
        assert_eq!(parse_cell::<u32>("-4"), None);
    }

    #[test]
    fn range_suffix_round_trip() {
        assert_eq!(format_range(12), "12M");
        assert_eq!(format_range(0), "");
        assert_eq!(parse_range("12M"), Some(12));
        assert_eq!(parse_range("M"), Some(0));
        assert_eq!(parse_range("x"), None);
    }

    #[test]
    fn positive_or_empty() {
        assert_eq!(format_positive(4), "4");
        assert_eq!(format_positive(0), "");
        assert_eq!(format_positive(-2), "");
    }
}
