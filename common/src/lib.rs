use anyhow::{Context, Result};
use std::str::FromStr;

// Shared string helpers

/// String to number
///
/// Keeps only digits and `.` before parsing, so OCR noise around the number
/// (`"3-leg"`, `"$25.50"`) is ignored.
///
/// # Arguments
///
/// - `s` - source string
pub fn str_to_number<T: FromStr>(s: &str) -> Result<T> {
    s.chars()
        .filter(|c| c.is_ascii_digit() || c == &'.')
        .collect::<String>()
        .parse::<T>()
        .ok()
        .context("failed to convert string to number")
}

/// Collapse every run of whitespace into a single space and trim both ends
///
/// # Arguments
///
/// - `s` - source string
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Whether `haystack` contains any of `needles`
///
/// # Arguments
///
/// - `haystack` - text to search
/// - `needles` - substrings to look for
pub fn contains_any<S: AsRef<str>>(haystack: &str, needles: &[S]) -> bool {
    needles
        .iter()
        .any(|needle| haystack.contains(needle.as_ref()))
}

/// Remove leading characters while `predicate` holds
///
/// # Arguments
///
/// - `s` - source string
/// - `predicate` - characters to drop
pub fn strip_leading(s: &str, predicate: impl Fn(char) -> bool) -> &str {
    s.trim_start_matches(|c: char| predicate(c))
}

/// Cut the string at the first character in `stops`
///
/// Curly and straight double quotes, slashes and pipes are what OCR usually
/// produces for icons and separators next to text.
///
/// # Arguments
///
/// - `s` - source string
/// - `stops` - truncation characters
pub fn truncate_at<'a>(s: &'a str, stops: &[char]) -> &'a str {
    match s.find(|c: char| stops.contains(&c)) {
        Some(index) => &s[..index],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_to_number() {
        assert_eq!(str_to_number::<usize>("3").unwrap(), 3);
        assert_eq!(str_to_number::<usize>("3-").unwrap(), 3);
        assert_eq!(str_to_number::<f32>("$25.50").unwrap(), 25.5);
        assert!(str_to_number::<usize>("leg").is_err());
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  TO  SCORE\t20+ "), "TO SCORE 20+");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_contains_any() {
        assert!(contains_any("TOTAL WAGER", &["WAGER", "PAYOUT"]));
        assert!(!contains_any("LEBRON JAMES", &["WAGER", "PAYOUT"]));
    }

    #[test]
    fn test_strip_and_truncate() {
        assert_eq!(strip_leading("&@ Jalen", |c| !c.is_alphanumeric()), "Jalen");
        assert_eq!(truncate_at("Jalen Brunson \" 0", &['"', '/']), "Jalen Brunson ");
        assert_eq!(truncate_at("Jalen Brunson", &['"']), "Jalen Brunson");
    }
}
