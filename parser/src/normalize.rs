use common::collapse_whitespace;

/// Normalized OCR text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Normalized {
    /// Upper-cased text restricted to `[A-Z0-9 +-.@]`, whitespace collapsed
    pub text: String,
    /// Trimmed non-empty lines in source order, original case kept
    pub lines: Vec<String>,
}

impl Normalized {
    /// Normalize raw OCR text
    ///
    /// # Arguments
    ///
    /// * `raw` - text returned by OCR
    pub fn new(raw: &str) -> Self {
        Self {
            text: normalize_text(raw),
            lines: normalize_lines(raw),
        }
    }
}

/// Whether a character survives normalization
fn is_kept_char(c: char) -> bool {
    matches!(c, 'A'..='Z' | '0'..='9' | ' ' | '+' | '-' | '.' | '@')
}

/// Upper-case the text, drop every character outside `[A-Z0-9 +-.@]` and
/// collapse whitespace
///
/// Line breaks and tabs count as whitespace, so the result is a single line.
///
/// # Arguments
///
/// * `raw` - text returned by OCR
pub fn normalize_text(raw: &str) -> String {
    let kept: String = raw
        .to_uppercase()
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .filter(|c| is_kept_char(*c))
        .collect();
    collapse_whitespace(&kept)
}

/// Split into trimmed, non-empty lines
///
/// # Arguments
///
/// * `raw` - text returned by OCR
pub fn normalize_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        let raw = "LeBron James  \n To Score 20+ Points!! \t@ 7:00pm";
        assert_eq!(
            normalize_text(raw),
            "LEBRON JAMES TO SCORE 20+ POINTS @ 700PM"
        );
    }

    #[test]
    fn test_normalize_lines() {
        let raw = "  LeBron James \r\n\r\n   \nTo Score 20+ Points\n";
        assert_eq!(
            normalize_lines(raw),
            vec!["LeBron James".to_string(), "To Score 20+ Points".to_string()]
        );
    }

    #[test]
    fn test_normalize_empty() {
        let normalized = Normalized::new(" \n\t \n");
        assert_eq!(normalized.text, "");
        assert!(normalized.lines.is_empty());
        assert_eq!(Normalized::new(""), Normalized::default());
    }
}
