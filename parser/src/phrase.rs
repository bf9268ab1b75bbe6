use common::collapse_whitespace;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Builds the canonical detail text from a phrase match
type Canonicalizer = fn(&Captures) -> String;

/// Recognized bet phrase
pub struct PhraseRule {
    pub name: &'static str,
    pub pattern: Regex,
    canonicalize: Canonicalizer,
}

impl PhraseRule {
    fn new(name: &'static str, pattern: &str, canonicalize: Canonicalizer) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("invalid phrase pattern"),
            canonicalize,
        }
    }
}

lazy_static! {
    /// Bet phrases in match order, applied to cleaned detail lines
    pub static ref PHRASE_RULES: Vec<PhraseRule> = vec![
        PhraseRule::new(
            "score_points",
            r"^TO SCORE (\d+) ?\+? ?POINTS\b",
            |c| format!("TO SCORE {}+ POINTS", &c[1]),
        ),
        PhraseRule::new(
            "record_stat",
            r"^TO RECORD (\d+) ?\+? ?(REBOUNDS|ASSISTS|STEALS|BLOCKS)\b",
            |c| format!("TO RECORD {}+ {}", &c[1], &c[2]),
        ),
        PhraseRule::new(
            "record_double",
            r"^TO RECORD A (DOUBLE|TRIPLE)[ -]?DOUBLE\b",
            |c| format!("TO RECORD A {} DOUBLE", &c[1]),
        ),
        PhraseRule::new(
            "made_threes",
            r"^(\d+) ?\+? ?MADE THREES\b",
            |c| format!("{}+ MADE THREES", &c[1]),
        ),
        PhraseRule::new(
            "stat_threshold",
            r"^(\d+) ?\+ ?(POINTS|REBOUNDS|ASSISTS|STEALS|BLOCKS|RECEPTIONS|STRIKEOUTS|HITS)\b",
            |c| format!("{}+ {}", &c[1], &c[2]),
        ),
        PhraseRule::new(
            "touchdown_scorer",
            r"^(ANY ?TIME|FIRST|LAST) TOUCHDOWN SCORER\b",
            |c| {
                let when = if c[1].starts_with("ANY") { "ANYTIME" } else { &c[1] };
                format!("{} TOUCHDOWN SCORER", when)
            },
        ),
        PhraseRule::new(
            "alt_yards",
            r"^ALT (PASSING|RUSHING|RECEIVING) (YDS|YARDS|TDS|TOUCHDOWNS)\b(.*)$",
            |c| trim_odds(&format!("ALT {} {}{}", &c[1], &c[2], &c[3])),
        ),
        PhraseRule::new(
            "first_basket",
            r"^FIRST BASKET\b",
            |_| String::from("FIRST BASKET"),
        ),
        PhraseRule::new(
            "home_run",
            r"^TO HIT A HOME RUN\b",
            |_| String::from("TO HIT A HOME RUN"),
        ),
    ];

    /// Icons and bullets OCR puts in front of a line
    static ref LEADING_ARTIFACTS: Regex = Regex::new(r"^(?:[^A-Z0-9]|[O0] )+").expect("invalid pattern");
    static ref TRAILING_ODDS: Regex = Regex::new(r" [+-]\d{3,}$").expect("invalid pattern");
    static ref STAT_WORDS: Regex = Regex::new(
        r"\b(POINTS|REBOUNDS|ASSISTS|THREES|ALT|YDS|YARDS|TOUCHDOWN|SCORER|BASKET|DOUBLE)\b"
    )
    .expect("invalid pattern");
}

/// Drop a trailing American odds token
fn trim_odds(s: &str) -> String {
    TRAILING_ODDS.replace(s.trim(), "").trim().to_string()
}

/// Upper-case, collapse whitespace and strip leading OCR artifacts
///
/// # Arguments
///
/// * `line` - detail line as read by OCR
pub fn clean_detail(line: &str) -> String {
    let line = collapse_whitespace(&line.to_uppercase());
    LEADING_ARTIFACTS.replace(&line, "").trim().to_string()
}

/// Match a line against the phrase table, returning the canonical detail
///
/// # Arguments
///
/// * `line` - candidate detail line
pub fn match_detail(line: &str) -> Option<String> {
    let cleaned = clean_detail(line);
    PHRASE_RULES.iter().find_map(|rule| {
        rule.pattern
            .captures(&cleaned)
            .map(|captures| (rule.canonicalize)(&captures))
    })
}

/// Name of the first phrase rule matching the line
///
/// # Arguments
///
/// * `line` - candidate detail line
pub fn matching_rule(line: &str) -> Option<&'static str> {
    let cleaned = clean_detail(line);
    PHRASE_RULES
        .iter()
        .find(|rule| rule.pattern.is_match(&cleaned))
        .map(|rule| rule.name)
}

/// Whether the line talks about a stat without matching any phrase
///
/// Such lines are likely details garbled by OCR.
///
/// # Arguments
///
/// * `line` - candidate detail line
pub fn mentions_stat(line: &str) -> bool {
    STAT_WORDS.is_match(&clean_detail(line))
}

/// Canonical detail of an inline "- ALT ..." leg
///
/// Falls back to the cleaned text when no phrase matches.
///
/// # Arguments
///
/// * `detail` - text after the "- " separator
pub fn canonical_inline_detail(detail: &str) -> String {
    match_detail(detail).unwrap_or_else(|| trim_odds(&clean_detail(detail)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_detail() {
        assert_eq!(
            match_detail("To Score 20+ Points"),
            Some(String::from("TO SCORE 20+ POINTS"))
        );
        assert_eq!(
            match_detail("TO SCORE 20 POINTS"),
            Some(String::from("TO SCORE 20+ POINTS"))
        );
        assert_eq!(
            match_detail("To Record 8+  Rebounds"),
            Some(String::from("TO RECORD 8+ REBOUNDS"))
        );
        assert_eq!(
            match_detail("3+ Made Threes"),
            Some(String::from("3+ MADE THREES"))
        );
        assert_eq!(
            match_detail("Any Time Touchdown Scorer"),
            Some(String::from("ANYTIME TOUCHDOWN SCORER"))
        );
        assert_eq!(
            match_detail("To Record A Double-Double"),
            Some(String::from("TO RECORD A DOUBLE DOUBLE"))
        );
        assert_eq!(
            match_detail("Alt Passing Yds 250+ -150"),
            Some(String::from("ALT PASSING YDS 250+"))
        );
        assert_eq!(match_detail("First Basket"), Some(String::from("FIRST BASKET")));
        assert_eq!(match_detail("LeBron James"), None);
        assert_eq!(match_detail("TOTAL WAGER"), None);
    }

    #[test]
    fn test_match_detail_artifacts() {
        assert_eq!(
            match_detail("© To Score 25+ Points"),
            Some(String::from("TO SCORE 25+ POINTS"))
        );
        assert_eq!(
            match_detail("O  4+ Made Threes"),
            Some(String::from("4+ MADE THREES"))
        );
        assert_eq!(
            match_detail("—- To Record 10+ Assists"),
            Some(String::from("TO RECORD 10+ ASSISTS"))
        );
    }

    #[test]
    fn test_rule_order() {
        // "MADE THREES" is tried before the generic stat threshold
        assert_eq!(matching_rule("3+ Made Threes"), Some("made_threes"));
        assert_eq!(matching_rule("25+ Points"), Some("stat_threshold"));
        assert_eq!(matching_rule("Jalen Brunson"), None);
    }

    #[test]
    fn test_mentions_stat() {
        assert!(mentions_stat("To Scre 20+ Points"));
        assert!(!mentions_stat("LeBron James"));
    }

    #[test]
    fn test_canonical_inline_detail() {
        assert_eq!(
            canonical_inline_detail("ALT RUSHING YDS 80+"),
            "ALT RUSHING YDS 80+"
        );
        assert_eq!(canonical_inline_detail("ALT SPREAD -4.5 +110"), "ALT SPREAD -4.5");
    }
}
