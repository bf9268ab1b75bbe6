use std::fmt;

use common::collapse_whitespace;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Bet type
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BetType {
    #[schemars(title = "Straight")]
    Straight,
    #[schemars(title = "Moneyline")]
    Moneyline,
    #[schemars(title = "Parlay")]
    Parlay,
    #[schemars(title = "Same Game Parlay")]
    SameGameParlay,
    #[schemars(title = "Same Game Parlay+")]
    SameGameParlayPlus,
}

/// Leg layout of a bet slip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Single,  // one subject, no pair scan
    Flat,    // one list of legs, inline "- ALT" legs allowed
    Grouped, // legs sectioned by game headers
}

impl BetType {
    /// Layout used to parse the legs of this bet type
    pub fn layout(&self) -> LayoutMode {
        match self {
            BetType::Straight | BetType::Moneyline => LayoutMode::Single,
            BetType::Parlay => LayoutMode::Flat,
            BetType::SameGameParlay | BetType::SameGameParlayPlus => LayoutMode::Grouped,
        }
    }
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            BetType::Straight => "Straight",
            BetType::Moneyline => "Moneyline",
            BetType::Parlay => "Parlay",
            BetType::SameGameParlay => "Same Game Parlay",
            BetType::SameGameParlayPlus => "Same Game Parlay+",
        };
        write!(f, "{}", name)
    }
}

/// Keyword priority, first match wins
const BET_TYPE_KEYWORDS: [(&str, BetType); 4] = [
    ("SAME GAME PARLAY+", BetType::SameGameParlayPlus),
    ("SAME GAME PARLAY", BetType::SameGameParlay),
    ("PARLAY", BetType::Parlay),
    ("MONEYLINE", BetType::Moneyline),
];

/// Classify the bet type of raw OCR text
///
/// # Arguments
///
/// * `raw` - text returned by OCR, before normalization
pub fn classify(raw: &str) -> BetType {
    let text = collapse_whitespace(&raw.to_uppercase());
    let bet_type = BET_TYPE_KEYWORDS
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, bet_type)| *bet_type)
        .unwrap_or(BetType::Straight);
    debug!("classified bet type: {}", bet_type);
    bet_type
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_priority() {
        assert_eq!(
            classify("3 leg Same Game Parlay+\nPARLAY"),
            BetType::SameGameParlayPlus
        );
        assert_eq!(classify("same game parlay"), BetType::SameGameParlay);
        assert_eq!(classify("4 leg Parlay\nMoneyline"), BetType::Parlay);
        assert_eq!(classify("Celtics\nMONEYLINE"), BetType::Moneyline);
        assert_eq!(classify("Celtics -4.5\nSpread"), BetType::Straight);
        assert_eq!(classify(""), BetType::Straight);
    }

    #[test]
    fn test_classify_split_whitespace() {
        assert_eq!(classify("SAME  GAME\tPARLAY"), BetType::SameGameParlay);
    }

    #[test]
    fn test_layout() {
        assert_eq!(BetType::Straight.layout(), LayoutMode::Single);
        assert_eq!(BetType::Moneyline.layout(), LayoutMode::Single);
        assert_eq!(BetType::Parlay.layout(), LayoutMode::Flat);
        assert_eq!(BetType::SameGameParlay.layout(), LayoutMode::Grouped);
        assert_eq!(BetType::SameGameParlayPlus.layout(), LayoutMode::Grouped);
    }
}
