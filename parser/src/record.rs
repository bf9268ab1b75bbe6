use std::fmt;

use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::classify::BetType;

/// Name of the synthetic group holding legs without a game header
pub const PARLAY_GROUP: &str = "Parlay";

/// One selection of a bet
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    #[schemars(title = "Player name or bet subject")]
    pub position: String,
    #[schemars(title = "Bet condition")]
    pub detail: String,
    #[schemars(title = "Label of the game the leg belongs to")]
    pub game_label: Option<String>,
    #[schemars(title = "American odds printed next to the position")]
    pub odds: Option<String>,
}

impl Leg {
    pub fn new(position: String, detail: String, game_label: Option<String>) -> Self {
        Self {
            position,
            detail,
            game_label,
            odds: None,
        }
    }
}

/// Legs of one game
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GameGroup {
    #[schemars(title = "Matchup or header text")]
    pub game_label: Option<String>,
    #[schemars(title = "Legs in order of appearance")]
    pub legs: Vec<Leg>,
}

/// Structured bet slip
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BetRecord {
    #[schemars(title = "Bet type")]
    pub bet_type: BetType,
    #[schemars(title = "Leg count declared by the slip")]
    pub expected_legs: usize,
    #[schemars(title = "Leg count found")]
    pub found_legs: usize,
    #[schemars(title = "Wager")]
    pub wager: Decimal,
    #[schemars(title = "Potential payout")]
    pub potential_payout: Decimal,
    #[schemars(title = "Amount won")]
    pub won_amount: Decimal,
    #[schemars(title = "Bet is settled")]
    pub is_finished: bool,
    #[schemars(title = "Sportsbook")]
    pub sportsbook: Option<String>,
    #[schemars(title = "Legs grouped by game")]
    pub games: Vec<GameGroup>,
}

impl BetRecord {
    /// All legs in transcript order
    pub fn legs(&self) -> impl Iterator<Item = &Leg> {
        self.games.iter().flat_map(|game| game.legs.iter())
    }

    /// Whether the declared leg count matches the legs found
    pub fn leg_count_matches(&self) -> bool {
        self.expected_legs == self.found_legs
    }

    /// Human-readable transcript
    ///
    /// A `Game:` line opens each labelled group, legs are numbered from 1
    /// across all groups.
    pub fn transcript(&self) -> Vec<String> {
        let mut lines = vec![];
        let mut index = 0;
        for game in self.games.iter() {
            if let Some(label) = &game.game_label {
                lines.push(format!("Game: {}", label));
            }
            for leg in game.legs.iter() {
                index += 1;
                lines.push(format!("Leg {} Position: {}", index, leg.position));
                lines.push(format!("Bet Details: {}", leg.detail));
            }
        }
        lines
    }
}

impl fmt::Display for BetRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Bet {{ type: {}, legs: {}/{}, wager: ${:.2}, payout: ${:.2}, won: ${:.2}, finished: {}, sportsbook: {} }}",
            self.bet_type,
            self.found_legs,
            self.expected_legs,
            self.wager,
            self.potential_payout,
            self.won_amount,
            self.is_finished,
            self.sportsbook.as_deref().unwrap_or("-"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::*;

    fn record() -> BetRecord {
        BetRecord {
            bet_type: BetType::SameGameParlay,
            expected_legs: 3,
            found_legs: 3,
            wager: dec!(10.00),
            potential_payout: dec!(87.5),
            won_amount: Decimal::ZERO,
            is_finished: false,
            sportsbook: Some(String::from("FanDuel")),
            games: vec![
                GameGroup {
                    game_label: Some(String::from("LAL @ BOS 7:30 PM ET")),
                    legs: vec![
                        Leg::new(
                            String::from("LeBron James"),
                            String::from("TO SCORE 25+ POINTS"),
                            Some(String::from("LAL @ BOS 7:30 PM ET")),
                        ),
                        Leg::new(
                            String::from("Jayson Tatum"),
                            String::from("3+ MADE THREES"),
                            Some(String::from("LAL @ BOS 7:30 PM ET")),
                        ),
                    ],
                },
                GameGroup {
                    game_label: None,
                    legs: vec![Leg::new(
                        String::from("Nikola Jokic"),
                        String::from("TO RECORD A DOUBLE DOUBLE"),
                        None,
                    )],
                },
            ],
        }
    }

    #[test]
    fn test_transcript() {
        assert_eq!(
            record().transcript(),
            vec![
                "Game: LAL @ BOS 7:30 PM ET",
                "Leg 1 Position: LeBron James",
                "Bet Details: TO SCORE 25+ POINTS",
                "Leg 2 Position: Jayson Tatum",
                "Bet Details: 3+ MADE THREES",
                "Leg 3 Position: Nikola Jokic",
                "Bet Details: TO RECORD A DOUBLE DOUBLE",
            ]
        );
    }

    #[test]
    fn test_legs() {
        let record = record();
        assert_eq!(record.legs().count(), 3);
        assert!(record.leg_count_matches());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            record().to_string(),
            "Bet { type: Same Game Parlay, legs: 3/3, wager: $10.00, payout: $87.50, won: $0.00, finished: false, sportsbook: FanDuel }"
        );
    }
}
