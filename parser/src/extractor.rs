use common::str_to_number;
use lazy_static::lazy_static;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    classify::classify,
    leg::{LegParser, dedup_legs, group_legs},
    money::extract_money,
    normalize::Normalized,
    record::BetRecord,
    review::ReviewNote,
    vocabulary::Vocabulary,
};

lazy_static! {
    static ref DECLARED_LEGS: Regex = Regex::new(r"(?i)(\d+)\s*-?\s*LEG.*PARLAY").expect("invalid pattern");
}

/// Extraction result
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Extraction {
    #[schemars(title = "Bet record")]
    pub record: BetRecord,
    #[schemars(title = "Notes for manual review")]
    pub review: Vec<ReviewNote>,
}

/// Leg count declared by an "<N> leg ... Parlay" marker
///
/// # Arguments
///
/// * `raw` - text returned by OCR
pub fn declared_leg_count(raw: &str) -> Option<usize> {
    DECLARED_LEGS
        .captures(raw)
        .and_then(|captures| str_to_number(&captures[1]).ok())
}

/// Bet slip extractor
pub struct Extractor {
    vocabulary: Vocabulary,
}

impl Extractor {
    /// Create an extractor
    ///
    /// # Arguments
    ///
    /// * `vocabulary` - sportsbook vocabulary
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Extract a bet record from OCR text
    ///
    /// Never fails: unreadable text gives a record without legs.
    ///
    /// # Arguments
    ///
    /// * `raw` - text returned by OCR
    pub fn extract(&self, raw: &str) -> Extraction {
        let normalized = Normalized::new(raw);
        debug!(
            "normalized {} lines: '{}'",
            normalized.lines.len(),
            normalized.text
        );

        let bet_type = classify(raw);
        let money = extract_money(raw, &self.vocabulary);
        let scan = LegParser::new(&normalized.lines).parse(bet_type);

        let legs = dedup_legs(scan.legs);
        let found_legs = legs.len();
        let games = group_legs(legs, bet_type.layout());
        let expected_legs = declared_leg_count(raw).unwrap_or(found_legs);

        let mut review = scan.review;
        if expected_legs != found_legs {
            review.push(ReviewNote::LegCountMismatch {
                expected: expected_legs,
                found: found_legs,
            });
        }
        for note in review.iter() {
            warn!("needs review: {}", note);
        }

        let sportsbook = money
            .settled_on
            .clone()
            .or_else(|| self.vocabulary.find_sportsbook(raw));

        let record = BetRecord {
            bet_type,
            expected_legs,
            found_legs,
            wager: money.wager,
            potential_payout: money.potential_payout,
            won_amount: money.won_amount,
            is_finished: money.is_finished,
            sportsbook,
            games,
        };
        debug!("extracted: {}", record);

        Extraction { record, review }
    }
}
