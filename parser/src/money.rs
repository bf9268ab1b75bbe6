use rust_decimal::prelude::*;
use tracing::debug;

use crate::vocabulary::Vocabulary;

// Currency amount parser: "$" digits, optional ",ddd" groups, optional ".dd"
peg::parser!(grammar currency() for str {
    rule digit() = ['0'..='9']
    rule group() = "," digit()*<3>
    rule fraction() = "." digit()*<2>

    // Punctuation OCR leaves glued to the end of an amount
    rule trailing() = quiet!{[',' | '.' | ';' | ':' | ')' | '!']*}

    pub(crate) rule amount() -> Decimal
        = "$" n:$(digit()+ group()* fraction()?) trailing() {?
            Decimal::from_str(&n.replace(',', "")).or(Err("decimal amount"))
        }
});

/// Parse a whitespace-delimited token as a currency amount
///
/// Malformed tokens give `None`.
///
/// # Arguments
///
/// * `token` - token, e.g. `$1,250.00`
pub fn parse_amount(token: &str) -> Option<Decimal> {
    currency::amount(token).ok()
}

/// Monetary fields of a bet slip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Money {
    pub wager: Decimal,
    pub potential_payout: Decimal,
    pub won_amount: Decimal,
    pub is_finished: bool,
    /// Sportsbook named in a "WON ON <sportsbook>" phrase
    pub settled_on: Option<String>,
}

impl Money {
    /// Money with every role unassigned
    pub fn zero() -> Self {
        Self {
            wager: Decimal::ZERO,
            potential_payout: Decimal::ZERO,
            won_amount: Decimal::ZERO,
            is_finished: false,
            settled_on: None,
        }
    }
}

/// Role named by a "TOTAL <role>" token pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TotalRole {
    Wager,
    Payout,
}

/// Compare a token with a keyword, ignoring case and trailing punctuation
fn token_is(token: &str, keyword: &str) -> bool {
    token
        .trim_end_matches(|c: char| !c.is_alphanumeric())
        .eq_ignore_ascii_case(keyword)
}

/// Role of the token pair, if it reads "TOTAL WAGER" or "TOTAL PAYOUT"
fn total_role(first: &str, second: &str) -> Option<TotalRole> {
    if !token_is(first, "TOTAL") {
        return None;
    }
    if token_is(second, "WAGER") {
        Some(TotalRole::Wager)
    } else if token_is(second, "PAYOUT") {
        Some(TotalRole::Payout)
    } else {
        None
    }
}

/// Extract the wager, payout and winnings of a bet slip
///
/// # Arguments
///
/// * `raw` - text returned by OCR
/// * `vocabulary` - sportsbook vocabulary for "WON ON <sportsbook>"
pub fn extract_money(raw: &str, vocabulary: &Vocabulary) -> Money {
    let words: Vec<&str> = raw.split_whitespace().collect();
    let amounts: Vec<Decimal> = words.iter().filter_map(|w| parse_amount(w)).collect();
    debug!("found currency amounts: {:?}", amounts);

    let mut money = Money::zero();

    let legacy = words
        .windows(2)
        .any(|pair| total_role(pair[0], pair[1]).is_some());

    if legacy {
        // Each "TOTAL <role>" claims the next unclaimed amount in text order
        let mut claimed = 0;
        for pair in words.windows(2) {
            if claimed >= amounts.len() {
                break;
            }
            match total_role(pair[0], pair[1]) {
                Some(TotalRole::Wager) => {
                    money.wager = amounts[claimed];
                    claimed += 1;
                }
                Some(TotalRole::Payout) => {
                    money.potential_payout = amounts[claimed];
                    claimed += 1;
                }
                None => {}
            }
        }
        debug!(
            "assigned amounts by TOTAL markers: wager {}, payout {}",
            money.wager, money.potential_payout
        );
        return money;
    }

    if let Some(wager) = amounts.first() {
        money.wager = *wager;
    }
    money.settled_on = vocabulary.find_won_on(raw);
    money.is_finished = money.settled_on.is_some();
    if let Some(second) = amounts.get(1) {
        if money.is_finished {
            money.won_amount = *second;
        } else {
            money.potential_payout = *second;
        }
    }
    debug!(
        "assigned amounts by position: wager {}, payout {}, won {}, finished {}",
        money.wager, money.potential_payout, money.won_amount, money.is_finished
    );
    money
}
