use std::collections::HashSet;

use common::{collapse_whitespace, contains_any, strip_leading, truncate_at};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::{
    classify::{BetType, LayoutMode},
    phrase::{canonical_inline_detail, match_detail, matching_rule, mentions_stat},
    record::{GameGroup, Leg, PARLAY_GROUP},
    review::ReviewNote,
};

/// Keywords of summary and header lines
const NOISE_KEYWORDS: [&str; 4] = ["TOTAL", "SAME GAME PARLAY", "INCLUDES:", "SELECTIONS"];

/// Keywords that can never be part of a player name
const SUMMARY_KEYWORDS: [&str; 6] = ["TOTAL", "WAGER", "PAYOUT", "PARLAY", "SELECTIONS", "INCLUDES"];

/// Characters OCR produces for icons and separators, a name ends before them
const NAME_STOPS: [char; 8] = ['"', '\u{201C}', '\u{201D}', '/', '\\', '|', '$', '`'];

lazy_static! {
    /// Marker of an inline flat-list leg, "JOSH ALLEN - ALT PASSING YDS 250+"
    static ref INLINE_ALT: Regex = Regex::new(r"(?i) - ALT ").expect("invalid pattern");
    static ref TIME_MARKER: Regex = Regex::new(r"(?i)\b(?:ET|PM|AM)\b|\d{1,2}:\d{2}").expect("invalid pattern");
    static ref MATCHUP_MARKER: Regex = Regex::new(r"(?i)@|\bVS?\b\.?").expect("invalid pattern");
    static ref ODDS_LINE: Regex = Regex::new(r"^[+\-\u{2212}]\d+$").expect("invalid pattern");
    static ref SCORE_ROW: Regex = Regex::new(r"^\d+(?:\s+\d+){4}$").expect("invalid pattern");
    static ref LEADING_NAME_NOISE: Regex =
        Regex::new(r"^(?:[^\p{L}\p{N}]+|[iIlO0G] +|\d+[.)]? +)+").expect("invalid pattern");
    static ref TRAILING_ODDS: Regex = Regex::new(r"\s*([+\-\u{2212}]\d+)\s*$").expect("invalid pattern");
}

/// Kind of a noise line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseKind {
    Summary,  // totals and section headers
    Odds,     // a bare odds token
    ScoreRow, // five integers, a box score
}

/// Classification of a line during the scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    GameHeader,
    Noise(NoiseKind),
    Candidate,
}

/// Whether the line carries a time of day
fn has_time_marker(line: &str) -> bool {
    TIME_MARKER.is_match(line)
}

/// Classify a line
///
/// # Arguments
///
/// * `line` - trimmed line
pub fn classify_line(line: &str) -> LineKind {
    if line.contains('@') && has_time_marker(line) && match_detail(line).is_none() {
        return LineKind::GameHeader;
    }
    let upper = line.to_uppercase();
    if contains_any(&upper, &NOISE_KEYWORDS) {
        return LineKind::Noise(NoiseKind::Summary);
    }
    if ODDS_LINE.is_match(line) {
        return LineKind::Noise(NoiseKind::Odds);
    }
    if SCORE_ROW.is_match(line) {
        return LineKind::Noise(NoiseKind::ScoreRow);
    }
    LineKind::Candidate
}

/// Whether the line names a matchup with a start time
fn is_matchup(line: &str) -> bool {
    MATCHUP_MARKER.is_match(line) && has_time_marker(line)
}

/// Cleaned position line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub name: String,
    pub odds: Option<String>,
}

/// Clean a position line into a player or subject name
///
/// Strips leading icons and list numbers, cuts at stray quote, slash and
/// currency characters, and moves a trailing odds token into `odds`.
///
/// # Arguments
///
/// * `line` - position line as read by OCR
pub fn clean_position(line: &str) -> Position {
    let line = LEADING_NAME_NOISE.replace(line.trim(), "");
    let line = truncate_at(&line, &NAME_STOPS).trim().to_string();

    let (end, odds) = match TRAILING_ODDS.captures(&line) {
        Some(captures) => (
            captures.get(0).map_or(line.len(), |m| m.start()),
            Some(captures[1].replace('\u{2212}', "-")),
        ),
        None => (line.len(), None),
    };

    let name = line[..end].trim_end_matches(|c: char| !(c.is_alphanumeric() || c == '.'));
    let name = strip_leading(name, |c| !c.is_alphanumeric());
    Position {
        name: collapse_whitespace(name),
        odds,
    }
}

/// Why a position line was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Empty,
    GameHeader,
    Summary,
    UpperCaseHeader,
}

/// Result of the leg scan
#[derive(Debug, Clone, Default)]
pub struct LegScan {
    pub legs: Vec<Leg>,
    pub review: Vec<ReviewNote>,
}

/// Line-pair leg scanner
///
/// Walks the lines once with a cursor; a consumed or skipped line is never
/// revisited.
pub struct LegParser<'a> {
    lines: &'a [String],
    cursor: usize,
    current_game: Option<String>,
    mixed_case: bool,
    legs: Vec<Leg>,
    review: Vec<ReviewNote>,
}

impl<'a> LegParser<'a> {
    /// Create a scanner over normalized lines
    ///
    /// # Arguments
    ///
    /// * `lines` - trimmed non-empty lines
    pub fn new(lines: &'a [String]) -> Self {
        // Slips rendered in mixed case print section headers in capitals,
        // so an all-capital name is only suspicious there
        let lettered: Vec<&String> = lines
            .iter()
            .filter(|line| line.chars().any(|c| c.is_alphabetic()))
            .collect();
        let lower = lettered
            .iter()
            .filter(|line| line.chars().any(|c| c.is_lowercase()))
            .count();
        let mixed_case = lower > 0 && lower * 2 >= lettered.len();
        Self {
            lines,
            cursor: 0,
            current_game: None,
            mixed_case,
            legs: vec![],
            review: vec![],
        }
    }

    /// Scan the lines for legs
    ///
    /// # Arguments
    ///
    /// * `bet_type` - classified bet type, selects the layout
    pub fn parse(mut self, bet_type: BetType) -> LegScan {
        let mode = bet_type.layout();
        debug!("scanning {} lines for legs, layout {:?}", self.lines.len(), mode);
        match mode {
            LayoutMode::Single => self.parse_single(bet_type),
            LayoutMode::Flat | LayoutMode::Grouped => {
                while self.cursor < self.lines.len() {
                    self.cursor += self.step(mode);
                }
            }
        }
        debug!("scan found {} legs", self.legs.len());
        LegScan {
            legs: self.legs,
            review: self.review,
        }
    }

    /// Handle the line under the cursor, returning how many lines it consumed
    fn step(&mut self, mode: LayoutMode) -> usize {
        let lines = self.lines;
        let line = &lines[self.cursor];
        match classify_line(line) {
            LineKind::GameHeader => {
                debug!("line {}: game header '{}'", self.cursor + 1, line);
                self.current_game = Some(collapse_whitespace(line));
                1
            }
            LineKind::Noise(kind) => {
                debug!("line {}: {:?} noise '{}'", self.cursor + 1, kind, line);
                1
            }
            LineKind::Candidate => {
                if mode == LayoutMode::Flat && INLINE_ALT.is_match(line) {
                    self.inline_leg(line);
                    return 1;
                }
                self.pair(line)
            }
        }
    }

    /// Emit a leg written on one line, "NAME - ALT ..."
    fn inline_leg(&mut self, line: &str) {
        let Some(marker) = INLINE_ALT.find(line) else {
            return;
        };
        let position_line = &line[..marker.start()];
        // Detail starts at "ALT", after " - "
        let detail = canonical_inline_detail(&line[marker.start() + 3..]);
        match self.accept_position(position_line) {
            Ok(position) => {
                debug!("line {}: inline leg '{}'", self.cursor + 1, position.name);
                self.emit(position, detail);
            }
            Err(rejection) => self.note_rejection(line, rejection),
        }
    }

    /// Try the current line as position and the next one as detail
    fn pair(&mut self, line: &str) -> usize {
        let lines = self.lines;
        let Some(next) = lines.get(self.cursor + 1) else {
            return 1;
        };
        let Some(detail) = match_detail(next) else {
            if mentions_stat(next)
                && classify_line(next) == LineKind::Candidate
                && !INLINE_ALT.is_match(next)
            {
                self.review.push(ReviewNote::UnrecognizedDetail {
                    line: self.cursor + 2,
                    text: next.clone(),
                });
            }
            return 1;
        };

        match self.accept_position(line) {
            Ok(position) => {
                debug!(
                    "line {}: leg '{}' / '{}' ({})",
                    self.cursor + 1,
                    position.name,
                    detail,
                    matching_rule(next).unwrap_or("-")
                );
                if match_detail(line).is_some() {
                    self.review.push(ReviewNote::AmbiguousPosition {
                        line: self.cursor + 1,
                        text: line.to_string(),
                    });
                }
                self.emit(position, detail);
                2
            }
            Err(rejection) => {
                self.note_rejection(line, rejection);
                1
            }
        }
    }

    /// Clean and validate a position line
    fn accept_position(&self, line: &str) -> Result<Position, Rejection> {
        let position = clean_position(line);
        let name = &position.name;
        if name.is_empty() {
            return Err(Rejection::Empty);
        }
        if name.contains('@') {
            return Err(Rejection::GameHeader);
        }
        if contains_any(&name.to_uppercase(), &SUMMARY_KEYWORDS) {
            return Err(Rejection::Summary);
        }
        let letters = name.chars().filter(|c| c.is_alphabetic()).count();
        if self.mixed_case && letters > 1 && !name.chars().any(|c| c.is_lowercase()) {
            return Err(Rejection::UpperCaseHeader);
        }
        Ok(position)
    }

    fn note_rejection(&mut self, line: &str, rejection: Rejection) {
        debug!("line {}: position rejected ({:?}) '{}'", self.cursor + 1, rejection, line);
        if rejection == Rejection::UpperCaseHeader {
            self.review.push(ReviewNote::RejectedPosition {
                line: self.cursor + 1,
                text: line.to_string(),
            });
        }
    }

    fn emit(&mut self, position: Position, detail: String) {
        let mut leg = Leg::new(position.name, detail, self.current_game.clone());
        leg.odds = position.odds;
        self.legs.push(leg);
    }

    /// Straight and moneyline slips: one subject and its matchup
    fn parse_single(&mut self, bet_type: BetType) {
        let lines = self.lines;
        if lines.is_empty() {
            return;
        }
        let marker = lines
            .iter()
            .position(|line| line.to_uppercase().contains("MONEYLINE"));
        let subject_index = match marker {
            Some(index) if index > 0 => index - 1,
            _ => 0,
        };

        let subject_line = &lines[subject_index];
        let mut position = clean_position(subject_line);
        if position.name.is_empty() {
            position.name = collapse_whitespace(subject_line);
        }

        let rest = &lines[subject_index + 1..];
        let detail = rest
            .iter()
            .find(|line| is_matchup(line))
            .map(|line| collapse_whitespace(line))
            .unwrap_or_default();
        if position.odds.is_none() {
            position.odds = rest
                .iter()
                .find(|line| ODDS_LINE.is_match(line))
                .map(|line| line.replace('\u{2212}', "-"));
        }

        if bet_type == BetType::Moneyline {
            position.name = format!("MONEYLINE: {}", position.name);
        }
        debug!("single leg '{}' / '{}'", position.name, detail);

        let mut leg = Leg::new(position.name, detail, None);
        leg.odds = position.odds;
        self.legs.push(leg);
    }
}

/// Drop repeated legs, keeping the first occurrence
///
/// Legs are equal when position and detail are equal.
///
/// # Arguments
///
/// * `legs` - legs in scan order
pub fn dedup_legs(legs: Vec<Leg>) -> Vec<Leg> {
    let mut seen = HashSet::new();
    legs.into_iter()
        .filter(|leg| seen.insert((leg.position.clone(), leg.detail.clone())))
        .collect()
}

/// Group legs by game in first-seen order
///
/// Single-subject slips get one unlabelled group; a leg without a game label
/// goes to the synthetic "Parlay" group.
///
/// # Arguments
///
/// * `legs` - deduplicated legs
/// * `mode` - layout the legs were parsed with
pub fn group_legs(legs: Vec<Leg>, mode: LayoutMode) -> Vec<GameGroup> {
    if legs.is_empty() {
        return vec![];
    }
    if mode == LayoutMode::Single {
        return vec![GameGroup {
            game_label: None,
            legs,
        }];
    }

    let mut games: Vec<GameGroup> = vec![];
    for leg in legs {
        let label = leg
            .game_label
            .clone()
            .unwrap_or_else(|| PARLAY_GROUP.to_string());
        match games
            .iter_mut()
            .find(|game| game.game_label.as_deref() == Some(label.as_str()))
        {
            Some(game) => game.legs.push(leg),
            None => games.push(GameGroup {
                game_label: Some(label),
                legs: vec![leg],
            }),
        }
    }
    games
}
