use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Something in the text a person should look at
///
/// Line numbers count the normalized (non-empty) lines from 1.
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReviewNote {
    /// The slip declares a different number of legs than were found
    LegCountMismatch { expected: usize, found: usize },
    /// A line mentions a stat but matches no known bet phrase
    UnrecognizedDetail { line: usize, text: String },
    /// An all-capital position was taken for a header and skipped
    RejectedPosition { line: usize, text: String },
    /// A position line that also reads as a bet phrase was accepted
    AmbiguousPosition { line: usize, text: String },
}

impl fmt::Display for ReviewNote {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReviewNote::LegCountMismatch { expected, found } => {
                write!(f, "slip declares {} legs but {} were found", expected, found)
            }
            ReviewNote::UnrecognizedDetail { line, text } => {
                write!(f, "line {}: unrecognized bet detail '{}'", line, text)
            }
            ReviewNote::RejectedPosition { line, text } => {
                write!(f, "line {}: skipped capitalized position '{}'", line, text)
            }
            ReviewNote::AmbiguousPosition { line, text } => {
                write!(f, "line {}: position reads like a bet detail '{}'", line, text)
            }
        }
    }
}
