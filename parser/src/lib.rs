mod classify;
mod extractor;
mod leg;
mod money;
mod normalize;
mod phrase;
mod record;
mod review;
mod vocabulary;

pub use classify::{BetType, LayoutMode, classify};
pub use extractor::{Extraction, Extractor, declared_leg_count};
pub use leg::{LegParser, LegScan, LineKind, NoiseKind, classify_line, dedup_legs, group_legs};
pub use money::{Money, extract_money, parse_amount};
pub use normalize::{Normalized, normalize_lines, normalize_text};
pub use phrase::{PHRASE_RULES, PhraseRule, match_detail};
pub use record::{BetRecord, GameGroup, Leg, PARLAY_GROUP};
pub use review::ReviewNote;
pub use vocabulary::Vocabulary;
