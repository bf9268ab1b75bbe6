use std::collections::HashMap;

use anyhow::{Context, Result};
use common::collapse_whitespace;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    static ref WON_ON_ANY: Regex = Regex::new(r"(?i)\bWON\s+ON\s+(\S+)").expect("invalid pattern");
}

/// Sportsbook vocabulary used while extracting
///
/// Maps every known spelling of a sportsbook (upper-cased) to its name.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    brands: HashMap<String, String>,
    won_on: Option<Regex>,
    brand: Option<Regex>,
}

impl Vocabulary {
    /// Create a vocabulary
    ///
    /// # Arguments
    ///
    /// * `brands` - sportsbook spellings mapped to the sportsbook name
    pub fn new(brands: HashMap<String, String>) -> Result<Self> {
        let brands: HashMap<String, String> = brands
            .into_iter()
            .map(|(alias, name)| (collapse_whitespace(&alias.to_uppercase()), name))
            .filter(|(alias, _)| !alias.is_empty())
            .collect();
        debug!("creating vocabulary with {} sportsbook spellings", brands.len());

        if brands.is_empty() {
            return Ok(Self::default());
        }

        // Longest spelling first so "FANDUEL SPORTSBOOK" wins over "FANDUEL"
        let mut aliases: Vec<&String> = brands.keys().collect();
        aliases.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        let alternation = aliases
            .iter()
            .map(|alias| {
                alias
                    .split(' ')
                    .map(regex::escape)
                    .collect::<Vec<String>>()
                    .join(r"\s+")
            })
            .collect::<Vec<String>>()
            .join("|");

        let won_on = Regex::new(&format!(r"(?i)\bWON\s+ON\s+({})\b", alternation))
            .context("failed to compile sportsbook pattern")?;
        let brand = Regex::new(&format!(r"(?i)\b({})\b", alternation))
            .context("failed to compile sportsbook pattern")?;

        Ok(Self {
            brands,
            won_on: Some(won_on),
            brand: Some(brand),
        })
    }

    /// Resolve a matched spelling to the sportsbook name
    fn resolve(&self, spelling: &str) -> String {
        let key = collapse_whitespace(&spelling.to_uppercase());
        self.brands.get(&key).cloned().unwrap_or(key)
    }

    /// Find a "WON ON <sportsbook>" settlement phrase, returning the sportsbook
    ///
    /// # Arguments
    ///
    /// * `raw` - text returned by OCR
    pub fn find_won_on(&self, raw: &str) -> Option<String> {
        let pattern = self.won_on.as_ref().unwrap_or(&*WON_ON_ANY);
        pattern
            .captures(raw)
            .and_then(|captures| captures.get(1))
            .map(|m| self.resolve(m.as_str()))
    }

    /// Find the first sportsbook mentioned anywhere in the text
    ///
    /// # Arguments
    ///
    /// * `raw` - text returned by OCR
    pub fn find_sportsbook(&self, raw: &str) -> Option<String> {
        self.brand
            .as_ref()?
            .find(raw)
            .map(|m| self.resolve(m.as_str()))
    }
}

impl Default for Vocabulary {
    /// Vocabulary without sportsbooks, "WON ON" then accepts any following word
    fn default() -> Self {
        Self {
            brands: HashMap::new(),
            won_on: None,
            brand: None,
        }
    }
}
