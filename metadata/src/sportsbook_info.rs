use std::{collections::HashMap, fs, sync::OnceLock};

use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sportsbook
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone)]
pub struct Sportsbook {
    #[schemars(title = "Sportsbook name")]
    pub name: String,
    #[schemars(title = "Sportsbook aliases (spellings OCR is known to produce)")]
    pub alias: Option<Vec<String>>,
}

/// Sportsbook catalog
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone)]
pub struct SportsbookInfo {
    #[schemars(title = "Sportsbooks")]
    pub sportsbooks: Vec<Sportsbook>,
    #[serde(skip)]
    alias_map_cache: OnceLock<HashMap<String, String>>,
}

impl SportsbookInfo {
    /// Load the built-in sportsbook catalog
    pub fn new() -> Result<Self> {
        let info: Self = serde_yaml::from_str(include_str!("../sportsbook_info.yaml"))
            .context("failed to parse built-in sportsbook catalog")?;
        debug!("loaded {} built-in sportsbooks", info.sportsbooks.len());
        Ok(info)
    }

    /// Load a user sportsbook list from a YAML file
    ///
    /// # Arguments
    ///
    /// * `sportsbooks_file` - path of the YAML file
    pub fn load(sportsbooks_file: &str) -> Result<Vec<Sportsbook>> {
        let data = fs::read(sportsbooks_file).context("failed to read sportsbooks file")?;
        let sportsbooks = serde_yaml::from_slice::<Vec<Sportsbook>>(data.as_slice())
            .context("failed to parse sportsbooks file, check that the format is correct")?;
        Ok(sportsbooks)
    }

    /// Append sportsbooks to the catalog
    ///
    /// An entry with an existing name extends that sportsbook's aliases.
    ///
    /// # Arguments
    ///
    /// * `sportsbooks` - extra sportsbooks
    pub fn extend(&mut self, sportsbooks: Vec<Sportsbook>) {
        for sportsbook in sportsbooks {
            match self
                .sportsbooks
                .iter_mut()
                .find(|s| s.name.eq_ignore_ascii_case(&sportsbook.name))
            {
                Some(existing) => {
                    let alias = existing.alias.get_or_insert_with(Vec::new);
                    alias.extend(sportsbook.alias.unwrap_or_default());
                }
                None => self.sportsbooks.push(sportsbook),
            }
        }
        self.alias_map_cache = OnceLock::new();
    }

    /// Upper-cased names and aliases mapped to the sportsbook name
    pub fn get_alias_map(&self) -> &HashMap<String, String> {
        self.alias_map_cache.get_or_init(|| {
            let mut map = HashMap::new();
            for sportsbook in self.sportsbooks.iter() {
                map.insert(sportsbook.name.to_uppercase(), sportsbook.name.clone());
                if let Some(alias) = &sportsbook.alias {
                    for name in alias.iter() {
                        map.insert(name.to_uppercase(), sportsbook.name.clone());
                    }
                }
            }
            map
        })
    }

    /// All sportsbook names, without aliases
    pub fn get_sportsbook_names(&self) -> Vec<String> {
        self.sportsbooks.iter().map(|s| s.name.clone()).collect()
    }

    /// Resolve a sportsbook name from any of its aliases
    ///
    /// # Arguments
    ///
    /// * `alias` - alias, case-insensitive
    pub fn get_sportsbook_name_by_alias(&self, alias: &str) -> Option<String> {
        self.get_alias_map().get(&alias.to_uppercase()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let info = SportsbookInfo::new().unwrap();
        assert!(info.get_sportsbook_names().contains(&String::from("FanDuel")));
        assert_eq!(
            info.get_sportsbook_name_by_alias("fanduei"),
            Some(String::from("FanDuel"))
        );
        assert_eq!(
            info.get_sportsbook_name_by_alias("DRAFTKINGS"),
            Some(String::from("DraftKings"))
        );
        assert_eq!(info.get_sportsbook_name_by_alias("UNKNOWN BOOK"), None);
    }

    #[test]
    fn test_extend_catalog() {
        let mut info = SportsbookInfo::new().unwrap();
        let _ = info.get_alias_map();
        info.extend(vec![
            Sportsbook {
                name: String::from("FanDuel"),
                alias: Some(vec![String::from("FANDVEL")]),
            },
            Sportsbook {
                name: String::from("PrizePicks"),
                alias: None,
            },
        ]);

        assert_eq!(
            info.get_sportsbook_name_by_alias("FANDVEL"),
            Some(String::from("FanDuel"))
        );
        assert_eq!(
            info.get_sportsbook_name_by_alias("prizepicks"),
            Some(String::from("PrizePicks"))
        );
        assert_eq!(
            info.sportsbooks
                .iter()
                .filter(|s| s.name == "FanDuel")
                .count(),
            1
        );
    }
}
