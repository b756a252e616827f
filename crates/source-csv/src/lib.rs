//! CSV source for the character preference table.
//!
//! Provides the `PreferenceSource` trait and its CSV implementation.
//! The table is read once per session; anything structurally wrong with the
//! file aborts the load. Defects inside one row degrade instead: a malformed
//! list cell is empty, missing trailing cells are missing values, and an
//! unreadable birthday day is no day.

use giftwise_model::{
    Birthday, Character, GiftList, GiftTiers, PreferenceTable, ReactionTier, Season,
};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use thiserror::Error;

mod list_cell;

pub use list_cell::{parse_list_cell, parse_list_cell_checked};

/// Errors from loading a preference table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid row at line {line}: {reason}")]
    InvalidRow { line: u64, reason: String },
}

/// Trait for preference table sources.
pub trait PreferenceSource {
    /// Load the whole table. No partial table is returned on error.
    fn load(&self) -> Result<PreferenceTable, LoadError>;

    /// Get the source name for logging.
    fn name(&self) -> &'static str;
}

/// CSV source configuration.
#[derive(Debug, Clone)]
pub struct CsvSourceConfig {
    /// Path to the dataset
    pub path: PathBuf,
    /// Field delimiter
    pub delimiter: u8,
}

impl Default for CsvSourceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("characters.csv"),
            delimiter: b',',
        }
    }
}

/// One dataset row as it appears in the file.
#[derive(Debug, Deserialize)]
struct CharacterRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Birthday Season", default)]
    birthday_season: Option<String>,
    #[serde(rename = "Birthday Day", default)]
    birthday_day: Option<String>,
    #[serde(rename = "Lives In", default)]
    lives_in: Option<String>,
    #[serde(rename = "Marriage", default)]
    marriage: Option<String>,
    #[serde(rename = "Family", default)]
    family: Option<String>,
    #[serde(rename = "Loved Gifts", default)]
    loved: Option<String>,
    #[serde(rename = "Liked Gifts", default)]
    liked: Option<String>,
    #[serde(rename = "Neutral Gifts", default)]
    neutral: Option<String>,
    #[serde(rename = "Disliked Gifts", default)]
    disliked: Option<String>,
    #[serde(rename = "Hated Gifts", default)]
    hated: Option<String>,
}

impl CharacterRow {
    fn gift_cell(&self, tier: ReactionTier) -> Option<&str> {
        match tier {
            ReactionTier::Loved => self.loved.as_deref(),
            ReactionTier::Liked => self.liked.as_deref(),
            ReactionTier::Neutral => self.neutral.as_deref(),
            ReactionTier::Disliked => self.disliked.as_deref(),
            ReactionTier::Hated => self.hated.as_deref(),
        }
    }

    fn into_character(self, line: u64) -> Result<Character, LoadError> {
        if self.name.is_empty() {
            return Err(LoadError::InvalidRow {
                line,
                reason: "missing character name".to_string(),
            });
        }

        let day = parse_day(self.birthday_day.as_deref()).unwrap_or_else(|value| {
            tracing::debug!(
                character = %self.name,
                line,
                value = %value,
                "Unreadable birthday day, ignoring"
            );
            None
        });

        let mut gifts = GiftTiers::default();
        for tier in ReactionTier::ALL {
            let raw = list_or_empty(self.gift_cell(tier), tier.column(), &self.name);
            *gifts.get_mut(tier) = GiftList::new(raw);
        }

        let family = list_or_empty(self.family.as_deref(), "Family", &self.name);

        Ok(Character {
            birthday: Birthday {
                season: self
                    .birthday_season
                    .as_deref()
                    .map(Season::from)
                    .unwrap_or_default(),
                day,
            },
            residence: self.lives_in.unwrap_or_default(),
            family,
            can_marry: self
                .marriage
                .as_deref()
                .is_some_and(|m| m.trim().eq_ignore_ascii_case("yes")),
            gifts,
            name: self.name,
        })
    }
}

fn list_or_empty(cell: Option<&str>, column: &str, character: &str) -> Vec<String> {
    parse_list_cell_checked(cell).unwrap_or_else(|| {
        tracing::debug!(character, column, cell = ?cell, "Malformed list cell, using empty list");
        Vec::new()
    })
}

/// Parse a birthday day. Accepts `"13"` and float-formatted `"13.0"`.
fn parse_day(cell: Option<&str>) -> Result<Option<u8>, String> {
    let Some(text) = cell.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    let text_int = text.strip_suffix(".0").unwrap_or(text);
    text_int
        .parse::<u8>()
        .map(Some)
        .map_err(|_| text.to_string())
}

/// CSV preference source.
pub struct CsvSource {
    config: CsvSourceConfig,
}

impl CsvSource {
    /// Create a new CSV source.
    pub fn new(config: CsvSourceConfig) -> Self {
        Self { config }
    }

    /// Parse a dataset from any reader.
    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<PreferenceTable, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let mut characters = Vec::new();

        for result in reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let row: CharacterRow = record.deserialize(Some(&headers))?;
            characters.push(row.into_character(line)?);
        }

        Ok(PreferenceTable::new(characters))
    }
}

impl PreferenceSource for CsvSource {
    fn load(&self) -> Result<PreferenceTable, LoadError> {
        let path = &self.config.path;
        tracing::debug!(path = %path.display(), "Loading preference table");

        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        let table = self.load_from_reader(file)?;

        tracing::info!(characters = table.len(), source = self.name(), "Loaded preference table");
        Ok(table)
    }

    fn name(&self) -> &'static str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use giftwise_features::normalize_text;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "Name,Birthday Season,Birthday Day,Lives In,Marriage,Family,\
                          Loved Gifts,Liked Gifts,Neutral Gifts,Disliked Gifts,Hated Gifts\n";

    fn load(rows: &str) -> Result<PreferenceTable, LoadError> {
        let data = format!("{HEADER}{rows}");
        CsvSource::new(CsvSourceConfig::default()).load_from_reader(data.as_bytes())
    }

    #[test]
    fn test_load_character() {
        let table = load(
            "Abigail,Fall,13,Pierre's General Store,Yes,\"['Pierre', 'Caroline']\",\
             \"['Amethyst', 'Chocolate Cake']\",['Quartz'],[],,\"['Clay', 'Holly']\"\n",
        )
        .unwrap();

        assert_eq!(table.len(), 1);
        let abigail = table.get("Abigail").unwrap();
        assert_eq!(abigail.birthday, Birthday::new(Season::Fall, 13));
        assert_eq!(abigail.residence, "Pierre's General Store");
        assert_eq!(abigail.family, vec!["Pierre", "Caroline"]);
        assert!(abigail.can_marry);
        assert_eq!(abigail.gifts.loved.raw(), &["Amethyst", "Chocolate Cake"]);
        assert_eq!(abigail.gifts.loved.normalized(), &["amethyst", "chocolate cake"]);
        assert_eq!(abigail.gifts.liked.raw(), &["Quartz"]);
        assert!(abigail.gifts.neutral.is_empty());
        assert!(abigail.gifts.disliked.is_empty());
        assert_eq!(abigail.gifts.hated.len(), 2);
    }

    #[test]
    fn test_normalized_lists_parallel_raw() {
        let table = load(
            "Pam,Spring,18,Trailer,No,['Penny'],\"['Piña Colada', 'Beer', 'Beer']\",,,,\n",
        )
        .unwrap();
        let pam = table.get("Pam").unwrap();
        for (_, list) in pam.gifts.iter() {
            assert_eq!(list.raw().len(), list.normalized().len());
            for (raw, normalized) in list.raw().iter().zip(list.normalized()) {
                assert_eq!(&normalize_text(raw), normalized);
            }
        }
        assert_eq!(pam.gifts.loved.normalized(), &["pina colada", "beer", "beer"]);
        assert!(!pam.can_marry);
    }

    #[test]
    fn test_malformed_cell_is_empty() {
        let table = load("Linus,Winter,3,Tent,No,,\"['Yam']\",[unterminated,,,\n").unwrap();
        let linus = table.get("Linus").unwrap();
        assert!(linus.gifts.liked.is_empty());
        assert_eq!(linus.gifts.loved.raw(), &["Yam"]);
        assert!(linus.family.is_empty());
    }

    #[test]
    fn test_missing_birthday_day() {
        let table = load("Krobus,Winter,,Sewers,No,[],,,,,\n").unwrap();
        assert_eq!(table.get("Krobus").unwrap().birthday.day, None);
        assert_eq!(parse_day(Some("7.0")), Ok(Some(7)));
    }

    #[test]
    fn test_invalid_day_is_no_day() {
        let table = load(
            "Sam,Summer,soon,Willow Lane,Yes,,['Pizza'],,,,\n\
             Leah,Spring,23,Cottage,Yes,,['Salad'],,,,\n",
        )
        .unwrap();
        let sam = table.get("Sam").unwrap();
        assert_eq!(sam.birthday.season, Season::Summer);
        assert_eq!(sam.birthday.day, None);
        assert_eq!(sam.gifts.loved.raw(), &["Pizza"]);
        assert_eq!(table.get("Leah").unwrap().birthday.day, Some(23));
        assert_eq!(parse_day(Some("soon")), Err("soon".to_string()));
    }

    #[test]
    fn test_missing_name_is_error() {
        let err = load(",Summer,17,Willow Lane,Yes,,,,,,\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidRow { .. }));
    }

    #[test]
    fn test_missing_name_column_is_error() {
        let data = "Lives In,Marriage\nTent,No\n";
        let result = CsvSource::new(CsvSourceConfig::default()).load_from_reader(data.as_bytes());
        assert!(matches!(result, Err(LoadError::Csv(_))));
    }

    #[test]
    fn test_short_row_fills_missing_cells() {
        let table = load(
            "Leah,Spring,23,Cottage,Yes,,['Salad'],,,,\n\
             Krobus,Winter,1,Sewers,No\n",
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        let krobus = table.get("Krobus").unwrap();
        assert_eq!(krobus.birthday, Birthday::new(Season::Winter, 1));
        assert_eq!(krobus.residence, "Sewers");
        assert!(krobus.family.is_empty());
        assert!(krobus.gifts.iter().all(|(_, list)| list.is_empty()));
        assert_eq!(krobus.reaction_to("salad"), None);
    }

    #[test]
    fn test_missing_file() {
        let source = CsvSource::new(CsvSourceConfig {
            path: PathBuf::from("/nonexistent/giftwise/characters.csv"),
            ..Default::default()
        });
        let err = source.load().unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("characters.csv"));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let data = "Name;Marriage;Loved Gifts\nLeah;Yes;['Salad', 'Wine']\n";
        let source = CsvSource::new(CsvSourceConfig {
            delimiter: b';',
            ..Default::default()
        });
        let table = source.load_from_reader(data.as_bytes()).unwrap();
        let leah = table.get("Leah").unwrap();
        assert_eq!(leah.gifts.loved.raw(), &["Salad", "Wine"]);
        assert!(leah.can_marry);
        assert_eq!(leah.birthday.season, Season::Unknown);
    }
}
