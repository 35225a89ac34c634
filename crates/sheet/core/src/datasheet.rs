//! Datasheet: one unit's stat card.

use std::fmt;

use crate::cell::parse_cell;
use crate::table::{StatTable, TableError};

/// Stable identifier of a datasheet.
///
/// Generated once when the sheet is created and never changed by renames, so
/// in-progress drafts stay attached to the right sheet across catalogs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct SheetId(uuid::Uuid);

impl SheetId {
    /// Fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scalar numeric stats of a datasheet.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SheetStat {
    Skill,
    Health,
    Speed,
    ModelCount,
}

/// A unit stat card.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Datasheet {
    #[cfg_attr(feature = "serde", serde(default = "SheetId::generate"))]
    pub id: SheetId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skill: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub health: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub speed: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub model_count: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stat_table: StatTable,
}

impl Datasheet {
    pub const DEFAULT_NAME: &'static str = "New Datasheet";

    /// Sheet with default stats and a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SheetId::generate(),
            name: name.into(),
            skill: 0,
            health: 0,
            speed: 0,
            model_count: 0,
            abilities: String::new(),
            tags: Vec::new(),
            stat_table: StatTable::new(),
        }
    }

    pub fn stat(&self, stat: SheetStat) -> u32 {
        match stat {
            SheetStat::Skill => self.skill,
            SheetStat::Health => self.health,
            SheetStat::Speed => self.speed,
            SheetStat::ModelCount => self.model_count,
        }
    }

    pub fn set_stat(&mut self, stat: SheetStat, value: u32) {
        let slot = match stat {
            SheetStat::Skill => &mut self.skill,
            SheetStat::Health => &mut self.health,
            SheetStat::Speed => &mut self.speed,
            SheetStat::ModelCount => &mut self.model_count,
        };
        *slot = value;
    }

    /// Applies user text to a stat. Returns false when the text was dropped.
    pub fn set_stat_text(&mut self, stat: SheetStat, text: &str) -> bool {
        match parse_cell(text) {
            Some(value) => {
                self.set_stat(stat, value);
                true
            }
            None => false,
        }
    }

    pub fn add_tag(&mut self, tag: impl Into<String>) {
        self.tags.push(tag.into());
    }

    pub fn remove_tag(&mut self, index: usize) -> Result<String, TableError> {
        if index >= self.tags.len() {
            return Err(TableError::TagOutOfRange {
                index,
                len: self.tags.len(),
            });
        }
        Ok(self.tags.remove(index))
    }
}

impl Default for Datasheet {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sheet_has_default_table() {
        let sheet = Datasheet::new("Scouts");
        assert_eq!(sheet.name, "Scouts");
        assert_eq!(sheet.model_count, 0);
        assert_eq!(sheet.stat_table, StatTable::new());
        assert!(sheet.tags.is_empty());
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(Datasheet::new("A").id, Datasheet::new("A").id);
    }

    #[test]
    fn stat_text_is_tolerant() {
        let mut sheet = Datasheet::new("Scouts");
        assert!(sheet.set_stat_text(SheetStat::ModelCount, "5"));
        assert_eq!(sheet.model_count, 5);
        assert!(!sheet.set_stat_text(SheetStat::ModelCount, "-"));
        assert_eq!(sheet.model_count, 5);
        assert!(sheet.set_stat_text(SheetStat::ModelCount, ""));
        assert_eq!(sheet.stat(SheetStat::ModelCount), 0);
    }

    #[test]
    fn tags_keep_duplicates_and_order() {
        let mut sheet = Datasheet::new("Scouts");
        sheet.add_tag("Infantry");
        sheet.add_tag("Infantry");
        sheet.add_tag("Recon");
        assert_eq!(sheet.remove_tag(0).unwrap(), "Infantry");
        assert_eq!(sheet.tags, vec!["Infantry", "Recon"]);
        assert_eq!(
            sheet.remove_tag(4),
            Err(TableError::TagOutOfRange { index: 4, len: 2 })
        );
    }
}
