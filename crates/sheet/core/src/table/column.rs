//! One result bracket of a stat table.

use crate::cell::{format_positive, parse_cell, text_or_none};

/// Editable fields of a [`ResultColumn`].
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
pub enum ColumnField {
    ResultBreak,
    ToSave,
    ToResist,
    Hardness,
    Enhancements,
}

/// Table-level values for one result bracket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultColumn {
    /// Lower bound of the roll that lands in this bracket.
    pub result_break: i32,
    pub to_save: i32,
    /// `None` means the unit has no resist roll.
    pub to_resist: Option<i32>,
    pub hardness: Option<i32>,
    pub enhancements: Option<String>,
}

impl ResultColumn {
    /// First column of a fresh datasheet.
    pub fn initial() -> Self {
        Self {
            result_break: 1,
            to_save: 4,
            to_resist: None,
            hardness: None,
            enhancements: None,
        }
    }

    /// Column appended by "add result".
    pub fn appended() -> Self {
        Self {
            result_break: 0,
            ..Self::initial()
        }
    }

    /// Applies user text to `field`.
    ///
    /// Returns false when the text does not parse and nothing changed.
    pub fn set_text(&mut self, field: ColumnField, text: &str) -> bool {
        match field {
            ColumnField::Enhancements => {
                self.enhancements = text_or_none(text);
                true
            }
            ColumnField::ResultBreak => apply(&mut self.result_break, text),
            ColumnField::ToSave => apply(&mut self.to_save, text),
            ColumnField::ToResist => apply_optional(&mut self.to_resist, text),
            ColumnField::Hardness => apply_optional(&mut self.hardness, text),
        }
    }

    /// Text shown in the cell for `field`.
    pub fn display(&self, field: ColumnField) -> String {
        match field {
            ColumnField::ResultBreak => format_positive(self.result_break),
            ColumnField::ToSave => format_positive(self.to_save),
            ColumnField::ToResist => format_positive(self.to_resist.unwrap_or(0)),
            ColumnField::Hardness => format_positive(self.hardness.unwrap_or(0)),
            ColumnField::Enhancements => self.enhancements.clone().unwrap_or_default(),
        }
    }
}

fn apply(slot: &mut i32, text: &str) -> bool {
    match parse_cell(text) {
        Some(value) => {
            *slot = value;
            true
        }
        None => false,
    }
}

fn apply_optional(slot: &mut Option<i32>, text: &str) -> bool {
    match parse_cell(text) {
        Some(value) => {
            *slot = Some(value);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn text_edits_follow_parse_rule() {
        let mut column = ResultColumn::initial();

        assert!(column.set_text(ColumnField::ToSave, "12"));
        assert_eq!(column.to_save, 12);

        assert!(!column.set_text(ColumnField::ToSave, "abc"));
        assert_eq!(column.to_save, 12);

        assert!(column.set_text(ColumnField::ToSave, ""));
        assert_eq!(column.to_save, 0);
    }

    #[test]
    fn blank_resist_stores_zero_not_null() {
        let mut column = ResultColumn::initial();
        assert!(column.set_text(ColumnField::ToResist, ""));
        assert_eq!(column.to_resist, Some(0));
        assert_eq!(column.display(ColumnField::ToResist), "");
    }

    #[test]
    fn enhancements_blank_is_none() {
        let mut column = ResultColumn::initial();
        column.set_text(ColumnField::Enhancements, "Rending");
        assert_eq!(column.enhancements.as_deref(), Some("Rending"));
        column.set_text(ColumnField::Enhancements, "");
        assert_eq!(column.enhancements, None);
    }

    #[test]
    fn field_names_parse_from_snake_case() {
        assert_eq!(ColumnField::from_str("to_save"), Ok(ColumnField::ToSave));
        assert_eq!(ColumnField::from_str("RESULT_BREAK"), Ok(ColumnField::ResultBreak));
        assert_eq!(ColumnField::Hardness.to_string(), "hardness");
    }
}
