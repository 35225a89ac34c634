//! Weapon sub-tables.

use super::TableError;
use crate::cell::{format_positive, format_range, parse_cell, parse_range, text_or_none};

/// Editable per-column fields of a weapon.
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
pub enum WeaponField {
    Attacks,
    Range,
    ToHit,
    Damage,
    Enhancements,
}

/// One weapon's values for one result bracket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeaponCell {
    pub attacks: i32,
    /// Range in meters.
    pub range: i32,
    pub to_hit: i32,
    pub damage: i32,
    pub enhancements: Option<String>,
}

impl WeaponCell {
    /// First cell of a newly created weapon.
    pub fn initial() -> Self {
        Self {
            attacks: 1,
            range: 3,
            to_hit: 4,
            damage: 1,
            enhancements: None,
        }
    }

    /// Cell appended to existing weapons by "add result".
    pub fn appended() -> Self {
        Self {
            attacks: 0,
            range: 5,
            ..Self::initial()
        }
    }

    /// Cells after the first when a weapon is added to a wider table.
    pub fn fill() -> Self {
        Self {
            range: 5,
            ..Self::initial()
        }
    }

    /// Applies user text to `field`.
    ///
    /// Returns false when the text does not parse and nothing changed.
    pub fn set_text(&mut self, field: WeaponField, text: &str) -> bool {
        match field {
            WeaponField::Enhancements => {
                self.enhancements = text_or_none(text);
                true
            }
            WeaponField::Attacks => assign(&mut self.attacks, parse_cell(text)),
            WeaponField::Range => assign(&mut self.range, parse_range(text)),
            WeaponField::ToHit => assign(&mut self.to_hit, parse_cell(text)),
            WeaponField::Damage => assign(&mut self.damage, parse_cell(text)),
        }
    }

    /// Text shown in the cell for `field`.
    pub fn display(&self, field: WeaponField) -> String {
        match field {
            WeaponField::Attacks => format_positive(self.attacks),
            WeaponField::Range => format_range(self.range),
            WeaponField::ToHit => format_positive(self.to_hit),
            WeaponField::Damage => format_positive(self.damage),
            WeaponField::Enhancements => self.enhancements.clone().unwrap_or_default(),
        }
    }
}

fn assign(slot: &mut i32, parsed: Option<i32>) -> bool {
    match parsed {
        Some(value) => {
            *slot = value;
            true
        }
        None => false,
    }
}

/// A named weapon with one cell per result column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeaponTable {
    pub name: String,
    cells: Vec<WeaponCell>,
}

impl WeaponTable {
    /// Unnamed weapon with `columns` cells (at least one).
    pub(crate) fn new(columns: usize) -> Self {
        let mut cells = Vec::with_capacity(columns.max(1));
        cells.push(WeaponCell::initial());
        cells.extend(std::iter::repeat_with(WeaponCell::fill).take(columns.saturating_sub(1)));
        Self {
            name: String::new(),
            cells,
        }
    }

    /// Weapon built from decoded cells. Length is checked by [`super::StatTable::from_parts`].
    pub fn with_cells(name: impl Into<String>, cells: Vec<WeaponCell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    pub fn cells(&self) -> &[WeaponCell] {
        &self.cells
    }

    pub fn cell(&self, column: usize) -> Option<&WeaponCell> {
        self.cells.get(column)
    }

    pub fn cell_mut(&mut self, column: usize) -> Result<&mut WeaponCell, TableError> {
        let len = self.cells.len();
        self.cells
            .get_mut(column)
            .ok_or(TableError::ColumnOutOfRange { index: column, len })
    }

    pub(super) fn push_cell(&mut self, cell: WeaponCell) {
        self.cells.push(cell);
    }

    pub(super) fn remove_cell(&mut self, column: usize) {
        self.cells.remove(column);
    }

    #[cfg_attr(not(feature = "serde"), allow(dead_code))]
    pub(super) fn into_parts(self) -> (String, Vec<WeaponCell>) {
        (self.name, self.cells)
    }
}
