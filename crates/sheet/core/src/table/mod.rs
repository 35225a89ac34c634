//! Stat table: result columns plus weapon sub-tables.
//!
//! A stat table is a grid of "result brackets". Each bracket is one
//! [`ResultColumn`] and every weapon holds exactly one [`WeaponCell`] per
//! bracket. Column `i` of the table and cell `i` of every weapon describe the
//! same bracket and are always inserted and removed together.
//!
//! # Invariants
//!
//! - The table has at least one column.
//! - Every weapon has exactly `column_count()` cells.
//!
//! Both are upheld by keeping the sequences private: the only operations that
//! change lengths are [`StatTable::add_result_column`],
//! [`StatTable::remove_result_column`], [`StatTable::add_weapon`] and
//! [`StatTable::remove_weapon`], and each one updates every sequence before
//! returning.

mod column;
mod weapon;
#[cfg(feature = "serde")]
mod wire;

pub use column::{ColumnField, ResultColumn};
pub use weapon::{WeaponCell, WeaponField, WeaponTable};

use crate::error::{ClassifiedError, ErrorSeverity};

/// Errors raised while editing a datasheet's tables and lists.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("column {index} is out of range (columns: {len})")]
    ColumnOutOfRange { index: usize, len: usize },

    #[error("weapon {index} is out of range (weapons: {len})")]
    WeaponOutOfRange { index: usize, len: usize },

    #[error("tag {index} is out of range (tags: {len})")]
    TagOutOfRange { index: usize, len: usize },

    #[error("a stat table must keep at least one result column")]
    LastColumn,

    #[error("stat table has no result columns")]
    NoColumns,

    #[error("`{field}` has {actual} entries, expected {expected}")]
    ColumnMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },
}

impl ClassifiedError for TableError {
    fn severity(&self) -> ErrorSeverity {
        use TableError::*;
        match self {
            ColumnOutOfRange { .. } | WeaponOutOfRange { .. } | TagOutOfRange { .. } => {
                ErrorSeverity::Internal
            }
            LastColumn => ErrorSeverity::Validation,
            // Only reachable when decoding a stored table
            NoColumns | ColumnMismatch { .. } => ErrorSeverity::Persistence,
        }
    }

    fn error_code(&self) -> &'static str {
        use TableError::*;
        match self {
            ColumnOutOfRange { .. } => "TABLE_COLUMN_OUT_OF_RANGE",
            WeaponOutOfRange { .. } => "TABLE_WEAPON_OUT_OF_RANGE",
            TagOutOfRange { .. } => "TABLE_TAG_OUT_OF_RANGE",
            LastColumn => "TABLE_LAST_COLUMN",
            NoColumns => "TABLE_NO_COLUMNS",
            ColumnMismatch { .. } => "TABLE_COLUMN_MISMATCH",
        }
    }
}

/// Roll table of a datasheet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "wire::StatTableWire", into = "wire::StatTableWire")
)]
pub struct StatTable {
    columns: Vec<ResultColumn>,
    weapons: Vec<WeaponTable>,
}

impl Default for StatTable {
    fn default() -> Self {
        Self::new()
    }
}

impl StatTable {
    /// One column and one unnamed weapon, the layout of a fresh datasheet.
    pub fn new() -> Self {
        Self {
            columns: vec![ResultColumn::initial()],
            weapons: vec![WeaponTable::new(1)],
        }
    }

    /// Builds a table from already-paired parts, checking both invariants.
    pub fn from_parts(
        columns: Vec<ResultColumn>,
        weapons: Vec<WeaponTable>,
    ) -> Result<Self, TableError> {
        if columns.is_empty() {
            return Err(TableError::NoColumns);
        }

        for (index, weapon) in weapons.iter().enumerate() {
            if weapon.cells().len() != columns.len() {
                return Err(TableError::ColumnMismatch {
                    field: format!("weapons[{index}]"),
                    expected: columns.len(),
                    actual: weapon.cells().len(),
                });
            }
        }

        Ok(Self { columns, weapons })
    }

    /// Number of result columns (`N`).
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[ResultColumn] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&ResultColumn> {
        self.columns.get(index)
    }

    pub fn weapons(&self) -> &[WeaponTable] {
        &self.weapons
    }

    pub fn weapon(&self, index: usize) -> Option<&WeaponTable> {
        self.weapons.get(index)
    }

    /// Appends a result column to the table and a matching cell to every weapon.
    pub fn add_result_column(&mut self) {
        self.columns.push(ResultColumn::appended());
        for weapon in &mut self.weapons {
            weapon.push_cell(WeaponCell::appended());
        }
    }

    /// Removes result column `index` from the table and every weapon.
    ///
    /// Refuses to remove the last remaining column.
    pub fn remove_result_column(&mut self, index: usize) -> Result<ResultColumn, TableError> {
        self.check_column(index)?;
        if self.columns.len() == 1 {
            return Err(TableError::LastColumn);
        }

        for weapon in &mut self.weapons {
            weapon.remove_cell(index);
        }
        Ok(self.columns.remove(index))
    }

    /// Appends a weapon pre-filled to the current column count.
    ///
    /// Returns the index of the new weapon.
    pub fn add_weapon(&mut self) -> usize {
        self.weapons.push(WeaponTable::new(self.columns.len()));
        self.weapons.len() - 1
    }

    pub fn remove_weapon(&mut self, index: usize) -> Result<WeaponTable, TableError> {
        self.check_weapon(index)?;
        Ok(self.weapons.remove(index))
    }

    /// Mutable access to a single column. Column length cannot change through it.
    pub fn column_mut(&mut self, index: usize) -> Result<&mut ResultColumn, TableError> {
        let len = self.columns.len();
        self.columns
            .get_mut(index)
            .ok_or(TableError::ColumnOutOfRange { index, len })
    }

    /// Mutable access to a single weapon. Its cell count cannot change through it.
    pub fn weapon_mut(&mut self, index: usize) -> Result<&mut WeaponTable, TableError> {
        let len = self.weapons.len();
        self.weapons
            .get_mut(index)
            .ok_or(TableError::WeaponOutOfRange { index, len })
    }

    /// Mutable access to one weapon cell.
    pub fn weapon_cell_mut(
        &mut self,
        weapon: usize,
        column: usize,
    ) -> Result<&mut WeaponCell, TableError> {
        self.weapon_mut(weapon)?.cell_mut(column)
    }

    pub fn set_result_break(&mut self, column: usize, value: i32) -> Result<(), TableError> {
        self.column_mut(column)?.result_break = value;
        Ok(())
    }

    pub fn set_to_save(&mut self, column: usize, value: i32) -> Result<(), TableError> {
        self.column_mut(column)?.to_save = value;
        Ok(())
    }

    pub fn set_to_resist(&mut self, column: usize, value: Option<i32>) -> Result<(), TableError> {
        self.column_mut(column)?.to_resist = value;
        Ok(())
    }

    pub fn set_hardness(&mut self, column: usize, value: Option<i32>) -> Result<(), TableError> {
        self.column_mut(column)?.hardness = value;
        Ok(())
    }

    pub fn set_enhancements(
        &mut self,
        column: usize,
        value: Option<String>,
    ) -> Result<(), TableError> {
        self.column_mut(column)?.enhancements = value;
        Ok(())
    }

    pub fn set_weapon_name(&mut self, weapon: usize, name: String) -> Result<(), TableError> {
        self.weapon_mut(weapon)?.name = name;
        Ok(())
    }

    pub fn set_attacks(&mut self, weapon: usize, column: usize, value: i32) -> Result<(), TableError> {
        self.weapon_cell_mut(weapon, column)?.attacks = value;
        Ok(())
    }

    pub fn set_range(&mut self, weapon: usize, column: usize, value: i32) -> Result<(), TableError> {
        self.weapon_cell_mut(weapon, column)?.range = value;
        Ok(())
    }

    pub fn set_to_hit(&mut self, weapon: usize, column: usize, value: i32) -> Result<(), TableError> {
        self.weapon_cell_mut(weapon, column)?.to_hit = value;
        Ok(())
    }

    pub fn set_damage(&mut self, weapon: usize, column: usize, value: i32) -> Result<(), TableError> {
        self.weapon_cell_mut(weapon, column)?.damage = value;
        Ok(())
    }

    pub fn set_weapon_enhancements(
        &mut self,
        weapon: usize,
        column: usize,
        value: Option<String>,
    ) -> Result<(), TableError> {
        self.weapon_cell_mut(weapon, column)?.enhancements = value;
        Ok(())
    }

    fn check_column(&self, index: usize) -> Result<(), TableError> {
        if index < self.columns.len() {
            Ok(())
        } else {
            Err(TableError::ColumnOutOfRange {
                index,
                len: self.columns.len(),
            })
        }
    }

    fn check_weapon(&self, index: usize) -> Result<(), TableError> {
        if index < self.weapons.len() {
            Ok(())
        } else {
            Err(TableError::WeaponOutOfRange {
                index,
                len: self.weapons.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_synchronized(table: &StatTable) {
        let n = table.column_count();
        assert!(n >= 1, "table lost its last column");
        for weapon in table.weapons() {
            assert_eq!(weapon.cells().len(), n, "weapon {:?} out of sync", weapon.name);
        }
    }

    #[test]
    fn new_table_has_one_column_and_one_weapon() {
        let table = StatTable::new();
        assert_eq!(table.column_count(), 1);
        assert_eq!(table.weapons().len(), 1);
        assert_eq!(table.columns()[0], ResultColumn::initial());
        assert_eq!(table.weapons()[0].cells()[0], WeaponCell::initial());
    }

    #[test]
    fn add_column_extends_every_weapon() {
        let mut table = StatTable::new();
        table.add_weapon();
        table.add_result_column();

        assert_eq!(table.column_count(), 2);
        assert_eq!(table.columns()[1], ResultColumn::appended());
        for weapon in table.weapons() {
            assert_eq!(weapon.cells()[1], WeaponCell::appended());
        }
        assert_synchronized(&table);
    }

    #[test]
    fn remove_column_removes_same_index_everywhere() {
        let mut table = StatTable::new();
        table.add_result_column();
        table.add_result_column();
        table.set_result_break(1, 7).unwrap();
        table.set_attacks(0, 1, 9).unwrap();

        let removed = table.remove_result_column(1).unwrap();

        assert_eq!(removed.result_break, 7);
        assert_eq!(table.column_count(), 2);
        assert!(table.weapons()[0].cells().iter().all(|cell| cell.attacks != 9));
        assert_synchronized(&table);
    }

    #[test]
    fn last_column_cannot_be_removed() {
        let mut table = StatTable::new();
        assert_eq!(table.remove_result_column(0), Err(TableError::LastColumn));
        assert_eq!(table.column_count(), 1);
        assert_synchronized(&table);
    }

    #[test]
    fn remove_column_out_of_range_is_rejected() {
        let mut table = StatTable::new();
        table.add_result_column();
        assert_eq!(
            table.remove_result_column(5),
            Err(TableError::ColumnOutOfRange { index: 5, len: 2 })
        );
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn added_weapon_matches_column_count() {
        let mut table = StatTable::new();
        table.add_result_column();
        table.add_result_column();

        let index = table.add_weapon();
        let weapon = table.weapon(index).unwrap();

        assert_eq!(weapon.cells().len(), 3);
        assert_eq!(weapon.cells()[0], WeaponCell::initial());
        assert_eq!(weapon.cells()[1], WeaponCell::fill());
        assert_eq!(weapon.cells()[2], WeaponCell::fill());
    }

    #[test]
    fn remove_weapon_checks_bounds() {
        let mut table = StatTable::new();
        assert!(table.remove_weapon(0).is_ok());
        assert_eq!(
            table.remove_weapon(0),
            Err(TableError::WeaponOutOfRange { index: 0, len: 0 })
        );
        // Columns survive with no weapons at all
        table.add_result_column();
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn mixed_operation_sequence_keeps_invariants() {
        let mut table = StatTable::new();
        let steps: [fn(&mut StatTable); 8] = [
            |t| t.add_result_column(),
            |t| {
                t.add_weapon();
            },
            |t| {
                let _ = t.remove_result_column(0);
            },
            |t| t.add_result_column(),
            |t| {
                let _ = t.remove_weapon(0);
            },
            |t| {
                let _ = t.remove_result_column(t.column_count() - 1);
            },
            |t| {
                t.add_weapon();
            },
            |t| {
                let _ = t.remove_result_column(0);
            },
        ];

        for round in 0..4 {
            for (i, step) in steps.iter().enumerate() {
                if (i + round) % 3 != 0 {
                    step(&mut table);
                }
                assert_synchronized(&table);
            }
        }
    }

    #[test]
    fn setters_reject_out_of_range_cells() {
        let mut table = StatTable::new();
        assert_eq!(
            table.set_to_save(1, 3),
            Err(TableError::ColumnOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(
            table.set_damage(2, 0, 3),
            Err(TableError::WeaponOutOfRange { index: 2, len: 1 })
        );
        assert_eq!(
            table.set_range(0, 4, 3),
            Err(TableError::ColumnOutOfRange { index: 4, len: 1 })
        );
        assert_eq!(table, StatTable::new());
    }

    #[test]
    fn from_parts_rejects_unsynchronized_weapons() {
        let weapon = WeaponTable::new(2);
        let result = StatTable::from_parts(vec![ResultColumn::initial()], vec![weapon]);
        assert_eq!(
            result,
            Err(TableError::ColumnMismatch {
                field: "weapons[0]".to_string(),
                expected: 1,
                actual: 2,
            })
        );
        assert_eq!(
            StatTable::from_parts(Vec::new(), Vec::new()),
            Err(TableError::NoColumns)
        );
    }
}
