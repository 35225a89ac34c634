//! Stored layout of a stat table.
//!
//! Catalog files keep the parallel-array shape: one array per column field and
//! one array per weapon field, all of length `N`. Decoding zips them back into
//! column records and rejects any array whose length disagrees.
//!
//! The nullable arrays (`toResist`, `hardness`, `enhancements`) may be missing
//! or empty in older files; they are padded with `null`.

use serde::{Deserialize, Serialize};

use super::{ResultColumn, StatTable, TableError, WeaponCell, WeaponTable};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StatTableWire {
    result_breaks: Vec<i32>,
    to_save: Vec<i32>,
    #[serde(default)]
    to_resist: Vec<Option<i32>>,
    #[serde(default)]
    hardness: Vec<Option<i32>>,
    #[serde(default)]
    enhancements: Vec<Option<String>>,
    #[serde(default)]
    weapons: Vec<WeaponTableWire>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WeaponTableWire {
    #[serde(default)]
    name: String,
    attacks: Vec<i32>,
    range: Vec<i32>,
    to_hit: Vec<i32>,
    damage: Vec<i32>,
    #[serde(default)]
    enhancements: Vec<Option<String>>,
}

impl TryFrom<StatTableWire> for StatTable {
    type Error = TableError;

    fn try_from(wire: StatTableWire) -> Result<Self, Self::Error> {
        let n = wire.result_breaks.len();
        if n == 0 {
            return Err(TableError::NoColumns);
        }

        check_len("toSave", n, wire.to_save.len())?;
        let to_resist = pad_nullable("toResist", n, wire.to_resist)?;
        let hardness = pad_nullable("hardness", n, wire.hardness)?;
        let enhancements = pad_nullable("enhancements", n, wire.enhancements)?;

        let columns = wire
            .result_breaks
            .into_iter()
            .zip(wire.to_save)
            .zip(to_resist)
            .zip(hardness)
            .zip(enhancements)
            .map(
                |((((result_break, to_save), to_resist), hardness), enhancements)| ResultColumn {
                    result_break,
                    to_save,
                    to_resist,
                    hardness,
                    enhancements,
                },
            )
            .collect();

        let weapons = wire
            .weapons
            .into_iter()
            .enumerate()
            .map(|(index, weapon)| weapon.into_table(index, n))
            .collect::<Result<Vec<_>, _>>()?;

        StatTable::from_parts(columns, weapons)
    }
}

impl From<StatTable> for StatTableWire {
    fn from(table: StatTable) -> Self {
        let n = table.columns.len();
        let mut wire = StatTableWire {
            result_breaks: Vec::with_capacity(n),
            to_save: Vec::with_capacity(n),
            to_resist: Vec::with_capacity(n),
            hardness: Vec::with_capacity(n),
            enhancements: Vec::with_capacity(n),
            weapons: Vec::with_capacity(table.weapons.len()),
        };

        for column in table.columns {
            wire.result_breaks.push(column.result_break);
            wire.to_save.push(column.to_save);
            wire.to_resist.push(column.to_resist);
            wire.hardness.push(column.hardness);
            wire.enhancements.push(column.enhancements);
        }

        wire.weapons = table
            .weapons
            .into_iter()
            .map(WeaponTableWire::from)
            .collect();
        wire
    }
}

impl WeaponTableWire {
    fn into_table(self, index: usize, n: usize) -> Result<WeaponTable, TableError> {
        let field = |name: &str| format!("weapons[{index}].{name}");

        check_len(&field("attacks"), n, self.attacks.len())?;
        check_len(&field("range"), n, self.range.len())?;
        check_len(&field("toHit"), n, self.to_hit.len())?;
        check_len(&field("damage"), n, self.damage.len())?;
        let enhancements = pad_nullable(&field("enhancements"), n, self.enhancements)?;

        let cells = self
            .attacks
            .into_iter()
            .zip(self.range)
            .zip(self.to_hit)
            .zip(self.damage)
            .zip(enhancements)
            .map(|((((attacks, range), to_hit), damage), enhancements)| WeaponCell {
                attacks,
                range,
                to_hit,
                damage,
                enhancements,
            })
            .collect();

        Ok(WeaponTable::with_cells(self.name, cells))
    }
}

impl From<WeaponTable> for WeaponTableWire {
    fn from(weapon: WeaponTable) -> Self {
        let (name, cells) = weapon.into_parts();
        let n = cells.len();
        let mut wire = WeaponTableWire {
            name,
            attacks: Vec::with_capacity(n),
            range: Vec::with_capacity(n),
            to_hit: Vec::with_capacity(n),
            damage: Vec::with_capacity(n),
            enhancements: Vec::with_capacity(n),
        };

        for cell in cells {
            wire.attacks.push(cell.attacks);
            wire.range.push(cell.range);
            wire.to_hit.push(cell.to_hit);
            wire.damage.push(cell.damage);
            wire.enhancements.push(cell.enhancements);
        }
        wire
    }
}

fn check_len(field: &str, expected: usize, actual: usize) -> Result<(), TableError> {
    if expected == actual {
        Ok(())
    } else {
        Err(TableError::ColumnMismatch {
            field: field.to_string(),
            expected,
            actual,
        })
    }
}

fn pad_nullable<T>(field: &str, n: usize, values: Vec<Option<T>>) -> Result<Vec<Option<T>>, TableError> {
    if values.is_empty() {
        return Ok(std::iter::repeat_with(|| None).take(n).collect());
    }
    check_len(field, n, values.len())?;
    Ok(values)
}
