//! Plain-text views of the session.

use std::fmt;

use runtime::SessionState;
use sheet_core::{ColumnField, Datasheet, SheetStat, Statistics, WeaponField};
use strum::IntoEnumIterator;

const LABEL_WIDTH: usize = 14;
const CELL_WIDTH: usize = 8;

/// Catalog list with the selected entry marked.
pub struct CatalogList<'a>(pub &'a SessionState);

impl fmt::Display for CatalogList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        for (index, catalog) in state.catalogs().iter().enumerate() {
            let marker = marker(index == state.selected_catalog_index());
            writeln!(
                f,
                "{marker} [{index}] {} ({} sheets)",
                catalog.name,
                catalog.len()
            )?;
        }
        Ok(())
    }
}

/// Sheets of the selected catalog; unsaved drafts are flagged with `*`.
pub struct SheetList<'a>(pub &'a SessionState);

impl fmt::Display for SheetList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        let Some(catalog) = state.catalog() else {
            return writeln!(f, "(no catalog)");
        };
        writeln!(f, "Catalog {}", catalog.name)?;
        if catalog.is_empty() {
            return writeln!(f, "  (empty)");
        }
        for (index, sheet) in catalog.datasheets().iter().enumerate() {
            let dirty = state.draft(sheet.id).is_some_and(|draft| draft.is_dirty());
            writeln!(
                f,
                "{} [{index}] {}{}",
                marker(state.selected_sheet_index() == Some(index)),
                sheet.name,
                if dirty { " *" } else { "" }
            )?;
        }
        Ok(())
    }
}

/// Full datasheet: stats, abilities, tags and the stat table.
pub struct SheetView<'a> {
    pub sheet: &'a Datasheet,
    pub dirty: bool,
}

impl fmt::Display for SheetView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sheet = self.sheet;
        writeln!(
            f,
            "{}{}",
            sheet.name,
            if self.dirty { " (unsaved)" } else { "" }
        )?;
        for stat in SheetStat::iter() {
            writeln!(f, "  {:<LABEL_WIDTH$}{}", stat.as_ref(), sheet.stat(stat))?;
        }
        if !sheet.abilities.is_empty() {
            writeln!(f, "  {:<LABEL_WIDTH$}{}", "abilities", sheet.abilities)?;
        }
        if !sheet.tags.is_empty() {
            let tags: Vec<String> = sheet
                .tags
                .iter()
                .enumerate()
                .map(|(index, tag)| format!("[{index}] {tag}"))
                .collect();
            writeln!(f, "  {:<LABEL_WIDTH$}{}", "tags", tags.join(", "))?;
        }

        let table = &sheet.stat_table;
        write!(f, "\n  {:<LABEL_WIDTH$}", "column")?;
        for index in 0..table.column_count() {
            write!(f, "{index:>CELL_WIDTH$}")?;
        }
        writeln!(f)?;
        for field in ColumnField::iter() {
            write!(f, "  {:<LABEL_WIDTH$}", field.as_ref())?;
            for column in table.columns() {
                write!(f, "{:>CELL_WIDTH$}", column.display(field))?;
            }
            writeln!(f)?;
        }

        for (index, weapon) in table.weapons().iter().enumerate() {
            let name = if weapon.name.is_empty() {
                "(unnamed)"
            } else {
                weapon.name.as_str()
            };
            writeln!(f, "\n  weapon [{index}] {name}")?;
            for field in WeaponField::iter() {
                write!(f, "  {:<LABEL_WIDTH$}", field.as_ref())?;
                for cell in weapon.cells() {
                    write!(f, "{:>CELL_WIDTH$}", cell.display(field))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Statistics panel.
pub struct StatisticsView<'a>(pub &'a Statistics);

impl fmt::Display for StatisticsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Statistics { summary, ratings } = self.0;
        writeln!(f, "Defense")?;
        writeln!(f, "  to_save avg        {}", summary.to_save_avg)?;
        writeln!(f, "  to_resist avg      {}", summary.to_resist_avg)?;
        writeln!(f, "  hardness avg       {}", summary.hardness_avg)?;
        writeln!(f, "  total health       {}", summary.total_health)?;
        writeln!(f, "  failed save        {}", summary.failed_save_chance)?;
        writeln!(f, "  failed resist      {}", summary.failed_resist_chance)?;
        writeln!(f, "  defense rating     {}", ratings.defense)?;
        for survival in &ratings.survival {
            writeln!(
                f,
                "  survival @ {:<7} {}",
                format!("{}dmg", survival.damage_per_hit),
                survival.rating
            )?;
        }
        for weapon in &ratings.weapons {
            let name = if weapon.name.is_empty() {
                "(unnamed)"
            } else {
                weapon.name.as_str()
            };
            writeln!(f, "Weapon {name}")?;
            writeln!(f, "  attacks avg        {}", weapon.attack_avg)?;
            writeln!(f, "  to_hit avg         {}", weapon.to_hit_avg)?;
            writeln!(f, "  damage avg         {}", weapon.damage_avg)?;
            writeln!(f, "  hit chance         {}", weapon.hit_chance)?;
            writeln!(f, "  expected hits      {}", weapon.expected_hits)?;
            writeln!(f, "  expected damage    {}", weapon.expected_damage)?;
            writeln!(f, "  rating             {}", weapon.rating)?;
        }
        Ok(())
    }
}

fn marker(selected: bool) -> char {
    if selected { '>' } else { ' ' }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_core::compute_statistics;

    #[test]
    fn sheet_view_prints_stats_and_cells() {
        let mut sheet = Datasheet::new("Intercessors");
        sheet.model_count = 5;
        sheet.stat_table.set_weapon_name(0, "Bolt Rifle".into()).unwrap();
        sheet.stat_table.set_range(0, 0, 24).unwrap();

        let text = SheetView {
            sheet: &sheet,
            dirty: true,
        }
        .to_string();

        assert!(text.starts_with("Intercessors (unsaved)"));
        assert!(text.contains("model_count"));
        assert!(text.contains("weapon [0] Bolt Rifle"));
        assert!(text.contains("24M"));
    }

    #[test]
    fn statistics_view_lists_every_damage_sample() {
        let sheet = Datasheet::new("Empty");
        let text = StatisticsView(&compute_statistics(&sheet)).to_string();

        assert_eq!(text.matches("survival @").count(), 6);
        assert!(text.contains("N/A"));
        assert!(text.contains("Weapon (unnamed)"));
    }
}
