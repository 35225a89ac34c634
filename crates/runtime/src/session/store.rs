//! The edit session: commands over committed catalogs and per-sheet drafts.

use std::sync::Arc;

use sheet_core::{
    Catalog, ClassifiedError, ColumnField, DEFAULT_CATALOG, Datasheet, ErrorSeverity, SheetStat,
    Statistics, TableError, WeaponField, compute_statistics,
};

use super::draft::SheetDraft;
use super::error::{Result, SessionError};
use super::state::SessionState;
use crate::repository::{CatalogRepository, RepositoryError};

/// Owns the current [`SessionState`] and the repository catalogs are saved to.
///
/// Every command works on a clone of the current snapshot and publishes it
/// only when the command succeeds, so a rejected or failed command leaves
/// the session exactly as it was. Field edits only ever touch drafts; the
/// committed catalogs change on load, save, delete, sheet creation and the
/// catalog commands, each of which persists the affected catalog before the
/// new snapshot is published.
pub struct EditSession {
    repository: Box<dyn CatalogRepository>,
    state: Arc<SessionState>,
}

impl EditSession {
    /// Session with no catalogs. Call [`EditSession::load`] to read the repository.
    pub fn new(repository: Box<dyn CatalogRepository>) -> Self {
        Self {
            repository,
            state: Arc::new(SessionState::default()),
        }
    }

    pub fn repository(&self) -> &dyn CatalogRepository {
        self.repository.as_ref()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Current snapshot. Later commands never change it.
    pub fn snapshot(&self) -> Arc<SessionState> {
        Arc::clone(&self.state)
    }

    pub fn selected_catalog(&self) -> Option<&Catalog> {
        self.state.catalog()
    }

    /// Committed copy of the selected sheet.
    pub fn selected_sheet(&self) -> Option<&Datasheet> {
        self.state.sheet()
    }

    /// Draft of the selected sheet, falling back to the committed copy.
    pub fn working_sheet(&self) -> Option<&Datasheet> {
        self.state.working_sheet()
    }

    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty()
    }

    /// Ratings of the working sheet.
    pub fn statistics(&self) -> Option<Statistics> {
        self.working_sheet().map(compute_statistics)
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Replaces the session with every catalog in the repository.
    ///
    /// Returns the catalogs that could not be read; the rest are loaded.
    pub fn load(&mut self) -> Result<Vec<(String, RepositoryError)>> {
        let loaded = self.repository.load_all()?;
        tracing::info!(
            "Loaded {} catalogs ({} unreadable)",
            loaded.catalogs.len(),
            loaded.failures.len()
        );
        self.state = Arc::new(SessionState::with_catalogs(loaded.catalogs));
        Ok(loaded.failures)
    }

    // ------------------------------------------------------------------
    // Catalog commands
    // ------------------------------------------------------------------

    /// Creates an empty catalog and appends it to the list.
    pub fn add_catalog(&mut self, name: &str) -> Result<()> {
        self.apply("add_catalog", |state, repository| {
            check_catalog_name(state, repository, name)?;
            let catalog = Catalog::new(name);
            repository.save(&catalog)?;
            state.catalogs.push(catalog);
            tracing::info!("Added catalog {:?}", name);
            Ok(())
        })
    }

    /// Renames the selected catalog, moving its stored record.
    pub fn rename_catalog(&mut self, name: &str) -> Result<()> {
        self.apply("rename_catalog", |state, repository| {
            let current = state.catalog_mut()?;
            if current.is_default() {
                return Err(SessionError::PinnedCatalog(DEFAULT_CATALOG));
            }
            if current.name == name {
                return Ok(());
            }
            let old_name = current.name.clone();
            check_catalog_name(state, repository, name)?;

            let renamed = state.catalog_mut()?.renamed(name);
            repository.save(&renamed)?;
            if let Err(error) = repository.delete(&old_name) {
                // Keep exactly one record, under the old name
                if let Err(rollback) = repository.delete(name) {
                    tracing::error!(
                        "Catalog {:?} is now stored twice, could not remove {:?}: {}",
                        old_name,
                        name,
                        rollback
                    );
                }
                return Err(error.into());
            }
            *state.catalog_mut()? = renamed;

            tracing::info!("Renamed catalog {:?} to {:?}", old_name, name);
            Ok(())
        })
    }

    /// Deletes the selected catalog and selects its neighbour.
    pub fn remove_catalog(&mut self) -> Result<()> {
        self.apply("remove_catalog", |state, repository| {
            let current = state.catalog_mut()?;
            if current.is_default() {
                return Err(SessionError::PinnedCatalog(DEFAULT_CATALOG));
            }
            let name = current.name.clone();
            repository.delete(&name)?;

            state.catalogs.remove(state.selected_catalog);
            state.selected_catalog = state
                .selected_catalog
                .min(state.catalogs.len().saturating_sub(1));
            state.select_first_sheet();

            tracing::info!("Removed catalog {:?}", name);
            Ok(())
        })
    }

    /// Switches catalogs and selects the first sheet of the new one.
    pub fn select_catalog(&mut self, index: usize) -> Result<()> {
        self.apply("select_catalog", |state, _| {
            if index >= state.catalogs.len() {
                return Err(SessionError::CatalogOutOfRange {
                    index,
                    len: state.catalogs.len(),
                });
            }
            state.selected_catalog = index;
            state.select_first_sheet();
            Ok(())
        })
    }

    // ------------------------------------------------------------------
    // Sheet commands
    // ------------------------------------------------------------------

    /// Selects a sheet of the selected catalog, seeding its draft on first visit.
    pub fn select_sheet(&mut self, index: usize) -> Result<()> {
        self.apply("select_sheet", |state, _| {
            let len = state.catalog().map_or(0, Catalog::len);
            if index >= len {
                return Err(SessionError::SheetOutOfRange { index, len });
            }
            state.select_sheet(Some(index));
            Ok(())
        })
    }

    pub fn set_new_sheet_name(&mut self, text: &str) -> Result<()> {
        self.apply("set_new_sheet_name", |state, _| {
            state.new_sheet_name = text.to_string();
            Ok(())
        })
    }

    /// Creates a sheet with default stats, inserted alphabetically, and selects it.
    pub fn add_new_sheet(&mut self, name: &str) -> Result<()> {
        self.apply("add_new_sheet", |state, repository| {
            if name.trim().is_empty() {
                return Err(SessionError::BlankName);
            }
            let catalog = state.catalog_mut()?;
            if catalog.contains_name(name) {
                return Err(SessionError::DuplicateSheet(name.to_string()));
            }

            let sheet = Datasheet::new(name);
            let id = sheet.id;
            let index = catalog.insert_sorted(sheet.clone());
            repository.save(catalog)?;

            state.drafts.insert(id, SheetDraft::Clean(sheet));
            state.selected_sheet = Some(index);
            state.new_sheet_name.clear();

            tracing::info!("Added datasheet {:?} at {}", name, index);
            Ok(())
        })
    }

    /// Commits the selected sheet's draft and persists its catalog.
    ///
    /// A renamed sheet is moved to its new alphabetical position and stays
    /// selected.
    pub fn save(&mut self) -> Result<()> {
        self.apply("save", |state, repository| {
            let (index, committed) = state.require_sheet()?;
            let old_name = committed.name.clone();
            let sheet = match state.drafts.get(&committed.id) {
                Some(SheetDraft::Dirty(sheet)) => sheet.clone(),
                Some(SheetDraft::Clean(_)) => return Err(SessionError::NothingToSave),
                None => return Err(SessionError::NoDraft),
            };

            if sheet.name.trim().is_empty() {
                return Err(SessionError::BlankName);
            }
            let catalog = state.catalog_mut()?;
            let collides = catalog
                .datasheets()
                .iter()
                .any(|other| other.id != sheet.id && other.name == sheet.name);
            if collides {
                return Err(SessionError::DuplicateSheet(sheet.name));
            }

            let new_index = catalog
                .replace_sorted(index, sheet.clone())
                .ok_or(SessionError::SheetOutOfRange {
                    index,
                    len: catalog.len(),
                })?;
            repository.save(catalog)?;

            if old_name != sheet.name {
                tracing::info!("Renamed datasheet {:?} to {:?}", old_name, sheet.name);
            }
            tracing::info!("Saved datasheet {:?}", sheet.name);

            state.selected_sheet = Some(new_index);
            state.drafts.insert(sheet.id, SheetDraft::Clean(sheet));
            Ok(())
        })
    }

    /// Removes the selected sheet and its draft, then selects a neighbour.
    pub fn delete(&mut self) -> Result<()> {
        self.apply("delete", |state, repository| {
            let (index, _) = state.require_sheet()?;
            let catalog = state.catalog_mut()?;
            let removed = catalog.remove(index).ok_or(SessionError::SheetOutOfRange {
                index,
                len: catalog.len(),
            })?;
            repository.save(catalog)?;

            let remaining = catalog.len();
            state.drafts.remove(&removed.id);
            let next = if index < remaining {
                Some(index)
            } else {
                remaining.checked_sub(1)
            };
            state.select_sheet(next);

            tracing::info!("Deleted datasheet {:?}", removed.name);
            Ok(())
        })
    }

    /// Throws away the selected sheet's edits.
    pub fn discard(&mut self) -> Result<()> {
        self.apply("discard", |state, _| {
            let (_, committed) = state.require_sheet()?;
            let sheet = committed.clone();
            state.drafts.insert(sheet.id, SheetDraft::Clean(sheet));
            Ok(())
        })
    }

    // ------------------------------------------------------------------
    // Field edits
    // ------------------------------------------------------------------

    pub fn set_name(&mut self, name: &str) -> Result<()> {
        self.edit("set_name", |sheet| {
            sheet.name = name.to_string();
            Ok(())
        })
    }

    pub fn set_stat(&mut self, stat: SheetStat, value: u32) -> Result<()> {
        self.edit("set_stat", |sheet| {
            sheet.set_stat(stat, value);
            Ok(())
        })
    }

    pub fn set_skill(&mut self, value: u32) -> Result<()> {
        self.set_stat(SheetStat::Skill, value)
    }

    pub fn set_health(&mut self, value: u32) -> Result<()> {
        self.set_stat(SheetStat::Health, value)
    }

    pub fn set_speed(&mut self, value: u32) -> Result<()> {
        self.set_stat(SheetStat::Speed, value)
    }

    pub fn set_model_count(&mut self, value: u32) -> Result<()> {
        self.set_stat(SheetStat::ModelCount, value)
    }

    pub fn set_abilities(&mut self, text: &str) -> Result<()> {
        self.edit("set_abilities", |sheet| {
            sheet.abilities = text.to_string();
            Ok(())
        })
    }

    /// Pending tag input. Not a sheet edit.
    pub fn set_current_tag(&mut self, text: &str) -> Result<()> {
        self.apply("set_current_tag", |state, _| {
            state.current_tag = text.to_string();
            Ok(())
        })
    }

    /// Appends the pending tag to the draft and clears the input.
    pub fn add_tag(&mut self) -> Result<()> {
        self.apply("add_tag", |state, _| {
            if state.current_tag.trim().is_empty() {
                return Err(SessionError::BlankTag);
            }
            let tag = std::mem::take(&mut state.current_tag);
            edit_draft(state, |sheet| {
                sheet.add_tag(tag);
                Ok(true)
            })
            .map(drop)
        })
    }

    pub fn remove_tag(&mut self, index: usize) -> Result<()> {
        self.edit("remove_tag", |sheet| sheet.remove_tag(index).map(drop))
    }

    pub fn set_result_break(&mut self, column: usize, value: i32) -> Result<()> {
        self.edit("set_result_break", |sheet| {
            sheet.stat_table.set_result_break(column, value)
        })
    }

    pub fn set_to_save(&mut self, column: usize, value: i32) -> Result<()> {
        self.edit("set_to_save", |sheet| sheet.stat_table.set_to_save(column, value))
    }

    pub fn set_to_resist(&mut self, column: usize, value: Option<i32>) -> Result<()> {
        self.edit("set_to_resist", |sheet| {
            sheet.stat_table.set_to_resist(column, value)
        })
    }

    pub fn set_hardness(&mut self, column: usize, value: Option<i32>) -> Result<()> {
        self.edit("set_hardness", |sheet| {
            sheet.stat_table.set_hardness(column, value)
        })
    }

    pub fn set_enhancements(&mut self, column: usize, value: Option<String>) -> Result<()> {
        self.edit("set_enhancements", |sheet| {
            sheet.stat_table.set_enhancements(column, value)
        })
    }

    pub fn set_weapon_name(&mut self, weapon: usize, name: &str) -> Result<()> {
        self.edit("set_weapon_name", |sheet| {
            sheet.stat_table.set_weapon_name(weapon, name.to_string())
        })
    }

    pub fn set_attacks(&mut self, weapon: usize, column: usize, value: i32) -> Result<()> {
        self.edit("set_attacks", |sheet| {
            sheet.stat_table.set_attacks(weapon, column, value)
        })
    }

    pub fn set_range(&mut self, weapon: usize, column: usize, value: i32) -> Result<()> {
        self.edit("set_range", |sheet| {
            sheet.stat_table.set_range(weapon, column, value)
        })
    }

    pub fn set_to_hit(&mut self, weapon: usize, column: usize, value: i32) -> Result<()> {
        self.edit("set_to_hit", |sheet| {
            sheet.stat_table.set_to_hit(weapon, column, value)
        })
    }

    pub fn set_damage(&mut self, weapon: usize, column: usize, value: i32) -> Result<()> {
        self.edit("set_damage", |sheet| {
            sheet.stat_table.set_damage(weapon, column, value)
        })
    }

    pub fn set_weapon_enhancements(
        &mut self,
        weapon: usize,
        column: usize,
        value: Option<String>,
    ) -> Result<()> {
        self.edit("set_weapon_enhancements", |sheet| {
            sheet.stat_table.set_weapon_enhancements(weapon, column, value)
        })
    }

    pub fn add_result_column(&mut self) -> Result<()> {
        self.edit("add_result_column", |sheet| {
            sheet.stat_table.add_result_column();
            Ok(())
        })
    }

    pub fn remove_result_column(&mut self, column: usize) -> Result<()> {
        self.edit("remove_result_column", |sheet| {
            sheet.stat_table.remove_result_column(column).map(drop)
        })
    }

    /// Appends a weapon and returns its index.
    pub fn add_weapon(&mut self) -> Result<usize> {
        let mut added = 0;
        self.edit("add_weapon", |sheet| {
            added = sheet.stat_table.add_weapon();
            Ok(())
        })?;
        Ok(added)
    }

    pub fn remove_weapon(&mut self, weapon: usize) -> Result<()> {
        self.edit("remove_weapon", |sheet| {
            sheet.stat_table.remove_weapon(weapon).map(drop)
        })
    }

    // ------------------------------------------------------------------
    // Text entry points
    // ------------------------------------------------------------------
    //
    // Each returns `Ok(false)` when the text did not parse; the draft is
    // then left untouched and not marked dirty.

    pub fn set_stat_text(&mut self, stat: SheetStat, text: &str) -> Result<bool> {
        self.edit_text("set_stat_text", |sheet| Ok(sheet.set_stat_text(stat, text)))
    }

    pub fn set_column_text(&mut self, field: ColumnField, column: usize, text: &str) -> Result<bool> {
        self.edit_text("set_column_text", |sheet| {
            Ok(sheet.stat_table.column_mut(column)?.set_text(field, text))
        })
    }

    pub fn set_weapon_text(
        &mut self,
        field: WeaponField,
        weapon: usize,
        column: usize,
        text: &str,
    ) -> Result<bool> {
        self.edit_text("set_weapon_text", |sheet| {
            Ok(sheet
                .stat_table
                .weapon_cell_mut(weapon, column)?
                .set_text(field, text))
        })
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Runs `command` on a copy of the state and publishes it on success.
    fn apply<T>(
        &mut self,
        command: &'static str,
        f: impl FnOnce(&mut SessionState, &dyn CatalogRepository) -> Result<T>,
    ) -> Result<T> {
        let mut next = SessionState::clone(&self.state);
        match f(&mut next, self.repository.as_ref()) {
            Ok(value) => {
                self.state = Arc::new(next);
                Ok(value)
            }
            Err(error) => {
                report(command, &error);
                Err(error)
            }
        }
    }

    fn edit(
        &mut self,
        command: &'static str,
        f: impl FnOnce(&mut Datasheet) -> std::result::Result<(), TableError>,
    ) -> Result<()> {
        self.edit_text(command, |sheet| f(sheet).map(|()| true))
            .map(drop)
    }

    fn edit_text(
        &mut self,
        command: &'static str,
        f: impl FnOnce(&mut Datasheet) -> std::result::Result<bool, TableError>,
    ) -> Result<bool> {
        let mut next = SessionState::clone(&self.state);
        match edit_draft(&mut next, f) {
            Ok(true) => {
                self.state = Arc::new(next);
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(error) => {
                report(command, &error);
                Err(error)
            }
        }
    }
}

/// Applies `f` to a copy of the selected sheet's draft and stores it back as dirty.
///
/// Returns `Ok(false)` without touching the draft when `f` reports no change.
fn edit_draft(
    state: &mut SessionState,
    f: impl FnOnce(&mut Datasheet) -> std::result::Result<bool, TableError>,
) -> Result<bool> {
    let (_, committed) = state.require_sheet()?;
    let id = committed.id;
    let draft = state.drafts.get(&id).ok_or(SessionError::NoDraft)?;

    let mut sheet = draft.sheet().clone();
    if !f(&mut sheet)? {
        return Ok(false);
    }
    state.drafts.insert(id, SheetDraft::Dirty(sheet));
    Ok(true)
}

/// Rejects blank names and names already taken, in the session or by a
/// stored record the session could not load.
fn check_catalog_name(
    state: &SessionState,
    repository: &dyn CatalogRepository,
    name: &str,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(SessionError::BlankName);
    }
    if state.catalogs.iter().any(|catalog| catalog.name == name) || repository.exists(name) {
        return Err(SessionError::DuplicateCatalog(name.to_string()));
    }
    Ok(())
}

fn report(command: &str, error: &SessionError) {
    match error.severity() {
        ErrorSeverity::Validation => {
            tracing::debug!("{} rejected: {}", command, error);
        }
        ErrorSeverity::Internal => {
            tracing::warn!("{} precondition failed [{}]: {}", command, error.error_code(), error);
        }
        ErrorSeverity::Persistence => {
            tracing::error!("{} failed to persist [{}]: {}", command, error.error_code(), error);
        }
    }
}
