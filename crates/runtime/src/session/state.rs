//! Immutable snapshot of an edit session.

use std::collections::HashMap;

use sheet_core::{Catalog, Datasheet, SheetId};

use super::draft::SheetDraft;
use super::error::{Result, SessionError};

/// Everything the presentation layer renders.
///
/// Snapshots are handed out as `Arc<SessionState>` and never change; each
/// session command builds the next snapshot from a clone of the current one.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    pub(super) catalogs: Vec<Catalog>,
    pub(super) selected_catalog: usize,
    pub(super) selected_sheet: Option<usize>,
    pub(super) new_sheet_name: String,
    pub(super) current_tag: String,
    pub(super) drafts: HashMap<SheetId, SheetDraft>,
}

impl SessionState {
    pub(super) fn with_catalogs(catalogs: Vec<Catalog>) -> Self {
        let mut state = Self {
            catalogs,
            ..Self::default()
        };
        state.select_first_sheet();
        state
    }

    pub fn catalogs(&self) -> &[Catalog] {
        &self.catalogs
    }

    pub fn selected_catalog_index(&self) -> usize {
        self.selected_catalog
    }

    /// Index of the selected sheet within the selected catalog, if any.
    pub fn selected_sheet_index(&self) -> Option<usize> {
        self.selected_sheet
    }

    /// Pending input of the new-sheet form.
    pub fn new_sheet_name(&self) -> &str {
        &self.new_sheet_name
    }

    /// Pending input of the tag form.
    pub fn current_tag(&self) -> &str {
        &self.current_tag
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalogs.get(self.selected_catalog)
    }

    /// Committed copy of the selected sheet.
    pub fn sheet(&self) -> Option<&Datasheet> {
        self.catalog()?.get(self.selected_sheet?)
    }

    pub fn draft(&self, id: SheetId) -> Option<&SheetDraft> {
        self.drafts.get(&id)
    }

    pub fn drafts(&self) -> &HashMap<SheetId, SheetDraft> {
        &self.drafts
    }

    /// Draft of the selected sheet, or its committed copy when it has none.
    pub fn working_sheet(&self) -> Option<&Datasheet> {
        let sheet = self.sheet()?;
        Some(self.draft(sheet.id).map_or(sheet, SheetDraft::sheet))
    }

    /// Whether the selected sheet has unsaved edits.
    pub fn is_dirty(&self) -> bool {
        self.sheet()
            .and_then(|sheet| self.draft(sheet.id))
            .is_some_and(SheetDraft::is_dirty)
    }

    pub(super) fn catalog_mut(&mut self) -> Result<&mut Catalog> {
        let len = self.catalogs.len();
        self.catalogs
            .get_mut(self.selected_catalog)
            .ok_or(SessionError::CatalogOutOfRange {
                index: self.selected_catalog,
                len,
            })
    }

    /// Selected sheet index, checked against the selected catalog.
    pub(super) fn require_sheet(&self) -> Result<(usize, &Datasheet)> {
        let index = self.selected_sheet.ok_or(SessionError::NoSheetSelected)?;
        let catalog = self.catalog().ok_or(SessionError::CatalogOutOfRange {
            index: self.selected_catalog,
            len: self.catalogs.len(),
        })?;
        let sheet = catalog.get(index).ok_or(SessionError::SheetOutOfRange {
            index,
            len: catalog.len(),
        })?;
        Ok((index, sheet))
    }

    /// Selects `index` (or nothing) and seeds a clean draft when the sheet has none.
    pub(super) fn select_sheet(&mut self, index: Option<usize>) {
        self.selected_sheet = index;
        let Some(sheet) = self.sheet() else {
            self.selected_sheet = None;
            return;
        };
        if self.drafts.contains_key(&sheet.id) {
            return;
        }
        let seeded = sheet.clone();
        self.drafts.insert(seeded.id, SheetDraft::Clean(seeded));
    }

    pub(super) fn select_first_sheet(&mut self) {
        let first = self.catalog().filter(|catalog| !catalog.is_empty()).map(|_| 0);
        self.select_sheet(first);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> SessionState {
        let mut catalog = Catalog::new("Default");
        catalog.insert_sorted(Datasheet::new("Alpha"));
        catalog.insert_sorted(Datasheet::new("Bravo"));
        SessionState::with_catalogs(vec![catalog, Catalog::new("Empty")])
    }

    #[test]
    fn starts_on_first_sheet_with_clean_draft() {
        let state = state();
        let sheet = state.sheet().unwrap();

        assert_eq!(sheet.name, "Alpha");
        assert_eq!(state.draft(sheet.id), Some(&SheetDraft::Clean(sheet.clone())));
        assert!(!state.is_dirty());
    }

    #[test]
    fn selecting_out_of_range_clears_selection() {
        let mut state = state();
        state.select_sheet(Some(7));
        assert_eq!(state.selected_sheet_index(), None);
        assert!(state.working_sheet().is_none());
    }

    #[test]
    fn empty_catalog_selects_nothing() {
        let mut state = state();
        state.selected_catalog = 1;
        state.select_first_sheet();
        assert_eq!(state.selected_sheet_index(), None);
        assert!(matches!(
            state.require_sheet(),
            Err(SessionError::NoSheetSelected)
        ));
    }
}
