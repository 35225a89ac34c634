//! Named, ordered collections of datasheets.

use std::collections::HashSet;

use crate::datasheet::{Datasheet, SheetId};

/// Name of the catalog that always exists and is listed first.
pub const DEFAULT_CATALOG: &str = "Default";

/// A named collection of datasheets, kept in alphabetical order.
///
/// The catalog is the unit of persistence: one catalog, one stored file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Catalog {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    datasheets: Vec<Datasheet>,
}

impl Catalog {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            datasheets: Vec::new(),
        }
    }

    /// Builds a catalog from sheets in the given order.
    pub fn with_datasheets(name: impl Into<String>, datasheets: Vec<Datasheet>) -> Self {
        Self {
            name: name.into(),
            datasheets,
        }
    }

    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_CATALOG
    }

    pub fn datasheets(&self) -> &[Datasheet] {
        &self.datasheets
    }

    pub fn len(&self) -> usize {
        self.datasheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasheets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Datasheet> {
        self.datasheets.get(index)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.datasheets.iter().any(|sheet| sheet.name == name)
    }

    /// Gives a fresh id to every sheet whose id is already in `seen`, then
    /// records this catalog's ids in `seen`.
    ///
    /// Returns how many sheets were re-identified. Catalogs copied on disk
    /// share ids until this runs over them.
    pub fn reissue_duplicate_ids(&mut self, seen: &mut HashSet<SheetId>) -> usize {
        let mut reissued = 0;
        for sheet in &mut self.datasheets {
            while !seen.insert(sheet.id) {
                sheet.id = SheetId::generate();
                reissued += 1;
            }
        }
        reissued
    }

    /// Inserts before the first sheet whose name sorts after `sheet`'s.
    ///
    /// Returns the index the sheet landed at.
    pub fn insert_sorted(&mut self, sheet: Datasheet) -> usize {
        let index = self
            .datasheets
            .iter()
            .position(|existing| sheet.name < existing.name)
            .unwrap_or(self.datasheets.len());
        self.datasheets.insert(index, sheet);
        index
    }

    /// Replaces the sheet at `index` and restores alphabetical order.
    ///
    /// Returns the sheet's new index, or `None` when `index` is out of range.
    pub fn replace_sorted(&mut self, index: usize, sheet: Datasheet) -> Option<usize> {
        if index >= self.datasheets.len() {
            return None;
        }
        self.datasheets.remove(index);
        Some(self.insert_sorted(sheet))
    }

    pub fn remove(&mut self, index: usize) -> Option<Datasheet> {
        (index < self.datasheets.len()).then(|| self.datasheets.remove(index))
    }

    /// Same sheets under another name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            datasheets: self.datasheets.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(catalog: &Catalog) -> Vec<&str> {
        catalog.datasheets().iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn inserts_alphabetically() {
        let mut catalog = Catalog::new("Test");
        catalog.insert_sorted(Datasheet::new("Alpha"));
        catalog.insert_sorted(Datasheet::new("Charlie"));

        let index = catalog.insert_sorted(Datasheet::new("Bravo"));

        assert_eq!(index, 1);
        assert_eq!(names(&catalog), ["Alpha", "Bravo", "Charlie"]);
    }

    #[test]
    fn inserts_into_empty_and_at_end() {
        let mut catalog = Catalog::new("Test");
        assert_eq!(catalog.insert_sorted(Datasheet::new("Mid")), 0);
        assert_eq!(catalog.insert_sorted(Datasheet::new("Zulu")), 1);
        assert_eq!(catalog.insert_sorted(Datasheet::new("Alpha")), 0);
        assert_eq!(names(&catalog), ["Alpha", "Mid", "Zulu"]);
    }

    #[test]
    fn replace_keeps_order_after_rename() {
        let mut catalog = Catalog::new("Test");
        for name in ["Alpha", "Bravo", "Charlie"] {
            catalog.insert_sorted(Datasheet::new(name));
        }

        let mut renamed = catalog.get(0).unwrap().clone();
        renamed.name = "Delta".to_string();

        assert_eq!(catalog.replace_sorted(0, renamed), Some(2));
        assert_eq!(names(&catalog), ["Bravo", "Charlie", "Delta"]);
        assert_eq!(catalog.replace_sorted(9, Datasheet::new("X")), None);
    }

    #[test]
    fn duplicate_ids_are_reissued() {
        let mut original = Catalog::new("Orks");
        original.insert_sorted(Datasheet::new("Boyz"));
        original.insert_sorted(Datasheet::new("Nobz"));
        let mut copy = original.renamed("Orks Copy");

        let mut seen = HashSet::new();
        assert_eq!(original.reissue_duplicate_ids(&mut seen), 0);
        assert_eq!(copy.reissue_duplicate_ids(&mut seen), 2);

        assert_eq!(seen.len(), 4);
        assert_ne!(original.get(0).unwrap().id, copy.get(0).unwrap().id);
        assert_eq!(names(&copy), ["Boyz", "Nobz"]);
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let mut catalog = Catalog::new("Test");
        catalog.insert_sorted(Datasheet::new("Alpha"));
        assert!(catalog.remove(1).is_none());
        assert_eq!(catalog.remove(0).map(|s| s.name), Some("Alpha".to_string()));
        assert!(catalog.is_empty());
    }
}
