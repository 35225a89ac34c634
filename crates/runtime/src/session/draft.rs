//! Per-sheet draft copies.

use sheet_core::Datasheet;

/// Working copy of one datasheet.
///
/// `Clean` holds an unmodified copy of the committed sheet, `Dirty` one that
/// has been edited since it was seeded or last saved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SheetDraft {
    Clean(Datasheet),
    Dirty(Datasheet),
}

impl SheetDraft {
    pub fn sheet(&self) -> &Datasheet {
        match self {
            Self::Clean(sheet) | Self::Dirty(sheet) => sheet,
        }
    }

    pub fn into_sheet(self) -> Datasheet {
        match self {
            Self::Clean(sheet) | Self::Dirty(sheet) => sheet,
        }
    }

    pub fn is_dirty(&self) -> bool {
        matches!(self, Self::Dirty(_))
    }
}
