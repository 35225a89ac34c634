//! Datasheet model and combat statistics for the wargame builder.
//!
//! `sheet-core` owns the data a user edits (catalogs of datasheets, each with a
//! stat table of result columns and weapons) together with the pure rating
//! math derived from it. It performs no I/O; the runtime crate layers drafts
//! and persistence on top of the types re-exported here.
//!
//! Stat table lengths are structural: a [`StatTable`] can only gain or lose a
//! result column through methods that update every weapon in the same call.
pub mod catalog;
pub mod cell;
pub mod datasheet;
pub mod error;
pub mod stats;
pub mod table;

pub use catalog::{Catalog, DEFAULT_CATALOG};
pub use datasheet::{Datasheet, SheetId, SheetStat};
pub use error::{ClassifiedError, ErrorSeverity};
pub use stats::{
    DefenseSummary, Ratings, StatValue, Statistics, SurvivalRating, WeaponRating,
    compute_statistics,
};
pub use table::{
    ColumnField, ResultColumn, StatTable, TableError, WeaponCell, WeaponField, WeaponTable,
};
