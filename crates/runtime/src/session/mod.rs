//! Edit sessions over committed catalogs.
//!
//! [`EditSession`] is the only mutable surface exposed to a frontend. It
//! publishes immutable [`SessionState`] snapshots and keeps one
//! [`SheetDraft`] per visited sheet, keyed by [`sheet_core::SheetId`], so
//! edits never reach a catalog until they are saved.

mod draft;
mod error;
mod state;
mod store;

pub use draft::SheetDraft;
pub use error::SessionError;
pub use state::SessionState;
pub use store::EditSession;
