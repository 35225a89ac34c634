//! Common error infrastructure for sheet-core.
//!
//! Domain-specific errors (e.g. [`TableError`](crate::table::TableError)) live
//! next to the data they guard. This module holds the shared classification
//! used by every layer to decide how a failure is surfaced.
//!
//! # Severity Classes
//!
//! - **Validation**: user input was rejected, the command is a no-op and the
//!   presentation layer shows feedback
//! - **Internal**: a precondition was violated (index out of range, missing
//!   draft); this is a programming defect and never user-facing
//! - **Persistence**: loading, saving or deleting a catalog failed

/// Severity level of an error, used to decide how a failure is surfaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input, the command was rejected without side effects.
    ///
    /// Examples: blank sheet name, duplicate name, removing the last column
    Validation,

    /// Unexpected state, indicates a caller bug.
    ///
    /// Examples: column index out of range, edit without a draft
    Internal,

    /// Storage failure reported by a repository.
    ///
    /// Examples: unwritable directory, corrupt catalog file
    Persistence,
}

/// Common trait for all classified errors in the workspace.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by how the caller should react, not by impact
pub trait ClassifiedError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
