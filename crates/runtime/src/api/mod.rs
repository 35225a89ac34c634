//! Public runtime API surface.
//!
//! This module gathers the error types exposed to consumers of the runtime
//! crate so the session and repository layers can stay focused on their own
//! failures.

pub mod errors;

pub use errors::{Result, RuntimeError};
