//! # examforge-storage
//!
//! SQLite persistence for per-session selection history and the duplicate
//! signature cache. One connection behind a mutex; every per-session
//! read-modify-append runs in a single immediate transaction.

pub mod codec;
pub mod migrations;
pub mod pragmas;
pub mod store;

pub use store::SqliteSessionStore;

use examforge_core::errors::{ForgeError, StorageError};

/// Wrap a SQLite failure message into a `ForgeError`.
pub(crate) fn to_storage_err(message: String) -> ForgeError {
    StorageError::SqliteError { message }.into()
}
