//! DocuTrack persistence collaborator
//!
//! A deliberately thin key-value layer: `get`/`set` over JSON values, with
//! three well-known keys for the user list, the current session user, and
//! the document list. Corrupt values are recovered by treating them as
//! absent; persistence failures are never fatal to the caller.

#![warn(unreachable_pub)]

pub mod file;
pub mod kv;

// Re-exports for convenience
pub use file::JsonFileStore;
pub use kv::{load_optional, load_or_default, save, KeyValueStore, MemoryStore, StoreError};

/// Key holding the registered user list.
pub const USERS_KEY: &str = "users";
/// Key holding the current session user, if any.
pub const CURRENT_USER_KEY: &str = "currentUser";
/// Key holding the full document list.
pub const DOCUMENTS_KEY: &str = "documents";
