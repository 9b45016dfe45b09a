//! DocuTrack application layer
//!
//! Ties the pieces together into a working tracker: the [`Session`] owns
//! authentication and view state and drives the routing engine, persisting
//! every mutation to the key-value store fire-and-forget; the slip
//! subscriber consumes creation events on its own task.
//!
//! # Example
//!
//! ```rust
//! use dtk_app::Session;
//! use dtk_domain::{DocumentContent, Office};
//! use dtk_store::MemoryStore;
//! use std::sync::Arc;
//!
//! let mut session = Session::bootstrap(Arc::new(MemoryStore::new()));
//! session.login("Admin", "admin")?;
//! let doc = session.save_document(
//!     DocumentContent::titled("Memo"),
//!     Some(Office::Odm),
//!     None,
//! )?;
//! assert_eq!(doc.current_office, Office::Odm);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(unreachable_pub)]

pub mod session;
pub mod subscriber;

// Re-exports for convenience
pub use session::Session;
pub use subscriber::spawn_slip_subscriber;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
