//! DocuTrack routing engine
//!
//! The state machine governing document custody:
//! - [`DocumentRepository`]: the single source of truth for custody and
//!   history
//! - [`RoutingEngine`]: create, edit, forward, receive, scan-receive,
//!   delete, plus the bulk coordinator
//! - [`IdentityStore`]: registration, login, and the bootstrap admin seed
//! - Domain events consumed by independently failing subscribers
//!
//! # Example
//!
//! ```rust
//! use dtk_engine::{DocumentRepository, IdentityStore, RoutingEngine};
//! use dtk_domain::{DocumentContent, Office};
//! use std::sync::Arc;
//!
//! let identity = IdentityStore::new();
//! let clerk = identity.register("Clerk", Office::Fou, "pw")?;
//!
//! let engine = RoutingEngine::new(Arc::new(DocumentRepository::new()));
//! let doc = engine.create(&clerk, DocumentContent::titled("Memo"), Office::Odm)?;
//! assert_eq!(doc.current_office, Office::Odm);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(unreachable_pub)]

pub mod bulk;
pub mod error;
pub mod event;
pub mod identity;
pub mod repository;
pub mod routing;

// Re-exports for convenience
pub use bulk::BulkReceiveOutcome;
pub use error::{IdentityError, RoutingError};
pub use event::{event_channel, DomainEvent, EventReceiver, EventSender};
pub use identity::{IdentityStore, SEED_ADMIN_CREDENTIAL, SEED_ADMIN_NAME};
pub use repository::DocumentRepository;
pub use routing::RoutingEngine;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
