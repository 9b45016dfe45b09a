//! DocuTrack domain model
//!
//! The data model for the single-office-workflow document tracker:
//! - Fixed office and status enumerations
//! - Users and the actor projection captured in audit records
//! - Append-only tracking entries with a typed action variant
//! - The [`Document`] entity and its structural invariants
//!
//! This crate holds data and invariants only; custody transitions live in
//! `dtk-engine` and list derivation in `dtk-view`.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod document;
pub mod office;
pub mod tracking;
pub mod user;

// Re-exports for convenience
pub use document::{Attachment, Document, DocumentContent, DocumentId, InvariantViolation};
pub use office::{Office, Status};
pub use tracking::{TrackingAction, TrackingEntry};
pub use user::{ActorRef, User, UserId};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
