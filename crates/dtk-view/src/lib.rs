//! DocuTrack view projection
//!
//! Derives everything the dashboard shows from repository state plus the
//! acting user: the three tab lists, the Admin per-office grouping, the
//! per-row action predicates, and the tab badge counts. Everything in this
//! crate is a pure function; no state lives here.

#![warn(unreachable_pub)]

pub mod actions;
pub mod counts;
pub mod projection;

// Re-exports for convenience
pub use actions::RowActions;
pub use counts::ViewCounts;
pub use projection::{project, project_grouped, ViewTab};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
