//! DocuTrack external service collaborators
//!
//! Thin request/response contracts for the services the tracker leans on:
//! tracking slip generation, one-sentence summary generation, and the QR
//! scan intake stream. Each trait ships with a local implementation so the
//! rest of the system runs without any hosted backend; all of them are
//! best-effort from the routing engine's point of view.

#![warn(unreachable_pub)]

pub mod scan;
pub mod slip;
pub mod summary;

// Re-exports for convenience
pub use scan::{scan_channel, ScanFeed, ScanSource};
pub use slip::{SlipError, SlipGenerator, TextSlipGenerator, TrackingSlip};
pub use summary::{
    ExtractiveSummarizer, SummaryError, SummaryGenerator, SummaryRequest,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
