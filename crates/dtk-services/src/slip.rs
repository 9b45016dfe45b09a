//! Tracking slip generation
//!
//! A slip is the printable artifact attached to the physical copy of a
//! document: a scannable code carrying the document id plus human-readable
//! metadata about its creation. Generation is best-effort; the routing
//! engine never waits on it and never rolls anything back when it fails.

use async_trait::async_trait;
use dtk_domain::{Document, TrackingAction};

/// A generated tracking slip, ready for download or printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingSlip {
    /// Suggested file name for the artifact.
    pub file_name: String,
    /// The text to encode as the scannable code: the document id.
    pub qr_payload: String,
    /// Human-readable metadata lines.
    pub lines: Vec<String>,
}

/// Failures of slip generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlipError {
    /// Document state is missing its creation entry
    #[error("document has no creation entry")]
    MissingCreationEntry,

    /// The rendering backend failed
    #[error("slip backend failed: {0}")]
    Backend(String),
}

/// Produces a tracking slip for a freshly created document.
///
/// Invoked exactly once per creation, by the event subscriber.
#[async_trait]
pub trait SlipGenerator: Send + Sync {
    /// Generate a slip for `document`.
    async fn generate(&self, document: &Document) -> Result<TrackingSlip, SlipError>;
}

/// Plain-text slip renderer.
///
/// Stands in for the PDF/QR-image pipeline, which is an external concern;
/// the payload and metadata are identical.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextSlipGenerator;

#[async_trait]
impl SlipGenerator for TextSlipGenerator {
    async fn generate(&self, document: &Document) -> Result<TrackingSlip, SlipError> {
        let creation = document
            .tracking_history
            .first()
            .ok_or(SlipError::MissingCreationEntry)?;
        let TrackingAction::Created { to } = creation.action else {
            return Err(SlipError::MissingCreationEntry);
        };

        let slug: String = document
            .title
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");
        Ok(TrackingSlip {
            file_name: format!("DocuTrack-Slip-{slug}.txt"),
            qr_payload: document.id.to_string(),
            lines: vec![
                "DocuTrack - Tracking Slip".to_string(),
                format!("Document Title: {}", document.title),
                format!("Document ID: {}", document.id),
                format!("Created By: {} ({})", creation.actor.name, creation.from),
                format!("Sent To: {to}"),
                format!("Date Created: {}", creation.timestamp.to_rfc3339()),
                "Please attach this slip to the physical copy of the document.".to_string(),
            ],
        })
    }
}
