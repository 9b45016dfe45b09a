//! The central document entity and its structural invariants

use crate::office::{Office, Status};
use crate::tracking::{TrackingAction, TrackingEntry};
use crate::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique document identifier (ULID for sortability)
///
/// The rendered form of this id is also the QR payload on tracking slips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub Ulid);

impl DocumentId {
    /// Generate new document ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DocumentId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Ulid::from_string(s)?))
    }
}

/// File attached to a document, carried inline as base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    /// Base64-encoded file bytes.
    pub data: String,
}

impl Attachment {
    /// Whether the attachment is an image (the only kind the summarizer
    /// can work from).
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// The mutable content fields of a document.
///
/// This is the edit payload: everything here can change after creation,
/// while identity, ownership, and custody fields cannot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DocumentContent {
    pub title: String,
    pub status: Status,
    pub summary: String,
    /// Extracted text from files or manual entry.
    pub body: String,
    pub attachment: Option<Attachment>,
}

impl DocumentContent {
    /// Content with just a title, defaults elsewhere.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// A structural invariant of the document state that failed to hold.
///
/// These never occur through the routing engine; the checks exist for
/// tests and for validating externally loaded state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("tracking history is empty")]
    EmptyHistory,
    #[error("first tracking entry is {0}, not a creation")]
    FirstEntryNotCreation(&'static str),
    #[error("receipt flag disagrees with the last tracking entry")]
    ReceiptMismatch,
    #[error("current office {current} does not match last routing destination {routed}")]
    CustodyMismatch { current: Office, routed: Office },
}

/// The central entity: a tracked document.
///
/// Identity (`id`) and provenance (`owner_*`) are fixed at creation.
/// Custody (`current_office`, `is_received`) is mutated only by the routing
/// engine, which appends a [`TrackingEntry`] for every transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    pub status: Status,
    pub summary: String,
    /// Extracted text from files or manual entry.
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    pub last_updated: DateTime<Utc>,
    pub owner_id: UserId,
    pub owner_name: String,
    pub owner_office: Office,
    pub current_office: Office,
    pub tracking_history: Vec<TrackingEntry>,
    pub is_received: bool,
}

impl Document {
    /// The most recent tracking entry.
    ///
    /// Present for every well-formed document; `None` only for state that
    /// already violates the history invariant.
    #[inline]
    #[must_use]
    pub fn last_entry(&self) -> Option<&TrackingEntry> {
        self.tracking_history.last()
    }

    /// The content fields as an edit payload.
    #[must_use]
    pub fn content(&self) -> DocumentContent {
        DocumentContent {
            title: self.title.clone(),
            status: self.status,
            summary: self.summary.clone(),
            body: self.body.clone(),
            attachment: self.attachment.clone(),
        }
    }

    /// Overwrite the content fields. Custody and history are untouched.
    pub fn set_content(&mut self, content: DocumentContent) {
        self.title = content.title;
        self.status = content.status;
        self.summary = content.summary;
        self.body = content.body;
        self.attachment = content.attachment;
    }

    /// Check the structural invariants that every document must satisfy:
    /// non-empty history starting with a creation, receipt flag agreeing
    /// with the last entry, and custody matching the last routing
    /// destination.
    pub fn verify_invariants(&self) -> Result<(), InvariantViolation> {
        let first = self
            .tracking_history
            .first()
            .ok_or(InvariantViolation::EmptyHistory)?;
        if !matches!(first.action, TrackingAction::Created { .. }) {
            return Err(InvariantViolation::FirstEntryNotCreation(first.action.name()));
        }

        let last = self
            .tracking_history
            .last()
            .ok_or(InvariantViolation::EmptyHistory)?;
        let received_last = matches!(last.action, TrackingAction::Received);
        if self.is_received != received_last {
            return Err(InvariantViolation::ReceiptMismatch);
        }
        if self.is_received && last.from != self.current_office {
            return Err(InvariantViolation::ReceiptMismatch);
        }

        // Custody equals the destination of the most recent routing entry.
        let routed = self
            .tracking_history
            .iter()
            .rev()
            .find_map(|entry| entry.action.to_office())
            .ok_or(InvariantViolation::EmptyHistory)?;
        if routed != self.current_office {
            return Err(InvariantViolation::CustodyMismatch {
                current: self.current_office,
                routed,
            });
        }

        Ok(())
    }
}
