//! Error types for routing and identity operations

use dtk_domain::{DocumentId, Office};

/// Failures of routing engine operations.
///
/// Precondition checks are front-loaded: when an operation returns an
/// error, no document state has been mutated and no tracking entry has
/// been appended.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoutingError {
    /// No acting user for the operation
    #[error("not signed in")]
    Unauthenticated,

    /// A required field is missing or empty
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// Forward target equals the document's current office
    #[error("document is already at {office}")]
    InvalidTransition { office: Office },

    /// Unknown document id
    #[error("document not found: {0}")]
    NotFound(DocumentId),

    /// Scan-receive at an office that does not hold the document
    #[error("document is routed to {expected}, not {actual}")]
    WrongOffice { expected: Office, actual: Office },

    /// Scan-receive of a document already receipted
    #[error("document has already been received")]
    AlreadyReceived,
}

/// Failures of login and registration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// Registration name collides with an existing user (case-insensitive)
    #[error("a user named {0:?} already exists")]
    DuplicateIdentity(String),

    /// Login name/credential pair matched no user
    #[error("invalid name or credential")]
    InvalidCredentials,

    /// Registration field missing or empty
    #[error("validation failed: {0}")]
    ValidationFailed(String),
}
