//! The routing engine: the state machine for document custody
//!
//! Every operation front-loads its precondition checks, then produces the
//! new document state plus one appended tracking entry and writes it back
//! to the repository in a single update. Failures never leave a document
//! mid-transition.

use crate::error::RoutingError;
use crate::event::{DomainEvent, EventSender};
use crate::repository::DocumentRepository;
use chrono::Utc;
use dtk_domain::{
    ActorRef, Document, DocumentContent, DocumentId, Office, TrackingAction, TrackingEntry, User,
};
use std::sync::Arc;

/// Governs custody transitions: create, forward, receive, and deletion.
///
/// The engine trusts its callers on authorization: the `can_*` predicates
/// in `dtk-view` are display enablement only, and the session layer is
/// responsible for requiring a signed-in user. What the engine does
/// guarantee is the structural invariants of every document it writes.
#[derive(Debug)]
pub struct RoutingEngine {
    repository: Arc<DocumentRepository>,
    events: Option<EventSender>,
}

impl RoutingEngine {
    /// Create an engine over a repository, with no event subscriber.
    #[must_use]
    pub fn new(repository: Arc<DocumentRepository>) -> Self {
        Self {
            repository,
            events: None,
        }
    }

    /// Attach the domain event channel.
    #[must_use]
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    /// The repository this engine writes to.
    #[inline]
    #[must_use]
    pub fn repository(&self) -> &Arc<DocumentRepository> {
        &self.repository
    }

    /// Allocate a new document routed to `destination`.
    ///
    /// The owner fields are captured from `owner` and never change again.
    /// History starts with a single creation entry. Emits
    /// [`DomainEvent::DocumentCreated`]; a missing subscriber does not
    /// fail the creation.
    ///
    /// # Errors
    /// `ValidationFailed` when the title is blank.
    pub fn create(
        &self,
        owner: &User,
        content: DocumentContent,
        destination: Office,
    ) -> Result<Document, RoutingError> {
        if content.title.trim().is_empty() {
            return Err(RoutingError::ValidationFailed("title is required".to_string()));
        }

        let now = Utc::now();
        let document = Document {
            id: DocumentId::new(),
            title: content.title,
            status: content.status,
            summary: content.summary,
            body: content.body,
            attachment: content.attachment,
            last_updated: now,
            owner_id: owner.id,
            owner_name: owner.name.clone(),
            owner_office: owner.office,
            current_office: destination,
            tracking_history: vec![TrackingEntry {
                from: owner.office,
                action: TrackingAction::Created { to: destination },
                timestamp: now,
                actor: ActorRef::from(owner),
            }],
            is_received: false,
        };

        self.repository.insert(document.clone());
        tracing::info!(
            document = %document.id,
            owner = %owner.id,
            destination = %destination,
            "document created"
        );
        self.emit(DomainEvent::DocumentCreated {
            document: document.clone(),
        });
        Ok(document)
    }

    /// Overwrite a document's content fields and refresh `last_updated`.
    ///
    /// Custody fields are untouched and no tracking entry is appended.
    ///
    /// # Errors
    /// `NotFound` for an unknown id, `ValidationFailed` for a blank title.
    pub fn edit(
        &self,
        id: DocumentId,
        content: DocumentContent,
    ) -> Result<Document, RoutingError> {
        if content.title.trim().is_empty() {
            return Err(RoutingError::ValidationFailed("title is required".to_string()));
        }
        let mut document = self.repository.get(id).ok_or(RoutingError::NotFound(id))?;

        document.set_content(content);
        document.last_updated = Utc::now();
        self.repository.update(&document);
        tracing::debug!(document = %id, "document edited");
        Ok(document)
    }

    /// Move custody of a document to `target`.
    ///
    /// Resets the receipt flag and appends a forwarding entry. The entry's
    /// originating office is the acting user's home office, not the
    /// document's current office. Persisted histories depend on this
    /// stamping, so it is preserved as-is.
    ///
    /// # Errors
    /// `NotFound` for an unknown id; `InvalidTransition` when `target`
    /// equals the current office.
    pub fn forward(
        &self,
        id: DocumentId,
        actor: &User,
        target: Office,
    ) -> Result<Document, RoutingError> {
        let mut document = self.repository.get(id).ok_or(RoutingError::NotFound(id))?;
        if target == document.current_office {
            return Err(RoutingError::InvalidTransition { office: target });
        }

        let now = Utc::now();
        document.current_office = target;
        document.is_received = false;
        document.last_updated = now;
        document.tracking_history.push(TrackingEntry {
            from: actor.office,
            action: TrackingAction::Forwarded { to: target },
            timestamp: now,
            actor: ActorRef::from(actor),
        });

        self.repository.update(&document);
        tracing::info!(
            document = %id,
            actor = %actor.id,
            target = %target,
            "document forwarded"
        );
        Ok(document)
    }

    /// Acknowledge custody at the document's current office.
    ///
    /// This primitive enforces no office match: custody eligibility is
    /// checked by `scan_receive`, the bulk coordinator, or the view
    /// layer's enablement predicates.
    ///
    /// # Errors
    /// `NotFound` for an unknown id.
    pub fn receive(&self, id: DocumentId, actor: &User) -> Result<Document, RoutingError> {
        let mut document = self.repository.get(id).ok_or(RoutingError::NotFound(id))?;

        let now = Utc::now();
        document.is_received = true;
        document.last_updated = now;
        document.tracking_history.push(TrackingEntry {
            from: document.current_office,
            action: TrackingAction::Received,
            timestamp: now,
            actor: ActorRef::from(actor),
        });

        self.repository.update(&document);
        tracing::info!(document = %id, actor = %actor.id, "document received");
        Ok(document)
    }

    /// QR-intake receive: the composite used when a slip is scanned.
    ///
    /// # Errors
    /// `NotFound` for an unknown id; `WrongOffice` when the scanner's
    /// office does not hold the document; `AlreadyReceived` when it was
    /// already receipted. Each failure is distinguishable so the caller
    /// can render a distinct message.
    pub fn scan_receive(&self, id: DocumentId, actor: &User) -> Result<Document, RoutingError> {
        let document = self.repository.get(id).ok_or(RoutingError::NotFound(id))?;
        if document.current_office != actor.office {
            return Err(RoutingError::WrongOffice {
                expected: document.current_office,
                actual: actor.office,
            });
        }
        if document.is_received {
            return Err(RoutingError::AlreadyReceived);
        }
        self.receive(id, actor)
    }

    /// Permanently remove the given documents and their histories.
    ///
    /// Returns the number actually removed.
    pub fn delete(&self, ids: &[DocumentId]) -> usize {
        let removed = self.repository.remove_many(ids);
        if removed > 0 {
            tracing::info!(count = removed, "documents deleted");
        }
        removed
    }

    fn emit(&self, event: DomainEvent) {
        if let Some(events) = &self.events {
            if events.send(event).is_err() {
                tracing::debug!("event subscriber gone; dropping domain event");
            }
        }
    }
}
