//! Testing utilities for the DocuTrack workspace
//!
//! Shared fixtures: users per office, documents in known custody states,
//! and a ready-made routing engine.

#![allow(missing_docs)]

use chrono::{Duration, Utc};
use dtk_domain::{Document, DocumentContent, Office, User};
use dtk_engine::{DocumentRepository, RoutingEngine};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NAME_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A user at the given office, with a unique name.
pub fn user_at(office: Office) -> User {
    let n = NAME_COUNTER.fetch_add(1, Ordering::Relaxed);
    User::new(format!("user-{n}"), office, "pw")
}

/// A routing engine over a fresh empty repository.
pub fn engine() -> RoutingEngine {
    RoutingEngine::new(Arc::new(DocumentRepository::new()))
}

/// A freshly created document owned by `owner`, routed to `destination`.
///
/// Built through a throwaway engine so it satisfies every structural
/// invariant.
pub fn document_at(owner: &User, destination: Office) -> Document {
    engine()
        .create(owner, DocumentContent::titled("Fixture"), destination)
        .expect("fixture creation cannot fail")
}

/// A document already receipted at `destination` by `receiver`.
pub fn received_document_at(owner: &User, destination: Office, receiver: &User) -> Document {
    let engine = engine();
    let doc = engine
        .create(owner, DocumentContent::titled("Fixture"), destination)
        .expect("fixture creation cannot fail");
    engine
        .receive(doc.id, receiver)
        .expect("fixture receive cannot fail")
}

/// Shift a document's `last_updated` by whole seconds, for deterministic
/// sort-order tests.
#[must_use]
pub fn aged_by(mut document: Document, seconds: i64) -> Document {
    document.last_updated = Utc::now() - Duration::seconds(seconds);
    document
}

/// Rename a document for assertions that match on titles.
#[must_use]
pub fn titled(mut document: Document, title: &str) -> Document {
    document.title = title.to_string();
    document
}
