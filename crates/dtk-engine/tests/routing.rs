//! Routing engine behavior tests
//!
//! These live as integration tests (rather than a unit-test module inside
//! `routing.rs`) because they use `dtk-test-utils`, which itself depends on
//! `dtk-engine`: a unit-test build would link two distinct copies of the
//! crate and its types would not unify.

use dtk_domain::{DocumentContent, DocumentId, Office, TrackingAction};
use dtk_engine::{event_channel, DomainEvent, RoutingError};
use dtk_test_utils::{engine, user_at};
use pretty_assertions::assert_eq;

#[test]
fn create_routes_to_destination_with_singleton_history() {
    let engine = engine();
    let owner = user_at(Office::Fou);

    let doc = engine
        .create(&owner, DocumentContent::titled("Memo"), Office::Odm)
        .unwrap();

    assert_eq!(doc.current_office, Office::Odm);
    assert!(!doc.is_received);
    assert_eq!(doc.owner_office, Office::Fou);
    assert_eq!(doc.tracking_history.len(), 1);
    let entry = &doc.tracking_history[0];
    assert_eq!(entry.from, Office::Fou);
    assert_eq!(entry.action, TrackingAction::Created { to: Office::Odm });
    assert_eq!(entry.actor.id, owner.id);
    assert_eq!(doc.verify_invariants(), Ok(()));
}

#[test]
fn create_requires_title() {
    let engine = engine();
    let owner = user_at(Office::Fou);
    let result = engine.create(&owner, DocumentContent::titled("   "), Office::Odm);
    assert!(matches!(result, Err(RoutingError::ValidationFailed(_))));
    assert!(engine.repository().is_empty());
}

#[test]
fn create_emits_event_and_survives_missing_subscriber() {
    let (tx, mut rx) = event_channel();
    let engine = engine().with_events(tx);
    let owner = user_at(Office::Fou);

    let doc = engine
        .create(&owner, DocumentContent::titled("Memo"), Office::Odm)
        .unwrap();
    match rx.try_recv().unwrap() {
        DomainEvent::DocumentCreated { document } => assert_eq!(document.id, doc.id),
    }

    // Drop the receiver: the next creation must still commit.
    drop(rx);
    let doc = engine
        .create(&owner, DocumentContent::titled("Second"), Office::Coa)
        .unwrap();
    assert!(engine.repository().get(doc.id).is_some());
}

#[test]
fn edit_touches_content_only() {
    let engine = engine();
    let owner = user_at(Office::Fou);
    let doc = engine
        .create(&owner, DocumentContent::titled("Memo"), Office::Odm)
        .unwrap();

    let mut content = doc.content();
    content.title = "Amended memo".to_string();
    content.summary = "now with a summary".to_string();
    let edited = engine.edit(doc.id, content).unwrap();

    assert_eq!(edited.title, "Amended memo");
    assert_eq!(edited.current_office, Office::Odm);
    assert_eq!(edited.tracking_history.len(), 1);
    assert!(edited.last_updated >= doc.last_updated);
    assert_eq!(edited.owner_id, doc.owner_id);
}

#[test]
fn edit_unknown_document_is_not_found() {
    let engine = engine();
    let id = DocumentId::new();
    assert_eq!(
        engine.edit(id, DocumentContent::titled("x")),
        Err(RoutingError::NotFound(id))
    );
}

#[test]
fn forward_records_actor_home_office_as_origin() {
    // Scenario: created FOU -> ODM, forwarded by an Admin user.
    let engine = engine();
    let owner = user_at(Office::Fou);
    let admin = user_at(Office::Admin);
    let doc = engine
        .create(&owner, DocumentContent::titled("Memo"), Office::Odm)
        .unwrap();

    let forwarded = engine.forward(doc.id, &admin, Office::PropertyUnit).unwrap();

    assert_eq!(forwarded.current_office, Office::PropertyUnit);
    assert!(!forwarded.is_received);
    assert_eq!(forwarded.tracking_history.len(), 2);
    let entry = &forwarded.tracking_history[1];
    // Origin is the actor's home office, not ODM.
    assert_eq!(entry.from, Office::Admin);
    assert_eq!(entry.action, TrackingAction::Forwarded { to: Office::PropertyUnit });
    assert_eq!(forwarded.verify_invariants(), Ok(()));
}

#[test]
fn self_forward_is_rejected_and_appends_nothing() {
    let engine = engine();
    let owner = user_at(Office::Fou);
    let doc = engine
        .create(&owner, DocumentContent::titled("Memo"), Office::Odm)
        .unwrap();

    let result = engine.forward(doc.id, &owner, Office::Odm);
    assert_eq!(result, Err(RoutingError::InvalidTransition { office: Office::Odm }));

    let unchanged = engine.repository().get(doc.id).unwrap();
    assert_eq!(unchanged.tracking_history.len(), 1);
    assert_eq!(unchanged.last_updated, doc.last_updated);
}

#[test]
fn forward_resets_receipt() {
    let engine = engine();
    let owner = user_at(Office::Fou);
    let clerk = user_at(Office::Odm);
    let doc = engine
        .create(&owner, DocumentContent::titled("Memo"), Office::Odm)
        .unwrap();
    let received = engine.receive(doc.id, &clerk).unwrap();
    assert!(received.is_received);

    let forwarded = engine.forward(doc.id, &clerk, Office::Coa).unwrap();
    assert!(!forwarded.is_received);
    assert_eq!(forwarded.tracking_history.len(), 3);
}

#[test]
fn receive_appends_entry_with_null_destination() {
    let engine = engine();
    let owner = user_at(Office::Fou);
    let clerk = user_at(Office::Odm);
    let doc = engine
        .create(&owner, DocumentContent::titled("Memo"), Office::Odm)
        .unwrap();

    let received = engine.receive(doc.id, &clerk).unwrap();
    assert!(received.is_received);
    let entry = received.last_entry().unwrap();
    assert_eq!(entry.action, TrackingAction::Received);
    assert_eq!(entry.from, Office::Odm);
    assert_eq!(entry.action.to_office(), None);
    assert_eq!(received.verify_invariants(), Ok(()));
}

#[test]
fn scan_receive_distinguishes_all_failures() {
    let engine = engine();
    let owner = user_at(Office::Fou);
    let right_clerk = user_at(Office::Odm);
    let wrong_clerk = user_at(Office::Coa);
    let doc = engine
        .create(&owner, DocumentContent::titled("Memo"), Office::Odm)
        .unwrap();

    let ghost = DocumentId::new();
    assert_eq!(
        engine.scan_receive(ghost, &right_clerk),
        Err(RoutingError::NotFound(ghost))
    );
    assert_eq!(
        engine.scan_receive(doc.id, &wrong_clerk),
        Err(RoutingError::WrongOffice {
            expected: Office::Odm,
            actual: Office::Coa,
        })
    );

    let received = engine.scan_receive(doc.id, &right_clerk).unwrap();
    assert!(received.is_received);
    assert_eq!(
        engine.scan_receive(doc.id, &right_clerk),
        Err(RoutingError::AlreadyReceived)
    );
    // The failed retry appended nothing.
    assert_eq!(engine.repository().get(doc.id).unwrap().tracking_history.len(), 2);
}

#[test]
fn delete_is_permanent() {
    let engine = engine();
    let owner = user_at(Office::Fou);
    let doc = engine
        .create(&owner, DocumentContent::titled("Memo"), Office::Odm)
        .unwrap();

    assert_eq!(engine.delete(&[doc.id]), 1);
    assert_eq!(engine.repository().get(doc.id), None);
    assert_eq!(engine.delete(&[doc.id]), 0);
}
