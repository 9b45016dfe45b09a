//! Bulk coordinator behavior tests
//!
//! These live as integration tests (rather than a unit-test module inside
//! `bulk.rs`) because they use `dtk-test-utils`, which itself depends on
//! `dtk-engine`: a unit-test build would link two distinct copies of the
//! crate and its types would not unify.

use dtk_domain::{DocumentContent, DocumentId, Office};
use dtk_engine::BulkReceiveOutcome;
use dtk_test_utils::{engine, user_at};
use pretty_assertions::assert_eq;

#[test]
fn bulk_receive_skips_ineligible_and_counts_eligible() {
    // Scenario: one document at the clerk's office, one elsewhere.
    let engine = engine();
    let owner = user_at(Office::Fou);
    let clerk = user_at(Office::Odm);
    let here = engine
        .create(&owner, DocumentContent::titled("Here"), Office::Odm)
        .unwrap();
    let elsewhere = engine
        .create(&owner, DocumentContent::titled("Elsewhere"), Office::Coa)
        .unwrap();

    let outcome = engine
        .bulk_receive(&[here.id, elsewhere.id], &clerk)
        .unwrap();
    assert_eq!(outcome, BulkReceiveOutcome::Received { count: 1 });

    assert!(engine.repository().get(here.id).unwrap().is_received);
    assert!(!engine.repository().get(elsewhere.id).unwrap().is_received);
}

#[test]
fn bulk_receive_nothing_eligible_is_distinct() {
    let engine = engine();
    let owner = user_at(Office::Fou);
    let clerk = user_at(Office::Odm);
    let doc = engine
        .create(&owner, DocumentContent::titled("Far away"), Office::Coa)
        .unwrap();

    let outcome = engine.bulk_receive(&[doc.id], &clerk).unwrap();
    assert_eq!(outcome, BulkReceiveOutcome::NothingEligible);
}

#[test]
fn admin_can_bulk_receive_across_offices() {
    let engine = engine();
    let owner = user_at(Office::Fou);
    let admin = user_at(Office::Admin);
    let a = engine
        .create(&owner, DocumentContent::titled("A"), Office::Odm)
        .unwrap();
    let b = engine
        .create(&owner, DocumentContent::titled("B"), Office::Coa)
        .unwrap();

    let outcome = engine.bulk_receive(&[a.id, b.id], &admin).unwrap();
    assert_eq!(outcome, BulkReceiveOutcome::Received { count: 2 });
}

#[test]
fn already_received_documents_are_not_eligible() {
    let engine = engine();
    let owner = user_at(Office::Fou);
    let clerk = user_at(Office::Odm);
    let doc = engine
        .create(&owner, DocumentContent::titled("Memo"), Office::Odm)
        .unwrap();
    engine.receive(doc.id, &clerk).unwrap();

    let outcome = engine.bulk_receive(&[doc.id], &clerk).unwrap();
    assert_eq!(outcome, BulkReceiveOutcome::NothingEligible);
    // No second receipt entry.
    assert_eq!(engine.repository().get(doc.id).unwrap().tracking_history.len(), 2);
}

#[test]
fn resolve_for_delete_drops_unknown_ids() {
    let engine = engine();
    let owner = user_at(Office::Fou);
    let doc = engine
        .create(&owner, DocumentContent::titled("Memo"), Office::Odm)
        .unwrap();

    let resolved = engine.resolve_for_delete(&[doc.id, DocumentId::new()]);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].id, doc.id);
}
