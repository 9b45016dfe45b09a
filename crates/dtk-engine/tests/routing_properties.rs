//! Property tests over random custody transition sequences
//!
//! Drives a single document through arbitrary forward/receive sequences by
//! users at arbitrary offices and checks, after every step:
//! - history only grows, and its first entry is always the creation
//! - the receipt flag agrees with the last entry
//! - a rejected self-forward appends nothing
//! - every intermediate state satisfies the structural invariants

use dtk_domain::{DocumentContent, Office, TrackingAction};
use dtk_engine::{DocumentRepository, RoutingEngine, RoutingError};
use dtk_test_utils::user_at;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum Op {
    Forward { actor: usize, target: usize },
    Receive { actor: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..Office::ALL.len(), 0..Office::ALL.len())
            .prop_map(|(actor, target)| Op::Forward { actor, target }),
        (0..Office::ALL.len()).prop_map(|actor| Op::Receive { actor }),
    ]
}

proptest! {
    #[test]
    fn custody_invariants_hold_under_arbitrary_transitions(
        owner_office in 0..Office::ALL.len(),
        destination in 0..Office::ALL.len(),
        ops in prop::collection::vec(op_strategy(), 0..24),
    ) {
        let engine = RoutingEngine::new(Arc::new(DocumentRepository::new()));
        let owner = user_at(Office::ALL[owner_office]);
        let doc = engine
            .create(&owner, DocumentContent::titled("Prop memo"), Office::ALL[destination])
            .unwrap();

        let mut history_len = 1;
        for op in ops {
            match op {
                Op::Forward { actor, target } => {
                    let actor = user_at(Office::ALL[actor]);
                    let target = Office::ALL[target];
                    let before = engine.repository().get(doc.id).unwrap();
                    match engine.forward(doc.id, &actor, target) {
                        Ok(after) => {
                            prop_assert!(!after.is_received);
                            prop_assert_eq!(after.current_office, target);
                            history_len += 1;
                            prop_assert_eq!(after.tracking_history.len(), history_len);
                        }
                        Err(RoutingError::InvalidTransition { office }) => {
                            // Only a self-forward is rejected, and it must
                            // leave the document untouched.
                            prop_assert_eq!(office, before.current_office);
                            prop_assert_eq!(target, before.current_office);
                            let unchanged = engine.repository().get(doc.id).unwrap();
                            prop_assert_eq!(unchanged, before);
                        }
                        Err(other) => {
                            return Err(TestCaseError::fail(format!(
                                "unexpected forward failure: {other}"
                            )));
                        }
                    }
                }
                Op::Receive { actor } => {
                    let actor = user_at(Office::ALL[actor]);
                    let after = engine.receive(doc.id, &actor).unwrap();
                    prop_assert!(after.is_received);
                    history_len += 1;
                    prop_assert_eq!(after.tracking_history.len(), history_len);
                }
            }

            let state = engine.repository().get(doc.id).unwrap();
            prop_assert_eq!(state.verify_invariants(), Ok(()));
            prop_assert!(
                matches!(
                    state.tracking_history[0].action,
                    TrackingAction::Created { .. }
                ),
                "first history entry must be a Created action"
            );
            prop_assert_eq!(
                state.is_received,
                matches!(state.last_entry().unwrap().action, TrackingAction::Received)
            );
            prop_assert_eq!(state.tracking_history.len(), history_len);
        }
    }

    #[test]
    fn scan_receive_is_first_success_then_already_received(
        destination in 0..Office::ALL.len(),
    ) {
        let engine = RoutingEngine::new(Arc::new(DocumentRepository::new()));
        let owner = user_at(Office::Fou);
        let clerk = user_at(Office::ALL[destination]);
        let doc = engine
            .create(&owner, DocumentContent::titled("Prop memo"), Office::ALL[destination])
            .unwrap();

        prop_assert!(engine.scan_receive(doc.id, &clerk).is_ok());
        prop_assert_eq!(
            engine.scan_receive(doc.id, &clerk),
            Err(RoutingError::AlreadyReceived)
        );
        prop_assert_eq!(
            engine.repository().get(doc.id).unwrap().tracking_history.len(),
            2
        );
    }
}
