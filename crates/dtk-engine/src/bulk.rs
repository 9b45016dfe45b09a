//! Bulk operation coordinator
//!
//! Applies a routing operation to a selected set of documents and reports
//! partial applicability: a selection where nothing was eligible is a
//! distinct outcome, not a zero-count success.

use crate::error::RoutingError;
use crate::routing::RoutingEngine;
use dtk_domain::{Document, DocumentId, User};

/// Result of a bulk receive over a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkReceiveOutcome {
    /// None of the selected documents could be received by this user.
    NothingEligible,
    /// The eligible subset was received.
    Received { count: usize },
}

impl RoutingEngine {
    /// Receive every selected document this user is eligible for.
    ///
    /// Eligible means the document is at the actor's office (or the actor
    /// is Admin) and not yet receipted. Ineligible selections are skipped
    /// silently; the outcome reports the count actually transitioned.
    pub fn bulk_receive(
        &self,
        selection: &[DocumentId],
        actor: &User,
    ) -> Result<BulkReceiveOutcome, RoutingError> {
        let eligible: Vec<DocumentId> = self
            .repository()
            .snapshot()
            .iter()
            .filter(|doc| {
                selection.contains(&doc.id)
                    && (doc.current_office == actor.office || actor.office.is_admin())
                    && !doc.is_received
            })
            .map(|doc| doc.id)
            .collect();

        if eligible.is_empty() {
            return Ok(BulkReceiveOutcome::NothingEligible);
        }

        for id in &eligible {
            self.receive(*id, actor)?;
        }
        tracing::info!(count = eligible.len(), actor = %actor.id, "bulk receive applied");
        Ok(BulkReceiveOutcome::Received {
            count: eligible.len(),
        })
    }

    /// Resolve a selection to documents for a deletion confirmation step.
    ///
    /// Unknown ids are dropped. Nothing is deleted here; the caller hands
    /// the resolved documents to its confirmation collaborator and then
    /// invokes [`RoutingEngine::delete`].
    #[must_use]
    pub fn resolve_for_delete(&self, selection: &[DocumentId]) -> Vec<Document> {
        self.repository()
            .snapshot()
            .into_iter()
            .filter(|doc| selection.contains(&doc.id))
            .collect()
    }
}
