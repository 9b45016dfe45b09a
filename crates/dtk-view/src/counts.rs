//! Tab badge counts for the dashboard

use dtk_domain::{Document, User};

/// Unfiltered per-tab counts for the acting user.
///
/// These ignore the search term: the badges show the size of each queue,
/// not the size of the current search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewCounts {
    /// Inbox tab (Admin: all documents).
    pub inbox: usize,
    /// Sent tab.
    pub sent: usize,
    /// Pending "received documents" tab.
    pub pending: usize,
}

impl ViewCounts {
    /// Compute the badge counts from the full document set.
    #[must_use]
    pub fn compute(documents: &[Document], user: &User) -> Self {
        let is_admin = user.office.is_admin();
        let mut counts = Self::default();
        for doc in documents {
            let at_my_office = doc.current_office == user.office;
            if is_admin || (at_my_office && doc.is_received) {
                counts.inbox += 1;
            }
            if doc.owner_id == user.id {
                counts.sent += 1;
            }
            if !doc.is_received && (is_admin || at_my_office) {
                counts.pending += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtk_domain::Office;
    use dtk_test_utils::{document_at, received_document_at, user_at};
    use pretty_assertions::assert_eq;

    #[test]
    fn clerk_counts_cover_only_their_office() {
        let owner = user_at(Office::Fou);
        let clerk = user_at(Office::Odm);
        let docs = vec![
            document_at(&owner, Office::Odm),
            received_document_at(&owner, Office::Odm, &clerk),
            document_at(&owner, Office::Coa),
        ];

        let counts = ViewCounts::compute(&docs, &clerk);
        assert_eq!(counts, ViewCounts { inbox: 1, sent: 0, pending: 1 });
    }

    #[test]
    fn admin_counts_span_all_offices() {
        let owner = user_at(Office::Fou);
        let admin = user_at(Office::Admin);
        let docs = vec![
            document_at(&owner, Office::Odm),
            document_at(&owner, Office::Coa),
            received_document_at(&owner, Office::Fou, &user_at(Office::Fou)),
        ];

        let counts = ViewCounts::compute(&docs, &admin);
        assert_eq!(counts, ViewCounts { inbox: 3, sent: 0, pending: 2 });
    }

    #[test]
    fn sent_counts_ownership_regardless_of_custody() {
        let owner = user_at(Office::Fou);
        let docs = vec![
            document_at(&owner, Office::Odm),
            document_at(&owner, Office::Coa),
        ];
        assert_eq!(ViewCounts::compute(&docs, &owner).sent, 2);
    }
}
