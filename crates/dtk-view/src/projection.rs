//! View projection: deriving visible document lists from repository state
//!
//! Pure functions of `(documents, acting user, view, search term)`. No
//! document state is consulted beyond the fields the filters name, and
//! nothing here mutates anything.

use dtk_domain::{Document, Office, User};
use serde::{Deserialize, Serialize};

/// The three dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewTab {
    /// Documents the acting user created.
    Sent,
    /// Documents receipted at the user's office (Admin: everything).
    #[default]
    Inbox,
    /// The pending queue: custody has landed but is not yet receipted
    /// (Admin: the cross-office pending queue).
    Received,
}

fn in_view(doc: &Document, user: &User, tab: ViewTab) -> bool {
    match tab {
        ViewTab::Sent => doc.owner_id == user.id,
        ViewTab::Inbox => {
            if user.office.is_admin() {
                true
            } else {
                doc.current_office == user.office && doc.is_received
            }
        }
        ViewTab::Received => {
            if user.office.is_admin() {
                !doc.is_received
            } else {
                doc.current_office == user.office && !doc.is_received
            }
        }
    }
}

fn matches_search(doc: &Document, needle: &str) -> bool {
    needle.is_empty()
        || doc.title.to_lowercase().contains(needle)
        || doc.owner_name.to_lowercase().contains(needle)
}

/// Select, filter, and sort the documents visible in a view.
///
/// The search term is a case-insensitive substring match over title and
/// owner name (an empty term matches everything). Results are ordered by
/// `last_updated`, newest first.
#[must_use]
pub fn project<'a>(
    documents: &'a [Document],
    user: &User,
    tab: ViewTab,
    search_term: &str,
) -> Vec<&'a Document> {
    let needle = search_term.to_lowercase();
    let mut visible: Vec<&Document> = documents
        .iter()
        .filter(|doc| in_view(doc, user, tab) && matches_search(doc, &needle))
        .collect();
    visible.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
    visible
}

/// The Admin pending queue, grouped by the office currently holding each
/// document.
///
/// Groups follow the office enumeration's declared order; each group keeps
/// the filtered/sorted order of [`project`]; empty groups are omitted.
#[must_use]
pub fn project_grouped<'a>(
    documents: &'a [Document],
    user: &User,
    search_term: &str,
) -> Vec<(Office, Vec<&'a Document>)> {
    let visible = project(documents, user, ViewTab::Received, search_term);
    Office::ALL
        .into_iter()
        .filter_map(|office| {
            let group: Vec<&Document> = visible
                .iter()
                .copied()
                .filter(|doc| doc.current_office == office)
                .collect();
            (!group.is_empty()).then_some((office, group))
        })
        .collect()
}
