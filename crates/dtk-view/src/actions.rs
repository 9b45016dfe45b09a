//! Per-row action eligibility
//!
//! Display/enablement predicates derived from `(document, acting user)`.
//! These hide buttons; they are not enforced authorization. Any caller
//! holding a document id can still invoke the routing engine directly.

use dtk_domain::{Document, User};

/// Which actions a row offers the acting user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowActions {
    /// Acknowledge custody here.
    pub can_receive: bool,
    /// Open the edit form.
    pub can_edit: bool,
    /// Offer deletion (behind confirmation).
    pub can_delete: bool,
    /// Route to another office.
    pub can_forward: bool,
}

impl RowActions {
    /// Evaluate the predicates for one document and user.
    ///
    /// A pending document at the user's office is receive-first: every
    /// other action stays disabled until custody is acknowledged.
    #[must_use]
    pub fn evaluate(document: &Document, user: &User) -> Self {
        let is_owner = document.owner_id == user.id;
        let is_admin = user.office.is_admin();
        let at_my_office = document.current_office == user.office;

        let can_receive = at_my_office && !document.is_received;
        let can_modify = (is_admin || (is_owner && at_my_office)) && !can_receive;
        Self {
            can_receive,
            can_edit: can_modify,
            can_delete: can_modify,
            can_forward: (is_admin || at_my_office) && !can_receive,
        }
    }

    /// Whether the row offers no actions at all.
    #[inline]
    #[must_use]
    pub fn is_inert(self) -> bool {
        !(self.can_receive || self.can_edit || self.can_delete || self.can_forward)
    }
}
