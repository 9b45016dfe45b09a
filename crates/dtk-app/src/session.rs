//! The user session: authentication state, view state, and the glue
//! between the routing engine, the view projection, and persistence
//!
//! This is the layer where "no acting user" is representable, so it is
//! where `Unauthenticated` is raised. Every mutation persists the affected
//! record fire-and-forget: a failed write is logged and the in-memory
//! state remains authoritative for the rest of the session.

use dtk_domain::{Document, DocumentContent, DocumentId, Office, User};
use dtk_engine::{
    BulkReceiveOutcome, DocumentRepository, EventSender, IdentityError, IdentityStore,
    RoutingEngine, RoutingError,
};
use dtk_services::{SummaryError, SummaryGenerator, SummaryRequest};
use dtk_store::{
    load_optional, load_or_default, save, KeyValueStore, CURRENT_USER_KEY, DOCUMENTS_KEY,
    USERS_KEY,
};
use dtk_view::{project, project_grouped, RowActions, ViewCounts, ViewTab};
use std::sync::Arc;

/// One user's working session over the shared document state.
pub struct Session {
    store: Arc<dyn KeyValueStore>,
    identity: Arc<IdentityStore>,
    engine: RoutingEngine,
    current_user: Option<User>,
    active_tab: ViewTab,
    search_term: String,
    selection: Vec<DocumentId>,
}

impl Session {
    /// Load persisted state from the store and start a session.
    ///
    /// An empty user store is seeded with the well-known Admin account and
    /// an empty document store. Corrupt records load as absent and are
    /// re-initialized the same way.
    pub fn bootstrap(store: Arc<dyn KeyValueStore>) -> Self {
        Self::bootstrap_with_events(store, None)
    }

    /// [`Session::bootstrap`] with a domain event channel attached, so a
    /// subscriber can consume creation events.
    pub fn bootstrap_with_events(
        store: Arc<dyn KeyValueStore>,
        events: Option<EventSender>,
    ) -> Self {
        let users: Vec<User> = load_or_default(store.as_ref(), USERS_KEY);
        let documents: Vec<Document> = load_or_default(store.as_ref(), DOCUMENTS_KEY);
        let current_user: Option<User> = load_optional(store.as_ref(), CURRENT_USER_KEY);

        let identity = Arc::new(IdentityStore::from_users(users));
        let repository = Arc::new(DocumentRepository::from_documents(documents));
        let mut engine = RoutingEngine::new(repository);
        if let Some(events) = events {
            engine = engine.with_events(events);
        }

        let mut session = Self {
            store,
            identity,
            engine,
            current_user,
            active_tab: ViewTab::default(),
            search_term: String::new(),
            selection: Vec::new(),
        };

        if session.identity.is_empty() {
            session.identity.seed_if_empty();
            session.engine.repository().replace_all(Vec::new());
            session.persist_users();
            session.persist_documents();
        }
        session
    }

    /// The signed-in user, if any.
    #[inline]
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// The engine this session drives. Exposed for tests and tooling.
    #[inline]
    #[must_use]
    pub fn engine(&self) -> &RoutingEngine {
        &self.engine
    }

    // --- Authentication ---

    /// Sign in with a name/credential pair.
    pub fn login(&mut self, name: &str, credential: &str) -> Result<User, IdentityError> {
        let user = self.identity.login(name, credential)?;
        self.current_user = Some(user.clone());
        self.persist_session();
        Ok(user)
    }

    /// Register a new user and sign them in.
    pub fn register(
        &mut self,
        name: &str,
        office: Office,
        credential: &str,
    ) -> Result<User, IdentityError> {
        let user = self.identity.register(name, office, credential)?;
        self.current_user = Some(user.clone());
        self.persist_users();
        self.persist_session();
        Ok(user)
    }

    /// Sign out. Shared document state is untouched.
    pub fn logout(&mut self) {
        self.current_user = None;
        self.persist_session();
    }

    fn require_user(&self) -> Result<User, RoutingError> {
        self.current_user.clone().ok_or(RoutingError::Unauthenticated)
    }

    // --- Document operations ---

    /// Create a new document or apply an edit, mirroring the single save
    /// affordance of the dashboard form.
    ///
    /// Creation requires a destination office; edits ignore it.
    pub fn save_document(
        &mut self,
        content: DocumentContent,
        destination: Option<Office>,
        editing: Option<DocumentId>,
    ) -> Result<Document, RoutingError> {
        let user = self.require_user()?;
        let result = match editing {
            Some(id) => self.engine.edit(id, content),
            None => {
                let destination = destination.ok_or_else(|| {
                    RoutingError::ValidationFailed(
                        "destination office is required".to_string(),
                    )
                })?;
                self.engine.create(&user, content, destination)
            }
        };
        if result.is_ok() {
            self.persist_documents();
        }
        result
    }

    /// Forward a document to another office.
    pub fn forward(
        &mut self,
        id: DocumentId,
        target: Office,
    ) -> Result<Document, RoutingError> {
        let user = self.require_user()?;
        let document = self.engine.forward(id, &user, target)?;
        self.persist_documents();
        Ok(document)
    }

    /// Receive a document at its current office.
    pub fn receive(&mut self, id: DocumentId) -> Result<Document, RoutingError> {
        let user = self.require_user()?;
        let document = self.engine.receive(id, &user)?;
        self.persist_documents();
        Ok(document)
    }

    /// Receive via a scanned QR payload.
    ///
    /// An unreadable payload is a validation failure; the engine's
    /// not-found / wrong-office / already-received outcomes pass through
    /// so each can be rendered distinctly.
    pub fn scan_receive_payload(&mut self, payload: &str) -> Result<Document, RoutingError> {
        let user = self.require_user()?;
        let id: DocumentId = payload.trim().parse().map_err(|_| {
            RoutingError::ValidationFailed(format!("unreadable code: {payload:?}"))
        })?;
        let document = self.engine.scan_receive(id, &user)?;
        self.persist_documents();
        Ok(document)
    }

    /// Generate a summary for a draft, to prefill the form's summary field.
    ///
    /// The draft's body text is preferred; an attachment is the fallback
    /// input. Touches no document state, so a failed generation costs the
    /// caller nothing but the error message.
    pub async fn generate_summary(
        &self,
        generator: &dyn SummaryGenerator,
        draft: &DocumentContent,
    ) -> Result<String, SummaryError> {
        let request = SummaryRequest {
            body: Some(draft.body.as_str()).filter(|b| !b.trim().is_empty()),
            attachment: draft.attachment.as_ref(),
        };
        generator.summarize(request).await
    }

    // --- Bulk actions over the selection ---

    /// Receive every selected document the user is eligible for.
    ///
    /// Clears the selection on success; a nothing-eligible outcome leaves
    /// it in place so the user can adjust it.
    pub fn bulk_receive(&mut self) -> Result<BulkReceiveOutcome, RoutingError> {
        let user = self.require_user()?;
        let outcome = self.engine.bulk_receive(&self.selection, &user)?;
        if let BulkReceiveOutcome::Received { .. } = outcome {
            self.selection.clear();
            self.persist_documents();
        }
        Ok(outcome)
    }

    /// Resolve the selection to documents for a deletion confirmation.
    #[must_use]
    pub fn request_delete_selection(&self) -> Vec<Document> {
        self.engine.resolve_for_delete(&self.selection)
    }

    /// Delete the given documents after the caller's confirmation step.
    pub fn confirm_delete(&mut self, ids: &[DocumentId]) -> usize {
        let removed = self.engine.delete(ids);
        self.selection.retain(|id| !ids.contains(id));
        if removed > 0 {
            self.persist_documents();
        }
        removed
    }

    // --- View state ---

    /// The active dashboard tab.
    #[inline]
    #[must_use]
    pub fn active_tab(&self) -> ViewTab {
        self.active_tab
    }

    /// Switch tabs. The selection is cleared; it belongs to one view.
    pub fn set_active_tab(&mut self, tab: ViewTab) {
        if self.active_tab != tab {
            self.active_tab = tab;
            self.selection.clear();
        }
    }

    /// Update the search term.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Whether the active view renders as per-office groups.
    #[must_use]
    pub fn uses_grouped_view(&self) -> bool {
        self.active_tab == ViewTab::Received
            && self
                .current_user
                .as_ref()
                .is_some_and(|u| u.office.is_admin())
    }

    /// The documents visible in the active view, filtered and sorted.
    ///
    /// Empty when nobody is signed in.
    #[must_use]
    pub fn visible_documents(&self) -> Vec<Document> {
        let Some(user) = &self.current_user else {
            return Vec::new();
        };
        let documents = self.engine.repository().snapshot();
        project(&documents, user, self.active_tab, &self.search_term)
            .into_iter()
            .cloned()
            .collect()
    }

    /// The Admin pending queue grouped by holding office.
    #[must_use]
    pub fn visible_grouped(&self) -> Vec<(Office, Vec<Document>)> {
        let Some(user) = &self.current_user else {
            return Vec::new();
        };
        let documents = self.engine.repository().snapshot();
        project_grouped(&documents, user, &self.search_term)
            .into_iter()
            .map(|(office, group)| (office, group.into_iter().cloned().collect()))
            .collect()
    }

    /// Tab badge counts for the signed-in user.
    #[must_use]
    pub fn counts(&self) -> ViewCounts {
        match &self.current_user {
            Some(user) => ViewCounts::compute(&self.engine.repository().snapshot(), user),
            None => ViewCounts::default(),
        }
    }

    /// Action eligibility for one row.
    #[must_use]
    pub fn row_actions(&self, document: &Document) -> Option<RowActions> {
        self.current_user
            .as_ref()
            .map(|user| RowActions::evaluate(document, user))
    }

    // --- Selection ---

    /// The currently selected document ids.
    #[inline]
    #[must_use]
    pub fn selection(&self) -> &[DocumentId] {
        &self.selection
    }

    /// Toggle one document in or out of the selection.
    pub fn toggle_selection(&mut self, id: DocumentId) {
        if let Some(pos) = self.selection.iter().position(|s| *s == id) {
            self.selection.remove(pos);
        } else {
            self.selection.push(id);
        }
    }

    /// Select all visible documents, or clear if all are already selected.
    pub fn toggle_all_selections(&mut self) {
        let visible: Vec<DocumentId> = self.visible_documents().iter().map(|d| d.id).collect();
        if self.selection.len() == visible.len() {
            self.selection.clear();
        } else {
            self.selection = visible;
        }
    }

    // --- Persistence (fire-and-forget) ---

    fn persist_users(&self) {
        if let Err(error) = save(self.store.as_ref(), USERS_KEY, &self.identity.snapshot()) {
            tracing::warn!(%error, "failed to persist user list");
        }
    }

    fn persist_documents(&self) {
        let documents = self.engine.repository().snapshot();
        if let Err(error) = save(self.store.as_ref(), DOCUMENTS_KEY, &documents) {
            tracing::warn!(%error, "failed to persist document list");
        }
    }

    fn persist_session(&self) {
        if let Err(error) = save(self.store.as_ref(), CURRENT_USER_KEY, &self.current_user) {
            tracing::warn!(%error, "failed to persist session user");
        }
    }
}
