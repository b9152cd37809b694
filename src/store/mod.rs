//! In-memory state for one resource collection.
//!
//! A store owns the last fetched list plus its loading and error flags. The
//! list is always a full snapshot from the service: it is replaced wholesale
//! on a successful refresh and never patched locally. Mutations go to the
//! service first and are followed by a refetch.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::model::Resource;
use crate::remote::ResourceClient;

#[cfg(test)]
pub(crate) mod testing;

/// Observable state of a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionState<R> {
    pub items: Vec<R>,
    pub loading: bool,
    /// Message of the last failed refresh
    pub error: Option<String>,
    /// Message of the last failed mutation
    pub action_error: Option<String>,
    pub submitting: bool,
}

impl<R> Default for CollectionState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            action_error: None,
            submitting: false,
        }
    }
}

impl<R> CollectionState<R> {
    /// Whether either the last refresh or the last mutation failed.
    pub fn has_failed(&self) -> bool {
        self.error.is_some() || self.action_error.is_some()
    }
}

/// A change to submit to the service.
pub enum Mutation<R: Resource> {
    Create(R::Draft),
    Update(String, R::Draft),
    Remove(String),
}

impl<R: Resource> Mutation<R> {
    fn verb(&self) -> &'static str {
        match self {
            Mutation::Create(_) => "create",
            Mutation::Update(..) => "update",
            Mutation::Remove(_) => "remove",
        }
    }
}

impl<R: Resource> fmt::Debug for Mutation<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::Create(draft) => f.debug_tuple("Create").field(draft).finish(),
            Mutation::Update(id, draft) => f.debug_tuple("Update").field(id).field(draft).finish(),
            Mutation::Remove(id) => f.debug_tuple("Remove").field(id).finish(),
        }
    }
}

/// Collection of `R` backed by a client `C`.
///
/// Refreshes may overlap. Each takes a request number, and only the response
/// to the most recently issued request is applied; older ones are dropped.
pub struct CollectionStore<R: Resource, C> {
    client: C,
    state: RwLock<CollectionState<R>>,
    latest_request: AtomicU64,
}

impl<R: Resource, C: fmt::Debug> fmt::Debug for CollectionStore<R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("CollectionStore")
            .field("resource", &R::LABEL)
            .field("client", &self.client)
            .field("items", &state.items.len())
            .field("loading", &state.loading)
            .field("error", &state.error)
            .field("action_error", &state.action_error)
            .finish()
    }
}

impl<R: Resource, C: ResourceClient<R>> CollectionStore<R, C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            state: RwLock::new(CollectionState::default()),
            latest_request: AtomicU64::new(0),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn snapshot(&self) -> CollectionState<R> {
        self.state.read().clone()
    }

    pub fn items(&self) -> Vec<R> {
        self.state.read().items.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn is_submitting(&self) -> bool {
        self.state.read().submitting
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    pub fn action_error(&self) -> Option<String> {
        self.state.read().action_error.clone()
    }

    /// Fetch the collection and replace the held list.
    ///
    /// On failure the error message is recorded and the previous items stay.
    pub async fn refresh(&self) {
        let request = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
        }
        debug!(resource = R::LABEL, request, "refreshing collection");

        let result = self.client.list().await;

        let mut state = self.state.write();
        if self.latest_request.load(Ordering::SeqCst) != request {
            warn!(resource = R::LABEL, request, "discarding stale list response");
            return;
        }

        state.loading = false;
        match result {
            Ok(items) => {
                debug!(resource = R::LABEL, request, count = items.len(), "collection loaded");
                state.items = items;
            }
            Err(err) => {
                warn!(resource = R::LABEL, request, error = %err, "failed to load collection");
                state.error = Some(err.user_message());
            }
        }
    }

    /// Submit a change, then refetch the collection on success.
    ///
    /// On failure the message is recorded as the action error and the held
    /// list is left as it was.
    pub async fn mutate(&self, mutation: Mutation<R>) {
        {
            let mut state = self.state.write();
            state.submitting = true;
            state.action_error = None;
        }

        let verb = mutation.verb();
        debug!(resource = R::LABEL, verb, "submitting change");

        let result = match &mutation {
            Mutation::Create(draft) => self.client.create(draft).await,
            Mutation::Update(id, draft) => self.client.update(id, draft).await,
            Mutation::Remove(id) => self.client.remove(id).await,
        };

        match result {
            Ok(()) => {
                self.state.write().submitting = false;
                info!(resource = R::LABEL, verb, "change accepted");
                self.refresh().await;
            }
            Err(err) => {
                warn!(resource = R::LABEL, verb, error = %err, "change rejected");
                let mut state = self.state.write();
                state.submitting = false;
                state.action_error = Some(err.user_message());
            }
        }
    }
}
