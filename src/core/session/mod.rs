//! Session state: persisted record, predicate, store and change bus

mod bus;
mod memory;
mod record;
mod state;
mod store;

use std::sync::Arc;

use leptos::logging::log;

pub use bus::{
    ListenerRegistry, SessionChangeBus, SessionListener, StorageChange, Subscription,
    SubscriptionId,
};
pub use memory::{SharedStorage, TabStorage};
pub use record::{
    REFRESH_TOKEN_KEY, SessionRecord, TOKEN_KEY, USER_KEY, UserSummary, is_sentinel,
};
pub use state::AuthState;
pub use store::{SessionStore, StorageArea};

use crate::core::config::RoutePaths;

/// Everything a guard or flow needs: the store, this tab's change bus and
/// the route layout
///
/// Injected instead of read from globals, so tests can run several "tabs"
/// against one in-memory origin.
#[derive(Clone)]
pub struct Session {
    store: SessionStore,
    bus: Arc<dyn SessionChangeBus>,
    paths: RoutePaths,
}

impl Session {
    pub fn new(
        area: Arc<dyn StorageArea>,
        bus: Arc<dyn SessionChangeBus>,
        paths: RoutePaths,
    ) -> Self {
        Self {
            store: SessionStore::new(area),
            bus,
            paths,
        }
    }

    /// Session bound to one tab of an in-memory origin
    pub fn from_tab(tab: TabStorage, paths: RoutePaths) -> Self {
        let bus = tab.bus();
        Self::new(Arc::new(tab), bus, paths)
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn bus(&self) -> Arc<dyn SessionChangeBus> {
        Arc::clone(&self.bus)
    }

    pub fn paths(&self) -> &RoutePaths {
        &self.paths
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.is_authenticated()
    }

    /// Listen for relevant changes made by other tabs
    pub fn subscribe(&self, listener: SessionListener) -> Subscription {
        Subscription::new(self.bus(), listener)
    }

    /// Clear a token that is not backed by a complete session
    ///
    /// Returns true if anything was removed.
    pub fn discard_partial_session(&self) -> bool {
        if self.store.has_token_entry() && !self.store.is_authenticated() {
            log!("Discarding incomplete session record");
            self.store.clear();
            true
        } else {
            false
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("paths", &self.paths)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discard_partial_session_clears_orphan_token() {
        let shared = SharedStorage::new();
        shared.seed(TOKEN_KEY, "orphan");
        shared.seed(REFRESH_TOKEN_KEY, "refresh");
        let session = Session::from_tab(shared.open_tab(), RoutePaths::default());

        assert!(session.discard_partial_session());
        assert!(shared.is_empty());
    }

    #[test]
    fn test_discard_partial_session_keeps_complete_session() {
        let shared = SharedStorage::new();
        let session = Session::from_tab(shared.open_tab(), RoutePaths::default());
        session
            .store()
            .set(&SessionRecord::new("jwt", UserSummary::new("admin")))
            .unwrap();

        assert!(!session.discard_partial_session());
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_discard_partial_session_noop_when_empty() {
        let shared = SharedStorage::new();
        let session = Session::from_tab(shared.open_tab(), RoutePaths::default());

        assert!(!session.discard_partial_session());
    }
}
