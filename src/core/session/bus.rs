//! Session change bus
//!
//! Cross-tab notification channel. A write to the shared storage area in one
//! tab produces a [`StorageChange`] in every other tab; the bus filters those
//! down to the keys that affect authentication and fans them out to the
//! mounted guards. The notification carries no value: listeners re-read the
//! store, so the last evaluation always reflects the latest persisted record.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use super::record::{TOKEN_KEY, USER_KEY};

/// A storage mutation observed from another execution context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageChange {
    /// Key that changed; `None` when the whole area was cleared
    pub key: Option<String>,
}

impl StorageChange {
    pub fn new(key: Option<String>) -> Self {
        Self { key }
    }

    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
        }
    }

    pub fn cleared() -> Self {
        Self { key: None }
    }

    /// Whether this change can flip the authentication predicate
    pub fn touches_session(&self) -> bool {
        match self.key.as_deref() {
            None => true,
            Some(key) => key == TOKEN_KEY || key == USER_KEY,
        }
    }
}

/// Identifier returned by [`SessionChangeBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Callback invoked on every relevant storage change
pub type SessionListener = Arc<dyn Fn(&StorageChange) + Send + Sync>;

/// Subscribe/unsubscribe surface used by the route guards
pub trait SessionChangeBus: Send + Sync {
    fn subscribe(&self, listener: SessionListener) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId);
}

/// Listener set shared by every bus implementation
///
/// Platform code (the browser `storage` event, the in-memory tab fake) only
/// has to call [`ListenerRegistry::dispatch`].
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: AtomicU64,
    listeners: Mutex<Vec<(SubscriptionId, SessionListener)>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a change to every listener, returns how many were notified
    ///
    /// Irrelevant keys are dropped here. Listeners run outside the lock so
    /// they may subscribe or unsubscribe while being notified.
    pub fn dispatch(&self, change: &StorageChange) -> usize {
        if !change.touches_session() {
            return 0;
        }

        let listeners: Vec<SessionListener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in &listeners {
            listener(change);
        }
        listeners.len()
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionChangeBus for ListenerRegistry {
    fn subscribe(&self, listener: SessionListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(existing, _)| *existing != id);
    }
}

/// RAII subscription, unsubscribes when dropped
pub struct Subscription {
    bus: Arc<dyn SessionChangeBus>,
    id: SubscriptionId,
}

impl Subscription {
    pub fn new(bus: Arc<dyn SessionChangeBus>, listener: SessionListener) -> Self {
        let id = bus.subscribe(listener);
        Self { bus, id }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.id);
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counting_listener(counter: &Arc<AtomicUsize>) -> SessionListener {
        let counter = Arc::clone(counter);
        Arc::new(move |_: &StorageChange| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_relevant_keys() {
        assert!(StorageChange::key("token").touches_session());
        assert!(StorageChange::key("user").touches_session());
        assert!(StorageChange::cleared().touches_session());
        assert!(!StorageChange::key("refresh_token").touches_session());
        assert!(!StorageChange::key("color-scheme").touches_session());
    }

    #[test]
    fn test_dispatch_filters_irrelevant_keys() {
        let registry = ListenerRegistry::new();
        let counter = Arc::new(AtomicUsize::new(0));
        registry.subscribe(counting_listener(&counter));

        assert_eq!(registry.dispatch(&StorageChange::key("refresh_token")), 0);
        assert_eq!(registry.dispatch(&StorageChange::key("token")), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscription_drop_unsubscribes() {
        let registry: Arc<ListenerRegistry> = Arc::new(ListenerRegistry::new());
        let counter = Arc::new(AtomicUsize::new(0));

        let subscription = Subscription::new(registry.clone(), counting_listener(&counter));
        assert_eq!(registry.len(), 1);
        registry.dispatch(&StorageChange::key("user"));

        drop(subscription);
        assert!(registry.is_empty());
        registry.dispatch(&StorageChange::key("user"));

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_listener_may_unsubscribe_itself() {
        let registry = Arc::new(ListenerRegistry::new());
        let slot: Arc<Mutex<Option<SubscriptionId>>> = Arc::new(Mutex::new(None));

        let listener: SessionListener = {
            let registry = Arc::clone(&registry);
            let slot = Arc::clone(&slot);
            Arc::new(move |_: &StorageChange| {
                if let Some(id) = slot.lock().unwrap().take() {
                    registry.unsubscribe(id);
                }
            })
        };
        let id = registry.subscribe(listener);
        *slot.lock().unwrap() = Some(id);

        assert_eq!(registry.dispatch(&StorageChange::cleared()), 1);
        assert!(registry.is_empty());
    }
}
