//! In-memory storage area with browser-like cross-tab semantics
//!
//! One [`SharedStorage`] plays the role of an origin's `localStorage`; each
//! [`TabStorage`] is one open tab. A mutation made through a tab is announced
//! on the bus of every *other* tab, never on the writer's own bus, and only
//! when the stored value actually changed. Used by the test-suite and as the
//! store behind server-side rendering.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use super::bus::{ListenerRegistry, SessionChangeBus, StorageChange};
use super::store::StorageArea;
use crate::core::error::StorageError;

#[derive(Default)]
struct SharedInner {
    entries: Mutex<HashMap<String, String>>,
    tabs: Mutex<Vec<Weak<ListenerRegistry>>>,
}

/// Key/value area shared by every tab of one origin
#[derive(Clone, Default)]
pub struct SharedStorage {
    inner: Arc<SharedInner>,
}

impl SharedStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new tab on this origin
    pub fn open_tab(&self) -> TabStorage {
        let bus = Arc::new(ListenerRegistry::new());
        self.inner
            .tabs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::downgrade(&bus));
        TabStorage {
            shared: self.clone(),
            bus,
        }
    }

    /// Write an entry without notifying anyone, as if it predated every tab
    pub fn seed(&self, key: &str, value: &str) {
        self.entries().insert(key.to_string(), value.to_string());
    }

    /// Read an entry directly, bypassing any tab
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Announce a change to every live tab except `origin`
    fn notify_others(&self, origin: &Arc<ListenerRegistry>, change: &StorageChange) {
        let targets: Vec<Arc<ListenerRegistry>> = {
            let mut tabs = self
                .inner
                .tabs
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            tabs.retain(|tab| tab.strong_count() > 0);
            tabs.iter()
                .filter_map(Weak::upgrade)
                .filter(|tab| !Arc::ptr_eq(tab, origin))
                .collect()
        };

        for tab in targets {
            tab.dispatch(change);
        }
    }
}

/// One tab's view of a [`SharedStorage`]
#[derive(Clone)]
pub struct TabStorage {
    shared: SharedStorage,
    bus: Arc<ListenerRegistry>,
}

impl TabStorage {
    /// Change bus of this tab
    pub fn bus(&self) -> Arc<dyn SessionChangeBus> {
        self.bus.clone()
    }

    /// Number of guards currently listening in this tab
    pub fn listener_count(&self) -> usize {
        self.bus.len()
    }

    /// Wipe the whole area from this tab, like `localStorage.clear()`
    pub fn clear_all(&self) {
        let had_entries = {
            let mut entries = self.shared.entries();
            let had_entries = !entries.is_empty();
            entries.clear();
            had_entries
        };
        if had_entries {
            self.shared
                .notify_others(&self.bus, &StorageChange::cleared());
        }
    }
}

impl StorageArea for TabStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.shared.peek(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let previous = self
            .shared
            .entries()
            .insert(key.to_string(), value.to_string());

        if previous.as_deref() != Some(value) {
            self.shared
                .notify_others(&self.bus, &StorageChange::key(key));
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let removed = self.shared.entries().remove(key);

        if removed.is_some() {
            self.shared
                .notify_others(&self.bus, &StorageChange::key(key));
        }
        Ok(())
    }
}
