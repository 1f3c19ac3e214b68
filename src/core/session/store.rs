//! Session store
//!
//! Typed get/set/clear over a tab-shared key/value [`StorageArea`].

use std::sync::Arc;

use leptos::logging::warn;

use super::record::{REFRESH_TOKEN_KEY, SessionRecord, TOKEN_KEY, USER_KEY, UserSummary};
use super::state::AuthState;
use crate::core::error::StorageError;

/// Durable string key/value area shared by every tab of the origin
///
/// Implemented by `localStorage` in the browser and by [`super::TabStorage`]
/// in tests and on the server.
pub trait StorageArea: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Reads and writes the [`SessionRecord`]
#[derive(Clone)]
pub struct SessionStore {
    area: Arc<dyn StorageArea>,
}

impl SessionStore {
    pub fn new(area: Arc<dyn StorageArea>) -> Self {
        Self { area }
    }

    /// Read the three fields independently; failures read as absent
    pub fn get(&self) -> SessionRecord {
        SessionRecord {
            access_token: self.read(TOKEN_KEY),
            refresh_token: self.read(REFRESH_TOKEN_KEY),
            user: self
                .read(USER_KEY)
                .and_then(|raw| UserSummary::from_stored(&raw)),
        }
    }

    /// Write the fields present in `record`
    ///
    /// The user goes in before the token, so a reader never sees a token
    /// without its user.
    pub fn set(&self, record: &SessionRecord) -> Result<(), StorageError> {
        if let Some(user) = &record.user {
            self.area.set_item(USER_KEY, &user.to_stored())?;
        }
        if let Some(refresh) = &record.refresh_token {
            self.area.set_item(REFRESH_TOKEN_KEY, refresh)?;
        }
        if let Some(token) = &record.access_token {
            self.area.set_item(TOKEN_KEY, token)?;
        }
        Ok(())
    }

    /// Remove all three fields
    ///
    /// The token goes first: from that point on the predicate is false, so no
    /// partially cleared record ever reads as authenticated. Every removal is
    /// attempted even if an earlier one fails.
    pub fn clear(&self) {
        for key in [TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.area.remove_item(key) {
                warn!("Failed to remove {} from session storage: {}", key, e);
            }
        }
    }

    /// Authentication predicate over the current contents
    pub fn is_authenticated(&self) -> bool {
        self.get().is_authenticated()
    }

    pub fn auth_state(&self) -> AuthState {
        AuthState::derive(&self.get())
    }

    pub fn current_user(&self) -> Option<UserSummary> {
        self.auth_state().into_user()
    }

    /// Whether a token entry exists at all, usable or not
    pub fn has_token_entry(&self) -> bool {
        self.read(TOKEN_KEY).is_some()
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.area.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read {} from session storage: {}", key, e);
                None
            }
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::SharedStorage;

    fn store() -> (SharedStorage, SessionStore) {
        let shared = SharedStorage::new();
        let store = SessionStore::new(Arc::new(shared.open_tab()));
        (shared, store)
    }

    #[test]
    fn test_get_on_empty_store_is_all_absent() {
        let (_shared, store) = store();
        assert!(store.get().is_empty());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_set_then_get_round_trips_the_record() {
        let (shared, store) = store();
        let record = SessionRecord::new("access", UserSummary::new("admin"))
            .with_refresh_token("refresh");

        store.set(&record).unwrap();

        assert_eq!(store.get(), record);
        assert_eq!(shared.peek("token").as_deref(), Some("access"));
        assert_eq!(shared.peek("refresh_token").as_deref(), Some("refresh"));
        assert!(shared.peek("user").unwrap().contains("\"admin\""));
    }

    #[test]
    fn test_partial_set_keeps_other_fields() {
        let (shared, store) = store();
        shared.seed("refresh_token", "old-refresh");

        store
            .set(&SessionRecord::new("access", UserSummary::new("admin")))
            .unwrap();

        assert_eq!(store.get().refresh_token.as_deref(), Some("old-refresh"));
    }

    #[test]
    fn test_clear_removes_all_fields() {
        let (_shared, store) = store();
        store
            .set(&SessionRecord::new("a", UserSummary::new("u")).with_refresh_token("r"))
            .unwrap();

        store.clear();

        assert!(store.get().is_empty());
        assert!(!store.has_token_entry());
    }

    #[test]
    fn test_corrupt_user_entry_reads_as_absent() {
        let (shared, store) = store();
        shared.seed("token", "abc");
        shared.seed("user", "undefined");

        let record = store.get();
        assert_eq!(record.access_token.as_deref(), Some("abc"));
        assert!(record.user.is_none());
        assert!(!store.is_authenticated());
        assert!(store.has_token_entry());
    }
}
