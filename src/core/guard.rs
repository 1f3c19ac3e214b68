//! Route guard state machine
//!
//! `Loading -> {Allow, Deny}`. A guard evaluates the authentication predicate
//! synchronously when mounted. `RequireAuth` guards additionally listen on
//! the session change bus while mounted and re-evaluate on every relevant
//! change coming from another tab, so a stale `Allow` turns into `Deny` as
//! soon as the session disappears elsewhere. `RequireAnonymous` guards do not
//! listen: leaving the anonymous pages always goes through a flow that
//! navigates.

use std::sync::{Arc, Mutex, PoisonError};

use leptos::logging::log;

use crate::core::config::RoutePaths;
use crate::core::navigation::NavigationIntent;
use crate::core::session::{AuthState, Session, SessionStore, StorageChange, Subscription};

/// Which side of the login wall a route lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardPolicy {
    /// Render only for an authenticated session, else go to the login page
    RequireAuth,
    /// Render only without a session, else go to the dashboard
    RequireAnonymous,
}

impl GuardPolicy {
    /// Whether a mounted guard re-evaluates on cross-tab changes
    pub fn watches_bus(self) -> bool {
        matches!(self, GuardPolicy::RequireAuth)
    }

    pub fn decide(self, auth: &AuthState, current_path: &str, paths: &RoutePaths) -> GuardState {
        match (self, auth) {
            (_, AuthState::Unknown) => GuardState::Loading,
            (GuardPolicy::RequireAuth, AuthState::Authenticated(_)) => GuardState::Allow,
            (GuardPolicy::RequireAuth, AuthState::Unauthenticated) => GuardState::Deny(
                NavigationIntent::redirect(paths.login.clone()).preserving(current_path),
            ),
            (GuardPolicy::RequireAnonymous, AuthState::Authenticated(_)) => {
                GuardState::Deny(NavigationIntent::redirect(paths.dashboard.clone()))
            }
            (GuardPolicy::RequireAnonymous, AuthState::Unauthenticated) => GuardState::Allow,
        }
    }
}

/// What a guard renders
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GuardState {
    /// Not evaluated yet
    #[default]
    Loading,
    /// Render the child
    Allow,
    /// Render nothing and follow the intent
    Deny(NavigationIntent),
}

impl GuardState {
    pub fn redirect(&self) -> Option<&NavigationIntent> {
        match self {
            GuardState::Deny(intent) => Some(intent),
            GuardState::Loading | GuardState::Allow => None,
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardState::Allow)
    }
}

/// A guard for one route, before it is mounted
#[derive(Debug, Clone)]
pub struct RouteGuard {
    policy: GuardPolicy,
    current_path: String,
}

impl RouteGuard {
    pub fn new(policy: GuardPolicy, current_path: impl Into<String>) -> Self {
        Self {
            policy,
            current_path: current_path.into(),
        }
    }

    pub fn require_auth(current_path: impl Into<String>) -> Self {
        Self::new(GuardPolicy::RequireAuth, current_path)
    }

    pub fn require_anonymous(current_path: impl Into<String>) -> Self {
        Self::new(GuardPolicy::RequireAnonymous, current_path)
    }

    /// Run the predicate against the store right now
    pub fn evaluate(&self, store: &SessionStore, paths: &RoutePaths) -> GuardState {
        self.policy
            .decide(&store.auth_state(), &self.current_path, paths)
    }

    /// Mount the guard: evaluate once, then follow the bus if the policy
    /// asks for it
    ///
    /// `on_transition` runs for every later state change. The subscription
    /// lives as long as the returned [`MountedGuard`].
    pub fn mount<F>(self, session: &Session, on_transition: F) -> MountedGuard
    where
        F: Fn(&GuardState) + Send + Sync + 'static,
    {
        let store = session.store().clone();
        let paths = session.paths().clone();
        let state = Arc::new(Mutex::new(self.evaluate(&store, &paths)));

        let subscription = self.policy.watches_bus().then(|| {
            let state = Arc::clone(&state);
            let guard = self.clone();
            session.subscribe(Arc::new(move |change: &StorageChange| {
                let next = guard.evaluate(&store, &paths);
                let changed = {
                    let mut current = state.lock().unwrap_or_else(PoisonError::into_inner);
                    if *current == next {
                        false
                    } else {
                        *current = next.clone();
                        true
                    }
                };
                if changed {
                    log!(
                        "Guard on {} re-evaluated after change to {:?}: {:?}",
                        guard.current_path,
                        change.key,
                        next
                    );
                    on_transition(&next);
                }
            }))
        });

        MountedGuard {
            policy: self.policy,
            state,
            subscription,
        }
    }
}

/// A guard attached to the view tree; dropping it unmounts it
pub struct MountedGuard {
    policy: GuardPolicy,
    state: Arc<Mutex<GuardState>>,
    subscription: Option<Subscription>,
}

impl MountedGuard {
    pub fn state(&self) -> GuardState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether this guard holds a bus subscription
    pub fn is_listening(&self) -> bool {
        self.subscription.is_some()
    }
}

impl std::fmt::Debug for MountedGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MountedGuard")
            .field("policy", &self.policy)
            .field("state", &self.state())
            .field("listening", &self.is_listening())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::{SessionRecord, SharedStorage, UserSummary};

    fn signed_in() -> AuthState {
        AuthState::Authenticated(UserSummary::new("admin"))
    }

    #[test]
    fn test_require_auth_decisions() {
        let paths = RoutePaths::default();
        let policy = GuardPolicy::RequireAuth;

        assert_eq!(
            policy.decide(&AuthState::Unknown, "/admin/dashboard", &paths),
            GuardState::Loading
        );
        assert_eq!(
            policy.decide(&signed_in(), "/admin/dashboard", &paths),
            GuardState::Allow
        );
        assert_eq!(
            policy.decide(&AuthState::Unauthenticated, "/admin/dashboard", &paths),
            GuardState::Deny(NavigationIntent {
                target_path: "/admin/login".to_string(),
                replace: true,
                preserved_from: Some("/admin/dashboard".to_string()),
            })
        );
    }

    #[test]
    fn test_require_anonymous_decisions() {
        let paths = RoutePaths::default();
        let policy = GuardPolicy::RequireAnonymous;

        assert_eq!(
            policy.decide(&AuthState::Unauthenticated, "/admin/login", &paths),
            GuardState::Allow
        );
        assert_eq!(
            policy.decide(&signed_in(), "/admin/login", &paths),
            GuardState::Deny(NavigationIntent::redirect("/admin/dashboard"))
        );
    }

    #[test]
    fn test_only_require_auth_watches_bus() {
        assert!(GuardPolicy::RequireAuth.watches_bus());
        assert!(!GuardPolicy::RequireAnonymous.watches_bus());
    }

    #[test]
    fn test_mount_evaluates_synchronously() {
        let shared = SharedStorage::new();
        let session = Session::from_tab(shared.open_tab(), RoutePaths::default());

        let guard = RouteGuard::require_auth("/admin/dashboard").mount(&session, |_| {});

        assert_eq!(guard.state().redirect().map(|i| i.target_path.as_str()), Some("/admin/login"));
        assert!(guard.is_listening());
    }

    #[test]
    fn test_require_anonymous_does_not_subscribe() {
        let shared = SharedStorage::new();
        let tab = shared.open_tab();
        let session = Session::from_tab(tab.clone(), RoutePaths::default());

        let guard = RouteGuard::require_anonymous("/admin/login").mount(&session, |_| {});

        assert!(guard.state().is_allowed());
        assert!(!guard.is_listening());
        assert_eq!(tab.listener_count(), 0);
    }

    #[test]
    fn test_unmount_unsubscribes() {
        let shared = SharedStorage::new();
        let tab = shared.open_tab();
        let session = Session::from_tab(tab.clone(), RoutePaths::default());

        let guard = RouteGuard::require_auth("/admin/dashboard").mount(&session, |_| {});
        assert_eq!(tab.listener_count(), 1);

        drop(guard);
        assert_eq!(tab.listener_count(), 0);
    }

    #[test]
    fn test_bus_notification_denies_stale_allow() {
        let shared = SharedStorage::new();
        let tab_a = Session::from_tab(shared.open_tab(), RoutePaths::default());
        let tab_b = Session::from_tab(shared.open_tab(), RoutePaths::default());
        tab_a
            .store()
            .set(&SessionRecord::new("jwt", UserSummary::new("admin")))
            .unwrap();

        let transitions = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&transitions);
        let guard_b = RouteGuard::require_auth("/admin/dashboard")
            .mount(&tab_b, move |state| sink.lock().unwrap().push(state.clone()));
        assert!(guard_b.state().is_allowed());

        tab_a.store().clear();

        assert!(guard_b.state().redirect().is_some());
        // token removal flips the predicate; the later removals change nothing
        assert_eq!(transitions.lock().unwrap().len(), 1);
    }
}
