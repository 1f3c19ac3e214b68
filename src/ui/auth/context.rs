//! Session context shared by the auth pages and guards
//!
//! The context owns the tab's [`Session`] (store, change bus, route layout),
//! the HTTP client and the reactive bits the forms render from. It is
//! provided once by the root component.

use leptos::prelude::*;

use super::http::HttpAuthApi;
use crate::core::{ApiConfig, AuthFlows, Notice, RoutePaths, Session, UserSummary};
use crate::ui::notifications::NotificationManager;

#[derive(Clone)]
pub struct SessionContext {
    session: Session,
    api: HttpAuthApi,
    /// A flow is in flight; submit buttons stay disabled meanwhile
    pub loading: RwSignal<bool>,
    pub notifications: NotificationManager,
}

impl SessionContext {
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn paths(&self) -> &RoutePaths {
        self.session.paths()
    }

    pub fn flows(&self) -> AuthFlows<HttpAuthApi> {
        AuthFlows::new(self.api.clone(), self.session.clone())
    }

    /// Read straight from storage; not reactive
    pub fn current_user(&self) -> Option<UserSummary> {
        self.session.store().current_user()
    }

    /// Mark a flow as started
    ///
    /// Returns false when another one is still running, so a double click
    /// cannot send the same request twice.
    pub fn begin(&self) -> bool {
        if self.loading.get_untracked() {
            return false;
        }
        self.loading.set(true);
        true
    }

    pub fn finish(&self) {
        self.loading.set(false);
    }

    pub fn notify(&self, notice: Notice) {
        self.notifications.notify(notice);
    }
}

/// Build the context for this tab and provide it to the component tree
pub fn provide_session_context() -> SessionContext {
    let session = platform_session(RoutePaths::default());
    let api = HttpAuthApi::new(ApiConfig::from_build_env(), session.store().clone());

    let ctx = SessionContext {
        session,
        api,
        loading: RwSignal::new(false),
        notifications: NotificationManager::new(),
    };

    provide_context(ctx.clone());
    ctx
}

pub fn use_session_context() -> SessionContext {
    expect_context::<SessionContext>()
}

#[cfg(feature = "hydrate")]
fn platform_session(paths: RoutePaths) -> Session {
    super::browser::browser_session(paths)
}

// Server render: an empty in-memory tab, so every guard starts from a
// signed-out store and the client decides after hydration.
#[cfg(not(feature = "hydrate"))]
fn platform_session(paths: RoutePaths) -> Session {
    use crate::core::SharedStorage;

    Session::from_tab(SharedStorage::new().open_tab(), paths)
}
