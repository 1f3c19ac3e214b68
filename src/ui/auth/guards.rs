//! Route guard components
//!
//! Both wrappers share [`use_route_guard`]: the guard is mounted after
//! hydration (the server never sees the browser's storage), its state lives
//! in a signal, and a denial turns into a router navigation.

use leptos::logging::log;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use super::context::use_session_context;
use crate::core::{GuardPolicy, GuardState, RouteGuard};
use crate::ui::common::LoadingSpinner;

/// Mount a guard for the current route and follow its decisions
fn use_route_guard(policy: GuardPolicy) -> RwSignal<GuardState> {
    let ctx = use_session_context();
    let location = use_location();
    let navigate = use_navigate();
    let state = RwSignal::new(GuardState::Loading);

    Effect::new(move |_| {
        let current_path = location.pathname.get_untracked();
        let mounted = RouteGuard::new(policy, current_path).mount(ctx.session(), move |next| {
            // the component may already be gone when another tab writes
            let _ = state.try_set(next.clone());
        });
        state.set(mounted.state());

        // unsubscribes from the change bus on unmount
        on_cleanup(move || drop(mounted));
    });

    Effect::new(move |_| {
        if let GuardState::Deny(intent) = state.get() {
            let href = intent.href();
            log!("Route guard redirecting to {}", href);
            navigate(
                &href,
                NavigateOptions {
                    replace: intent.replace,
                    ..Default::default()
                },
            );
        }
    });

    state
}

/// Render `children` only for an authenticated session
///
/// Shows a spinner until the first check ran, then either the children or a
/// redirect to the login page carrying `?from=<current path>`. Keeps
/// listening to other tabs while mounted, so a logout elsewhere sends this
/// tab to the login page too.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let state = use_route_guard(GuardPolicy::RequireAuth);

    move || match state.get() {
        GuardState::Loading => view! { <LoadingSpinner message="Loading...".to_string() /> }.into_any(),
        GuardState::Allow => children().into_any(),
        GuardState::Deny(_) => ().into_any(),
    }
}

/// Render `children` only when nobody is signed in
///
/// Used by the login and register pages; a signed-in visitor is sent to the
/// dashboard. Evaluated once per mount.
#[component]
pub fn RequireAnonymous(children: ChildrenFn) -> impl IntoView {
    let state = use_route_guard(GuardPolicy::RequireAnonymous);

    move || match state.get() {
        GuardState::Allow => children().into_any(),
        GuardState::Loading | GuardState::Deny(_) => ().into_any(),
    }
}
