//! Admin dashboard shell
//!
//! The content managers live outside this crate; the page greets the
//! signed-in admin and offers the logout action.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::core::Notice;
use crate::ui::auth::use_session_context;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_session_context();
    let navigate = use_navigate();

    let display_name = ctx
        .current_user()
        .map(|user| user.display_name())
        .unwrap_or_else(|| "Admin".to_string());

    let on_logout = move |_| {
        let intent = ctx.flows().logout();
        ctx.notify(Notice::info("Signed out", "You have been logged out."));
        navigate(
            &intent.href(),
            NavigateOptions {
                replace: intent.replace,
                ..Default::default()
            },
        );
    };

    view! {
        <div class="dashboard-page">
            <header class="site-header">
                <span class="site-logo">"Portfolio Admin"</span>
                <div class="user-menu">
                    <span class="user-name">{display_name.clone()}</span>
                    <button type="button" class="btn-secondary" on:click=on_logout>
                        "Logout"
                    </button>
                </div>
            </header>
            <main class="dashboard-main">
                <h1 class="dashboard-title">"Welcome, " {display_name}</h1>
                <p class="dashboard-subtitle">
                    "Manage projects, clients, contact messages and subscribers."
                </p>
            </main>
        </div>
    }
}
