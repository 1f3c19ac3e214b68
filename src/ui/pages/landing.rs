//! Public landing page

use leptos::prelude::*;
use leptos_router::components::A;

use crate::ui::auth::use_session_context;

#[component]
pub fn LandingPage() -> impl IntoView {
    let paths = use_session_context().paths().clone();

    view! {
        <div class="landing-page">
            <header class="site-header">
                <span class="site-logo">"Portfolio"</span>
                <nav class="site-nav">
                    <A href=paths.login.clone() attr:class="nav-link">"Admin"</A>
                </nav>
            </header>
            <main class="landing-hero">
                <h1 class="landing-title">"Projects, clients and news in one place"</h1>
                <p class="landing-subtitle">
                    "Administrators sign in to manage the portfolio content."
                </p>
                <A href=paths.login attr:class="btn-primary">"Go to admin"</A>
            </main>
        </div>
    }
}
