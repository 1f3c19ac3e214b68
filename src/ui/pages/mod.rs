//! Application pages
//!
//! - Landing page (public)
//! - Login and register pages (anonymous only)
//! - Dashboard (authenticated only)

mod dashboard;
mod landing;
mod login;
mod register;

pub use dashboard::DashboardPage;
pub use landing::LandingPage;
pub use login::LoginPage;
pub use register::RegisterPage;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::ui::auth::use_session_context;

/// Centered card with the site header, shared by the login and register pages
#[component]
fn AuthLayout(children: Children) -> impl IntoView {
    let home = use_session_context().paths().root.clone();

    view! {
        <div class="auth-page">
            <header class="site-header">
                <A href=home attr:class="site-logo">"Portfolio"</A>
            </header>
            <main class="auth-card">
                {children()}
            </main>
        </div>
    }
}
