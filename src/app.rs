use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::{NavigateOptions, path};

use crate::ui::{
    DashboardPage, LandingPage, LoginPage, NotificationsContainer, RegisterPage,
    RequireAnonymous, RequireAuth, provide_session_context,
};

fn replace() -> NavigateOptions {
    NavigateOptions {
        replace: true,
        ..Default::default()
    }
}

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    // Session store, change bus and notifications for every page
    let session_ctx = provide_session_context();
    let notifications = session_ctx.notifications.notifications();

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/portfolio-admin.css"/>
        <Title text="Portfolio Admin"/>

        <Router>
            // unknown paths go back to the landing page
            <Routes fallback=|| view! { <Redirect path="/" options=replace() /> }>
                <Route path=path!("/") view=LandingPage />
                <Route
                    path=path!("/admin/login")
                    view=|| view! { <RequireAnonymous><LoginPage /></RequireAnonymous> }
                />
                <Route
                    path=path!("/admin/register")
                    view=|| view! { <RequireAnonymous><RegisterPage /></RequireAnonymous> }
                />
                <Route
                    path=path!("/admin/dashboard")
                    view=|| view! { <RequireAuth><DashboardPage /></RequireAuth> }
                />
            </Routes>
        </Router>

        <NotificationsContainer notifications=notifications />
    }
}
