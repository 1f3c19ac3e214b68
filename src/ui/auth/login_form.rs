//! Admin login form
//!
//! A rejected password is shown inline above the fields; transport failures
//! go to a toast. After a successful login the browser returns to the page
//! named by `?from=`, or to the dashboard.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_query_map};

use super::context::use_session_context;
use crate::core::navigation::FROM_PARAM;
use crate::core::{AuthError, Credentials, Notice};
use crate::ui::common::{InlineSpinner, InputField};

const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

#[component]
pub fn LoginForm() -> impl IntoView {
    let ctx = use_session_context();
    let query = use_query_map();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let loading = ctx.loading;
    let register_path = ctx.paths().register.clone();

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if !ctx.begin() {
            return;
        }
        error.set(None);

        let credentials = Credentials::new(username.get_untracked(), password.get_untracked());
        let from = query.with_untracked(|params| params.get(FROM_PARAM));
        let ctx = ctx.clone();
        let navigate = navigate.clone();

        spawn_local(async move {
            let result = ctx.flows().login(&credentials, from.as_deref()).await;
            ctx.finish();

            match result {
                Ok(intent) => {
                    ctx.notify(Notice::success("Welcome back", "Login successful!"));
                    navigate(
                        &intent.href(),
                        NavigateOptions {
                            replace: intent.replace,
                            ..Default::default()
                        },
                    );
                }
                Err(AuthError::InvalidCredentials) => {
                    password.set(String::new());
                    error.set(Some(INVALID_CREDENTIALS_MESSAGE.to_string()));
                }
                Err(err) => {
                    if let Some(notice) = Notice::for_auth_error(&err) {
                        ctx.notify(notice);
                    }
                }
            }
        });
    };

    view! {
        <form class="auth-form" on:submit=on_submit novalidate=true>
            <div class="auth-header">
                <h2 class="auth-title">"Admin Login"</h2>
                <p class="auth-subtitle">"Access your portfolio dashboard"</p>
            </div>

            {move || error.get().map(|message| view! {
                <div class="form-alert" role="alert">{message}</div>
            })}

            <InputField
                id="username"
                label="Username"
                autocomplete="username"
                placeholder="Enter your username"
                value=username
                on_input=Callback::new(move |value| {
                    username.set(value);
                    error.set(None);
                })
                disabled=loading
            />

            <InputField
                id="password"
                label="Password"
                input_type="password"
                autocomplete="current-password"
                placeholder="Enter your password"
                value=password
                on_input=Callback::new(move |value| {
                    password.set(value);
                    error.set(None);
                })
                disabled=loading
            />

            <button type="submit" class="btn-primary" disabled=move || loading.get()>
                {move || if loading.get() {
                    view! { <span class="btn-busy"><InlineSpinner />"Signing in..."</span> }.into_any()
                } else {
                    view! { <span>"Sign in"</span> }.into_any()
                }}
            </button>

            <p class="auth-switch">
                "Don't have an account? "
                <A href=register_path>"Register here"</A>
            </p>
        </form>
    }
}
