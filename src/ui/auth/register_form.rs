//! Admin registration form
//!
//! Local checks and server-reported field errors share the same per-field
//! slots. Registering logs the new admin in straight away.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use super::context::use_session_context;
use crate::core::{AuthError, FieldErrors, FormField, Notice, RegistrationForm};
use crate::ui::common::{InlineSpinner, InputField};

#[component]
pub fn RegisterForm() -> impl IntoView {
    let ctx = use_session_context();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let loading = ctx.loading;
    let login_path = ctx.paths().login.clone();

    let error_for = move |field: FormField| {
        Signal::derive(move || errors.with(|e| e.get(field).map(str::to_string)))
    };

    // typing into a field clears its error
    let input_for = move |field: FormField, value: RwSignal<String>| {
        Callback::new(move |next: String| {
            value.set(next);
            if errors.with_untracked(|e| e.get(field).is_some()) {
                errors.update(|e| e.clear_field(field));
            }
        })
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let form = RegistrationForm {
            username: username.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };

        // fail fast without a round trip
        let local = form.validate();
        if !local.is_empty() {
            errors.set(local);
            return;
        }
        if !ctx.begin() {
            return;
        }
        errors.set(FieldErrors::new());

        let ctx = ctx.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = ctx.flows().register(&form).await;
            ctx.finish();

            match result {
                Ok(intent) => {
                    ctx.notify(Notice::success(
                        "Welcome",
                        "Registration successful! You are now logged in.",
                    ));
                    navigate(
                        &intent.href(),
                        NavigateOptions {
                            replace: intent.replace,
                            ..Default::default()
                        },
                    );
                }
                Err(AuthError::Validation(field_errors)) => {
                    ctx.notify(Notice::error("Registration failed", "Please check the form for errors"));
                    errors.set(field_errors);
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
                <h2 class="auth-title">"Admin Registration"</h2>
                <p class="auth-subtitle">"Create your admin account"</p>
            </div>

            {move || errors.with(|e| {
                (!e.general().is_empty()).then(|| {
                    let message = e.general().join(" ");
                    view! { <div class="form-alert" role="alert">{message}</div> }
                })
            })}

            <InputField
                id="username"
                label="Username *"
                autocomplete="username"
                placeholder="Enter username"
                value=username
                on_input=input_for(FormField::Username, username)
                disabled=loading
                error=error_for(FormField::Username)
            />

            <InputField
                id="email"
                label="Email *"
                input_type="email"
                autocomplete="email"
                placeholder="Enter email"
                value=email
                on_input=input_for(FormField::Email, email)
                disabled=loading
                error=error_for(FormField::Email)
            />

            <InputField
                id="password"
                label="Password *"
                input_type="password"
                autocomplete="new-password"
                placeholder="Enter password (min 6 characters)"
                value=password
                on_input=input_for(FormField::Password, password)
                disabled=loading
                error=error_for(FormField::Password)
            />

            <InputField
                id="confirm_password"
                label="Confirm Password *"
                input_type="password"
                autocomplete="new-password"
                placeholder="Confirm password"
                value=confirm_password
                on_input=input_for(FormField::ConfirmPassword, confirm_password)
                disabled=loading
                error=error_for(FormField::ConfirmPassword)
            />

            <button type="submit" class="btn-primary" disabled=move || loading.get()>
                {move || if loading.get() {
                    view! { <span class="btn-busy"><InlineSpinner />"Creating account..."</span> }.into_any()
                } else {
                    view! { <span>"Register"</span> }.into_any()
                }}
            </button>

            <p class="auth-switch">
                "Already have an account? "
                <A href=login_path>"Login here"</A>
            </p>

            <div class="auth-note">
                <strong>"Note: "</strong>
                "First admin registration is open. Subsequent registrations require existing admin privileges."
            </div>
        </form>
    }
}
