//! Register page
//!
//! Opening the page discards a token left behind without a matching user,
//! so a half-written session cannot trap the visitor between redirects.

use leptos::prelude::*;

use super::AuthLayout;
use crate::ui::auth::{RegisterForm, use_session_context};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let ctx = use_session_context();

    // client only; the server render has no storage to clean
    Effect::new(move |_| {
        ctx.session().discard_partial_session();
    });

    view! {
        <AuthLayout>
            <RegisterForm />
        </AuthLayout>
    }
}
