//! Login page

use leptos::prelude::*;

use super::AuthLayout;
use crate::ui::auth::LoginForm;

#[component]
pub fn LoginPage() -> impl IntoView {
    view! {
        <AuthLayout>
            <LoginForm />
        </AuthLayout>
    }
}
