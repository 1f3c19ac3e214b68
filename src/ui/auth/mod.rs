//! Authentication UI
//!
//! Session context, the route guards and the login/register forms.

#[cfg(feature = "hydrate")]
mod browser;
mod context;
mod guards;
mod http;
mod login_form;
mod register_form;

pub use context::{SessionContext, provide_session_context, use_session_context};
pub use guards::{RequireAnonymous, RequireAuth};
pub use http::HttpAuthApi;
pub use login_form::LoginForm;
pub use register_form::RegisterForm;
