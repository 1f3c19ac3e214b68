pub mod auth;
pub mod common;
pub mod notifications;
pub mod pages;

pub use auth::{
    RequireAnonymous, RequireAuth, SessionContext, provide_session_context, use_session_context,
};
pub use notifications::{NotificationManager, NotificationsContainer};
pub use pages::{DashboardPage, LandingPage, LoginPage, RegisterPage};
