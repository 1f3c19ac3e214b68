//! Session authority for the admin area
//!
//! Everything in here is platform independent: the persisted credential
//! record, the authentication predicate, the cross-tab change bus, the route
//! guard state machine and the login/logout/register flows. The browser
//! bindings live in `crate::ui`.

pub mod api;
pub mod config;
pub mod error;
pub mod flows;
pub mod guard;
pub mod navigation;
pub mod notice;
pub mod session;
pub mod validation;

pub use api::{ApiError, AuthApi, Credentials, LoginResponse, RegisterRequest, authorization_header};
pub use config::{ApiConfig, RoutePaths};
pub use error::{AuthError, StorageError};
pub use flows::AuthFlows;
pub use guard::{GuardPolicy, GuardState, MountedGuard, RouteGuard};
pub use navigation::NavigationIntent;
pub use notice::{Notice, NoticeKind};
pub use session::{
    AuthState, ListenerRegistry, Session, SessionChangeBus, SessionRecord, SessionStore,
    SharedStorage, StorageArea, StorageChange, Subscription, TabStorage, UserSummary,
};
pub use validation::{FieldErrors, FormField, RegistrationForm};
