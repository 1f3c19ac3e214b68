//! Login, logout and register orchestration
//!
//! Every flow finishes its session-store write before it returns the
//! navigation intent, so a guard evaluated right after navigating always sees
//! the new record. Failures never touch the store.

use leptos::logging::{log, warn};

use crate::core::api::{ApiError, AuthApi, Credentials, RegisterRequest};
use crate::core::error::AuthError;
use crate::core::navigation::{NavigationIntent, post_login_target};
use crate::core::session::Session;
use crate::core::validation::{FieldErrors, RegistrationForm};

/// Notice shown when the server refuses a registration
pub const REGISTRATION_FORBIDDEN_MESSAGE: &str =
    "Only existing admins can create new admin accounts";

/// Flows bound to one API client and one session
#[derive(Clone)]
pub struct AuthFlows<A> {
    api: A,
    session: Session,
}

impl<A: AuthApi> AuthFlows<A> {
    pub fn new(api: A, session: Session) -> Self {
        Self { api, session }
    }

    /// Authenticate and persist the session
    ///
    /// On success the intent points at `preserved_from` when it is a safe
    /// internal path, otherwise at the dashboard.
    pub async fn login(
        &self,
        credentials: &Credentials,
        preserved_from: Option<&str>,
    ) -> Result<NavigationIntent, AuthError> {
        let response = self.api.login(credentials).await.map_err(|err| {
            warn!("Login for {} failed: {}", credentials.username, err);
            login_error(err)
        })?;

        let record = response.into_record();
        if let Err(e) = self.session.store().set(&record) {
            // do not leave half a session behind
            self.session.store().clear();
            return Err(e.into());
        }
        log!("Logged in as {}", credentials.username);

        let target = post_login_target(preserved_from, self.session.paths());
        Ok(NavigationIntent::redirect(target))
    }

    /// Drop the local session; always succeeds
    pub fn logout(&self) -> NavigationIntent {
        self.session.store().clear();
        log!("Logged out");
        NavigationIntent::push(self.session.paths().login.clone())
    }

    /// Validate, register, then log in with the same credentials
    pub async fn register(&self, form: &RegistrationForm) -> Result<NavigationIntent, AuthError> {
        let errors = form.validate();
        if !errors.is_empty() {
            return Err(AuthError::Validation(errors));
        }

        let request = RegisterRequest {
            username: form.username.clone(),
            email: form.email.clone(),
            password: form.password.clone(),
            confirm_password: form.confirm_password.clone(),
        };
        self.api.register(&request).await.map_err(|err| {
            warn!("Registration for {} failed: {}", form.username, err);
            register_error(err)
        })?;
        log!("Registered {}", form.username);

        // the account exists, so a rejected sign-in is a server fault
        let credentials = Credentials::new(form.username.clone(), form.password.clone());
        self.login(&credentials, None).await.map_err(|err| match err {
            AuthError::InvalidCredentials => {
                AuthError::Unavailable("Sign-in after registration was rejected".to_string())
            }
            other => other,
        })
    }

    /// Ask the server whether the stored token is still accepted
    ///
    /// Not used by the guards.
    pub async fn verify(&self) -> Result<(), AuthError> {
        self.api.verify_token().await.map_err(login_error)
    }
}

fn login_error(err: ApiError) -> AuthError {
    match err.status() {
        Some(401) => AuthError::InvalidCredentials,
        _ => AuthError::Unavailable(err.to_string()),
    }
}

fn register_error(err: ApiError) -> AuthError {
    match &err {
        ApiError::Status { status: 403, .. } => AuthError::RegistrationForbidden(
            err.server_message()
                .unwrap_or_else(|| REGISTRATION_FORBIDDEN_MESSAGE.to_string()),
        ),
        ApiError::Status {
            status: 400,
            body: Some(body),
        } => {
            let errors = FieldErrors::from_server(body);
            if errors.is_empty() {
                AuthError::Unavailable(err.to_string())
            } else {
                AuthError::Validation(errors)
            }
        }
        _ => AuthError::Unavailable(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_error_mapping() {
        let unauthorized = ApiError::Status {
            status: 401,
            body: Some(json!({"error": "Invalid credentials or not an admin"})),
        };
        assert_eq!(login_error(unauthorized), AuthError::InvalidCredentials);

        let server = ApiError::Status {
            status: 502,
            body: None,
        };
        assert!(matches!(login_error(server), AuthError::Unavailable(_)));

        let offline = ApiError::Network("connection refused".to_string());
        assert!(matches!(login_error(offline), AuthError::Unavailable(_)));
    }

    #[test]
    fn test_register_forbidden_uses_server_message() {
        let err = ApiError::Status {
            status: 403,
            body: Some(json!({"error": "Permission denied."})),
        };
        assert_eq!(
            register_error(err),
            AuthError::RegistrationForbidden("Permission denied.".to_string())
        );

        let bare = ApiError::Status {
            status: 403,
            body: None,
        };
        assert_eq!(
            register_error(bare),
            AuthError::RegistrationForbidden(REGISTRATION_FORBIDDEN_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_register_bad_request_without_fields_is_unavailable() {
        let err = ApiError::Status {
            status: 400,
            body: Some(json!({})),
        };
        assert!(matches!(register_error(err), AuthError::Unavailable(_)));
    }
}
