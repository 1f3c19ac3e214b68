//! Auth API contract
//!
//! The flows only need three calls from the backend; the browser client in
//! `crate::ui::auth::http` implements them with `gloo-net`, tests use a
//! scripted fake.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::session::{SessionRecord, UserSummary};

/// Login payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// `POST /auth/login/` success body
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
    pub user: UserSummary,
}

impl LoginResponse {
    pub fn into_record(self) -> SessionRecord {
        SessionRecord {
            access_token: Some(self.access),
            refresh_token: self.refresh,
            user: Some(self.user),
        }
    }
}

/// `POST /auth/register/` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Transport-level failure
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status
    #[error("Request failed with status {status}")]
    Status { status: u16, body: Option<Value> },

    /// The request never got a response
    #[error("Network error: {0}")]
    Network(String),

    /// The request body could not be serialized
    #[error("Invalid request: {0}")]
    Encode(String),

    /// A 2xx response whose body could not be read
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(_) | ApiError::Encode(_) | ApiError::Decode(_) => None,
        }
    }

    /// Human readable message the server put in `error` or `detail`
    pub fn server_message(&self) -> Option<String> {
        let ApiError::Status {
            body: Some(body), ..
        } = self
        else {
            return None;
        };
        ["error", "detail"]
            .iter()
            .find_map(|key| body.get(*key).and_then(Value::as_str))
            .map(str::to_string)
    }
}

/// Backend calls used by the flows
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;

    /// Returns the created-user payload
    async fn register(&self, request: &RegisterRequest) -> Result<Value, ApiError>;

    /// Server-side token check; no guard calls this
    async fn verify_token(&self) -> Result<(), ApiError>;
}

/// `Authorization` header value for outgoing requests
///
/// `None` when there is no usable token; no refresh is attempted.
pub fn authorization_header(record: &SessionRecord) -> Option<String> {
    record.usable_token().map(|token| format!("Bearer {token}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_response_without_refresh() {
        let response: LoginResponse = serde_json::from_value(json!({
            "access": "a",
            "user": {"id": 1, "username": "admin"}
        }))
        .unwrap();

        let record = response.into_record();
        assert_eq!(record.access_token.as_deref(), Some("a"));
        assert!(record.refresh_token.is_none());
        assert_eq!(record.user.unwrap().username, "admin");
    }

    #[test]
    fn test_register_request_uses_snake_case_confirmation() {
        let request = RegisterRequest {
            username: "admin".to_string(),
            email: "a@b.co".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["confirm_password"], "secret1");
    }

    #[test]
    fn test_authorization_header() {
        let record = SessionRecord::new("jwt", UserSummary::new("admin"));
        assert_eq!(authorization_header(&record).as_deref(), Some("Bearer jwt"));

        let sentinel = SessionRecord::new("undefined", UserSummary::new("admin"));
        assert_eq!(authorization_header(&sentinel), None);

        assert_eq!(authorization_header(&SessionRecord::default()), None);
    }

    #[test]
    fn test_header_does_not_require_user() {
        let record = SessionRecord {
            access_token: Some("jwt".to_string()),
            ..SessionRecord::default()
        };
        assert_eq!(authorization_header(&record).as_deref(), Some("Bearer jwt"));
    }

    #[test]
    fn test_server_message() {
        let err = ApiError::Status {
            status: 403,
            body: Some(json!({"error": "Permission denied."})),
        };
        assert_eq!(err.server_message().as_deref(), Some("Permission denied."));
        assert_eq!(err.status(), Some(403));

        let detail = ApiError::Status {
            status: 401,
            body: Some(json!({"detail": "No active account"})),
        };
        assert_eq!(detail.server_message().as_deref(), Some("No active account"));

        assert_eq!(ApiError::Network("offline".to_string()).server_message(), None);
        assert_eq!(ApiError::Encode("bad body".to_string()).server_message(), None);
    }

    #[test]
    fn test_encode_failure_is_not_a_network_error() {
        let err = ApiError::Encode("key must be a string".to_string());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "Invalid request: key must be a string");
        assert!(!matches!(err, ApiError::Network(_)));
    }
}
