//! Error taxonomy for the session authority

use crate::core::validation::FieldErrors;

/// Errors surfaced by the login and register flows
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
    /// The server rejected the username/password pair
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Network failure, 5xx or any other unexpected response
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Per-field problems, either local or reported by the server
    #[error("Please check the form for errors")]
    Validation(FieldErrors),

    /// Registration is restricted to existing admins
    #[error("{0}")]
    RegistrationForbidden(String),
}

impl AuthError {
    /// Whether resubmitting the same form may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, AuthError::Unavailable(_))
    }

    /// Field errors to render inline, if any
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            AuthError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Errors from the underlying key/value storage area
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Storage is not available in this context")]
    Unavailable,

    #[error("Storage operation failed: {0}")]
    Platform(String),
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        AuthError::Unavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_unavailable_is_retryable() {
        assert!(AuthError::Unavailable("timeout".to_string()).is_retryable());
        assert!(!AuthError::InvalidCredentials.is_retryable());
        assert!(!AuthError::RegistrationForbidden("no".to_string()).is_retryable());
        assert!(!AuthError::Validation(FieldErrors::default()).is_retryable());
    }

    #[test]
    fn test_storage_error_maps_to_unavailable() {
        let err: AuthError = StorageError::Unavailable.into();
        assert!(matches!(err, AuthError::Unavailable(_)));
    }
}
