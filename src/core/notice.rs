//! Toast notices raised by the auth pages

use crate::core::error::AuthError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Warning,
    Info,
}

/// A toast notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
    pub auto_dismiss_ms: Option<u32>,
}

impl Notice {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            message: message.into(),
            auto_dismiss_ms: Some(3000),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            message: message.into(),
            auto_dismiss_ms: None, // errors stay until dismissed
        }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            title: title.into(),
            message: message.into(),
            auto_dismiss_ms: Some(5000),
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.into(),
            message: message.into(),
            auto_dismiss_ms: Some(3000),
        }
    }

    /// Notice for a failed flow, `None` for errors rendered inline
    pub fn for_auth_error(error: &AuthError) -> Option<Self> {
        match error {
            AuthError::InvalidCredentials | AuthError::Validation(_) => None,
            AuthError::Unavailable(_) => Some(Self::error(
                "Request failed",
                "The server could not be reached. Please try again.",
            )),
            AuthError::RegistrationForbidden(message) => {
                Some(Self::warning("Registration restricted", message.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::FieldErrors;

    #[test]
    fn test_inline_errors_raise_no_notice() {
        assert!(Notice::for_auth_error(&AuthError::InvalidCredentials).is_none());
        assert!(Notice::for_auth_error(&AuthError::Validation(FieldErrors::new())).is_none());
    }

    #[test]
    fn test_unavailable_notice_is_sticky() {
        let notice =
            Notice::for_auth_error(&AuthError::Unavailable("timeout".to_string())).unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.auto_dismiss_ms, None);
        assert!(!notice.message.contains("timeout"));
    }

    #[test]
    fn test_forbidden_notice_carries_message() {
        let notice = Notice::for_auth_error(&AuthError::RegistrationForbidden(
            "Only existing admins can create new admin accounts".to_string(),
        ))
        .unwrap();
        assert_eq!(notice.kind, NoticeKind::Warning);
        assert_eq!(notice.message, "Only existing admins can create new admin accounts");
    }

    #[test]
    fn test_success_auto_dismisses() {
        assert_eq!(Notice::success("Welcome", "Login successful!").auto_dismiss_ms, Some(3000));
        assert_eq!(Notice::info("a", "b").kind, NoticeKind::Info);
    }
}
