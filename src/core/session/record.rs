//! Persisted credential bundle
//!
//! The record is stored as three independent string entries so that the
//! layout stays compatible with anything else on the origin reading them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Storage key for the access token
pub const TOKEN_KEY: &str = "token";
/// Storage key for the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
/// Storage key for the serialized user summary
pub const USER_KEY: &str = "user";

/// Values left behind when `undefined`/`null` got stringified into storage
const SENTINELS: [&str; 2] = ["undefined", "null"];

/// Server-issued description of the signed-in admin
///
/// Only the display name is interpreted; every other field the server sends
/// is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(default)]
    pub username: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserSummary {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            extra: Map::new(),
        }
    }

    /// Name shown in the dashboard header
    pub fn display_name(&self) -> String {
        let first = self.extra_str("first_name");
        let last = self.extra_str("last_name");
        let full = format!("{first} {last}");
        let full = full.trim();

        if !full.is_empty() {
            full.to_string()
        } else if !self.username.is_empty() {
            self.username.clone()
        } else {
            "Admin".to_string()
        }
    }

    fn extra_str(&self, key: &str) -> &str {
        self.extra.get(key).and_then(Value::as_str).unwrap_or("")
    }

    /// Parse a stored user entry, treating sentinels and garbage as absent
    pub fn from_stored(raw: &str) -> Option<Self> {
        if is_sentinel(raw) {
            return None;
        }
        serde_json::from_str(raw).ok()
    }

    pub fn to_stored(&self) -> String {
        // Serializing a struct of strings and JSON values cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Returns true for the literal strings a careless `setItem(undefined)` leaves
pub fn is_sentinel(value: &str) -> bool {
    SENTINELS.contains(&value)
}

/// Credential bundle as read from (or written to) the session store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionRecord {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<UserSummary>,
}

impl SessionRecord {
    pub fn new(access_token: impl Into<String>, user: UserSummary) -> Self {
        Self {
            access_token: Some(access_token.into()),
            refresh_token: None,
            user: Some(user),
        }
    }

    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Access token if it is present, non-empty and not a sentinel
    pub fn usable_token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .filter(|token| !token.is_empty() && !is_sentinel(token))
    }

    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none() && self.user.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_summary_keeps_unknown_fields() {
        let raw = r#"{"id":7,"username":"admin","email":"a@b.co","is_admin":true}"#;
        let user = UserSummary::from_stored(raw).unwrap();

        assert_eq!(user.username, "admin");
        assert_eq!(user.extra.get("id"), Some(&Value::from(7)));

        let reparsed = UserSummary::from_stored(&user.to_stored()).unwrap();
        assert_eq!(reparsed, user);
    }

    #[test]
    fn test_user_summary_sentinels_are_absent() {
        assert!(UserSummary::from_stored("null").is_none());
        assert!(UserSummary::from_stored("undefined").is_none());
        assert!(UserSummary::from_stored("{not json").is_none());
    }

    #[test]
    fn test_display_name_prefers_full_name() {
        let user = UserSummary::from_stored(
            r#"{"username":"admin","first_name":"Ada","last_name":"Lovelace"}"#,
        )
        .unwrap();
        assert_eq!(user.display_name(), "Ada Lovelace");

        assert_eq!(UserSummary::new("root").display_name(), "root");
        assert_eq!(UserSummary::default().display_name(), "Admin");
    }

    #[test]
    fn test_usable_token_rejects_sentinels_and_empty() {
        let mut record = SessionRecord::new("abc", UserSummary::new("admin"));
        assert_eq!(record.usable_token(), Some("abc"));

        for bad in ["", "undefined", "null"] {
            record.access_token = Some(bad.to_string());
            assert_eq!(record.usable_token(), None, "token {bad:?}");
        }

        record.access_token = None;
        assert_eq!(record.usable_token(), None);
    }
}
