//! Authentication predicate and derived state

use super::record::{SessionRecord, UserSummary};

impl SessionRecord {
    /// True iff a usable token and a user are both present
    ///
    /// Purely local: the token is not checked against the server.
    pub fn is_authenticated(&self) -> bool {
        self.usable_token().is_some() && self.user.is_some()
    }
}

/// Authentication state derived from the session store, never stored
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthState {
    /// Before the first evaluation
    #[default]
    Unknown,
    Unauthenticated,
    Authenticated(UserSummary),
}

impl AuthState {
    pub fn derive(record: &SessionRecord) -> Self {
        match (record.usable_token(), &record.user) {
            (Some(_), Some(user)) => AuthState::Authenticated(user.clone()),
            _ => AuthState::Unauthenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn into_user(self) -> Option<UserSummary> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            AuthState::Unknown | AuthState::Unauthenticated => None,
        }
    }
}
