//! Caller identity and the ownership predicate derived from it.

use serde::{Deserialize, Serialize};

use crate::types::{SessionId, UserId};

/// Who is making a request, as resolved from the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Session identifier derived from the access token
    pub session_id: SessionId,

    /// Auth-service user id, if the session carries a user
    pub user_id: Option<UserId>,

    /// `false` for anonymous sign-ins
    pub is_authenticated: bool,
}

impl Identity {
    /// Creates an anonymous identity.
    pub fn anonymous(session_id: SessionId, user_id: Option<UserId>) -> Self {
        Self {
            session_id,
            user_id,
            is_authenticated: false,
        }
    }

    /// Creates an authenticated identity.
    pub fn authenticated(session_id: SessionId, user_id: UserId) -> Self {
        Self {
            session_id,
            user_id: Some(user_id),
            is_authenticated: true,
        }
    }

    /// Returns the predicate that scopes this identity's records.
    ///
    /// Anonymous callers are scoped by session, authenticated callers by user.
    /// An authenticated identity without a user id falls back to the session.
    pub fn ownership(&self) -> Ownership {
        match (&self.user_id, self.is_authenticated) {
            (Some(user_id), true) => Ownership::User(user_id.clone()),
            _ => Ownership::Session(self.session_id.clone()),
        }
    }
}

/// Store-side filter preventing cross-identity access.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ownership {
    /// `session_id` equality
    Session(SessionId),

    /// `user_id` equality
    User(UserId),
}

impl Ownership {
    /// Column the predicate applies to.
    pub fn column(&self) -> &'static str {
        match self {
            Ownership::Session(_) => "session_id",
            Ownership::User(_) => "user_id",
        }
    }

    /// Value the column must equal.
    pub fn value(&self) -> &str {
        match self {
            Ownership::Session(id) => id.as_str(),
            Ownership::User(id) => id.as_str(),
        }
    }

    /// Returns `true` if a record with the given scope satisfies the predicate.
    pub fn matches(&self, session_id: Option<&SessionId>, user_id: Option<&UserId>) -> bool {
        match self {
            Ownership::Session(expected) => session_id == Some(expected),
            Ownership::User(expected) => user_id == Some(expected),
        }
    }
}
