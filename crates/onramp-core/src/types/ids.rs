//! Identifier types for signup attempts, sessions and users.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Number of access-token characters kept as the session identifier.
pub const SESSION_ID_LEN: usize = 32;

/// Identifier of a signup attempt, assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignupAttemptId(Uuid);

impl SignupAttemptId {
    /// Creates a new random attempt ID.
    ///
    /// Only in-memory stores mint ids; the hosted store assigns its own.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an attempt ID from a UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SignupAttemptId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SignupAttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for SignupAttemptId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl std::str::FromStr for SignupAttemptId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Session identifier scoping anonymous ownership.
///
/// Derived from the access token, never from the user id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a session ID from an already-derived string.
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    /// Derives a session ID from an access token.
    ///
    /// Keeps the first [`SESSION_ID_LEN`] characters. Returns `None` for an
    /// empty token.
    ///
    /// # Examples
    ///
    /// ```
    /// use onramp_core::SessionId;
    ///
    /// let token = "a".repeat(40);
    /// let id = SessionId::from_access_token(&token).unwrap();
    /// assert_eq!(id.as_str().len(), 32);
    /// assert!(SessionId::from_access_token("").is_none());
    /// ```
    pub fn from_access_token(token: &str) -> Option<Self> {
        if token.is_empty() {
            return None;
        }
        Some(Self(token.chars().take(SESSION_ID_LEN).collect()))
    }

    /// Returns the session ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier of a user in the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a user ID.
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    /// Returns the user ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
