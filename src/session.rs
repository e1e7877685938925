//! Caller session handle
//!
//! Engines are resolved per session; the session itself is a plain value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Session identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random SessionId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user session on whose behalf actions are executed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session id
    pub id: SessionId,
    /// Name of the user owning the session
    pub name: String,
    /// When the session was opened
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Open a new session for `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SessionId::new(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}
