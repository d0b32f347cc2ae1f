use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A user record as persisted in the local store.
///
/// The password is held and compared in plaintext. This reproduces the wire
/// contract of the remote authority's registration call; the local store file
/// must be treated as sensitive material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub username: String,
    pub email: String,
    pub password: String,
    /// RFC 3339 timestamp set when the record was created.
    pub join_date: String,
    /// RFC 3339 timestamp of the most recent login known to this record.
    pub last_login: String,
}

impl UserRecord {
    /// Create a new record with both timestamps set to now.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let now = now_rfc3339();
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            join_date: now.clone(),
            last_login: now,
        }
    }
}

/// The user payload handed back by a successful login.
///
/// Never carries the password: the server strips it, and the local fallback
/// synthesizes this payload from the matched record without it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// The remote authority's row id. Absent for local-mode logins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub username: String,
    pub email: String,
    pub join_date: String,
    pub last_login: String,
}

/// Which store satisfied an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// The remote authority answered.
    Server,
    /// The remote authority was unreachable and the local store answered.
    Local,
}

pub(crate) fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}
