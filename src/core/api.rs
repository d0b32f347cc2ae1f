//! Request and response bodies exchanged with the remote authority.

use serde::{Deserialize, Serialize};

use super::user::{AuthenticatedUser, UserRecord};

/// Body of `POST {authority}/api/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a UserRecord> for RegisterRequest<'a> {
    fn from(user: &'a UserRecord) -> Self {
        Self {
            username: &user.username,
            email: &user.email,
            password: &user.password,
        }
    }
}

/// Body of `POST {authority}/api/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// The minimal reply shape shared by every authority endpoint.
///
/// Success and rejection bodies both carry `message`; the status line decides
/// which one this is. Other fields (e.g. `success`) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiReply {
    #[serde(default)]
    pub message: Option<String>,
}

/// Reply body of a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginReply {
    pub user: AuthenticatedUser,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST {authority}/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub user: &'a str,
}

/// Reply body of the chat endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub response: String,
}
