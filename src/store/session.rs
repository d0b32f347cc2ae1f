use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::core::user::Source;

use super::Login;

/// The signed-in user, scoped to one session.
///
/// Carries only what the surrounding application needs to address the user;
/// in particular, never the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub username: String,
    pub email: String,
    pub source: Source,
}

impl From<&Login> for CurrentUser {
    fn from(login: &Login) -> Self {
        Self {
            username: login.user.username.clone(),
            email: login.user.email.clone(),
            source: login.source,
        }
    }
}

/// Holder for at most one signed-in user.
///
/// Ephemeral by construction: dropping the last clone destroys the session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current: Arc<Mutex<Option<CurrentUser>>>,
}

impl Session {
    pub fn sign_in(&self, user: CurrentUser) {
        *self.lock() = Some(user);
    }

    pub fn current(&self) -> Option<CurrentUser> {
        self.lock().clone()
    }

    pub fn sign_out(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<CurrentUser>> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
