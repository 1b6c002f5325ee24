//! Session identity of the acting user.

use serde::{Deserialize, Serialize};

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Session {
    /// Stable user identifier.
    pub id: String,
    /// Public handle.
    pub username: String,
}

impl Session {
    /// Create a session.
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }

    /// Route of the user's profile page.
    #[must_use]
    pub fn profile_route(&self) -> String {
        format!("/user/{}", self.username)
    }
}

/// Source of the current session.
///
/// Change notification is delivered by the host: a `watch` channel for the
/// tokio driver, a reactive signal in the UI.
#[cfg_attr(test, mockall::automock)]
pub trait SessionProvider {
    /// The signed-in user, or `None` when signed out.
    fn current_user(&self) -> Option<Session>;
}
