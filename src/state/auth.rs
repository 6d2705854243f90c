#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::{Session, User};

/// Authorization role attached to an authenticated user.
///
/// Stored server-side as a free-form label in the `user_roles` table;
/// parsed case-insensitively at read time so "Admin", "admin", and "ADMIN"
/// are equivalent. The role is advisory on the client — row-level security
/// on the backend is the real enforcement boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Admin,
    Teacher,
    Guardian,
}

impl Role {
    /// Parse a role label case-insensitively. Unknown labels map to `None`
    /// and are treated as unauthorized rather than an error.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "teacher" => Some(Self::Teacher),
            "guardian" => Some(Self::Guardian),
            _ => None,
        }
    }

    /// Canonical lowercase label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Teacher => "teacher",
            Self::Guardian => "guardian",
        }
    }

    /// Staff roles may view and manage the student roster.
    pub fn is_staff(self) -> bool {
        matches!(self, Self::Admin | Self::Teacher)
    }
}

/// Authentication state tracking the current session, user, role, and the
/// initial loading gate.
///
/// Owned exclusively by the `AuthController`; everything else reads.
///
/// `loading` starts true and flips to false once the initial session check
/// (including the role lookup, if one is needed) has resolved. It never
/// reverts to true for the lifetime of the controller. `role_pending` is
/// true while a role lookup for the current user is in flight, so role-gated
/// views can wait instead of flashing an access-denied message.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
    pub user: Option<User>,
    pub role: Option<Role>,
    pub role_pending: bool,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            session: None,
            user: None,
            role: None,
            role_pending: false,
            loading: true,
        }
    }
}

impl AuthState {
    /// Bearer token for authenticated REST calls, if a session is present.
    pub fn access_token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.access_token.as_str())
    }
}
