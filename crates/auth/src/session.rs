//! The (token, role) pair representing a logged-in identity.

use serde::{Deserialize, Serialize};

use crate::Role;

/// Opaque bearer token issued by the login endpoint.
///
/// `Debug` is redacted so tokens never end up in logs.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Current authentication state.
///
/// A session built through [`Session::new`] always carries both fields and
/// [`Session::anonymous`] carries neither. Partially populated sessions can only
/// come from [`Session::from_parts`], which storage backends use to report
/// exactly what they found. Stores refuse to save such a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<AuthToken>,
    role: Option<Role>,
}

impl Session {
    pub fn new(token: AuthToken, role: Role) -> Self {
        Self {
            token: Some(token),
            role: Some(role),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn from_parts(token: Option<AuthToken>, role: Option<Role>) -> Self {
        Self { token, role }
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Local presence check only; says nothing about server-side validity.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
