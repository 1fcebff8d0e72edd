//! Session value object.

/// What to do with the session when an authenticated request gets a 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnauthorizedPolicy {
    /// Keep the token; the next request will simply fail again.
    #[default]
    KeepSession,
    /// Drop the token, in memory and in the store.
    ClearSession,
}

/// One opaque token, or nothing.
///
/// Presence of a non-empty token is the only authentication signal. The token
/// is never validated client-side.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn absent() -> Self {
        Self { token: None }
    }

    /// Build from a persisted value. Empty strings count as absent.
    pub fn from_token(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
