//! Session context for API authentication.
//!
//! The session is constructed once and injected into the API client, rather
//! than having every request read credentials from ambient storage. Lifecycle:
//! anonymous or token-bearing at construction, `set_token` on sign-in,
//! `invalidate` on sign-out or a rejected credential.

use std::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionState {
    /// No credentials; requests go out without an Authorization header.
    Anonymous,
    /// A bearer token is attached to every request.
    Active { token: String },
    /// Credentials were revoked; requests go out unauthenticated until a
    /// new token is set.
    Invalidated,
}

/// Shared session handle.
#[derive(Debug)]
pub struct Session {
    state: RwLock<SessionState>,
}

impl Session {
    /// Session without credentials.
    pub fn anonymous() -> Self {
        Self {
            state: RwLock::new(SessionState::Anonymous),
        }
    }

    /// Session holding a bearer token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            state: RwLock::new(SessionState::Active {
                token: token.into(),
            }),
        }
    }

    /// Install a new bearer token, activating the session.
    pub fn set_token(&self, token: impl Into<String>) {
        let mut state = self.state.write().unwrap();
        *state = SessionState::Active {
            token: token.into(),
        };
    }

    /// Drop the current credentials.
    pub fn invalidate(&self) {
        let mut state = self.state.write().unwrap();
        *state = SessionState::Invalidated;
    }

    /// The bearer token to attach, if the session is active.
    pub fn bearer_token(&self) -> Option<String> {
        match &*self.state.read().unwrap() {
            SessionState::Active { token } => Some(token.clone()),
            SessionState::Anonymous | SessionState::Invalidated => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(&*self.state.read().unwrap(), SessionState::Active { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_session_has_no_token() {
        let session = Session::anonymous();
        assert!(!session.is_active());
        assert_eq!(session.bearer_token(), None);
    }

    #[test]
    fn test_token_lifecycle() {
        let session = Session::anonymous();
        session.set_token("abc123");
        assert!(session.is_active());
        assert_eq!(session.bearer_token(), Some("abc123".to_string()));

        session.invalidate();
        assert!(!session.is_active());
        assert_eq!(session.bearer_token(), None);

        // A fresh token reactivates the session.
        session.set_token("def456");
        assert_eq!(session.bearer_token(), Some("def456".to_string()));
    }

    #[test]
    fn test_with_token_starts_active() {
        let session = Session::with_token("tok");
        assert!(session.is_active());
    }
}
