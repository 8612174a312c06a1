// core/src/session.rs

//! The authenticated session the stores act on behalf of.
//!
//! Tokens are issued elsewhere; this module only holds the current one.

use crate::error::{StorefrontError, StorefrontResult};
use crate::state::SharedState;

#[derive(Clone, PartialEq, Eq)]
pub struct Session {
  pub user_id: u64,
  pub access_token: String,
}

impl Session {
  pub fn new(user_id: u64, access_token: impl Into<String>) -> Self {
    Self {
      user_id,
      access_token: access_token.into(),
    }
  }
}

// Keep the token out of logs.
impl std::fmt::Debug for Session {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Session")
      .field("user_id", &self.user_id)
      .field("access_token", &"[REDACTED]")
      .finish()
  }
}

/// Cloneable handle on the current session. Every store and the HTTP client
/// share one handle so signing out is seen everywhere at once.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle(SharedState<Option<Session>>);

impl SessionHandle {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn signed_in(session: Session) -> Self {
    Self(SharedState::new(Some(session)))
  }

  pub fn sign_in(&self, session: Session) {
    tracing::info!(user_id = session.user_id, "Session started.");
    *self.0.write() = Some(session);
  }

  pub fn sign_out(&self) -> Option<Session> {
    let previous = self.0.write().take();
    if let Some(s) = &previous {
      tracing::info!(user_id = s.user_id, "Session ended.");
    }
    previous
  }

  pub fn current(&self) -> Option<Session> {
    self.0.snapshot()
  }

  pub fn is_active(&self) -> bool {
    self.0.read().is_some()
  }

  pub fn user_id(&self) -> Option<u64> {
    self.0.read().as_ref().map(|s| s.user_id)
  }

  pub fn bearer_token(&self) -> Option<String> {
    self.0.read().as_ref().map(|s| s.access_token.clone())
  }

  /// Returns the session or `AuthRequired` for `operation`.
  pub fn require(&self, operation: &'static str) -> StorefrontResult<Session> {
    self.current().ok_or(StorefrontError::AuthRequired { operation })
  }
}
