// core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorefrontError {
  #[error("Authentication required for '{operation}'")]
  AuthRequired { operation: &'static str },

  #[error("Skipped '{operation}': {reason}")]
  ValidationSkip { operation: &'static str, reason: String },

  #[error("Network error calling '{endpoint}'. Source: {source}")]
  Network {
    endpoint: String,
    #[source]
    source: reqwest::Error,
  },

  #[error("Server answered HTTP {status} for '{endpoint}': {body}")]
  Server { endpoint: String, status: u16, body: String },

  #[error("Could not decode response of '{endpoint}'. Source: {source}")]
  Decode {
    endpoint: String,
    #[source]
    source: serde_json::Error,
  },

  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Remote service failed. Source: {source}")]
  Remote {
    #[source]
    source: AnyhowError,
  },
}

impl StorefrontError {
  /// True for transport failures, non-2xx answers and undecodable payloads.
  /// These are the failures that trigger a rollback of optimistic mutations.
  pub fn is_remote_failure(&self) -> bool {
    matches!(
      self,
      StorefrontError::Network { .. }
        | StorefrontError::Server { .. }
        | StorefrontError::Decode { .. }
        | StorefrontError::Remote { .. }
    )
  }

  /// True when the caller should prompt the user to sign in.
  pub fn needs_sign_in(&self) -> bool {
    matches!(self, StorefrontError::AuthRequired { .. })
      || matches!(self, StorefrontError::Server { status: 401, .. })
  }
}

impl From<AnyhowError> for StorefrontError {
  fn from(err: AnyhowError) -> Self {
    // Keep an already-typed error instead of nesting it inside Remote.
    match err.downcast::<StorefrontError>() {
      Ok(inner) => inner,
      Err(err) => StorefrontError::Remote { source: err },
    }
  }
}

pub type StorefrontResult<T, E = StorefrontError> = std::result::Result<T, E>;
