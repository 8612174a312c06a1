// demos/storefront_cli/src/errors.rs

use storefront::StorefrontError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Not signed in: set STOREFRONT_TOKEN and STOREFRONT_USER_ID")]
  NotSignedIn,

  #[error("Storefront Error: {source}")]
  Storefront {
    #[from] // Allows conversion from storefront::StorefrontError
    source: StorefrontError,
  },

  #[error("Internal Error: {0}")]
  Internal(String),
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<StorefrontError>() {
      Ok(source) => AppError::Storefront { source },
      Err(err) => AppError::Internal(err.to_string()),
    }
  }
}

impl AppError {
  /// Process exit code for this failure.
  pub fn exit_code(&self) -> i32 {
    match self {
      AppError::Config(_) => 2,
      AppError::NotSignedIn => 3,
      AppError::Storefront { source } if source.needs_sign_in() => 3,
      AppError::Storefront { .. } | AppError::Internal(_) => 1,
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
