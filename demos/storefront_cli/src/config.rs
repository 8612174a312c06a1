// demos/storefront_cli/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;
use storefront::{ClientConfig, Session};

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub api_base_url: String,
  pub request_timeout: Duration,
  pub session: Option<Session>,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let api_base_url = get_env("STOREFRONT_API_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:8000/".to_string());
    let timeout_secs = get_env("STOREFRONT_TIMEOUT_SECS")
      .unwrap_or_else(|_| "30".to_string())
      .parse::<u64>()
      .map_err(|e| AppError::Config(format!("Invalid STOREFRONT_TIMEOUT_SECS: {}", e)))?;

    // Token and user id come together or not at all.
    let session = match (get_env("STOREFRONT_TOKEN").ok(), get_env("STOREFRONT_USER_ID").ok()) {
      (Some(token), Some(user_id)) => {
        let user_id = user_id
          .parse::<u64>()
          .map_err(|e| AppError::Config(format!("Invalid STOREFRONT_USER_ID: {}", e)))?;
        Some(Session::new(user_id, token))
      }
      (None, None) => None,
      _ => {
        return Err(AppError::Config(
          "STOREFRONT_TOKEN and STOREFRONT_USER_ID must be set together".to_string(),
        ))
      }
    };

    tracing::info!(signed_in = session.is_some(), "Application configuration loaded successfully.");

    Ok(Self {
      api_base_url,
      request_timeout: Duration::from_secs(timeout_secs),
      session,
    })
  }

  pub fn client_config(&self) -> Result<ClientConfig> {
    Ok(ClientConfig::new(&self.api_base_url)?.with_timeout(self.request_timeout))
  }
}
