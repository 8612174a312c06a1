// core/src/config.rs

use crate::error::{StorefrontError, StorefrontResult};
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_API_PREFIX: &str = "api/";

/// Where the storefront API lives and how to talk to it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// Site origin, e.g. `https://shop.example.com/`. Media paths resolve against it.
  pub base_url: Url,
  /// Path segment under which the REST endpoints live.
  pub api_prefix: String,
  pub request_timeout: Duration,
  pub user_agent: String,
}

impl ClientConfig {
  pub fn new(base_url: &str) -> StorefrontResult<Self> {
    let mut raw = base_url.trim().to_string();
    if !raw.ends_with('/') {
      raw.push('/');
    }
    let base_url =
      Url::parse(&raw).map_err(|e| StorefrontError::Config(format!("Invalid base URL '{}': {}", base_url, e)))?;
    if base_url.cannot_be_a_base() {
      return Err(StorefrontError::Config(format!("Base URL '{}' cannot carry paths", base_url)));
    }
    Ok(Self {
      base_url,
      api_prefix: DEFAULT_API_PREFIX.to_string(),
      request_timeout: DEFAULT_TIMEOUT,
      user_agent: concat!("storefront/", env!("CARGO_PKG_VERSION")).to_string(),
    })
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.request_timeout = timeout;
    self
  }

  pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
    let mut prefix = prefix.into();
    if !prefix.is_empty() && !prefix.ends_with('/') {
      prefix.push('/');
    }
    self.api_prefix = prefix.trim_start_matches('/').to_string();
    self
  }

  pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
    self.user_agent = user_agent.into();
    self
  }

  /// Absolute URL of an API endpoint such as `cart/add/`.
  pub fn endpoint(&self, path: &str) -> StorefrontResult<Url> {
    let path = path.trim_start_matches('/');
    self
      .base_url
      .join(&format!("{}{}", self.api_prefix, path))
      .map_err(|e| StorefrontError::Config(format!("Invalid endpoint '{}': {}", path, e)))
  }

  /// Absolute URL of a media path returned by the API (`/media/x.png`).
  /// Already absolute URLs are returned unchanged.
  pub fn media_url(&self, path: &str) -> Option<String> {
    self.base_url.join(path).ok().map(String::from)
  }
}
