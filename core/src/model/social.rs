// core/src/model/social.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::ProductVariant;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
  pub id: u64,
  pub comment: String,
  pub user: u64,
  #[serde(default)]
  pub stars: u8,
  pub product: u64,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
  pub username: String,
}

/// One entry of the process-wide wishlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntry {
  pub id: u64,
  pub variant: ProductVariant,
}
