// core/src/remote/wire.rs

//! Request and response bodies of the storefront REST API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::LineKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddToCart {
  pub user_id: u64,
  pub variant_id: u64,
  pub size_id: Option<u64>,
  pub quantity: u32,
  pub checked: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct RemoveFromCartBody {
  pub variant_id: u64,
  pub size_id: Option<u64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateCartLineBody {
  pub variant_id: u64,
  pub size_id: Option<u64>,
  pub quantity: u32,
  pub checked: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateCheckedBody {
  pub variant_id: u64,
  pub size_id: Option<u64>,
  pub checked: bool,
}

impl From<LineKey> for RemoveFromCartBody {
  fn from(key: LineKey) -> Self {
    Self {
      variant_id: key.variant_id,
      size_id: key.size_id,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLine {
  pub variant_id: u64,
  pub size_id: Option<u64>,
  pub qty: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
  #[serde(rename = "cartItems")]
  pub cart_items: Vec<CheckoutLine>,
}

/// Hosted payment page the browser must be sent to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckoutSession {
  pub url: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct WishlistBody {
  pub user_id: u64,
  pub variant_id: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExistsResponse {
  pub exists: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WishlistItemRef {
  pub id: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WishlistItemResponse {
  pub wishlist_item: WishlistItemRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewComment {
  pub comment: String,
  pub user: u64,
  pub stars: u8,
  pub product: u64,
}

/// The server echoes a saved comment with `content` instead of `comment`.
#[derive(Debug, Deserialize)]
pub(crate) struct SavedComment {
  pub id: u64,
  pub content: String,
  #[serde(default)]
  pub stars: u8,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SavedCommentResponse {
  pub comment: SavedComment,
}
