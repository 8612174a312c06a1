// core/src/remote/mod.rs

//! The remote storefront API, split by concern.
//!
//! The stores only see these traits. [`HttpStorefrontApi`] implements all of
//! them over REST; tests substitute in-memory fakes.

pub mod http;
pub mod wire;

use async_trait::async_trait;

use crate::error::StorefrontResult;
use crate::model::{CartRow, Category, Comment, LineKey, Product, ProductSize, ProductVariant, UserInfo};

pub use http::HttpStorefrontApi;
pub use wire::{AddToCart, CheckoutLine, CheckoutRequest, CheckoutSession, NewComment};

/// Per-user cart rows. Acknowledgements carry no payload the client relies on.
#[async_trait]
pub trait CartService: Send + Sync {
  async fn list_cart(&self) -> StorefrontResult<Vec<CartRow>>;

  async fn add_to_cart(&self, line: &AddToCart) -> StorefrontResult<()>;

  async fn remove_from_cart(&self, key: LineKey) -> StorefrontResult<()>;

  async fn update_cart_line(&self, key: LineKey, quantity: u32, checked: bool) -> StorefrontResult<()>;

  async fn update_cart_checked(&self, key: LineKey, checked: bool) -> StorefrontResult<()>;

  async fn empty_cart(&self) -> StorefrontResult<()>;
}

/// Read-only catalog lookups.
#[async_trait]
pub trait CatalogService: Send + Sync {
  async fn variant(&self, variant_id: u64) -> StorefrontResult<ProductVariant>;

  async fn size(&self, size_id: u64) -> StorefrontResult<ProductSize>;

  async fn product(&self, product_id: u64) -> StorefrontResult<Product>;

  async fn category(&self, category_id: u64) -> StorefrontResult<Category>;

  async fn products_in_category(&self, category_id: u64) -> StorefrontResult<Vec<Product>>;

  async fn products_in_sub_category(&self, sub_category_id: u64) -> StorefrontResult<Vec<Product>>;
}

#[async_trait]
pub trait WishlistService: Send + Sync {
  async fn wishlist_contains(&self, user_id: u64, variant_id: u64) -> StorefrontResult<bool>;

  /// Returns the id of the created wishlist entry.
  async fn wishlist_add(&self, user_id: u64, variant_id: u64) -> StorefrontResult<u64>;

  /// Returns the id of the deleted wishlist entry.
  async fn wishlist_remove(&self, user_id: u64, variant_id: u64) -> StorefrontResult<u64>;
}

#[async_trait]
pub trait CommentService: Send + Sync {
  async fn comments_for(&self, product_id: u64) -> StorefrontResult<Vec<Comment>>;

  async fn save_comment(&self, comment: &NewComment) -> StorefrontResult<Comment>;

  async fn user_info(&self, user_id: u64) -> StorefrontResult<UserInfo>;
}

#[async_trait]
pub trait CheckoutService: Send + Sync {
  async fn create_checkout_session(&self, request: &CheckoutRequest) -> StorefrontResult<CheckoutSession>;
}
