// core/examples/optimistic_rollback.rs

//! An in-memory backend that refuses to remove anything, showing the cart
//! rolling back an optimistic removal.

use async_trait::async_trait;
use std::sync::Arc;
use storefront::model::{CartRow, Category, ProductRef};
use storefront::remote::{AddToCart, CartService, CatalogService};
use storefront::{
  CartStore, LineKey, Product, ProductSize, ProductVariant, Session, SessionHandle, StorefrontError, StorefrontResult,
  TracingNotifier,
};
use tracing::{error, info};

struct ReadOnlyShop;

#[async_trait]
impl CartService for ReadOnlyShop {
  async fn list_cart(&self) -> StorefrontResult<Vec<CartRow>> {
    Ok(vec![
      CartRow { id: 1, variant: 10, size: None, quantity: 2, checked: Some(true) },
      CartRow { id: 2, variant: 11, size: Some(3), quantity: 1, checked: None },
    ])
  }

  async fn add_to_cart(&self, _line: &AddToCart) -> StorefrontResult<()> {
    Ok(())
  }

  async fn remove_from_cart(&self, key: LineKey) -> StorefrontResult<()> {
    Err(StorefrontError::Server {
      endpoint: "cart/remove/".to_string(),
      status: 503,
      body: format!("cannot remove {} right now", key),
    })
  }

  async fn update_cart_line(&self, _key: LineKey, _quantity: u32, _checked: bool) -> StorefrontResult<()> {
    Ok(())
  }

  async fn update_cart_checked(&self, _key: LineKey, _checked: bool) -> StorefrontResult<()> {
    Ok(())
  }

  async fn empty_cart(&self) -> StorefrontResult<()> {
    Ok(())
  }
}

#[async_trait]
impl CatalogService for ReadOnlyShop {
  async fn variant(&self, variant_id: u64) -> StorefrontResult<ProductVariant> {
    Ok(ProductVariant {
      id: variant_id,
      price: 12.5,
      stock: Some(4),
      color: Some("Red".to_string()),
      images: vec![],
      product: Some(ProductRef { id: 1, title: format!("Sock #{}", variant_id) }),
    })
  }

  async fn size(&self, size_id: u64) -> StorefrontResult<ProductSize> {
    Ok(ProductSize { id: size_id, label: "L".to_string() })
  }

  async fn product(&self, product_id: u64) -> StorefrontResult<Product> {
    Err(anyhow::anyhow!("product {} is not part of this demo", product_id).into())
  }

  async fn category(&self, category_id: u64) -> StorefrontResult<Category> {
    Err(anyhow::anyhow!("category {} is not part of this demo", category_id).into())
  }

  async fn products_in_category(&self, _category_id: u64) -> StorefrontResult<Vec<Product>> {
    Ok(vec![])
  }

  async fn products_in_sub_category(&self, _sub_category_id: u64) -> StorefrontResult<Vec<Product>> {
    Ok(vec![])
  }
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Optimistic Rollback Example ---");

  let shop = Arc::new(ReadOnlyShop);
  let store = CartStore::new(
    shop.clone(),
    shop,
    SessionHandle::signed_in(Session::new(1, "demo-token")),
    Arc::new(TracingNotifier),
  );

  if let Err(e) = store.fetch().await {
    error!(error = %e, "Fetch failed");
    return;
  }
  let before = store.snapshot();
  info!(lines = before.items.len(), total = before.total_price, "Cart loaded");

  match store.remove(10, None).await {
    Ok(()) => info!("Unexpected: removal confirmed"),
    Err(e) => error!(error = %e, "Removal refused by the server"),
  }

  let after = store.snapshot();
  info!(
    lines = after.items.len(),
    total = after.total_price,
    restored = after.items == before.items,
    "Cart after rollback"
  );
}
