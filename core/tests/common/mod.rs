// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use storefront::model::{CartRow, Category, Comment, ProductRef, UserInfo, VariantImage};
use storefront::remote::{
  AddToCart, CartService, CatalogService, CheckoutRequest, CheckoutService, CheckoutSession, CommentService,
  NewComment, WishlistService,
};
use storefront::{
  CartStore, LineKey, Notice, NoticeLevel, Notifier, Product, ProductSize, ProductVariant, Session, SessionHandle,
  StorefrontResult,
};
use tracing::Level;

// --- Catalog fixtures ---
pub fn variant(id: u64, price: f64) -> ProductVariant {
  ProductVariant {
    id,
    price,
    stock: Some(10),
    color: Some("Blue".to_string()),
    images: vec![
      VariantImage { id: Some(1), image: format!("/media/v{}-a.png", id), main_image: false },
      VariantImage { id: Some(2), image: format!("/media/v{}-b.png", id), main_image: true },
    ],
    product: Some(ProductRef { id: 100 + id, title: format!("Product {}", id) }),
  }
}

pub fn size(id: u64, label: &str) -> ProductSize {
  ProductSize { id, label: label.to_string() }
}

pub fn row(id: u64, variant: u64, size: Option<u64>, quantity: u32, checked: Option<bool>) -> CartRow {
  CartRow { id, variant, size, quantity, checked }
}

pub fn comment(id: u64, user: u64, product: u64, text: &str) -> Comment {
  let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
  Comment { id, comment: text.to_string(), user, stars: 4, product, created_at: at, updated_at: at }
}

// --- In-memory storefront API ---

/// Fake backend with scripted failures, delays and a call log.
#[derive(Default)]
pub struct FakeApi {
  pub rows: Mutex<Vec<CartRow>>,
  pub variants: Mutex<HashMap<u64, ProductVariant>>,
  pub sizes: Mutex<HashMap<u64, ProductSize>>,
  pub products: Mutex<HashMap<u64, Product>>,
  pub categories: Mutex<HashMap<u64, Category>>,
  pub comments: Mutex<Vec<Comment>>,
  pub users: Mutex<HashMap<u64, UserInfo>>,
  /// (entry id, user id, variant id)
  pub wishlist: Mutex<Vec<(u64, u64, u64)>>,
  pub checkout_requests: Mutex<Vec<CheckoutRequest>>,
  failing_ops: Mutex<HashSet<&'static str>>,
  failing_keys: Mutex<HashSet<LineKey>>,
  delays: Mutex<HashMap<LineKey, Duration>>,
  log: Mutex<Vec<String>>,
  next_id: AtomicU64,
}

impl FakeApi {
  pub fn new() -> Arc<Self> {
    let api = Self::default();
    api.next_id.store(1000, Ordering::SeqCst);
    Arc::new(api)
  }

  /// Two lines: v1 unsized qty 2 checked at 10.00, v2 size 5 qty 1 unchecked at 20.00.
  pub fn with_scenario() -> Arc<Self> {
    let api = Self::new();
    api.add_variant(variant(1, 10.0));
    api.add_variant(variant(2, 20.0));
    api.sizes.lock().insert(5, size(5, "M"));
    *api.rows.lock() = vec![row(1, 1, None, 2, Some(true)), row(2, 2, Some(5), 1, Some(false))];
    api
  }

  pub fn add_variant(&self, v: ProductVariant) {
    self.variants.lock().insert(v.id, v);
  }

  pub fn fail_on(&self, operation: &'static str) {
    self.failing_ops.lock().insert(operation);
  }

  pub fn fail_key(&self, key: LineKey) {
    self.failing_keys.lock().insert(key);
  }

  pub fn heal(&self) {
    self.failing_ops.lock().clear();
    self.failing_keys.lock().clear();
  }

  /// Keyed cart calls for `key` wait `delay` before answering.
  pub fn delay_key(&self, key: LineKey, delay: Duration) {
    self.delays.lock().insert(key, delay);
  }

  pub fn calls(&self, operation: &str) -> usize {
    self.log.lock().iter().filter(|entry| entry.split(':').next() == Some(operation)).count()
  }

  pub fn total_calls(&self) -> usize {
    self.log.lock().len()
  }

  pub fn call_log(&self) -> Vec<String> {
    self.log.lock().clone()
  }

  fn record(&self, entry: String) {
    self.log.lock().push(entry);
  }

  fn check(&self, operation: &'static str) -> StorefrontResult<()> {
    if self.failing_ops.lock().contains(operation) {
      return Err(anyhow!("scripted failure in {}", operation).into());
    }
    Ok(())
  }

  async fn keyed(&self, operation: &'static str, key: LineKey, detail: String) -> StorefrontResult<()> {
    let delay = self.delays.lock().get(&key).copied();
    if let Some(delay) = delay {
      tokio::time::sleep(delay).await;
    }
    self.record(format!("{}:{}:{}", operation, key, detail));
    self.check(operation)?;
    if self.failing_keys.lock().contains(&key) {
      return Err(anyhow!("scripted failure for {}", key).into());
    }
    Ok(())
  }

  fn matching_rows(&self, key: LineKey, mut f: impl FnMut(&mut CartRow)) {
    for r in self.rows.lock().iter_mut().filter(|r| r.variant == key.variant_id && r.size == key.size_id) {
      f(r);
    }
  }
}

#[async_trait]
impl CartService for FakeApi {
  async fn list_cart(&self) -> StorefrontResult<Vec<CartRow>> {
    self.record("list_cart".to_string());
    self.check("list_cart")?;
    Ok(self.rows.lock().clone())
  }

  async fn add_to_cart(&self, line: &AddToCart) -> StorefrontResult<()> {
    self.record(format!("add_to_cart:{}:{}", LineKey::new(line.variant_id, line.size_id), line.quantity));
    self.check("add_to_cart")?;
    let mut rows = self.rows.lock();
    match rows.iter_mut().find(|r| r.variant == line.variant_id && r.size == line.size_id) {
      Some(existing) => existing.quantity += line.quantity,
      None => {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        rows.push(row(id, line.variant_id, line.size_id, line.quantity, Some(line.checked)));
      }
    }
    Ok(())
  }

  async fn remove_from_cart(&self, key: LineKey) -> StorefrontResult<()> {
    self.keyed("remove_from_cart", key, String::new()).await?;
    self.rows.lock().retain(|r| !(r.variant == key.variant_id && r.size == key.size_id));
    Ok(())
  }

  async fn update_cart_line(&self, key: LineKey, quantity: u32, checked: bool) -> StorefrontResult<()> {
    self.keyed("update_cart_line", key, quantity.to_string()).await?;
    self.matching_rows(key, |r| {
      r.quantity = quantity;
      r.checked = Some(checked);
    });
    Ok(())
  }

  async fn update_cart_checked(&self, key: LineKey, checked: bool) -> StorefrontResult<()> {
    self.keyed("update_cart_checked", key, checked.to_string()).await?;
    self.matching_rows(key, |r| r.checked = Some(checked));
    Ok(())
  }

  async fn empty_cart(&self) -> StorefrontResult<()> {
    self.record("empty_cart".to_string());
    self.check("empty_cart")?;
    self.rows.lock().clear();
    Ok(())
  }
}

#[async_trait]
impl CatalogService for FakeApi {
  async fn variant(&self, variant_id: u64) -> StorefrontResult<ProductVariant> {
    self.record(format!("variant:{}", variant_id));
    self.check("variant")?;
    self.variants.lock().get(&variant_id).cloned().ok_or_else(|| anyhow!("no variant {}", variant_id).into())
  }

  async fn size(&self, size_id: u64) -> StorefrontResult<ProductSize> {
    self.record(format!("size:{}", size_id));
    self.check("size")?;
    self.sizes.lock().get(&size_id).cloned().ok_or_else(|| anyhow!("no size {}", size_id).into())
  }

  async fn product(&self, product_id: u64) -> StorefrontResult<Product> {
    self.record(format!("product:{}", product_id));
    self.check("product")?;
    self.products.lock().get(&product_id).cloned().ok_or_else(|| anyhow!("no product {}", product_id).into())
  }

  async fn category(&self, category_id: u64) -> StorefrontResult<Category> {
    self.record(format!("category:{}", category_id));
    self.check("category")?;
    self.categories.lock().get(&category_id).cloned().ok_or_else(|| anyhow!("no category {}", category_id).into())
  }

  async fn products_in_category(&self, category_id: u64) -> StorefrontResult<Vec<Product>> {
    self.record(format!("products_in_category:{}", category_id));
    self.check("products_in_category")?;
    Ok(self.products.lock().values().filter(|p| p.category == Some(category_id)).cloned().collect())
  }

  async fn products_in_sub_category(&self, sub_category_id: u64) -> StorefrontResult<Vec<Product>> {
    self.record(format!("products_in_sub_category:{}", sub_category_id));
    self.check("products_in_sub_category")?;
    Ok(self.products.lock().values().filter(|p| p.sub_category == Some(sub_category_id)).cloned().collect())
  }
}

#[async_trait]
impl WishlistService for FakeApi {
  async fn wishlist_contains(&self, user_id: u64, variant_id: u64) -> StorefrontResult<bool> {
    self.record(format!("wishlist_contains:{}", variant_id));
    self.check("wishlist_contains")?;
    Ok(self.wishlist.lock().iter().any(|(_, u, v)| *u == user_id && *v == variant_id))
  }

  async fn wishlist_add(&self, user_id: u64, variant_id: u64) -> StorefrontResult<u64> {
    self.record(format!("wishlist_add:{}", variant_id));
    self.check("wishlist_add")?;
    let id = self.next_id.fetch_add(1, Ordering::SeqCst);
    self.wishlist.lock().push((id, user_id, variant_id));
    Ok(id)
  }

  async fn wishlist_remove(&self, user_id: u64, variant_id: u64) -> StorefrontResult<u64> {
    self.record(format!("wishlist_remove:{}", variant_id));
    self.check("wishlist_remove")?;
    let mut list = self.wishlist.lock();
    let position = list
      .iter()
      .position(|(_, u, v)| *u == user_id && *v == variant_id)
      .ok_or_else(|| anyhow!("variant {} not on wishlist", variant_id))?;
    Ok(list.remove(position).0)
  }
}

#[async_trait]
impl CommentService for FakeApi {
  async fn comments_for(&self, product_id: u64) -> StorefrontResult<Vec<Comment>> {
    self.record(format!("comments_for:{}", product_id));
    self.check("comments_for")?;
    Ok(self.comments.lock().iter().filter(|c| c.product == product_id).cloned().collect())
  }

  async fn save_comment(&self, new: &NewComment) -> StorefrontResult<Comment> {
    self.record(format!("save_comment:{}", new.product));
    self.check("save_comment")?;
    let id = self.next_id.fetch_add(1, Ordering::SeqCst);
    let saved = Comment { stars: new.stars, ..comment(id, new.user, new.product, &new.comment) };
    self.comments.lock().push(saved.clone());
    Ok(saved)
  }

  async fn user_info(&self, user_id: u64) -> StorefrontResult<UserInfo> {
    self.record(format!("user_info:{}", user_id));
    self.check("user_info")?;
    self.users.lock().get(&user_id).cloned().ok_or_else(|| anyhow!("no user {}", user_id).into())
  }
}

#[async_trait]
impl CheckoutService for FakeApi {
  async fn create_checkout_session(&self, request: &CheckoutRequest) -> StorefrontResult<CheckoutSession> {
    self.record("create_checkout_session".to_string());
    self.check("create_checkout_session")?;
    self.checkout_requests.lock().push(request.clone());
    Ok(CheckoutSession { url: "https://pay.example.com/session/cs_test_1".to_string() })
  }
}

// --- Notices ---
#[derive(Default)]
pub struct RecordingNotifier {
  notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  pub fn notices(&self) -> Vec<Notice> {
    self.notices.lock().clone()
  }

  pub fn titles(&self, level: NoticeLevel) -> Vec<String> {
    self.notices.lock().iter().filter(|n| n.level == level).map(|n| n.title.clone()).collect()
  }
}

impl Notifier for RecordingNotifier {
  fn notify(&self, notice: Notice) {
    self.notices.lock().push(notice);
  }
}

// --- Store builders ---
pub const USER_ID: u64 = 7;

pub fn signed_in() -> SessionHandle {
  SessionHandle::signed_in(Session::new(USER_ID, "test-token"))
}

pub fn cart_store(api: &Arc<FakeApi>, session: SessionHandle) -> (Arc<CartStore>, Arc<RecordingNotifier>) {
  let notifier = RecordingNotifier::new();
  let store = CartStore::new(api.clone(), api.clone(), session, notifier.clone());
  (Arc::new(store), notifier)
}

/// A signed-in store already holding the two-line scenario.
pub async fn loaded_scenario() -> (Arc<FakeApi>, Arc<CartStore>, Arc<RecordingNotifier>) {
  let api = FakeApi::with_scenario();
  let (store, notifier) = cart_store(&api, signed_in());
  store.fetch().await.expect("scenario fetch");
  (api, store, notifier)
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
