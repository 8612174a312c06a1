// core/src/remote/http.rs

//! REST implementation of the service traits.
//!
//! Stateless apart from the shared [`SessionHandle`]: every request carries
//! `Authorization: Bearer <token>` while a session is active.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{event, instrument, Level};

use super::wire::{
  AddToCart, CheckoutRequest, CheckoutSession, ExistsResponse, NewComment, RemoveFromCartBody,
  SavedCommentResponse, UpdateCartLineBody, UpdateCheckedBody, WishlistBody, WishlistItemResponse,
};
use super::{CartService, CatalogService, CheckoutService, CommentService, WishlistService};
use crate::config::ClientConfig;
use crate::error::{StorefrontError, StorefrontResult};
use crate::model::{CartRow, Category, Comment, LineKey, Product, ProductSize, ProductVariant, UserInfo};
use crate::session::SessionHandle;

#[derive(Clone)]
pub struct HttpStorefrontApi {
  client: Client,
  config: ClientConfig,
  session: SessionHandle,
}

impl HttpStorefrontApi {
  pub fn new(config: ClientConfig, session: SessionHandle) -> StorefrontResult<Self> {
    let client = Client::builder()
      .timeout(config.request_timeout)
      .user_agent(config.user_agent.clone())
      .build()
      .map_err(|e| StorefrontError::Config(format!("Could not build HTTP client: {}", e)))?;
    Ok(Self { client, config, session })
  }

  pub fn config(&self) -> &ClientConfig {
    &self.config
  }

  async fn get_json<T: DeserializeOwned>(&self, path: &str) -> StorefrontResult<T> {
    let url = self.config.endpoint(path)?;
    let body = self.execute(path, self.client.get(url)).await?;
    decode(path, &body)
  }

  async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, payload: &B) -> StorefrontResult<T> {
    let url = self.config.endpoint(path)?;
    let body = self.execute(path, self.client.post(url).json(payload)).await?;
    decode(path, &body)
  }

  /// Posts and ignores whatever acknowledgement body comes back.
  async fn post_ack<B: Serialize + ?Sized>(&self, path: &str, payload: &B) -> StorefrontResult<()> {
    let url = self.config.endpoint(path)?;
    self.execute(path, self.client.post(url).json(payload)).await.map(|_| ())
  }

  async fn execute(&self, endpoint: &str, request: RequestBuilder) -> StorefrontResult<String> {
    let request = match self.session.bearer_token() {
      Some(token) => request.bearer_auth(token),
      None => request,
    };

    let response = request.send().await.map_err(|source| {
      event!(Level::ERROR, %endpoint, error = %source, "Request failed before a response arrived.");
      StorefrontError::Network {
        endpoint: endpoint.to_string(),
        source,
      }
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|source| StorefrontError::Network {
      endpoint: endpoint.to_string(),
      source,
    })?;

    if !status.is_success() {
      event!(Level::WARN, %endpoint, status = status.as_u16(), "Server rejected request.");
      return Err(StorefrontError::Server {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        body,
      });
    }
    event!(Level::TRACE, %endpoint, status = status.as_u16(), "Request succeeded.");
    Ok(body)
  }
}

fn decode<T: DeserializeOwned>(endpoint: &str, body: &str) -> StorefrontResult<T> {
  serde_json::from_str(body).map_err(|source| StorefrontError::Decode {
    endpoint: endpoint.to_string(),
    source,
  })
}

#[async_trait]
impl CartService for HttpStorefrontApi {
  #[instrument(name = "http::list_cart", skip_all, err(Display))]
  async fn list_cart(&self) -> StorefrontResult<Vec<CartRow>> {
    self.get_json("cart/").await
  }

  #[instrument(name = "http::add_to_cart", skip_all, fields(variant_id = line.variant_id), err(Display))]
  async fn add_to_cart(&self, line: &AddToCart) -> StorefrontResult<()> {
    self.post_ack("cart/add/", line).await
  }

  #[instrument(name = "http::remove_from_cart", skip_all, fields(key = %key), err(Display))]
  async fn remove_from_cart(&self, key: LineKey) -> StorefrontResult<()> {
    self.post_ack("cart/remove/", &RemoveFromCartBody::from(key)).await
  }

  #[instrument(name = "http::update_cart_line", skip_all, fields(key = %key, quantity = quantity), err(Display))]
  async fn update_cart_line(&self, key: LineKey, quantity: u32, checked: bool) -> StorefrontResult<()> {
    let body = UpdateCartLineBody {
      variant_id: key.variant_id,
      size_id: key.size_id,
      quantity,
      checked,
    };
    self.post_ack("cart/update/", &body).await
  }

  #[instrument(name = "http::update_cart_checked", skip_all, fields(key = %key, checked = checked), err(Display))]
  async fn update_cart_checked(&self, key: LineKey, checked: bool) -> StorefrontResult<()> {
    let body = UpdateCheckedBody {
      variant_id: key.variant_id,
      size_id: key.size_id,
      checked,
    };
    self.post_ack("cart/update-checked/", &body).await
  }

  #[instrument(name = "http::empty_cart", skip_all, err(Display))]
  async fn empty_cart(&self) -> StorefrontResult<()> {
    let url = self.config.endpoint("cart/empty/")?;
    self.execute("cart/empty/", self.client.get(url)).await.map(|_| ())
  }
}

#[async_trait]
impl CatalogService for HttpStorefrontApi {
  async fn variant(&self, variant_id: u64) -> StorefrontResult<ProductVariant> {
    self.get_json(&format!("products/variant/{}/", variant_id)).await
  }

  async fn size(&self, size_id: u64) -> StorefrontResult<ProductSize> {
    self.get_json(&format!("products/size/{}/", size_id)).await
  }

  async fn product(&self, product_id: u64) -> StorefrontResult<Product> {
    self.get_json(&format!("products/{}/", product_id)).await
  }

  async fn category(&self, category_id: u64) -> StorefrontResult<Category> {
    self.get_json(&format!("categories/{}/", category_id)).await
  }

  async fn products_in_category(&self, category_id: u64) -> StorefrontResult<Vec<Product>> {
    self.get_json(&format!("products/category/{}/", category_id)).await
  }

  async fn products_in_sub_category(&self, sub_category_id: u64) -> StorefrontResult<Vec<Product>> {
    self.get_json(&format!("products/subcategory/{}/", sub_category_id)).await
  }
}

#[async_trait]
impl WishlistService for HttpStorefrontApi {
  async fn wishlist_contains(&self, user_id: u64, variant_id: u64) -> StorefrontResult<bool> {
    let resp: ExistsResponse = self
      .post_json("wishlist/already_exists/", &WishlistBody { user_id, variant_id })
      .await?;
    Ok(resp.exists)
  }

  async fn wishlist_add(&self, user_id: u64, variant_id: u64) -> StorefrontResult<u64> {
    let resp: WishlistItemResponse = self.post_json("wishlist/add/", &WishlistBody { user_id, variant_id }).await?;
    Ok(resp.wishlist_item.id)
  }

  async fn wishlist_remove(&self, user_id: u64, variant_id: u64) -> StorefrontResult<u64> {
    let resp: WishlistItemResponse = self
      .post_json("wishlist/remove/", &WishlistBody { user_id, variant_id })
      .await?;
    Ok(resp.wishlist_item.id)
  }
}

#[async_trait]
impl CommentService for HttpStorefrontApi {
  async fn comments_for(&self, product_id: u64) -> StorefrontResult<Vec<Comment>> {
    self.get_json(&format!("comments/{}/", product_id)).await
  }

  async fn save_comment(&self, comment: &NewComment) -> StorefrontResult<Comment> {
    let resp: SavedCommentResponse = self.post_json("comments/save/", comment).await?;
    let saved = resp.comment;
    Ok(Comment {
      id: saved.id,
      comment: saved.content,
      user: comment.user,
      stars: saved.stars,
      product: comment.product,
      created_at: saved.created_at,
      updated_at: saved.updated_at,
    })
  }

  async fn user_info(&self, user_id: u64) -> StorefrontResult<UserInfo> {
    self.get_json(&format!("user/{}/", user_id)).await
  }
}

#[async_trait]
impl CheckoutService for HttpStorefrontApi {
  #[instrument(name = "http::create_checkout_session", skip_all, fields(lines = request.cart_items.len()), err(Display))]
  async fn create_checkout_session(&self, request: &CheckoutRequest) -> StorefrontResult<CheckoutSession> {
    self.post_json("create-checkout-session/", request).await
  }
}
