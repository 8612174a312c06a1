// core/src/client.rs

//! Wires the stores to one remote API and one session.

use std::sync::Arc;
use tracing::instrument;

use crate::cart::CartStore;
use crate::checkout::{CheckoutHandoff, CheckoutRedirect};
use crate::comments::CommentThread;
use crate::config::ClientConfig;
use crate::error::StorefrontResult;
use crate::notify::{Notifier, TracingNotifier};
use crate::presentation::CartView;
use crate::product::ProductPage;
use crate::remote::{CartService, CatalogService, CheckoutService, CommentService, HttpStorefrontApi, WishlistService};
use crate::session::{Session, SessionHandle};
use crate::wishlist::WishlistStore;

/// All remote concerns behind one value. [`HttpStorefrontApi`] is one.
pub trait StorefrontApi: CartService + CatalogService + WishlistService + CommentService + CheckoutService {}

impl<T> StorefrontApi for T where T: CartService + CatalogService + WishlistService + CommentService + CheckoutService {}

pub struct StorefrontClient {
  config: ClientConfig,
  session: SessionHandle,
  notifier: Arc<dyn Notifier>,
  comments: Arc<dyn CommentService>,
  catalog: Arc<dyn CatalogService>,
  cart: Arc<CartStore>,
  wishlist: Arc<WishlistStore>,
  checkout: CheckoutHandoff,
}

impl StorefrontClient {
  /// Client over the REST API, logging notices through `tracing`.
  pub fn connect(config: ClientConfig) -> StorefrontResult<Self> {
    let session = SessionHandle::new();
    let api = Arc::new(HttpStorefrontApi::new(config.clone(), session.clone())?);
    Ok(Self::with_api(config, api, session, Arc::new(TracingNotifier)))
  }

  pub fn with_api<A: StorefrontApi + 'static>(
    config: ClientConfig,
    api: Arc<A>,
    session: SessionHandle,
    notifier: Arc<dyn Notifier>,
  ) -> Self {
    let cart = Arc::new(CartStore::new(api.clone(), api.clone(), session.clone(), notifier.clone()));
    let wishlist = Arc::new(WishlistStore::new(api.clone(), api.clone(), session.clone(), notifier.clone()));
    let checkout = CheckoutHandoff::new(api.clone(), session.clone(), notifier.clone());
    Self {
      config,
      session,
      notifier,
      comments: api.clone(),
      catalog: api,
      cart,
      wishlist,
      checkout,
    }
  }

  pub fn config(&self) -> &ClientConfig {
    &self.config
  }

  pub fn session(&self) -> &SessionHandle {
    &self.session
  }

  pub fn cart(&self) -> &Arc<CartStore> {
    &self.cart
  }

  pub fn wishlist(&self) -> &Arc<WishlistStore> {
    &self.wishlist
  }

  /// Starts a session with an already issued token and loads the cart.
  #[instrument(name = "StorefrontClient::sign_in", skip(self, session), fields(user_id = session.user_id), err(Display))]
  pub async fn sign_in(&self, session: Session) -> StorefrontResult<()> {
    self.session.sign_in(session);
    self.cart.on_session_started().await
  }

  /// Ends the session and forgets everything user specific.
  pub fn sign_out(&self) {
    self.session.sign_out();
    self.cart.reset();
    self.wishlist.reset();
  }

  pub fn comment_thread(&self, product_id: u64) -> CommentThread {
    CommentThread::new(product_id, self.comments.clone(), self.session.clone(), self.notifier.clone())
  }

  pub async fn product_page(&self, product_id: u64) -> StorefrontResult<ProductPage> {
    let thread = self.comment_thread(product_id);
    ProductPage::load(product_id, self.catalog.clone(), &thread, &self.wishlist).await
  }

  pub fn cart_view(&self) -> CartView {
    let wishlist = self.wishlist.snapshot();
    self.cart.read(|cart| CartView::build(cart, &wishlist, &self.config))
  }

  /// Checkout of the currently checked lines.
  pub async fn checkout(&self) -> StorefrontResult<CheckoutRedirect> {
    let cart = self.cart.snapshot();
    self.checkout.start(&cart).await
  }
}
