// core/src/cart/store.rs

//! The cart synchronization store.
//!
//! Owns the canonical [`CartState`], talks to the remote [`CartService`],
//! applies keyed mutations optimistically and restores them when the server
//! refuses. See [`super::lanes`] for how overlapping mutations are ordered.

use futures_util::future::{try_join, try_join_all};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{event, instrument, Level};

use super::lanes::MutationLanes;
use super::reducer::{reduce, CartAction};
use super::state::CartState;
use crate::error::{StorefrontError, StorefrontResult};
use crate::model::{CartLineItem, CartRow, LineKey};
use crate::notify::{Notice, Notifier};
use crate::remote::{AddToCart, CartService, CatalogService};
use crate::session::{Session, SessionHandle};
use crate::state::SharedState;

pub struct CartStore {
  state: SharedState<CartState>,
  cart: Arc<dyn CartService>,
  catalog: Arc<dyn CatalogService>,
  session: SessionHandle,
  notifier: Arc<dyn Notifier>,
  lanes: MutationLanes,
  changes: watch::Sender<u64>,
}

impl std::fmt::Debug for CartStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CartStore")
      .field("state", &self.state)
      .field("session", &self.session)
      .finish_non_exhaustive()
  }
}

impl CartStore {
  pub fn new(
    cart: Arc<dyn CartService>,
    catalog: Arc<dyn CatalogService>,
    session: SessionHandle,
    notifier: Arc<dyn Notifier>,
  ) -> Self {
    let (changes, _) = watch::channel(0);
    Self {
      state: SharedState::default(),
      cart,
      catalog,
      session,
      notifier,
      lanes: MutationLanes::new(),
      changes,
    }
  }

  /// Clone of the current state.
  pub fn snapshot(&self) -> CartState {
    self.state.snapshot()
  }

  /// Runs `f` under the read lock. `f` must not block.
  pub fn read<R>(&self, f: impl FnOnce(&CartState) -> R) -> R {
    f(&self.state.read())
  }

  /// Receiver bumped after every applied action. Renderers await `changed()`
  /// and then read the state.
  pub fn subscribe(&self) -> watch::Receiver<u64> {
    self.changes.subscribe()
  }

  pub fn session(&self) -> &SessionHandle {
    &self.session
  }

  fn dispatch(&self, action: CartAction) {
    event!(Level::TRACE, ?action, "Applying cart action.");
    self.state.update(|state| reduce(state, action));
    self.changes.send_modify(|version| *version = version.wrapping_add(1));
  }

  fn require_session(&self, operation: &'static str) -> StorefrontResult<Session> {
    self.session.require(operation).map_err(|err| {
      event!(Level::WARN, operation, "No active session.");
      self.notifier.notify(Notice::warning("Please login"));
      err
    })
  }

  fn record_failure(&self, err: &StorefrontError, title: &str) {
    event!(Level::ERROR, error = %err, "{}", title);
    self.dispatch(CartAction::SetError(Some(err.to_string())));
    self.notifier.notify(Notice::error(title));
  }

  /// Replaces the cart with the server's rows. Called when a session starts.
  pub async fn on_session_started(&self) -> StorefrontResult<()> {
    self.fetch().await
  }

  /// Loads the cart rows and resolves their variant and size details.
  /// Nothing is applied unless every lookup succeeds.
  #[instrument(name = "CartStore::fetch", skip_all, err(Display))]
  pub async fn fetch(&self) -> StorefrontResult<()> {
    self.session.require("cart.fetch")?;
    let _exclusive = self.lanes.exclusive().await;

    self.dispatch(CartAction::SetLoading(true));
    match self.load_items().await {
      Ok(items) => {
        event!(Level::DEBUG, lines = items.len(), "Cart fetched.");
        self.dispatch(CartAction::Replace(items));
        self.dispatch(CartAction::SetError(None));
        Ok(())
      }
      Err(err) => {
        event!(Level::ERROR, error = %err, "Cart fetch failed, keeping current items.");
        self.dispatch(CartAction::SetError(Some(err.to_string())));
        self.dispatch(CartAction::SetLoading(false));
        Err(err)
      }
    }
  }

  async fn load_items(&self) -> StorefrontResult<Vec<CartLineItem>> {
    let rows = self.cart.list_cart().await?;
    try_join_all(rows.into_iter().map(|row| self.hydrate(row))).await
  }

  async fn hydrate(&self, row: CartRow) -> StorefrontResult<CartLineItem> {
    let size_id = row.size;
    let size = async {
      match size_id {
        Some(id) => self.catalog.size(id).await.map(Some),
        None => Ok(None),
      }
    };
    let (variant, size) = try_join(self.catalog.variant(row.variant), size).await?;
    Ok(CartLineItem::hydrate(row, variant, size))
  }

  /// Posts a new line, then refetches. No optimistic insert: the server
  /// assigns the row id.
  #[instrument(name = "CartStore::add", skip(self), err(Display))]
  pub async fn add(&self, variant_id: u64, size_id: Option<u64>, quantity: u32, checked: bool) -> StorefrontResult<()> {
    let session = self.session.require("cart.add").map_err(|err| {
      self.notifier.notify(Notice::warning("Please log in to add items to your cart"));
      err
    })?;
    if quantity == 0 {
      return Err(StorefrontError::ValidationSkip {
        operation: "cart.add",
        reason: "quantity must be at least 1".to_string(),
      });
    }

    let line = AddToCart {
      user_id: session.user_id,
      variant_id,
      size_id,
      quantity,
      checked,
    };
    if let Err(err) = self.cart.add_to_cart(&line).await {
      self.record_failure(&err, "Could not add item to cart");
      return Err(err);
    }
    self.notifier.notify(Notice::success("Item added to cart"));
    self.fetch().await
  }

  #[instrument(name = "CartStore::remove", skip(self), err(Display))]
  pub async fn remove(&self, variant_id: u64, size_id: Option<u64>) -> StorefrontResult<()> {
    let key = LineKey::new(variant_id, size_id);
    self
      .optimistic("cart.remove", key, CartAction::RemoveLines(key), || self.cart.remove_from_cart(key))
      .await
  }

  #[instrument(name = "CartStore::update_quantity", skip(self), err(Display))]
  pub async fn update_quantity(
    &self,
    variant_id: u64,
    size_id: Option<u64>,
    quantity: u32,
    checked: bool,
  ) -> StorefrontResult<()> {
    let key = LineKey::new(variant_id, size_id);
    if quantity == 0 {
      return Err(StorefrontError::ValidationSkip {
        operation: "cart.update_quantity",
        reason: "quantity must be at least 1".to_string(),
      });
    }
    let action = CartAction::UpdateLine {
      key,
      quantity,
      checked: Some(checked),
    };
    self
      .optimistic("cart.update_quantity", key, action, || {
        self.cart.update_cart_line(key, quantity, checked)
      })
      .await
  }

  #[instrument(name = "CartStore::update_checked", skip(self), err(Display))]
  pub async fn update_checked(&self, variant_id: u64, size_id: Option<u64>, checked: bool) -> StorefrontResult<()> {
    let key = LineKey::new(variant_id, size_id);
    self
      .optimistic("cart.update_checked", key, CartAction::SetChecked { key, checked }, || {
        self.cart.update_cart_checked(key, checked)
      })
      .await
  }

  /// Applies `action`, awaits `remote` and restores the lines of `key` if it
  /// fails. Runs inside the lane of `key`. A key with no local line changes
  /// nothing locally, but the request is still sent and its result returned.
  async fn optimistic<F, Fut>(
    &self,
    operation: &'static str,
    key: LineKey,
    action: CartAction,
    remote: F,
  ) -> StorefrontResult<()>
  where
    F: FnOnce() -> Fut,
    Fut: Future<Output = StorefrontResult<()>>,
  {
    self.require_session(operation)?;
    let _permit = self.lanes.keyed(key).await;

    let snapshot = {
      let state = self.state.read();
      state.contains(key).then(|| state.items.clone())
    };

    match &snapshot {
      Some(_) => self.dispatch(action),
      None => event!(Level::DEBUG, %key, operation, "No matching cart line, sending request only."),
    }
    match remote().await {
      Ok(()) => {
        event!(Level::DEBUG, %key, operation, "Server confirmed cart mutation.");
        Ok(())
      }
      Err(err) => {
        if let Some(snapshot) = snapshot {
          event!(Level::WARN, %key, operation, "Server refused cart mutation, restoring line.");
          self.dispatch(CartAction::RestoreLines { key, snapshot });
        }
        self.record_failure(&err, "Could not update the cart");
        Err(err)
      }
    }
  }

  /// Empties the cart locally, then on the server. Restores everything on
  /// failure.
  #[instrument(name = "CartStore::clear", skip_all, err(Display))]
  pub async fn clear(&self) -> StorefrontResult<()> {
    self.require_session("cart.clear")?;
    let _exclusive = self.lanes.exclusive().await;

    let snapshot = self.state.read().items.clone();
    self.dispatch(CartAction::Clear);
    match self.cart.empty_cart().await {
      Ok(()) => {
        self.notifier.notify(Notice::success("Cleared!"));
        Ok(())
      }
      Err(err) => {
        self.dispatch(CartAction::RestoreAll(snapshot));
        self.record_failure(&err, "Could not clear the cart");
        Err(err)
      }
    }
  }

  /// Local reset to the empty state. No remote call.
  pub fn reset(&self) {
    event!(Level::DEBUG, "Cart reset.");
    self.dispatch(CartAction::Reset);
  }
}
