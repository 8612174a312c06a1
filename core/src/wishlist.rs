// core/src/wishlist.rs

//! Wishlist membership for the product being looked at, plus the
//! process-wide wishlist the cart view consults.
//!
//! Fire-and-confirm: nothing local changes until the server has answered.

use std::sync::Arc;
use tracing::{event, instrument, Level};

use crate::error::{StorefrontError, StorefrontResult};
use crate::model::WishlistEntry;
use crate::notify::{Notice, Notifier};
use crate::remote::{CatalogService, WishlistService};
use crate::session::SessionHandle;
use crate::state::SharedState;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WishlistState {
  /// Whether the variant last checked, added or removed is on the wishlist.
  pub wished: bool,
  pub entries: Vec<WishlistEntry>,
  pub error: Option<String>,
}

impl WishlistState {
  pub fn contains_variant(&self, variant_id: u64) -> bool {
    self.entries.iter().any(|entry| entry.variant.id == variant_id)
  }
}

pub struct WishlistStore {
  state: SharedState<WishlistState>,
  wishlist: Arc<dyn WishlistService>,
  catalog: Arc<dyn CatalogService>,
  session: SessionHandle,
  notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for WishlistStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("WishlistStore").field("state", &self.state).finish_non_exhaustive()
  }
}

impl WishlistStore {
  pub fn new(
    wishlist: Arc<dyn WishlistService>,
    catalog: Arc<dyn CatalogService>,
    session: SessionHandle,
    notifier: Arc<dyn Notifier>,
  ) -> Self {
    Self {
      state: SharedState::default(),
      wishlist,
      catalog,
      session,
      notifier,
    }
  }

  pub fn snapshot(&self) -> WishlistState {
    self.state.snapshot()
  }

  pub fn is_wished(&self) -> bool {
    self.state.read().wished
  }

  pub fn contains_variant(&self, variant_id: u64) -> bool {
    self.state.read().contains_variant(variant_id)
  }

  /// Seeds the process-wide list, e.g. from a wishlist page load.
  pub fn set_entries(&self, entries: Vec<WishlistEntry>) {
    self.state.update(|state| state.entries = entries);
  }

  pub fn reset(&self) {
    self.state.update(|state| *state = WishlistState::default());
  }

  fn record_failure(&self, err: &StorefrontError, what: &str) {
    event!(Level::ERROR, error = %err, "{} failed.", what);
    let message = err.to_string();
    self.state.update(|state| state.error = Some(message));
  }

  /// Asks the server whether `variant_id` is on the user's wishlist.
  /// Without a session or a variant the answer is `false` and nothing is sent.
  #[instrument(name = "WishlistStore::check_exists", skip(self), err(Display))]
  pub async fn check_exists(&self, variant_id: Option<u64>) -> StorefrontResult<bool> {
    let (Some(user_id), Some(variant_id)) = (self.session.user_id(), variant_id) else {
      self.state.update(|state| state.wished = false);
      return Ok(false);
    };

    match self.wishlist.wishlist_contains(user_id, variant_id).await {
      Ok(exists) => {
        self.state.update(|state| state.wished = exists);
        Ok(exists)
      }
      Err(err) => {
        self.record_failure(&err, "Wishlist check");
        Err(err)
      }
    }
  }

  /// Adds `variant_id` and stores its details in the list. Returns the id of
  /// the new wishlist entry.
  #[instrument(name = "WishlistStore::add", skip(self), err(Display))]
  pub async fn add(&self, variant_id: u64) -> StorefrontResult<u64> {
    let session = self.session.require("wishlist.add").map_err(|err| {
      self.notifier.notify(Notice::warning("Please login"));
      err
    })?;

    let added = async {
      let entry_id = self.wishlist.wishlist_add(session.user_id, variant_id).await?;
      let variant = self.catalog.variant(variant_id).await?;
      Ok::<_, StorefrontError>(WishlistEntry { id: entry_id, variant })
    };

    match added.await {
      Ok(entry) => {
        let entry_id = entry.id;
        self.state.update(|state| {
          state.entries.retain(|existing| existing.id != entry_id);
          state.entries.push(entry);
          state.wished = true;
          state.error = None;
        });
        self.notifier.notify(Notice::success("Product added to wishlist"));
        Ok(entry_id)
      }
      Err(err) => {
        self.record_failure(&err, "Wishlist add");
        Err(err)
      }
    }
  }

  /// Removes `variant_id`. Returns the id of the deleted wishlist entry.
  #[instrument(name = "WishlistStore::remove", skip(self), err(Display))]
  pub async fn remove(&self, variant_id: u64) -> StorefrontResult<u64> {
    let session = self.session.require("wishlist.remove").map_err(|err| {
      self.notifier.notify(Notice::warning("Please login"));
      err
    })?;

    match self.wishlist.wishlist_remove(session.user_id, variant_id).await {
      Ok(deleted) => {
        self.state.update(|state| {
          state.entries.retain(|entry| entry.id != deleted);
          state.wished = false;
          state.error = None;
        });
        self.notifier.notify(Notice::success("Product removed from wishlist"));
        Ok(deleted)
      }
      Err(err) => {
        self.record_failure(&err, "Wishlist remove");
        Err(err)
      }
    }
  }
}
