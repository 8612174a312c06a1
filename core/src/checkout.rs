// core/src/checkout.rs

//! Handoff to the hosted payment page, and parsing of the page the payment
//! provider redirects back to.

use std::sync::Arc;
use tracing::{event, instrument, Level};

use crate::cart::CartState;
use crate::error::{StorefrontError, StorefrontResult};
use crate::notify::{Notice, Notifier};
use crate::remote::{CheckoutLine, CheckoutRequest, CheckoutService};
use crate::session::SessionHandle;

/// Where the caller must navigate to pay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRedirect {
  pub url: String,
}

pub struct CheckoutHandoff {
  service: Arc<dyn CheckoutService>,
  session: SessionHandle,
  notifier: Arc<dyn Notifier>,
}

impl CheckoutHandoff {
  pub fn new(service: Arc<dyn CheckoutService>, session: SessionHandle, notifier: Arc<dyn Notifier>) -> Self {
    Self {
      service,
      session,
      notifier,
    }
  }

  /// The payload for the checked lines of `cart`.
  pub fn request_for(cart: &CartState) -> CheckoutRequest {
    CheckoutRequest {
      cart_items: cart
        .checked_items()
        .map(|item| CheckoutLine {
          variant_id: item.variant.id,
          size_id: item.size_id(),
          qty: item.quantity,
        })
        .collect(),
    }
  }

  /// Creates a checkout session for the checked lines. The cart itself is
  /// not touched.
  #[instrument(name = "CheckoutHandoff::start", skip_all, err(Display))]
  pub async fn start(&self, cart: &CartState) -> StorefrontResult<CheckoutRedirect> {
    self.session.require("checkout.start").map_err(|err| {
      self.notifier.notify(Notice::info("Please login"));
      err
    })?;

    let request = Self::request_for(cart);
    if request.cart_items.is_empty() {
      self.notifier.notify(Notice::warning("Select at least one item to check out"));
      return Err(StorefrontError::ValidationSkip {
        operation: "checkout.start",
        reason: "no checked cart lines".to_string(),
      });
    }

    let session = self.service.create_checkout_session(&request).await?;
    event!(Level::INFO, lines = request.cart_items.len(), "Checkout session created.");
    Ok(CheckoutRedirect { url: session.url })
  }
}

/// The order confirmed by the payment provider's success redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOutcome {
  pub order_id: String,
}

impl PaymentOutcome {
  pub const SUCCESS_PREFIX: &'static str = "/payment-success/";

  /// Parses `/payment-success/{order_id}` (query string and trailing slash
  /// ignored). Any other path yields `None`.
  pub fn from_path(path: &str) -> Option<Self> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let order_id = path.strip_prefix(Self::SUCCESS_PREFIX)?.trim_end_matches('/');
    if order_id.is_empty() || order_id.contains('/') {
      return None;
    }
    Some(Self {
      order_id: order_id.to_string(),
    })
  }

  pub fn message(&self) -> String {
    format!("Order {} was placed successfully.", self.order_id)
  }
}
