// src/lib.rs

//! Storefront: the client side of an e-commerce shop.
//!
//! Pricing, inventory and payment live in a remote REST API. This crate
//! fetches from it, keeps the results in memory, mutates the cart
//! optimistically and produces render-ready views:
//!  - A cart store with typed actions, per-line ordering and rollback.
//!  - A wishlist store and a comment thread per product.
//!  - A product page loader.
//!  - A checkout handoff to a hosted payment page.

pub mod cart;
pub mod checkout;
pub mod client;
pub mod comments;
pub mod config;
pub mod error;
pub mod model;
pub mod notify;
pub mod presentation;
pub mod product;
pub mod remote;
pub mod session;
pub mod state;
pub mod wishlist;

// --- Re-exports for the Public API ---

pub use crate::cart::{CartAction, CartState, CartStore};
pub use crate::checkout::{CheckoutHandoff, CheckoutRedirect, PaymentOutcome};
pub use crate::client::{StorefrontApi, StorefrontClient};
pub use crate::comments::CommentThread;
pub use crate::config::ClientConfig;
pub use crate::error::{StorefrontError, StorefrontResult};
pub use crate::model::{CartLineItem, LineKey, Product, ProductSize, ProductVariant};
pub use crate::notify::{Notice, NoticeLevel, Notifier, TracingNotifier};
pub use crate::presentation::{CartIntent, CartView};
pub use crate::product::ProductPage;
pub use crate::session::{Session, SessionHandle};
pub use crate::state::SharedState;
pub use crate::wishlist::WishlistStore;

/*
    Typical flow:
    1. Build a `ClientConfig` from the API base URL.
    2. `StorefrontClient::connect(config)` (or `with_api` with another backend).
    3. `client.sign_in(Session::new(user_id, token)).await` loads the cart.
    4. Mutate through `client.cart()`; render with `client.cart_view()`.
    5. `client.checkout().await` returns the URL of the payment page.
*/
