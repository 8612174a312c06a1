// core/src/presentation.rs

//! Render-ready model of the cart page.
//!
//! The view reads a [`CartState`] and turns user input into [`CartIntent`]s.
//! It never mutates cart state itself: intents go to the [`CartStore`].

use std::collections::HashSet;

use crate::cart::{round_to_cents, CartState, CartStore};
use crate::config::ClientConfig;
use crate::error::StorefrontResult;
use crate::model::{CartLineItem, LineKey};
use crate::wishlist::WishlistState;

/// Upper quantity bound when a variant does not report its stock.
pub const DEFAULT_MAX_QUANTITY: u32 = 99;

#[derive(Debug, Clone, PartialEq)]
pub struct CartRowView {
  pub line_id: u64,
  pub key: LineKey,
  pub product_id: Option<u64>,
  pub title: String,
  pub color: Option<String>,
  pub price: f64,
  pub size_label: Option<String>,
  pub image_url: Option<String>,
  pub quantity: u32,
  pub min_quantity: u32,
  pub max_quantity: u32,
  pub checked: bool,
  pub wishlisted: bool,
  /// `/product/{product_id}/{variant_id}`, when the parent product is known.
  pub link: Option<String>,
}

impl CartRowView {
  fn from_line(item: &CartLineItem, wishlist: &WishlistState, config: &ClientConfig) -> Self {
    let variant = &item.variant;
    Self {
      line_id: item.id,
      key: item.key(),
      product_id: variant.product.as_ref().map(|p| p.id),
      title: variant.title().to_string(),
      color: variant.color.clone(),
      price: variant.price,
      size_label: item.size.as_ref().map(|s| s.label.clone()),
      image_url: variant.main_image().and_then(|img| config.media_url(&img.image)),
      quantity: item.quantity,
      min_quantity: 1,
      max_quantity: max_quantity(variant.stock),
      checked: item.checked,
      wishlisted: wishlist.contains_variant(variant.id),
      link: variant.product.as_ref().map(|p| product_link(p.id, variant.id)),
    }
  }

  /// Title with the color appended, as shown on the line.
  pub fn display_title(&self) -> String {
    match &self.color {
      Some(color) => format!("{} ({})", self.title, color),
      None => self.title.clone(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
  pub subtotal: String,
  pub total: String,
}

/// What the user asked for on the cart page.
#[derive(Debug, Clone, PartialEq)]
pub enum CartIntent {
  Remove(LineKey),
  UpdateQuantity { key: LineKey, quantity: u32, checked: bool },
  UpdateChecked { key: LineKey, checked: bool },
  Navigate { product_id: u64, variant_id: u64 },
}

#[derive(Debug, Clone)]
pub struct CartView {
  rows: Vec<CartRowView>,
  /// View-local selection. Not authoritative: it may disagree with the
  /// checked flags until the store recomputes.
  selection: HashSet<u64>,
  total_price: f64,
}

impl CartView {
  pub fn build(cart: &CartState, wishlist: &WishlistState, config: &ClientConfig) -> Self {
    let rows: Vec<CartRowView> = cart
      .items
      .iter()
      .map(|item| CartRowView::from_line(item, wishlist, config))
      .collect();
    let selection = rows.iter().map(|row| row.line_id).collect();
    Self {
      rows,
      selection,
      total_price: cart.total_price,
    }
  }

  pub fn rows(&self) -> &[CartRowView] {
    &self.rows
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  fn row(&self, line_id: u64) -> Option<&CartRowView> {
    self.rows.iter().find(|row| row.line_id == line_id)
  }

  pub fn is_selected(&self, line_id: u64) -> bool {
    self.selection.contains(&line_id)
  }

  pub fn toggle(&mut self, line_id: u64) {
    if !self.selection.remove(&line_id) {
      self.selection.insert(line_id);
    }
  }

  /// Sum of price * quantity over the view-local selection.
  pub fn selected_subtotal(&self) -> f64 {
    let sum: f64 = self
      .rows
      .iter()
      .filter(|row| self.selection.contains(&row.line_id))
      .map(|row| row.price * f64::from(row.quantity))
      .sum();
    round_to_cents(sum)
  }

  /// Subtotal and total as displayed, from the store's total.
  pub fn summary(&self) -> CartSummary {
    let formatted = format_price(self.total_price);
    CartSummary {
      subtotal: formatted.clone(),
      total: formatted,
    }
  }

  pub fn remove_intent(&self, line_id: u64) -> Option<CartIntent> {
    self.row(line_id).map(|row| CartIntent::Remove(row.key))
  }

  /// Quantity typed into a line's input. The line keeps its view-local
  /// selection as its checked flag.
  pub fn quantity_intent(&self, line_id: u64, input: &str) -> Option<CartIntent> {
    let row = self.row(line_id)?;
    Some(CartIntent::UpdateQuantity {
      key: row.key,
      quantity: parse_quantity(input, Some(row.max_quantity)),
      checked: self.is_selected(line_id),
    })
  }

  /// The line's checkbox was clicked.
  pub fn check_intent(&self, line_id: u64) -> Option<CartIntent> {
    self.row(line_id).map(|row| CartIntent::UpdateChecked {
      key: row.key,
      checked: !row.checked,
    })
  }

  pub fn navigate_intent(&self, line_id: u64) -> Option<CartIntent> {
    let row = self.row(line_id)?;
    Some(CartIntent::Navigate {
      product_id: row.product_id?,
      variant_id: row.key.variant_id,
    })
  }

  /// Hands an intent to the store. Returns the route to navigate to, if any.
  pub async fn dispatch(store: &CartStore, intent: CartIntent) -> StorefrontResult<Option<String>> {
    match intent {
      CartIntent::Remove(key) => store.remove(key.variant_id, key.size_id).await.map(|_| None),
      CartIntent::UpdateQuantity { key, quantity, checked } => store
        .update_quantity(key.variant_id, key.size_id, quantity, checked)
        .await
        .map(|_| None),
      CartIntent::UpdateChecked { key, checked } => {
        store.update_checked(key.variant_id, key.size_id, checked).await.map(|_| None)
      }
      CartIntent::Navigate { product_id, variant_id } => Ok(Some(product_link(product_id, variant_id))),
    }
  }
}

pub fn product_link(product_id: u64, variant_id: u64) -> String {
  format!("/product/{}/{}", product_id, variant_id)
}

pub fn max_quantity(stock: Option<u32>) -> u32 {
  stock.unwrap_or(DEFAULT_MAX_QUANTITY).max(1)
}

/// Parses a typed quantity. Invalid or zero input gives 1; the result is
/// clamped to the stock bound.
pub fn parse_quantity(input: &str, stock: Option<u32>) -> u32 {
  let parsed = input.trim().parse::<u32>().ok().filter(|q| *q > 0).unwrap_or(1);
  parsed.min(max_quantity(stock))
}

pub fn format_price(value: f64) -> String {
  format!("{:.2} $", value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Star {
  Full,
  Half,
  Empty,
}

impl Star {
  pub fn glyph(self) -> char {
    match self {
      Star::Full => '★',
      Star::Half => '⯪',
      Star::Empty => '☆',
    }
  }
}

/// Five stars for an average rating. A star is full once the rating reaches
/// it and half from half a point below. No rating gives five empty stars.
pub fn star_rating(rating: Option<f64>) -> [Star; 5] {
  let rating = rating.unwrap_or(0.0);
  std::array::from_fn(|i| {
    let position = (i + 1) as f64;
    if rating >= position {
      Star::Full
    } else if rating >= position - 0.5 {
      Star::Half
    } else {
      Star::Empty
    }
  })
}
