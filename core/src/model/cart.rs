// core/src/model/cart.rs

//! Cart rows: the raw wire form and the hydrated line item.

use serde::{Deserialize, Serialize};

use super::catalog::{ProductSize, ProductVariant};

/// A cart row as `GET cart/` returns it: references only, no details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartRow {
  pub id: u64,
  pub variant: u64,
  #[serde(default)]
  pub size: Option<u64>,
  pub quantity: u32,
  #[serde(default)]
  pub checked: Option<bool>,
}

/// Identifies a cart line by (variant, size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineKey {
  pub variant_id: u64,
  pub size_id: Option<u64>,
}

impl LineKey {
  pub fn new(variant_id: u64, size_id: Option<u64>) -> Self {
    Self { variant_id, size_id }
  }

  /// A line matches when the variant ids are equal and the size ids are equal.
  /// `size_id: None` only matches lines without a size; it is not a wildcard.
  pub fn matches(&self, item: &CartLineItem) -> bool {
    item.variant.id == self.variant_id && item.size_id() == self.size_id
  }
}

impl std::fmt::Display for LineKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self.size_id {
      Some(size) => write!(f, "{}/{}", self.variant_id, size),
      None => write!(f, "{}/-", self.variant_id),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
  pub id: u64,
  pub variant: ProductVariant,
  pub size: Option<ProductSize>,
  pub quantity: u32,
  pub checked: bool,
}

impl CartLineItem {
  /// The single entry point for line items. An absent checked flag means
  /// the line is selected.
  pub fn new(
    id: u64,
    variant: ProductVariant,
    size: Option<ProductSize>,
    quantity: u32,
    checked: Option<bool>,
  ) -> Self {
    Self {
      id,
      variant,
      size,
      quantity,
      checked: checked.unwrap_or(true),
    }
  }

  /// Builds a line from a raw row and its resolved details.
  pub fn hydrate(row: CartRow, variant: ProductVariant, size: Option<ProductSize>) -> Self {
    Self::new(row.id, variant, size, row.quantity, row.checked)
  }

  pub fn size_id(&self) -> Option<u64> {
    self.size.as_ref().map(|s| s.id)
  }

  pub fn key(&self) -> LineKey {
    LineKey::new(self.variant.id, self.size_id())
  }

  pub fn line_total(&self) -> f64 {
    self.variant.price * f64::from(self.quantity)
  }
}
