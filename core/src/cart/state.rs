// core/src/cart/state.rs

use crate::model::{CartLineItem, LineKey};

/// Canonical cart contents plus the totals derived from them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
  pub items: Vec<CartLineItem>,
  /// Sum of quantities over checked lines.
  pub total_amount: u32,
  /// Sum of price * quantity over checked lines, rounded to cents.
  pub total_price: f64,
  pub loading: bool,
  pub error: Option<String>,
}

impl CartState {
  pub fn with_items(items: Vec<CartLineItem>) -> Self {
    let mut state = Self {
      items,
      ..Default::default()
    };
    state.recalculate_totals();
    state
  }

  /// Recomputes `total_amount` and `total_price` from `items`.
  pub fn recalculate_totals(&mut self) {
    let (amount, price) = self
      .checked_items()
      .fold((0u32, 0f64), |(amount, price), item| {
        (amount.saturating_add(item.quantity), price + item.line_total())
      });
    self.total_amount = amount;
    self.total_price = round_to_cents(price);
  }

  pub fn checked_items(&self) -> impl Iterator<Item = &CartLineItem> {
    self.items.iter().filter(|item| item.checked)
  }

  pub fn find(&self, key: LineKey) -> Option<&CartLineItem> {
    self.items.iter().find(|item| key.matches(item))
  }

  pub fn contains(&self, key: LineKey) -> bool {
    self.find(key).is_some()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }
}

/// Rounds half away from zero to two decimals.
pub fn round_to_cents(value: f64) -> f64 {
  (value * 100.0).round() / 100.0
}
