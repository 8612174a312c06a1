// core/src/cart/reducer.rs

//! Typed actions over [`CartState`] and the pure function applying them.
//!
//! Every action that touches `items` ends with a totals recompute, so the
//! derived fields can never drift from the line items.

use super::state::CartState;
use crate::model::{CartLineItem, LineKey};

#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
  SetLoading(bool),
  SetError(Option<String>),
  /// Wholesale replacement with server data. Ends any loading state.
  Replace(Vec<CartLineItem>),
  /// Sets quantity (and checked, when given) on every matching line.
  UpdateLine {
    key: LineKey,
    quantity: u32,
    checked: Option<bool>,
  },
  SetChecked {
    key: LineKey,
    checked: bool,
  },
  RemoveLines(LineKey),
  /// Puts back the lines matching `key` as they were in `snapshot`,
  /// leaving every other line as it currently is.
  RestoreLines {
    key: LineKey,
    snapshot: Vec<CartLineItem>,
  },
  /// Replaces all items with a snapshot.
  RestoreAll(Vec<CartLineItem>),
  Clear,
  /// Back to the initial state (logout).
  Reset,
}

pub fn reduce(state: &mut CartState, action: CartAction) {
  match action {
    CartAction::SetLoading(loading) => {
      state.loading = loading;
    }
    CartAction::SetError(error) => {
      state.error = error;
    }
    CartAction::Replace(items) => {
      state.items = items;
      state.loading = false;
      state.recalculate_totals();
    }
    CartAction::UpdateLine { key, quantity, checked } => {
      for item in state.items.iter_mut().filter(|item| key.matches(item)) {
        item.quantity = quantity;
        if let Some(checked) = checked {
          item.checked = checked;
        }
      }
      state.recalculate_totals();
    }
    CartAction::SetChecked { key, checked } => {
      for item in state.items.iter_mut().filter(|item| key.matches(item)) {
        item.checked = checked;
      }
      state.recalculate_totals();
    }
    CartAction::RemoveLines(key) => {
      state.items.retain(|item| !key.matches(item));
      state.recalculate_totals();
    }
    CartAction::RestoreLines { key, snapshot } => {
      state.items.retain(|item| !key.matches(item));
      for (index, line) in snapshot.into_iter().enumerate().filter(|(_, line)| key.matches(line)) {
        let at = index.min(state.items.len());
        state.items.insert(at, line);
      }
      state.recalculate_totals();
    }
    CartAction::RestoreAll(items) => {
      state.items = items;
      state.recalculate_totals();
    }
    CartAction::Clear => {
      state.items.clear();
      state.recalculate_totals();
    }
    CartAction::Reset => {
      *state = CartState::default();
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::{ProductSize, ProductVariant};

  fn line(id: u64, variant_id: u64, size: Option<u64>, qty: u32, checked: bool, price: f64) -> CartLineItem {
    let variant = ProductVariant {
      id: variant_id,
      price,
      stock: Some(10),
      color: None,
      images: vec![],
      product: None,
    };
    let size = size.map(|id| ProductSize { id, label: "M".into() });
    CartLineItem::new(id, variant, size, qty, Some(checked))
  }

  fn scenario() -> CartState {
    CartState::with_items(vec![
      line(1, 1, None, 2, true, 10.0),
      line(2, 2, Some(5), 1, false, 20.0),
    ])
  }

  #[test]
  fn checking_a_line_updates_totals() {
    let mut state = scenario();
    assert_eq!((state.total_amount, state.total_price), (2, 20.0));

    reduce(&mut state, CartAction::SetChecked { key: LineKey::new(2, Some(5)), checked: true });
    assert_eq!(state.total_amount, 3);
    assert_eq!(state.total_price, 40.0);
  }

  #[test]
  fn checking_an_unknown_line_changes_nothing() {
    let mut state = scenario();
    let before = state.clone();
    reduce(&mut state, CartAction::SetChecked { key: LineKey::new(9, None), checked: true });
    reduce(&mut state, CartAction::SetChecked { key: LineKey::new(2, None), checked: true });
    assert_eq!(state, before);
  }

  #[test]
  fn removing_without_size_keeps_sized_lines_of_the_variant() {
    let mut state = CartState::with_items(vec![
      line(1, 3, None, 1, true, 5.0),
      line(2, 3, Some(7), 1, true, 5.0),
    ]);
    reduce(&mut state, CartAction::RemoveLines(LineKey::new(3, None)));
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id, 2);
    assert_eq!(state.total_price, 5.0);
  }

  #[test]
  fn update_line_sets_quantity_and_optional_checked() {
    let mut state = scenario();
    reduce(&mut state, CartAction::UpdateLine { key: LineKey::new(1, None), quantity: 4, checked: None });
    assert_eq!(state.items[0].quantity, 4);
    assert!(state.items[0].checked);
    assert_eq!(state.total_price, 40.0);

    reduce(&mut state, CartAction::UpdateLine { key: LineKey::new(1, None), quantity: 4, checked: Some(false) });
    assert_eq!(state.total_amount, 0);
  }

  #[test]
  fn restore_lines_puts_removed_line_back_in_place() {
    let mut state = CartState::with_items(vec![
      line(1, 1, None, 1, true, 1.0),
      line(2, 2, None, 1, true, 2.0),
      line(3, 3, None, 1, true, 3.0),
    ]);
    let snapshot = state.items.clone();
    reduce(&mut state, CartAction::RemoveLines(LineKey::new(2, None)));
    reduce(&mut state, CartAction::RestoreLines { key: LineKey::new(2, None), snapshot: snapshot.clone() });
    assert_eq!(state.items, snapshot);
    assert_eq!(state.total_price, 6.0);
  }

  #[test]
  fn restore_lines_leaves_other_keys_alone() {
    let mut state = scenario();
    let snapshot = state.items.clone();
    reduce(&mut state, CartAction::UpdateLine { key: LineKey::new(1, None), quantity: 9, checked: None });
    // another key changed meanwhile and was confirmed
    reduce(&mut state, CartAction::SetChecked { key: LineKey::new(2, Some(5)), checked: true });
    reduce(&mut state, CartAction::RestoreLines { key: LineKey::new(1, None), snapshot });

    assert_eq!(state.items[0].quantity, 2);
    assert!(state.items[1].checked);
    assert_eq!(state.total_price, 40.0);
  }

  #[test]
  fn replace_ends_loading_and_reset_clears_everything() {
    let mut state = CartState::default();
    reduce(&mut state, CartAction::SetLoading(true));
    reduce(&mut state, CartAction::Replace(scenario().items));
    assert!(!state.loading);
    assert_eq!(state.total_amount, 2);

    reduce(&mut state, CartAction::SetError(Some("boom".into())));
    reduce(&mut state, CartAction::Reset);
    assert_eq!(state, CartState::default());
  }

  #[test]
  fn clear_zeroes_totals() {
    let mut state = scenario();
    reduce(&mut state, CartAction::Clear);
    assert!(state.is_empty());
    assert_eq!((state.total_amount, state.total_price), (0, 0.0));
  }
}
