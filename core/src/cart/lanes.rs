// core/src/cart/lanes.rs

//! Ordering of cart mutations.
//!
//! Mutations on the same line key run one after another, in call order.
//! Mutations on different keys run concurrently. Whole-cart operations
//! (fetch, clear) take the gate exclusively and so never overlap a keyed
//! mutation.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard, RwLock as AsyncRwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::model::LineKey;

#[derive(Debug, Default)]
pub struct MutationLanes {
  gate: AsyncRwLock<()>,
  lanes: Mutex<HashMap<LineKey, Arc<AsyncMutex<()>>>>,
}

/// Held for the whole duration of a keyed mutation.
#[derive(Debug)]
pub struct KeyedPermit<'a> {
  _gate: RwLockReadGuard<'a, ()>,
  _lane: OwnedMutexGuard<()>,
}

impl MutationLanes {
  pub fn new() -> Self {
    Self::default()
  }

  pub async fn keyed(&self, key: LineKey) -> KeyedPermit<'_> {
    let gate = self.gate.read().await;
    let lane = {
      let mut lanes = self.lanes.lock();
      // Drop lanes nobody waits on; clones only exist while a permit is pending or held.
      lanes.retain(|_, lane| Arc::strong_count(lane) > 1);
      lanes.entry(key).or_default().clone()
    };
    let guard = lane.lock_owned().await;
    KeyedPermit {
      _gate: gate,
      _lane: guard,
    }
  }

  pub async fn exclusive(&self) -> RwLockWriteGuard<'_, ()> {
    self.gate.write().await
  }

  pub fn active_lanes(&self) -> usize {
    self.lanes.lock().values().filter(|lane| Arc::strong_count(lane) > 1).count()
  }
}
