// core/src/state.rs

//! Shared, lockable state used by the stores.

use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Shared ownership plus interior mutability over `parking_lot::RwLock`.
///
/// IMPORTANT: guards are blocking and MUST NOT be held across `.await`
/// suspension points. Stores copy what they need out of the guard, drop it,
/// and only then call the remote service.
#[derive(Debug)]
pub struct SharedState<T: Send + Sync + 'static>(Arc<RwLock<T>>);

impl<T: Send + Sync + 'static> SharedState<T> {
  pub fn new(data: T) -> Self {
    SharedState(Arc::new(RwLock::new(data)))
  }

  pub fn read(&self) -> RwLockReadGuard<'_, T> {
    self.0.read()
  }

  pub fn write(&self) -> RwLockWriteGuard<'_, T> {
    self.0.write()
  }

  /// Read guard narrowed to one part of the state.
  pub fn map_read<F, U: ?Sized>(&self, f: F) -> MappedRwLockReadGuard<'_, U>
  where
    F: FnOnce(&T) -> &U,
  {
    RwLockReadGuard::map(self.read(), f)
  }

  /// Runs `f` under the write lock and returns its result.
  pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
    let mut guard = self.0.write();
    f(&mut guard)
  }
}

impl<T: Clone + Send + Sync + 'static> SharedState<T> {
  /// Clone of the current value.
  pub fn snapshot(&self) -> T {
    self.0.read().clone()
  }
}

impl<T: Send + Sync + 'static> Clone for SharedState<T> {
  fn clone(&self) -> Self {
    SharedState(Arc::clone(&self.0))
  }
}

impl<T: Send + Sync + 'static + Default> Default for SharedState<T> {
  fn default() -> Self {
    Self::new(Default::default())
  }
}
