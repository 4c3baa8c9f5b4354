//! Thread-safe bundle wrapper
//!
//! Factory calls and per-object edits take one lock, so identifier issue
//! and append happen as a single step. Serialization works on a snapshot
//! taken under the lock.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::{Bundle, Handle, StixKind};

/// A bundle that can be shared between threads
#[derive(Debug, Clone, Default)]
pub struct SharedBundle {
    inner: Arc<Mutex<Bundle>>,
}

impl SharedBundle {
    /// Share an existing bundle
    pub fn new(bundle: Bundle) -> Self {
        Self {
            inner: Arc::new(Mutex::new(bundle)),
        }
    }

    /// Create and register a blank object of kind `T`
    pub fn create<T: StixKind>(&self) -> Handle<T> {
        self.inner.lock().create()
    }

    /// Run `edit` on the object behind `handle` while holding the lock.
    ///
    /// Returns `None` if the handle belongs to another bundle.
    pub fn with_mut<T: StixKind, R>(&self, handle: &Handle<T>, edit: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut bundle = self.inner.lock();
        bundle.get_mut(handle).map(edit)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Copy of the bundle as it is now
    pub fn snapshot(&self) -> Bundle {
        self.inner.lock().clone()
    }

    /// Take the bundle back if this is the last reference to it
    pub fn into_inner(self) -> Result<Bundle, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl From<Bundle> for SharedBundle {
    fn from(bundle: Bundle) -> Self {
        Self::new(bundle)
    }
}
