//! Observable identity cell.
//!
//! DESIGN
//! ======
//! One `IdentityStore` is created by whoever composes the application and
//! handed to the [`crate::AuthClient`] and to any view that renders identity.
//! Clones share the same value. Observers are invoked synchronously, in
//! registration order.
//!
//! Two locks: `inner` guards the value and observer list, `broadcast`
//! serializes whole replace-and-notify passes (and the initial delivery in
//! `subscribe`). Observers run with only `broadcast` held, so they may call
//! `get` or `Subscription::cancel`, but must not call `set` or `subscribe`
//! on the same store.
//!
//! TRADE-OFFS
//! ==========
//! Concurrent `set` calls are last-write-wins, and every observer's last
//! delivery matches the stored value. There is no sequencing between
//! in-flight session fetches, so a slow response can overwrite a newer one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::identity::Identity;

type Observer = dyn Fn(&Identity) + Send + Sync;

struct Entry {
    id: u64,
    active: AtomicBool,
    observer: Box<Observer>,
}

impl Entry {
    fn notify(&self, identity: &Identity) {
        if self.active.load(Ordering::Acquire) {
            (self.observer)(identity);
        }
    }
}

#[derive(Default)]
struct Inner {
    value: Identity,
    entries: Vec<Arc<Entry>>,
    next_id: u64,
}

/// Shared, observable holder of the current [`Identity`].
#[derive(Clone, Default)]
pub struct IdentityStore {
    inner: Arc<Mutex<Inner>>,
    broadcast: Arc<Mutex<()>>,
}

impl std::fmt::Debug for IdentityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("IdentityStore")
            .field("value", &inner.value)
            .field("subscribers", &inner.entries.len())
            .finish()
    }
}

impl IdentityStore {
    /// A store holding the anonymous identity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_identity(identity: Identity) -> Self {
        let store = Self::default();
        store.lock().value = identity;
        store
    }

    /// Snapshot of the current value.
    #[must_use]
    pub fn get(&self) -> Identity {
        self.lock().value.clone()
    }

    /// Register `observer`. It is called once right away with the current
    /// value, then on every [`IdentityStore::set`] until the returned
    /// [`Subscription`] is cancelled.
    ///
    /// The observer must not call `set` or `subscribe` on this store.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&Identity) + Send + Sync + 'static,
    {
        let _broadcast = self.lock_broadcast();
        let (entry, current) = {
            let mut inner = self.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            let entry = Arc::new(Entry { id, active: AtomicBool::new(true), observer: Box::new(observer) });
            inner.entries.push(Arc::clone(&entry));
            (entry, inner.value.clone())
        };

        entry.notify(&current);
        Subscription { store: Arc::downgrade(&self.inner), entry }
    }

    /// Replace the value and notify every registered observer.
    ///
    /// Blocks while another `set` or `subscribe` is delivering, so observers
    /// never receive an older value after a newer one.
    pub fn set(&self, identity: Identity) {
        let _broadcast = self.lock_broadcast();
        let entries = {
            let mut inner = self.lock();
            inner.value = identity.clone();
            inner.entries.clone()
        };

        tracing::trace!(observers = entries.len(), authenticated = identity.is_authenticated(), "identity replaced");
        for entry in &entries {
            entry.notify(&identity);
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.lock().entries.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_broadcast(&self) -> std::sync::MutexGuard<'_, ()> {
        self.broadcast.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle returned by [`IdentityStore::subscribe`].
///
/// Dropping the handle leaves the observer registered; call
/// [`Subscription::cancel`] to stop notifications.
#[must_use = "dropping a Subscription keeps the observer registered; call cancel() to remove it"]
pub struct Subscription {
    store: Weak<Mutex<Inner>>,
    entry: Arc<Entry>,
}

impl Subscription {
    pub fn cancel(self) {
        self.entry.active.store(false, Ordering::Release);
        if let Some(store) = self.store.upgrade() {
            let mut inner = store.lock().unwrap_or_else(PoisonError::into_inner);
            inner.entries.retain(|entry| entry.id != self.entry.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.entry.id).finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
