//! # Change Subscriptions
//!
//! Providers announce every committed mutation to their listeners. Views register a
//! listener when they mount and keep the returned [`Subscription`]; dropping it
//! unregisters the listener.
//!
//! Listeners run after the provider has released its state lock, so reading the
//! provider from inside a listener is fine.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::{Arc, Weak};

type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Registry<E> {
    next_id: u64,
    listeners: BTreeMap<u64, Listener<E>>,
}

/// Listener registry for change events of type `E`.
pub struct Observers<E> {
    registry: Arc<Mutex<Registry<E>>>,
}

impl<E: 'static> Observers<E> {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                listeners: BTreeMap::new(),
            })),
        }
    }

    /// Register `listener`. It stays registered until the returned guard is dropped.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = {
            let mut registry = self.registry.lock();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.insert(id, Arc::new(listener));
            id
        };

        let weak: Weak<Mutex<Registry<E>>> = Arc::downgrade(&self.registry);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    registry.lock().listeners.remove(&id);
                }
            })),
        }
    }

    /// Call every listener with `event`, in registration order.
    pub fn notify(&self, event: &E) {
        let listeners: Vec<Listener<E>> = self.registry.lock().listeners.values().cloned().collect();
        for listener in listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.lock().listeners.len()
    }
}

impl<E: 'static> Default for Observers<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped registration handle returned by `subscribe`.
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Unregister now instead of at end of scope.
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_listener_receives_events_until_dropped() {
        let observers: Observers<u32> = Observers::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&seen);
        let subscription = observers.subscribe(move |value| {
            counter.fetch_add(*value as usize, Ordering::SeqCst);
        });

        observers.notify(&2);
        observers.notify(&3);
        assert_eq!(seen.load(Ordering::SeqCst), 5);
        assert_eq!(observers.listener_count(), 1);

        drop(subscription);
        observers.notify(&10);
        assert_eq!(seen.load(Ordering::SeqCst), 5);
        assert_eq!(observers.listener_count(), 0);
    }

    #[test]
    fn test_explicit_unsubscribe() {
        let observers: Observers<()> = Observers::new();
        let first = observers.subscribe(|_| {});
        let _second = observers.subscribe(|_| {});
        assert_eq!(observers.listener_count(), 2);

        first.unsubscribe();
        assert_eq!(observers.listener_count(), 1);
    }

    #[test]
    fn test_subscription_outliving_registry_is_harmless() {
        let observers: Observers<()> = Observers::new();
        let subscription = observers.subscribe(|_| {});
        drop(observers);
        drop(subscription);
    }
}
