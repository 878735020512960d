//! Observable value holder with subscribe-and-notify semantics.
//!
//! A subscriber gets the current value as soon as it registers, then every
//! value passed to [`Writable::set`]. Callbacks run after the internal lock
//! is released, so a callback may subscribe, unsubscribe or `set` without
//! deadlocking.
//!
//! Values reach subscribers in the order they were set. A `set` issued while
//! another delivery is in progress (from a callback, or from another thread)
//! is queued and delivered by the caller already draining the queue, so the
//! last value delivered always matches what `get` returns.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

pub type RunFn<T> = dyn Fn(Option<&T>) + Send + Sync;
pub type InvalidateFn = dyn Fn() + Send + Sync;

struct Subscriber<T> {
    id: u64,
    run: Arc<RunFn<T>>,
    invalidate: Option<Arc<InvalidateFn>>,
}

impl<T> Clone for Subscriber<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            run: Arc::clone(&self.run),
            invalidate: self.invalidate.clone(),
        }
    }
}

type Delivery<T> = (Vec<Subscriber<T>>, Arc<T>);

struct Inner<T> {
    value: Option<Arc<T>>,
    subscribers: Vec<Subscriber<T>>,
    next_id: u64,
    pending: VecDeque<Delivery<T>>,
    delivering: bool,
}

fn lock<T>(inner: &Mutex<Inner<T>>) -> MutexGuard<'_, Inner<T>> {
    // A panicking subscriber never holds the lock, so the state is consistent.
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Read side of a store.
pub trait Readable<T> {
    fn subscribe_with(
        &self,
        run: Box<RunFn<T>>,
        invalidate: Option<Box<InvalidateFn>>,
    ) -> Subscription;

    fn get(&self) -> Option<Arc<T>>;

    fn subscribe<F>(&self, run: F) -> Subscription
    where
        F: Fn(Option<&T>) + Send + Sync + 'static,
    {
        self.subscribe_with(Box::new(run), None)
    }
}

/// Handle returned by `subscribe`. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Keeps the subscriber registered for as long as the store lives.
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Shared, cloneable store. Clones observe the same value.
pub struct Writable<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for Writable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for Writable<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Writable<T> {
    pub fn empty() -> Self {
        Self::from_option(None)
    }

    pub fn new(value: T) -> Self {
        Self::from_option(Some(Arc::new(value)))
    }

    fn from_option(value: Option<Arc<T>>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                value,
                subscribers: Vec::new(),
                next_id: 0,
                pending: VecDeque::new(),
                delivering: false,
            })),
        }
    }

    /// Replaces the value and notifies every subscriber: invalidate callbacks
    /// first, then the new value.
    pub fn set(&self, value: T) {
        let value = Arc::new(value);
        {
            let mut inner = lock(&self.inner);
            inner.value = Some(Arc::clone(&value));
            let subscribers = inner.subscribers.clone();
            inner.pending.push_back((subscribers, value));
            if inner.delivering {
                return;
            }
            inner.delivering = true;
        }

        let _drain = DrainGuard { inner: &self.inner };
        loop {
            let (subscribers, value) = {
                let mut inner = lock(&self.inner);
                match inner.pending.pop_front() {
                    Some(delivery) => delivery,
                    None => {
                        inner.delivering = false;
                        return;
                    }
                }
            };

            for subscriber in &subscribers {
                if let Some(invalidate) = &subscriber.invalidate {
                    invalidate();
                }
            }
            for subscriber in &subscribers {
                (subscriber.run)(Some(value.as_ref()));
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner).subscribers.len()
    }
}

// Releases the drain role if a subscriber panics mid-delivery.
struct DrainGuard<'a, T> {
    inner: &'a Mutex<Inner<T>>,
}

impl<T> Drop for DrainGuard<'_, T> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let mut inner = lock(self.inner);
            inner.pending.clear();
            inner.delivering = false;
        }
    }
}

impl<T: Send + Sync + 'static> Readable<T> for Writable<T> {
    fn subscribe_with(
        &self,
        run: Box<RunFn<T>>,
        invalidate: Option<Box<InvalidateFn>>,
    ) -> Subscription {
        let run: Arc<RunFn<T>> = Arc::from(run);
        let (id, current) = {
            let mut inner = lock(&self.inner);
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.push(Subscriber {
                id,
                run: Arc::clone(&run),
                invalidate: invalidate.map(Arc::from),
            });
            (id, inner.value.clone())
        };

        run(current.as_deref());

        let weak: Weak<Mutex<Inner<T>>> = Arc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    lock(&inner).subscribers.retain(|s| s.id != id);
                }
            })),
        }
    }

    fn get(&self) -> Option<Arc<T>> {
        lock(&self.inner).value.clone()
    }
}
