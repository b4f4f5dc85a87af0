#![forbid(unsafe_code)]

//! Shared, version-tracked values with change notification.
//!
//! # Invariants
//!
//! 1. `version()` increments exactly once per `set`/`update` that changes the value.
//! 2. Setting a value equal to the current one is a no-op.
//! 3. Subscribers are notified in registration order.
//! 4. No internal borrow is held while a subscriber runs, so a subscriber may read
//!    or mutate the observable it is attached to.
//! 5. A change made from inside a subscriber notifies everyone with the newer
//!    value, and the outer round stops there. No subscriber sees an older value
//!    after a newer one.
//!
//! # Failure Modes
//!
//! - A subscriber that panics propagates the panic to the caller of `set`.
//! - Dropped subscriptions are pruned lazily on the next notification.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = dyn Fn(&T);

struct Inner<T> {
    value: T,
    version: u64,
    subscribers: Vec<Weak<Callback<T>>>,
}

/// A shared value that notifies subscribers when it changes.
///
/// Clones share the same underlying value.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .finish()
    }
}

impl<T: Default + Clone + PartialEq + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Wrap `value` in a new observable at version 0.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Clone out the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value for the duration of `f`.
    ///
    /// `f` must not mutate this observable.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value, notifying subscribers if it changed.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Mutate the value in place, notifying subscribers if it changed.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut next = self.get();
        f(&mut next);
        self.set(next);
    }

    /// Number of value-changing mutations so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Register `callback`, invoked with the new value after every change.
    ///
    /// The callback stays registered for as long as the returned guard lives.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let callback: Rc<Callback<T>> = Rc::new(callback);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&callback));
        Subscription {
            _guard: Box::new(callback),
        }
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    fn notify(&self) {
        let (value, version, live) = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|weak| weak.strong_count() > 0);
            let live: Vec<Rc<Callback<T>>> =
                inner.subscribers.iter().filter_map(Weak::upgrade).collect();
            (inner.value.clone(), inner.version, live)
        };
        for callback in live {
            if self.inner.borrow().version != version {
                // Superseded by a nested round.
                return;
            }
            callback(&value);
        }
    }
}

/// RAII guard for an [`Observable`] subscription.
///
/// Dropping the guard unsubscribes the callback.
pub struct Subscription {
    _guard: Box<dyn Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn set_bumps_version_once() {
        let obs = Observable::new(1);
        assert_eq!(obs.version(), 0);
        obs.set(2);
        assert_eq!(obs.version(), 1);
        assert_eq!(obs.get(), 2);
    }

    #[test]
    fn equal_set_is_noop() {
        let obs = Observable::new("a".to_string());
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let _sub = obs.subscribe(move |_| h.set(h.get() + 1));

        obs.set("a".to_string());
        assert_eq!(obs.version(), 0);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn subscribers_run_in_registration_order() {
        let obs = Observable::new(0);
        let order = Rc::new(RefCell::new(Vec::new()));

        let o1 = Rc::clone(&order);
        let _a = obs.subscribe(move |_| o1.borrow_mut().push("first"));
        let o2 = Rc::clone(&order);
        let _b = obs.subscribe(move |_| o2.borrow_mut().push("second"));

        obs.set(1);
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn dropped_subscription_stops_firing() {
        let obs = Observable::new(0);
        let seen = Rc::new(Cell::new(0));
        let s = Rc::clone(&seen);
        let sub = obs.subscribe(move |v| s.set(*v));

        obs.set(3);
        drop(sub);
        obs.set(9);
        assert_eq!(seen.get(), 3);
        assert_eq!(obs.subscriber_count(), 0);
    }

    #[test]
    fn subscriber_may_reenter() {
        let obs = Observable::new(0);
        let inner = obs.clone();
        let _sub = obs.subscribe(move |v| {
            if *v == 1 {
                inner.set(2);
            }
        });

        obs.set(1);
        assert_eq!(obs.get(), 2);
        assert_eq!(obs.version(), 2);
    }

    #[test]
    fn nested_change_is_delivered_last() {
        let obs = Observable::new(0);
        let inner = obs.clone();
        let _first = obs.subscribe(move |v| {
            if *v == 1 {
                inner.set(2);
            }
        });
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let _second = obs.subscribe(move |v| s.borrow_mut().push(*v));

        obs.set(1);
        assert_eq!(*seen.borrow(), vec![2]);
        assert_eq!(seen.borrow().last().copied(), Some(obs.get()));
    }

    #[test]
    fn update_mutates_in_place() {
        let obs = Observable::new(vec![1, 2]);
        obs.update(|v| v.push(3));
        assert_eq!(obs.get(), vec![1, 2, 3]);
        obs.update(|_| {});
        assert_eq!(obs.version(), 1);
    }

    proptest::proptest! {
        #[test]
        fn version_counts_only_changes(values in proptest::collection::vec(0u8..4, 0..32)) {
            let obs = Observable::new(0u8);
            let mut expected = 0u64;
            let mut last = 0u8;
            for v in values {
                obs.set(v);
                if v != last {
                    expected += 1;
                    last = v;
                }
            }
            proptest::prop_assert_eq!(obs.version(), expected);
        }
    }
}
