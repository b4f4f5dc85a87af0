#![forbid(unsafe_code)]

//! Derived views over an [`Observable`] and a holder for long-lived subscriptions.
//!
//! The modal store exposes its active request as a [`Binding`]: a projection of
//! the published stack that is recomputed on every read. A [`BindingScope`]
//! keeps the store's own watchers alive for as long as the store exists.
//!
//! # Invariants
//!
//! 1. `Binding::get()` projects the source's current value, never a cached one.
//! 2. Clones of a binding read the same source.
//! 3. Subscriptions held by a scope stay registered until the scope drops.

use std::fmt;
use std::rc::Rc;

use super::observable::{Observable, Subscription};

/// Read-only projection of an observable value.
pub struct Binding<T> {
    read: Rc<dyn Fn() -> T>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            read: Rc::clone(&self.read),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Binding").field(&self.get()).finish()
    }
}

impl<T> Binding<T> {
    /// Project the source's current value.
    #[must_use]
    pub fn get(&self) -> T {
        (self.read)()
    }
}

/// Bind `project` over `source`.
///
/// `project` runs against a borrow of the current value on each `get`, so it
/// must not mutate `source`.
pub fn bind_mapped<S, T>(source: &Observable<S>, project: impl Fn(&S) -> T + 'static) -> Binding<T>
where
    S: Clone + PartialEq + 'static,
{
    let source = source.clone();
    Binding {
        read: Rc::new(move || source.with(&project)),
    }
}

/// Owns subscriptions that live as long as their holder.
#[derive(Default)]
pub struct BindingScope {
    held: Vec<Subscription>,
}

impl BindingScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `subscription` alive until the scope drops.
    pub fn hold(&mut self, subscription: Subscription) {
        self.held.push(subscription);
    }
}

impl fmt::Debug for BindingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingScope")
            .field("held", &self.held.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Clone, Debug, PartialEq)]
    struct Request {
        name: &'static str,
    }

    #[test]
    fn projection_follows_the_source() {
        let stack = Observable::new(Vec::<Request>::new());
        let top = bind_mapped(&stack, |requests| requests.first().map(|r| r.name));
        assert_eq!(top.get(), None);

        stack.set(vec![Request { name: "confirm" }]);
        assert_eq!(top.get(), Some("confirm"));
        stack.update(|requests| requests.insert(0, Request { name: "profile" }));
        assert_eq!(top.get(), Some("profile"));
    }

    #[test]
    fn clones_read_the_same_source() {
        let depth = Observable::new(1usize);
        let label = bind_mapped(&depth, |d| format!("{d} open"));
        let copy = label.clone();
        depth.set(3);
        assert_eq!(label.get(), "3 open");
        assert_eq!(copy.get(), "3 open");
        assert_eq!(format!("{copy:?}"), "Binding(\"3 open\")");
    }

    #[test]
    fn scope_keeps_subscriptions_until_dropped() {
        let depth = Observable::new(0usize);
        let hits = Rc::new(Cell::new(0));
        let mut scope = BindingScope::new();
        let h = Rc::clone(&hits);
        scope.hold(depth.subscribe(move |_| h.set(h.get() + 1)));
        assert_eq!(format!("{scope:?}"), "BindingScope { held: 1 }");

        depth.set(1);
        assert_eq!(hits.get(), 1);
        drop(scope);
        depth.set(2);
        assert_eq!(hits.get(), 1);
        assert_eq!(depth.subscriber_count(), 0);
    }
}
