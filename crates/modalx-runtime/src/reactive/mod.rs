#![forbid(unsafe_code)]

//! Single-threaded change propagation for the modal store.
//!
//! The store publishes every stack mutation into an [`Observable`]. Its own
//! resolution watcher subscribes first and is kept alive in a
//! [`BindingScope`]; hosts subscribe after it and get a [`Subscription`]
//! guard back. [`Binding`] derives a read-only value, such as the active
//! request, from the published stack.
//!
//! Everything here is `Rc` based and `!Send`. Subscribers are held weakly, so
//! dropping a guard is enough to unsubscribe.

pub mod binding;
pub mod observable;

pub use binding::{Binding, BindingScope, bind_mapped};
pub use observable::{Observable, Subscription};
