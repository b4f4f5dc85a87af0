#![forbid(unsafe_code)]

//! Runtime support for modalx: reactive containers and the logging bootstrap.

pub mod logging;
pub mod reactive;

pub use reactive::{Binding, BindingScope, Observable, Subscription};
