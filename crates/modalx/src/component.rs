#![forbid(unsafe_code)]

//! Contracts between the modal core and the host UI.
//!
//! The core never renders. It hands the host's element type `E` around:
//! components produce an `E` from [`ModalProps`], the container frame wraps
//! that child, and loaders asynchronously produce components.

use std::fmt;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use serde_json::Value;

use crate::error::LoadError;
use crate::payload::ModalData;

/// Properties a modal (or its placeholder) is rendered with.
#[derive(Debug, Clone, Copy)]
pub struct ModalProps<'a> {
    /// Modal name.
    pub name: &'a str,
    /// Payload of the matching stack entry, if it is still open.
    pub data: Option<&'a ModalData>,
}

/// A concrete modal implementation or placeholder.
pub trait ModalComponent<E> {
    /// Produce the host element for `props`.
    fn render(&self, props: &ModalProps<'_>) -> E;
}

impl<E, F> ModalComponent<E> for F
where
    F: Fn(&ModalProps<'_>) -> E,
{
    fn render(&self, props: &ModalProps<'_>) -> E {
        self(props)
    }
}

/// Shared handle to a component.
pub type Component<E> = Rc<dyn ModalComponent<E>>;

/// Wrap a closure as a [`Component`].
pub fn component<E, F>(render: F) -> Component<E>
where
    F: Fn(&ModalProps<'_>) -> E + 'static,
{
    Rc::new(render)
}

/// Future produced by a [`Loader`].
pub type LoadFuture<E> = LocalBoxFuture<'static, Result<Component<E>, LoadError>>;

/// Deferred producer of a component.
pub type Loader<E> = Rc<dyn Fn() -> LoadFuture<E>>;

/// Build a [`Loader`] from an async closure body.
pub fn loader<E, F, Fut>(load: F) -> Loader<E>
where
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<Component<E>, LoadError>> + 'static,
{
    Rc::new(move || -> LoadFuture<E> { Box::pin(load()) })
}

/// A discovered module: its identifier and the loader behind it.
pub struct ModalModule<E> {
    identifier: String,
    loader: Loader<E>,
}

impl<E> Clone for ModalModule<E> {
    fn clone(&self) -> Self {
        Self {
            identifier: self.identifier.clone(),
            loader: Rc::clone(&self.loader),
        }
    }
}

impl<E> fmt::Debug for ModalModule<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalModule")
            .field("identifier", &self.identifier)
            .finish_non_exhaustive()
    }
}

impl<E> ModalModule<E> {
    /// Pair an identifier with its loader.
    pub fn new(identifier: impl Into<String>, loader: Loader<E>) -> Self {
        Self {
            identifier: identifier.into(),
            loader,
        }
    }

    /// Path-like identifier, parsed with the naming convention.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The loader, for deferred invocation.
    #[must_use]
    pub fn loader(&self) -> Loader<E> {
        Rc::clone(&self.loader)
    }

    /// Invoke the loader once.
    pub fn load(&self) -> LoadFuture<E> {
        (self.loader)()
    }
}

/// Properties passed to the container frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameProps<'a> {
    pub name: &'a str,
    /// Options registered for `name`.
    pub options: Option<&'a Value>,
}

/// Visual wrapper around every resolved modal.
pub trait ModalFrame<E> {
    /// Wrap the element produced by `child`.
    fn render(&self, props: &FrameProps<'_>, child: &dyn Fn() -> E) -> E;
}

/// Frame that returns the child unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFrame;

impl<E> ModalFrame<E> for PlainFrame {
    fn render(&self, _props: &FrameProps<'_>, child: &dyn Fn() -> E) -> E {
        child()
    }
}

/// Built-in placeholder shown when no spinner is registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spinner {
    label: String,
}

impl Spinner {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<E: From<String>> ModalComponent<E> for Spinner {
    fn render(&self, _props: &ModalProps<'_>) -> E {
        E::from(self.label.clone())
    }
}
