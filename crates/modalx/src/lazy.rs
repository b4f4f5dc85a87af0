#![forbid(unsafe_code)]

//! Deferred modal implementations with a loading placeholder.
//!
//! A [`LazyComponent`] holds a loader and a placeholder. Nothing is loaded
//! until the component is first viewed; from then on the placeholder is shown
//! until the loader's future resolves.
//!
//! # States
//!
//! `Idle -> Loading -> Ready | Failed`. The loader runs at most once per
//! component. There is no cancellation and no timeout: a load started for a
//! modal that has since closed still completes, and its result stays cached.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::task::{Context, Poll};

use modalx_runtime::logging::TARGET;

use crate::component::{Component, LoadFuture, Loader};
use crate::error::LoadError;

enum LazyState<E> {
    Idle,
    Loading(LoadFuture<E>),
    /// The future is out being polled.
    Polling,
    Ready(Component<E>),
    Failed(LoadError),
}

/// What a lazy component currently displays.
pub enum LazyView<E> {
    Placeholder(Component<E>),
    Ready(Component<E>),
    Failed(LoadError),
}

impl<E> fmt::Debug for LazyView<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placeholder(_) => f.write_str("Placeholder"),
            Self::Ready(_) => f.write_str("Ready"),
            Self::Failed(err) => f.debug_tuple("Failed").field(err).finish(),
        }
    }
}

/// A component loaded on first view.
pub struct LazyComponent<E> {
    name: String,
    loader: Loader<E>,
    placeholder: Component<E>,
    state: RefCell<LazyState<E>>,
}

impl<E> fmt::Debug for LazyComponent<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &*self.state.borrow() {
            LazyState::Idle => "idle",
            LazyState::Loading(_) | LazyState::Polling => "loading",
            LazyState::Ready(_) => "ready",
            LazyState::Failed(_) => "failed",
        };
        f.debug_struct("LazyComponent")
            .field("name", &self.name)
            .field("state", &state)
            .finish()
    }
}

impl<E> LazyComponent<E> {
    #[must_use]
    pub fn new(name: impl Into<String>, loader: Loader<E>, placeholder: Component<E>) -> Self {
        Self {
            name: name.into(),
            loader,
            placeholder,
            state: RefCell::new(LazyState::Idle),
        }
    }

    /// Modal name, for diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Placeholder shown while loading.
    #[must_use]
    pub fn placeholder(&self) -> Component<E> {
        Rc::clone(&self.placeholder)
    }

    /// Invoke the loader if it has not run yet.
    pub fn start(&self) {
        let idle = matches!(*self.state.borrow(), LazyState::Idle);
        if idle {
            tracing::debug!(target: TARGET, modal = %self.name, "starting lazy load");
            let future = (self.loader)();
            *self.state.borrow_mut() = LazyState::Loading(future);
        }
    }

    /// Current display, starting the load on first call.
    pub fn view(&self) -> LazyView<E> {
        self.start();
        match &*self.state.borrow() {
            LazyState::Ready(c) => LazyView::Ready(Rc::clone(c)),
            LazyState::Failed(err) => LazyView::Failed(err.clone()),
            LazyState::Idle | LazyState::Loading(_) | LazyState::Polling => {
                LazyView::Placeholder(Rc::clone(&self.placeholder))
            }
        }
    }

    /// Whether the loader has been invoked and has not settled.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(
            *self.state.borrow(),
            LazyState::Loading(_) | LazyState::Polling
        )
    }

    /// Whether the concrete component is available.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(*self.state.borrow(), LazyState::Ready(_))
    }

    /// Drive the load, starting it if needed.
    pub fn poll_load(&self, cx: &mut Context<'_>) -> Poll<Result<Component<E>, LoadError>> {
        self.start();
        let state = self.state.replace(LazyState::Polling);
        let (next, poll) = match state {
            LazyState::Loading(mut future) => match future.as_mut().poll(cx) {
                Poll::Ready(Ok(component)) => {
                    tracing::debug!(target: TARGET, modal = %self.name, "lazy load finished");
                    (
                        LazyState::Ready(Rc::clone(&component)),
                        Poll::Ready(Ok(component)),
                    )
                }
                Poll::Ready(Err(err)) => {
                    tracing::error!(target: TARGET, modal = %self.name, error = %err, "modal loader failed");
                    (LazyState::Failed(err.clone()), Poll::Ready(Err(err)))
                }
                Poll::Pending => (LazyState::Loading(future), Poll::Pending),
            },
            LazyState::Ready(component) => {
                let poll = Poll::Ready(Ok(Rc::clone(&component)));
                (LazyState::Ready(component), poll)
            }
            LazyState::Failed(err) => {
                let poll = Poll::Ready(Err(err.clone()));
                (LazyState::Failed(err), poll)
            }
            // Re-entrant poll from inside the loader's own future.
            other @ (LazyState::Polling | LazyState::Idle) => (other, Poll::Pending),
        };
        *self.state.borrow_mut() = next;
        poll
    }

    /// Resolve the concrete component.
    pub async fn load(&self) -> Result<Component<E>, LoadError> {
        std::future::poll_fn(|cx| self.poll_load(cx)).await
    }
}
