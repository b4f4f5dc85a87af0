#![forbid(unsafe_code)]

//! Resolved modal implementations, keyed by modal name.
//!
//! Entries are never evicted: re-opening a modal reuses the node built the
//! first time, including a finished lazy load. Lookup is by exact id, most
//! recently resolved first.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::component::{Component, FrameProps, ModalFrame, ModalProps};
use crate::lazy::{LazyComponent, LazyView};
use crate::payload::ModalData;

/// The implementation behind a node.
pub enum ModalBody<E> {
    /// Loaded up front.
    Eager(Component<E>),
    /// Loaded on first render, with a placeholder meanwhile.
    Lazy(Rc<LazyComponent<E>>),
}

/// A modal implementation wrapped in the container frame.
pub struct ModalNode<E> {
    name: String,
    frame: Rc<dyn ModalFrame<E>>,
    body: ModalBody<E>,
}

impl<E> fmt::Debug for ModalNode<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = match &self.body {
            ModalBody::Eager(_) => "eager".to_string(),
            ModalBody::Lazy(lazy) => format!("{lazy:?}"),
        };
        f.debug_struct("ModalNode")
            .field("name", &self.name)
            .field("body", &body)
            .finish()
    }
}

impl<E> ModalNode<E> {
    #[must_use]
    pub fn new(name: impl Into<String>, frame: Rc<dyn ModalFrame<E>>, body: ModalBody<E>) -> Self {
        Self {
            name: name.into(),
            frame,
            body,
        }
    }

    /// Render through the frame.
    ///
    /// Lazy bodies start loading here and render their placeholder until the
    /// load settles. Returns `None` once a lazy load has failed.
    pub fn render(&self, options: Option<&Value>, data: Option<&ModalData>) -> Option<E> {
        let component = match &self.body {
            ModalBody::Eager(component) => Rc::clone(component),
            ModalBody::Lazy(lazy) => match lazy.view() {
                LazyView::Ready(component) | LazyView::Placeholder(component) => component,
                LazyView::Failed(_) => return None,
            },
        };
        let frame_props = FrameProps {
            name: &self.name,
            options,
        };
        let props = ModalProps {
            name: &self.name,
            data,
        };
        Some(
            self.frame
                .render(&frame_props, &|| component.render(&props)),
        )
    }

    /// The lazy wrapper, if this node defers its load.
    #[must_use]
    pub fn lazy(&self) -> Option<&Rc<LazyComponent<E>>> {
        match &self.body {
            ModalBody::Lazy(lazy) => Some(lazy),
            ModalBody::Eager(_) => None,
        }
    }

    /// Whether the concrete implementation is available.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        match &self.body {
            ModalBody::Eager(_) => true,
            ModalBody::Lazy(lazy) => lazy.is_ready(),
        }
    }
}

/// A cached node and the name it answers to.
#[derive(Debug)]
pub struct ResolvedModal<E> {
    pub id: String,
    pub node: ModalNode<E>,
}

/// Process-lifetime cache of resolved modals.
pub struct ModalCache<E> {
    /// Most recently resolved first.
    entries: Vec<Rc<ResolvedModal<E>>>,
}

impl<E> Default for ModalCache<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E> fmt::Debug for ModalCache<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalCache")
            .field("ids", &self.ids())
            .finish()
    }
}

impl<E> ModalCache<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Cache `resolved` unless its id is taken. Returns whether it was stored.
    pub fn insert(&mut self, resolved: ResolvedModal<E>) -> bool {
        if self.contains(&resolved.id) {
            return false;
        }
        self.entries.insert(0, Rc::new(resolved));
        true
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Rc<ResolvedModal<E>>> {
        self.entries.iter().find(|e| e.id == id).cloned()
    }

    /// Lazy wrappers whose load has started but not settled.
    #[must_use]
    pub fn in_flight(&self) -> Vec<Rc<LazyComponent<E>>> {
        self.entries
            .iter()
            .filter_map(|e| e.node.lazy())
            .filter(|lazy| lazy.is_loading())
            .cloned()
            .collect()
    }

    /// Cached ids, most recent first.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.id.clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
