#![forbid(unsafe_code)]

//! Loading placeholders.
//!
//! Placeholder selection for modal `N` in group `G`:
//!
//! 1. the spinner registered for `N`,
//! 2. else the most recent spinner registered for `G`,
//! 3. else the global spinner,
//! 4. else the store's built-in default (handled by the caller).
//!
//! Named spinners are idempotent by id; the global slot is last-write-wins.

use std::fmt;
use std::rc::Rc;

use crate::component::Component;

/// A placeholder registered for a name and optionally a group.
pub struct SpinnerEntry<E> {
    pub id: String,
    pub component: Component<E>,
    pub group: Option<String>,
}

impl<E> Clone for SpinnerEntry<E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            component: Rc::clone(&self.component),
            group: self.group.clone(),
        }
    }
}

impl<E> fmt::Debug for SpinnerEntry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpinnerEntry")
            .field("id", &self.id)
            .field("group", &self.group)
            .finish_non_exhaustive()
    }
}

/// The single fallback placeholder.
pub struct GlobalSpinner<E> {
    pub id: String,
    pub component: Component<E>,
}

impl<E> fmt::Debug for GlobalSpinner<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalSpinner")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Named, grouped and global placeholders.
pub struct SpinnerRegistry<E> {
    /// Most recently registered first.
    entries: Vec<SpinnerEntry<E>>,
    global: Option<GlobalSpinner<E>>,
}

impl<E> Default for SpinnerRegistry<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            global: None,
        }
    }
}

impl<E> fmt::Debug for SpinnerRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpinnerRegistry")
            .field("entries", &self.entries)
            .field("global", &self.global)
            .finish()
    }
}

impl<E> SpinnerRegistry<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a spinner with `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Register a named spinner. Returns `false` if `id` is already taken.
    pub fn insert(&mut self, entry: SpinnerEntry<E>) -> bool {
        if self.contains(&entry.id) {
            return false;
        }
        self.entries.insert(0, entry);
        true
    }

    /// Replace the global spinner.
    pub fn set_global(&mut self, global: GlobalSpinner<E>) {
        self.global = Some(global);
    }

    /// Current global spinner.
    #[must_use]
    pub fn global(&self) -> Option<&GlobalSpinner<E>> {
        self.global.as_ref()
    }

    /// Placeholder for `name` in `group`, without the built-in default.
    #[must_use]
    pub fn select(&self, name: &str, group: Option<&str>) -> Option<Component<E>> {
        let by_name = self.entries.iter().find(|e| e.id == name);
        let by_group = || {
            let group = group?;
            self.entries
                .iter()
                .find(|e| e.group.as_deref() == Some(group))
        };
        by_name
            .or_else(by_group)
            .map(|e| Rc::clone(&e.component))
            .or_else(|| self.global.as_ref().map(|g| Rc::clone(&g.component)))
    }

    /// Registered spinner ids, most recent first.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.id.clone()).collect()
    }

    /// Number of named spinners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every spinner, including the global one.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.global = None;
    }
}
