#![forbid(unsafe_code)]

//! Module discovery.
//!
//! The store asks a [`ModalDiscovery`] for every known module and parses the
//! identifiers itself with the configured [`NamingConvention`]. Applications
//! normally feed a [`ModuleRegistry`] once at startup from whatever their build
//! step generates.
//!
//! [`NamingConvention`]: crate::naming::NamingConvention

use std::fmt;

use crate::component::{Loader, ModalModule};

/// Source of discoverable modules.
pub trait ModalDiscovery<E> {
    /// Every module, keyed by identifier, in registration order.
    fn modules(&self) -> Vec<ModalModule<E>>;
}

/// Explicit identifier -> loader registry.
pub struct ModuleRegistry<E> {
    modules: Vec<ModalModule<E>>,
}

impl<E> Default for ModuleRegistry<E> {
    fn default() -> Self {
        Self {
            modules: Vec::new(),
        }
    }
}

impl<E> fmt::Debug for ModuleRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.modules.iter().map(ModalModule::identifier))
            .finish()
    }
}

impl<E> ModuleRegistry<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `loader` under `identifier`, replacing an earlier registration.
    pub fn register(&mut self, identifier: impl Into<String>, loader: Loader<E>) {
        let module = ModalModule::new(identifier, loader);
        match self
            .modules
            .iter_mut()
            .find(|m| m.identifier() == module.identifier())
        {
            Some(existing) => *existing = module,
            None => self.modules.push(module),
        }
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with_module(mut self, identifier: impl Into<String>, loader: Loader<E>) -> Self {
        self.register(identifier, loader);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<E> ModalDiscovery<E> for ModuleRegistry<E> {
    fn modules(&self) -> Vec<ModalModule<E>> {
        self.modules.clone()
    }
}
