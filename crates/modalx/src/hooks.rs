#![forbid(unsafe_code)]

//! Per-name "on shown" / "on hidden" hooks.
//!
//! # Invariants
//!
//! - At most one hook per name and kind. A second registration for the same
//!   name is ignored (first wins), it never replaces the first.
//! - An "on shown" hook fires once per continuous occupancy of the top of the
//!   stack: [`HookRegistry::take_show`] arms the `called` flag and
//!   [`HookRegistry::reset_shown`] clears it once the name has left the stack.
//! - "On hidden" hooks are not gated; they fire on every pop.
//!
//! The registry only hands hooks out. Callers invoke them after releasing any
//! borrow of the registry, so a hook may register further hooks or drive the
//! stack.

use std::fmt;
use std::rc::Rc;

use modalx_runtime::logging::TARGET;

/// A lifecycle callback.
pub type Hook = Rc<dyn Fn()>;

/// Which lifecycle event a hook is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    Show,
    Hide,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Show => f.write_str("on_show"),
            Self::Hide => f.write_str("on_hide"),
        }
    }
}

struct HookEntry {
    name: String,
    hook: Hook,
    called: bool,
}

/// Hook storage for every modal name.
#[derive(Default)]
pub struct HookRegistry {
    show: Vec<HookEntry>,
    hide: Vec<HookEntry>,
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = |entries: &[HookEntry]| -> Vec<String> {
            entries.iter().map(|e| e.name.clone()).collect()
        };
        f.debug_struct("HookRegistry")
            .field("show", &names(&self.show))
            .field("hide", &names(&self.hide))
            .finish()
    }
}

impl HookRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `hook` for `name`. Returns `false` if one was already registered.
    pub fn register(&mut self, kind: HookKind, name: &str, hook: Hook) -> bool {
        let entries = self.entries_mut(kind);
        if entries.iter().any(|e| e.name == name) {
            tracing::debug!(target: TARGET, modal = %name, %kind, "hook already registered, ignoring");
            return false;
        }
        entries.push(HookEntry {
            name: name.to_owned(),
            hook,
            called: false,
        });
        true
    }

    /// Hand out the "on shown" hook for `name` unless it already fired during
    /// the current occupancy, marking it as fired.
    pub fn take_show(&mut self, name: &str) -> Option<Hook> {
        let entry = self.show.iter_mut().find(|e| e.name == name)?;
        if entry.called {
            return None;
        }
        entry.called = true;
        Some(Rc::clone(&entry.hook))
    }

    /// The "on hidden" hook for `name`.
    #[must_use]
    pub fn hide(&self, name: &str) -> Option<Hook> {
        self.hide
            .iter()
            .find(|e| e.name == name)
            .map(|e| Rc::clone(&e.hook))
    }

    /// Re-arm the "on shown" hook for `name`.
    pub fn reset_shown(&mut self, name: &str) {
        if let Some(entry) = self.show.iter_mut().find(|e| e.name == name) {
            entry.called = false;
        }
    }

    /// Whether the "on shown" hook for `name` has fired for the current occupancy.
    #[must_use]
    pub fn is_shown(&self, name: &str) -> bool {
        self.show.iter().any(|e| e.name == name && e.called)
    }

    /// Whether a hook of `kind` is registered for `name`.
    #[must_use]
    pub fn contains(&self, kind: HookKind, name: &str) -> bool {
        self.entries(kind).iter().any(|e| e.name == name)
    }

    /// Drop every hook.
    pub fn clear(&mut self) {
        self.show.clear();
        self.hide.clear();
    }

    fn entries(&self, kind: HookKind) -> &[HookEntry] {
        match kind {
            HookKind::Show => &self.show,
            HookKind::Hide => &self.hide,
        }
    }

    fn entries_mut(&mut self, kind: HookKind) -> &mut Vec<HookEntry> {
        match kind {
            HookKind::Show => &mut self.show,
            HookKind::Hide => &mut self.hide,
        }
    }
}
