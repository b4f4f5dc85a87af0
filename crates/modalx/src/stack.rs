#![forbid(unsafe_code)]

//! Ordered stack of open modal requests.
//!
//! The `ModalStack` keeps every open request in LIFO order. Only the topmost
//! request is active; everything below it waits to be re-activated when the
//! requests above it close.
//!
//! # Invariants
//!
//! - Exactly one entry is active whenever the stack is non-empty, and it is
//!   the most recently pushed entry still open. None is active when empty.
//! - Requests close by id. `pop_id()` removes from any position and then
//!   re-activates whatever is on top, so closing the top is plain LIFO.
//! - Every request gets a process-unique [`ModalId`].
//!
//! # Failure Modes
//!
//! - `pop_id()` for an id that is no longer open returns `None`.
//! - `get()` for a name that is not open returns `None`.
//!
//! The stack is plain data: hooks, resolution and notifications are layered on
//! top by [`ModalStore`](crate::store::ModalStore).

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::payload::{ModalData, ResponseCallback};

/// Global counter for unique modal IDs.
static MODAL_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a request on the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModalId(u64);

impl ModalId {
    /// Create a new unique modal ID.
    fn new() -> Self {
        Self(MODAL_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// One open modal, as observers see it.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalRequest {
    pub id: ModalId,
    /// Name of the modal implementation.
    pub name: String,
    pub data: Option<ModalData>,
    /// True only for the top of the stack.
    pub active: bool,
    /// Whether a response callback is waiting.
    pub has_callback: bool,
}

/// A request removed from the stack, with its callback still attached.
pub struct ClosedModal {
    pub request: ModalRequest,
    pub callback: Option<ResponseCallback>,
}

impl fmt::Debug for ClosedModal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosedModal")
            .field("request", &self.request)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

struct StackEntry {
    request: ModalRequest,
    callback: Option<ResponseCallback>,
}

/// Open requests, bottom to top.
#[derive(Default)]
pub struct ModalStack {
    entries: Vec<StackEntry>,
}

impl fmt::Debug for ModalStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().rev().map(|e| &e.request))
            .finish()
    }
}

impl ModalStack {
    /// Create an empty modal stack.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Stack Operations ---

    /// Push a request on top, deactivating everything below it.
    ///
    /// Returns the unique `ModalId` for the pushed request.
    pub fn push(
        &mut self,
        name: impl Into<String>,
        data: Option<ModalData>,
        callback: Option<ResponseCallback>,
    ) -> ModalId {
        for entry in &mut self.entries {
            entry.request.active = false;
        }
        let id = ModalId::new();
        self.entries.push(StackEntry {
            request: ModalRequest {
                id,
                name: name.into(),
                data,
                active: true,
                has_callback: callback.is_some(),
            },
            callback,
        });
        id
    }

    /// Remove the request with `id` and activate whatever is then on top.
    ///
    /// The store passes the id it saw on top before running the hide hook, so
    /// a hook that closed or reset in the meantime cannot make it pop a
    /// different request.
    pub fn pop_id(&mut self, id: ModalId) -> Option<ClosedModal> {
        let idx = self.entries.iter().position(|e| e.request.id == id)?;
        let entry = self.entries.remove(idx);
        self.activate_top();
        Some(Self::closed(entry))
    }

    /// Drop every request without running callbacks.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn activate_top(&mut self) {
        if let Some(top) = self.entries.last_mut() {
            top.request.active = true;
        }
    }

    fn closed(entry: StackEntry) -> ClosedModal {
        let mut request = entry.request;
        request.active = false;
        ClosedModal {
            request,
            callback: entry.callback,
        }
    }

    // --- State Queries ---

    /// The active request.
    pub fn top(&self) -> Option<&ModalRequest> {
        self.entries.last().map(|e| &e.request)
    }

    /// First request named `name`, scanning top to bottom.
    pub fn get(&self, name: &str) -> Option<&ModalRequest> {
        self.iter().find(|r| r.name == name)
    }

    /// Whether any open request is named `name`.
    pub fn contains_name(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Requests, top first.
    pub fn iter(&self) -> impl Iterator<Item = &ModalRequest> {
        self.entries.iter().rev().map(|e| &e.request)
    }

    /// Owned copy of every request, top first.
    pub fn snapshot(&self) -> Vec<ModalRequest> {
        self.iter().cloned().collect()
    }

    /// Check if the stack is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the number of open requests.
    #[inline]
    pub fn depth(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn active_names(stack: &ModalStack) -> Vec<String> {
        stack
            .iter()
            .filter(|r| r.active)
            .map(|r| r.name.clone())
            .collect()
    }

    #[test]
    fn empty_stack() {
        let stack = ModalStack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.depth(), 0);
        assert!(stack.top().is_none());
    }

    #[test]
    fn push_increases_depth() {
        let mut stack = ModalStack::new();
        let id1 = stack.push("a", None, None);
        assert_eq!(stack.depth(), 1);
        assert!(!stack.is_empty());
        assert_eq!(stack.top().map(|r| r.id), Some(id1));

        let id2 = stack.push("b", None, None);
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.top().map(|r| r.id), Some(id2));
    }

    #[test]
    fn only_top_is_active() {
        let mut stack = ModalStack::new();
        stack.push("a", None, None);
        stack.push("b", None, None);
        let c = stack.push("c", None, None);
        assert_eq!(active_names(&stack), vec!["c"]);

        stack.pop_id(c);
        assert_eq!(active_names(&stack), vec!["b"]);
    }

    #[test]
    fn closing_the_top_repeatedly_is_lifo() {
        let mut stack = ModalStack::new();
        let pushed = vec![
            stack.push("a", None, None),
            stack.push("b", None, None),
            stack.push("c", None, None),
        ];

        let mut closed = Vec::new();
        while let Some(top) = stack.top().map(|r| r.id) {
            closed.extend(stack.pop_id(top).map(|c| c.request.id));
        }
        assert_eq!(closed, pushed.into_iter().rev().collect::<Vec<_>>());
        assert!(stack.is_empty());
    }

    #[test]
    fn removing_a_buried_request_keeps_the_top_active() {
        let mut stack = ModalStack::new();
        let a = stack.push("a", None, None);
        stack.push("b", None, None);

        let closed = stack.pop_id(a).unwrap();
        assert!(!closed.request.active);
        assert_eq!(active_names(&stack), vec!["b"]);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn pop_by_id_reactivates_top() {
        let mut stack = ModalStack::new();
        let id1 = stack.push("a", None, None);
        let id2 = stack.push("b", None, None);

        let result = stack.pop_id(id2);
        assert_eq!(result.map(|r| r.request.name), Some("b".to_string()));
        assert_eq!(stack.top().map(|r| r.id), Some(id1));
        assert_eq!(active_names(&stack), vec!["a"]);
    }

    #[test]
    fn pop_by_nonexistent_id() {
        let mut stack = ModalStack::new();
        let id = stack.push("a", None, None);
        assert!(stack.pop_id(id).is_some());
        assert!(stack.pop_id(id).is_none());
        stack.push("b", None, None);
        stack.clear();
        assert!(stack.pop_id(id).is_none());
    }

    #[test]
    fn get_scans_top_down() {
        let mut stack = ModalStack::new();
        stack.push("a", Some(ModalData::Cloned(json!(1))), None);
        stack.push("b", None, None);
        stack.push("a", Some(ModalData::Cloned(json!(2))), None);

        let found = stack.get("a").unwrap();
        assert_eq!(found.data, Some(ModalData::Cloned(json!(2))));
        assert!(stack.get("missing").is_none());
        assert!(stack.contains_name("b"));
    }

    #[test]
    fn popped_entry_carries_callback() {
        let seen = Rc::new(RefCell::new(None));
        let s = Rc::clone(&seen);
        let mut stack = ModalStack::new();
        let id = stack.push(
            "a",
            None,
            Some(Box::new(move |v: Value| *s.borrow_mut() = Some(v))),
        );
        assert!(stack.top().unwrap().has_callback);

        let closed = stack.pop_id(id).unwrap();
        assert!(!closed.request.active);
        (closed.callback.unwrap())(json!("ok"));
        assert_eq!(*seen.borrow(), Some(json!("ok")));
    }

    #[test]
    fn unique_modal_ids() {
        let mut stack = ModalStack::new();
        let id1 = stack.push("a", None, None);
        let id2 = stack.push("a", None, None);
        assert_ne!(id1, id2);
        assert!(id2.id() > id1.id());
    }

    #[test]
    fn snapshot_is_top_first() {
        let mut stack = ModalStack::new();
        stack.push("a", None, None);
        stack.push("b", None, None);
        let names: Vec<String> = stack.snapshot().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    proptest::proptest! {
        #[test]
        fn exactly_one_active_and_it_is_the_latest(ops in proptest::collection::vec(proptest::bool::ANY, 0..64)) {
            let mut stack = ModalStack::new();
            let mut model: Vec<ModalId> = Vec::new();
            for (i, push) in ops.into_iter().enumerate() {
                if push {
                    model.push(stack.push(format!("m{i}"), None, None));
                } else {
                    let top = stack.top().map(|r| r.id);
                    let popped = top.and_then(|id| stack.pop_id(id)).map(|c| c.request.id);
                    proptest::prop_assert_eq!(popped, model.pop());
                }
                let active: Vec<ModalId> = stack.iter().filter(|r| r.active).map(|r| r.id).collect();
                match model.last() {
                    Some(top) => proptest::prop_assert_eq!(active, vec![*top]),
                    None => proptest::prop_assert!(active.is_empty()),
                }
            }
        }
    }
}
