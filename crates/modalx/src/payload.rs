#![forbid(unsafe_code)]

//! Modal payloads and responses.
//!
//! A [`Payload`] is whatever the caller hands to `open`. The store captures it
//! as [`ModalData`]: a serialize round trip yields an independent copy, so later
//! caller-side mutation cannot leak into an open modal. Values that cannot be
//! serialized (closures, maps with non-string keys) are passed through by
//! reference instead. That fallback is silent and such payloads are not
//! protected against mutation through interior mutability.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ModalError;

/// Value passed back to an `open` callback when its modal closes.
pub type Response = Value;

/// Callback invoked once with the response of a closed modal.
pub type ResponseCallback = Box<dyn FnOnce(Response)>;

/// Whether `response` counts as absent for callback delivery.
#[must_use]
pub fn is_null_response(response: Option<&Response>) -> bool {
    matches!(response, None | Some(Value::Null))
}

trait ErasedPayload {
    fn encode(&self) -> serde_json::Result<Value>;
    fn into_any(self: Rc<Self>) -> Rc<dyn Any>;
}

impl<T: Serialize + 'static> ErasedPayload for T {
    fn encode(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}

/// Data handed to `open`, not yet captured.
#[derive(Clone)]
pub struct Payload {
    inner: Rc<dyn ErasedPayload>,
}

impl Payload {
    /// Wrap an owned value.
    pub fn new<T: Serialize + 'static>(value: T) -> Self {
        Self {
            inner: Rc::new(value),
        }
    }

    /// Wrap a value the caller keeps a handle to.
    ///
    /// If the value cannot be serialized the modal receives this exact allocation.
    pub fn shared<T: Serialize + 'static>(value: Rc<T>) -> Self {
        Self { inner: value }
    }

    /// Capture the payload, cloning through JSON when `clone` is set.
    ///
    /// Never fails: an encoding error falls back to passing the original value.
    #[must_use]
    pub fn capture(self, clone: bool) -> ModalData {
        if clone {
            match self.inner.encode() {
                Ok(value) => return ModalData::Cloned(value),
                Err(err) => {
                    tracing::debug!(
                        target: modalx_runtime::logging::TARGET,
                        error = %err,
                        "payload not serializable, passing by reference"
                    );
                }
            }
        }
        ModalData::Shared(self.inner.into_any())
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload").finish_non_exhaustive()
    }
}

/// Payload as stored on the stack.
#[derive(Clone)]
pub enum ModalData {
    /// Independent JSON copy of the payload.
    Cloned(Value),
    /// The caller's original value, shared by reference.
    Shared(Rc<dyn Any>),
}

impl ModalData {
    /// The JSON copy, if the payload was cloned.
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Cloned(value) => Some(value),
            Self::Shared(_) => None,
        }
    }

    /// Decode a cloned payload into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ModalError> {
        match self {
            Self::Cloned(value) => Ok(T::deserialize(value)?),
            Self::Shared(_) => Err(ModalError::Decode(serde::de::Error::custom(
                "payload is shared by reference and has no JSON form",
            ))),
        }
    }

    /// The shared value, if it was passed by reference and has type `T`.
    #[must_use]
    pub fn downcast<T: 'static>(&self) -> Option<Rc<T>> {
        match self {
            Self::Shared(any) => Rc::clone(any).downcast::<T>().ok(),
            Self::Cloned(_) => None,
        }
    }

    /// Whether the payload is shared by reference.
    #[must_use]
    pub fn is_shared(&self) -> bool {
        matches!(self, Self::Shared(_))
    }
}

impl PartialEq for ModalData {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Cloned(a), Self::Cloned(b)) => a == b,
            (Self::Shared(a), Self::Shared(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for ModalData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cloned(value) => f.debug_tuple("Cloned").field(value).finish(),
            Self::Shared(_) => f.write_str("Shared(..)"),
        }
    }
}
