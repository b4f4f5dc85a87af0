#![forbid(unsafe_code)]

//! Per-modal option records.
//!
//! Options are arbitrary JSON records keyed by modal name. The container frame
//! receives the record of the modal it wraps on every render, so option changes
//! show up on the next frame. The map is observable.
//!
//! # Accessor semantics
//!
//! [`OptionsStore::set`] returns an [`OptionsAccessor`] scoped to one name.
//! Writing a single key through the accessor replaces the whole record with
//! `{key: value}`; other keys are dropped. This matches the long-standing
//! behavior callers rely on and is kept as is.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use modalx_runtime::reactive::{Observable, Subscription};

use crate::error::ModalError;

/// Option records keyed by modal name.
pub type OptionsMap = Map<String, Value>;

/// Typed view of the option keys the frame understands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalOptions {
    /// Close the modal when its backdrop is clicked.
    pub auto_close: Option<bool>,
}

/// Observable options map shared by the store and its accessors.
#[derive(Debug, Clone, Default)]
pub struct OptionsStore {
    map: Observable<OptionsMap>,
}

impl OptionsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `options` for `name` (last writer wins) and return an accessor.
    pub fn set(&self, name: &str, options: Value) -> OptionsAccessor {
        self.map.update(|map| {
            map.insert(name.to_owned(), options);
        });
        OptionsAccessor {
            name: name.to_owned(),
            map: self.map.clone(),
        }
    }

    /// Current record for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.map.with(|map| map.get(name).cloned())
    }

    /// Decode the record for `name` into `T`.
    pub fn typed<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, ModalError> {
        self.get(name)
            .map(|value| T::deserialize(value).map_err(ModalError::from))
            .transpose()
    }

    /// Whole map.
    #[must_use]
    pub fn snapshot(&self) -> OptionsMap {
        self.map.get()
    }

    /// Observe every change to the map.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&OptionsMap) + 'static) -> Subscription {
        self.map.subscribe(callback)
    }

    /// Number of changes so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.map.version()
    }

    /// Drop every record.
    pub fn clear(&self) {
        self.map.set(OptionsMap::new());
    }
}

/// Handle to one modal's option record.
#[derive(Debug, Clone)]
pub struct OptionsAccessor {
    name: String,
    map: Observable<OptionsMap>,
}

impl OptionsAccessor {
    /// Modal the accessor is scoped to.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.map
            .with(|map| map.get(&self.name).and_then(|record| record.get(key)).cloned())
    }

    /// Current record.
    #[must_use]
    pub fn value(&self) -> Option<Value> {
        self.map.with(|map| map.get(&self.name).cloned())
    }

    /// Replace the record with `{key: value}`.
    pub fn set(&self, key: &str, value: Value) {
        let mut record = Map::new();
        record.insert(key.to_owned(), value);
        self.map.update(|map| {
            map.insert(self.name.clone(), Value::Object(record));
        });
    }
}
