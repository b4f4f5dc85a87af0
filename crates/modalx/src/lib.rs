#![forbid(unsafe_code)]

//! Named, stackable modals with lazy resolution and lifecycle hooks.
//!
//! Application code opens modals by name on a [`ModalStore`]. The store keeps
//! the open requests in LIFO order, resolves each name to an implementation
//! through a discovery capability, shows a placeholder while a lazy
//! implementation loads, and fires per-name "on shown"/"on hidden" hooks.
//!
//! ```
//! use modalx::{LoadError, ModalProps, ModalStore, ModuleRegistry, Payload, component, loader};
//!
//! let registry = ModuleRegistry::new().with_module(
//!     "modals/greet.amdl",
//!     loader(|| async {
//!         Ok::<_, LoadError>(component(|props: &ModalProps<'_>| {
//!             let who = props.data.and_then(|d| d.as_json()).map_or_else(String::new, ToString::to_string);
//!             format!("hello {who}")
//!         }))
//!     }),
//! );
//! let store: ModalStore<String> = ModalStore::builder().discovery(registry).build();
//!
//! store.open("greet", Some(Payload::new("world")), None);
//! assert_eq!(store.render_top().as_deref(), Some("Loading..."));
//!
//! futures::executor::block_on(store.settle());
//! assert_eq!(store.render_top().as_deref(), Some("hello \"world\""));
//! ```

pub mod cache;
pub mod component;
pub mod config;
pub mod discovery;
pub mod error;
pub mod hooks;
pub mod lazy;
pub mod naming;
pub mod options;
pub mod payload;
pub mod spinner;
pub mod stack;
pub mod store;

pub use component::{
    Component, FrameProps, Loader, ModalComponent, ModalFrame, ModalModule, ModalProps,
    PlainFrame, Spinner, component, loader,
};
pub use config::ModalConfig;
pub use discovery::{ModalDiscovery, ModuleRegistry};
pub use error::{LoadError, ModalError};
pub use naming::{ModuleKind, NamingConvention};
pub use options::{ModalOptions, OptionsAccessor, OptionsStore};
pub use payload::{ModalData, Payload, Response};
pub use stack::{ModalId, ModalRequest};
pub use store::{InstallReport, ModalStore, ModalStoreBuilder, Resolution};

pub use modalx_runtime::{Binding, Subscription};
