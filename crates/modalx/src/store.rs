#![forbid(unsafe_code)]

//! The modal store: stack, hooks, resolution and placeholders behind one handle.
//!
//! A [`ModalStore`] is an explicitly constructed context object. Clones share
//! state, so the handle can be passed to every view that opens, closes or
//! renders modals.
//!
//! # Ordering
//!
//! Every stack mutation runs in the same order:
//!
//! 1. mutate the stack,
//! 2. publish the new snapshot (the resolution watcher is the first
//!    subscriber, so the new top is resolved before any external observer
//!    runs),
//! 3. fire the "on shown" hook of the new top if it has not fired during the
//!    current occupancy,
//! 4. on close, hand the response to the closed request's callback.
//!
//! No internal borrow is held while a hook, callback, observer or loader runs,
//! so any of them may call back into the store.
//!
//! # Loading
//!
//! The store never spawns. Lazy modals start loading on their first render;
//! the host drives in-flight loads with [`ModalStore::poll_pending`] from its
//! event loop, or awaits [`ModalStore::settle`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::task::{Context, Poll};

use serde_json::Value;
use tracing::{debug, error, warn};

use modalx_runtime::logging::TARGET;
use modalx_runtime::reactive::{Binding, BindingScope, Observable, Subscription, bind_mapped};

use crate::cache::{ModalBody, ModalCache, ModalNode, ResolvedModal};
use crate::component::{Component, Loader, ModalFrame, ModalModule, PlainFrame, Spinner};
use crate::config::ModalConfig;
use crate::discovery::ModalDiscovery;
use crate::error::ModalError;
use crate::hooks::{HookKind, HookRegistry};
use crate::lazy::LazyComponent;
use crate::naming::{ModuleKind, ModuleName};
use crate::options::{OptionsAccessor, OptionsStore};
use crate::payload::{Payload, Response, ResponseCallback, is_null_response};
use crate::spinner::{GlobalSpinner, SpinnerEntry, SpinnerRegistry};
use crate::stack::{ModalId, ModalRequest, ModalStack};

/// Outcome of [`ModalStore::fetch_modal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The name (or its eager alias) was already cached.
    AlreadyCached,
    /// Discovery found a module; a lazy node is now cached.
    Resolved,
    /// Discovery found nothing. The request stays open but unrendered.
    Missing,
}

/// Summary of [`ModalStore::install`].
#[derive(Debug, Default)]
pub struct InstallReport {
    /// Named spinners newly registered.
    pub spinners: usize,
    /// Whether a global spinner was installed.
    pub global_spinner: bool,
    /// Eager modals newly cached.
    pub modals: usize,
    /// Modules that failed to load.
    pub failures: Vec<ModalError>,
}

impl InstallReport {
    /// Whether every module loaded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

enum DefaultSpinner<E> {
    Fixed(Component<E>),
    Builtin(fn(&str) -> Component<E>),
}

/// Builder for [`ModalStore`].
pub struct ModalStoreBuilder<E> {
    config: ModalConfig,
    frame: Rc<dyn ModalFrame<E>>,
    discovery: Option<Rc<dyn ModalDiscovery<E>>>,
    default_spinner: DefaultSpinner<E>,
}

impl<E: 'static> ModalStoreBuilder<E> {
    /// Start a builder whose last-resort placeholder is `default_spinner`.
    #[must_use]
    pub fn new(default_spinner: Component<E>) -> Self {
        Self {
            config: ModalConfig::default(),
            frame: Rc::new(PlainFrame),
            discovery: None,
            default_spinner: DefaultSpinner::Fixed(default_spinner),
        }
    }

    #[must_use]
    pub fn config(mut self, config: ModalConfig) -> Self {
        self.config = config;
        self
    }

    /// Container frame every resolved modal is wrapped in.
    #[must_use]
    pub fn frame(mut self, frame: impl ModalFrame<E> + 'static) -> Self {
        self.frame = Rc::new(frame);
        self
    }

    /// Module lookup used by [`ModalStore::fetch_modal`] and [`ModalStore::install`].
    #[must_use]
    pub fn discovery(mut self, discovery: impl ModalDiscovery<E> + 'static) -> Self {
        self.discovery = Some(Rc::new(discovery));
        self
    }

    #[must_use]
    pub fn build(self) -> ModalStore<E> {
        let default_spinner = match self.default_spinner {
            DefaultSpinner::Fixed(component) => component,
            DefaultSpinner::Builtin(make) => make(&self.config.spinner_label),
        };
        let inner = Rc::new(StoreInner {
            config: self.config,
            frame: self.frame,
            discovery: self.discovery,
            default_spinner,
            stack: RefCell::new(ModalStack::new()),
            view: Observable::new(Vec::new()),
            hooks: RefCell::new(HookRegistry::new()),
            spinners: RefCell::new(SpinnerRegistry::new()),
            cache: RefCell::new(ModalCache::new()),
            options: OptionsStore::new(),
            watchers: RefCell::new(BindingScope::new()),
        });
        install_watchers(&inner);
        ModalStore { inner }
    }
}

impl<E: From<String> + 'static> Default for ModalStoreBuilder<E> {
    /// Uses the built-in [`Spinner`] labelled with `config.spinner_label`.
    fn default() -> Self {
        Self {
            config: ModalConfig::default(),
            frame: Rc::new(PlainFrame),
            discovery: None,
            default_spinner: DefaultSpinner::Builtin(builtin_spinner::<E>),
        }
    }
}

fn builtin_spinner<E: From<String> + 'static>(label: &str) -> Component<E> {
    Rc::new(Spinner::new(label))
}

impl<E> fmt::Debug for ModalStoreBuilder<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalStoreBuilder")
            .field("config", &self.config)
            .field("discovery", &self.discovery.is_some())
            .finish()
    }
}

struct StoreInner<E> {
    config: ModalConfig,
    frame: Rc<dyn ModalFrame<E>>,
    discovery: Option<Rc<dyn ModalDiscovery<E>>>,
    default_spinner: Component<E>,
    stack: RefCell<ModalStack>,
    /// Published stack, top first.
    view: Observable<Vec<ModalRequest>>,
    hooks: RefCell<HookRegistry>,
    spinners: RefCell<SpinnerRegistry<E>>,
    cache: RefCell<ModalCache<E>>,
    options: OptionsStore,
    watchers: RefCell<BindingScope>,
}

/// Resolve the top of every published snapshot.
fn install_watchers<E: 'static>(inner: &Rc<StoreInner<E>>) {
    let weak = Rc::downgrade(inner);
    let sub = inner.view.subscribe(move |requests: &Vec<ModalRequest>| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        if let Some(top) = requests.first() {
            ModalStore { inner }.fetch_modal(&top.name);
        }
    });
    inner.watchers.borrow_mut().hold(sub);
}

/// Shared handle to the modal stack and its registries.
pub struct ModalStore<E> {
    inner: Rc<StoreInner<E>>,
}

impl<E> Clone for ModalStore<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E> fmt::Debug for ModalStore<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalStore")
            .field("stack", &*self.inner.stack.borrow())
            .field("hooks", &*self.inner.hooks.borrow())
            .field("spinners", &*self.inner.spinners.borrow())
            .field("cache", &*self.inner.cache.borrow())
            .finish()
    }
}

impl<E: From<String> + 'static> ModalStore<E> {
    /// Store with default configuration and the built-in placeholder.
    #[must_use]
    pub fn new() -> Self {
        ModalStoreBuilder::default().build()
    }

    #[must_use]
    pub fn builder() -> ModalStoreBuilder<E> {
        ModalStoreBuilder::default()
    }
}

impl<E: From<String> + 'static> Default for ModalStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> ModalStore<E> {
    // --- Stack ---

    /// Push a request for `name` on top of the stack.
    ///
    /// The payload is deep-copied when it serializes cleanly (and
    /// `clone_payloads` is on); otherwise it is kept by reference. Resolution
    /// of `name` runs before this returns, but a lazy implementation only
    /// starts loading on its first render.
    pub fn open(
        &self,
        name: impl Into<String>,
        data: Option<Payload>,
        callback: Option<ResponseCallback>,
    ) -> ModalId {
        let name = name.into();
        let data = data.map(|payload| payload.capture(self.inner.config.clone_payloads));
        let (id, depth) = {
            let mut stack = self.inner.stack.borrow_mut();
            let id = stack.push(name.clone(), data, callback);
            (id, stack.depth())
        };
        debug!(target: TARGET, modal = %name, depth, "modal opened");
        self.publish();
        self.fire_show();
        id
    }

    /// Close the top request.
    ///
    /// Fires the "on hidden" hook, pops the request and re-activates the one
    /// below it. The callback receives `response` only when `send_response`
    /// is set and the response is not null. Closing an empty stack does
    /// nothing.
    pub fn close(&self, response: Option<Response>, send_response: bool) {
        let top = self
            .inner
            .stack
            .borrow()
            .top()
            .map(|request| (request.id, request.name.clone()));
        let Some((id, name)) = top else {
            debug!(target: TARGET, "close on empty stack ignored");
            return;
        };

        let hide = self.inner.hooks.borrow().hide(&name);
        if let Some(hook) = hide {
            debug!(target: TARGET, modal = %name, "firing on_hide");
            hook();
        }

        let (closed, still_open, depth) = {
            let mut stack = self.inner.stack.borrow_mut();
            let closed = stack.pop_id(id);
            (closed, stack.contains_name(&name), stack.depth())
        };
        // The hide hook reset the store.
        let Some(closed) = closed else {
            return;
        };
        if !still_open {
            self.inner.hooks.borrow_mut().reset_shown(&name);
        }
        debug!(target: TARGET, modal = %name, depth, "modal closed");

        self.publish();
        self.fire_show();

        if !send_response || is_null_response(response.as_ref()) {
            return;
        }
        if let (Some(callback), Some(response)) = (closed.callback, response) {
            callback(response);
        }
    }

    /// Close the top request answering `false`.
    pub fn dismiss(&self) {
        self.close(Some(Value::Bool(false)), true);
    }

    /// First request named `name`, scanning top to bottom.
    #[must_use]
    pub fn get_modal(&self, name: &str) -> Option<ModalRequest> {
        self.inner.stack.borrow().get(name).cloned()
    }

    /// The active request.
    #[must_use]
    pub fn top(&self) -> Option<ModalRequest> {
        self.inner.stack.borrow().top().cloned()
    }

    /// Every open request, top first.
    #[must_use]
    pub fn requests(&self) -> Vec<ModalRequest> {
        self.inner.stack.borrow().snapshot()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.inner.stack.borrow().depth()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.stack.borrow().is_empty()
    }

    fn publish(&self) {
        let snapshot = self.inner.stack.borrow().snapshot();
        self.inner.view.set(snapshot);
    }

    fn fire_show(&self) {
        let top = self.inner.stack.borrow().top().map(|r| r.name.clone());
        let Some(name) = top else {
            return;
        };
        let hook = self.inner.hooks.borrow_mut().take_show(&name);
        if let Some(hook) = hook {
            debug!(target: TARGET, modal = %name, "firing on_show");
            hook();
        }
    }

    // --- Hooks ---

    /// Register the "on shown" hook for `name`. The first registration wins.
    ///
    /// Registering while `name` is already the active top fires the hook
    /// right away, once, for the current occupancy.
    pub fn on_show(&self, name: &str, hook: impl Fn() + 'static) {
        if self.register_hook(HookKind::Show, name, Rc::new(hook)) {
            let is_top = self
                .inner
                .stack
                .borrow()
                .top()
                .is_some_and(|r| r.name == name);
            if is_top {
                self.fire_show();
            }
        }
    }

    /// Register the "on hidden" hook for `name`. The first registration wins.
    pub fn on_hide(&self, name: &str, hook: impl Fn() + 'static) {
        self.register_hook(HookKind::Hide, name, Rc::new(hook));
    }

    fn register_hook(&self, kind: HookKind, name: &str, hook: Rc<dyn Fn()>) -> bool {
        if name.is_empty() {
            warn!(target: TARGET, %kind, "hook registered without a modal name, ignoring");
            return false;
        }
        self.inner.hooks.borrow_mut().register(kind, name, hook)
    }

    // --- Options ---

    /// Store the option record for `name`, replacing any previous one.
    pub fn set_options(&self, name: &str, options: Value) -> OptionsAccessor {
        self.inner.options.set(name, options)
    }

    /// The shared options map.
    #[must_use]
    pub fn options(&self) -> OptionsStore {
        self.inner.options.clone()
    }

    // --- Resolution ---

    /// Cache `module` under `name`, or the name parsed from its identifier.
    ///
    /// A name that is already cached is left alone and the loader is not
    /// called. With `invoke_loader` the component is loaded now; without it
    /// the module is wrapped in a lazy node that loads on first render.
    pub async fn load_modal(
        &self,
        module: ModalModule<E>,
        name: Option<&str>,
        invoke_loader: bool,
    ) -> Result<(), ModalError> {
        self.cache_module(module, name, invoke_loader).await.map(drop)
    }

    /// Returns whether a new node was cached.
    async fn cache_module(
        &self,
        module: ModalModule<E>,
        name: Option<&str>,
        invoke_loader: bool,
    ) -> Result<bool, ModalError> {
        let parsed = self.parse_modal(module.identifier());
        let id = match (name, &parsed) {
            (Some(name), _) => name.to_owned(),
            (None, Some(parsed)) => parsed.name.clone(),
            (None, None) => {
                return Err(ModalError::Unnamed {
                    identifier: module.identifier().to_owned(),
                });
            }
        };
        if self.is_cached(&id, parsed.as_ref()) {
            return Ok(false);
        }

        let body = if invoke_loader {
            let component = module.load().await.map_err(|source| {
                error!(target: TARGET, modal = %id, error = %source, "modal loader failed");
                ModalError::Load {
                    name: id.clone(),
                    source,
                }
            })?;
            ModalBody::Eager(component)
        } else {
            let group = parsed.and_then(|p| p.group);
            ModalBody::Lazy(Rc::new(self.lazy(&id, group.as_deref(), module.loader())))
        };
        Ok(self.cache(id, body))
    }

    /// Make sure `name` has a cached node, discovering it if needed.
    ///
    /// Runs automatically whenever a request becomes the top of the stack.
    pub fn fetch_modal(&self, name: &str) -> Resolution {
        if self.lookup(name).is_some() {
            return Resolution::AlreadyCached;
        }
        match self.discover(name) {
            Ok((loader, group)) => {
                debug!(target: TARGET, modal = %name, group = ?group, "modal discovered");
                let lazy = self.lazy(name, group.as_deref(), loader);
                self.cache(name.to_owned(), ModalBody::Lazy(Rc::new(lazy)));
                Resolution::Resolved
            }
            Err(err) => {
                warn!(target: TARGET, modal = %name, "{err}");
                Resolution::Missing
            }
        }
    }

    fn discover(&self, name: &str) -> Result<(Loader<E>, Option<String>), ModalError> {
        let not_found = || ModalError::NotFound {
            name: name.to_owned(),
        };
        let discovery = self.inner.discovery.clone().ok_or_else(not_found)?;
        discovery
            .modules()
            .into_iter()
            .find_map(|module| {
                let parsed = self
                    .inner
                    .config
                    .naming
                    .parse(module.identifier(), ModuleKind::Lazy)?;
                (parsed.name == name).then(|| (module.loader(), parsed.group))
            })
            .ok_or_else(not_found)
    }

    fn parse_modal(&self, identifier: &str) -> Option<ModuleName> {
        let naming = &self.inner.config.naming;
        naming
            .parse(identifier, ModuleKind::Eager)
            .or_else(|| naming.parse(identifier, ModuleKind::Lazy))
    }

    /// The node cached for `name`, or for its eager alias `<name>.<eager suffix>`.
    fn lookup(&self, name: &str) -> Option<Rc<ResolvedModal<E>>> {
        let cache = self.inner.cache.borrow();
        cache.get(name).or_else(|| {
            let alias = format!("{name}.{}", self.inner.config.naming.eager_suffix);
            cache.get(&alias)
        })
    }

    fn is_cached(&self, id: &str, parsed: Option<&ModuleName>) -> bool {
        let cache = self.inner.cache.borrow();
        cache.contains(id) || parsed.is_some_and(|p| cache.contains(&p.name))
    }

    fn lazy(&self, name: &str, group: Option<&str>, loader: Loader<E>) -> LazyComponent<E> {
        let placeholder = self
            .inner
            .spinners
            .borrow()
            .select(name, group)
            .unwrap_or_else(|| Rc::clone(&self.inner.default_spinner));
        LazyComponent::new(name, loader, placeholder)
    }

    fn cache(&self, id: String, body: ModalBody<E>) -> bool {
        let node = ModalNode::new(id.clone(), Rc::clone(&self.inner.frame), body);
        let inserted = self
            .inner
            .cache
            .borrow_mut()
            .insert(ResolvedModal { id: id.clone(), node });
        if inserted {
            debug!(target: TARGET, modal = %id, "modal cached");
        }
        inserted
    }

    // --- Spinners ---

    /// Register a placeholder for one modal name or group.
    ///
    /// Registration is idempotent by name; the loader runs only the first time.
    pub async fn load_spinner(
        &self,
        module: ModalModule<E>,
        name: Option<&str>,
        group: Option<&str>,
    ) -> Result<(), ModalError> {
        self.register_spinner(module, name, group).await.map(drop)
    }

    /// Returns whether a new spinner was registered.
    async fn register_spinner(
        &self,
        module: ModalModule<E>,
        name: Option<&str>,
        group: Option<&str>,
    ) -> Result<bool, ModalError> {
        let parsed = self
            .inner
            .config
            .naming
            .parse(module.identifier(), ModuleKind::Spinner);
        let id = match (name, &parsed) {
            (Some(name), _) => name.to_owned(),
            (None, Some(parsed)) => parsed.name.clone(),
            (None, None) => {
                return Err(ModalError::Unnamed {
                    identifier: module.identifier().to_owned(),
                });
            }
        };
        let taken = {
            let spinners = self.inner.spinners.borrow();
            spinners.contains(&id) || parsed.as_ref().is_some_and(|p| spinners.contains(&p.name))
        };
        if taken {
            return Ok(false);
        }
        let group = group
            .map(str::to_owned)
            .or_else(|| parsed.and_then(|p| p.group));
        let component = self.load_component(&module, &id).await?;
        debug!(target: TARGET, spinner = %id, group = ?group, "spinner registered");
        Ok(self.inner.spinners.borrow_mut().insert(SpinnerEntry {
            id,
            component,
            group,
        }))
    }

    /// Replace the fallback placeholder. The last call wins.
    pub async fn load_global_spinner(
        &self,
        module: ModalModule<E>,
        name: Option<&str>,
    ) -> Result<(), ModalError> {
        let id = name.map(str::to_owned).unwrap_or_else(|| {
            self.inner
                .config
                .naming
                .parse(module.identifier(), ModuleKind::GlobalSpinner)
                .map_or_else(|| module.identifier().to_owned(), |p| p.name)
        });
        let component = self.load_component(&module, &id).await?;
        debug!(target: TARGET, spinner = %id, "global spinner registered");
        self.inner
            .spinners
            .borrow_mut()
            .set_global(GlobalSpinner { id, component });
        Ok(())
    }

    async fn load_component(
        &self,
        module: &ModalModule<E>,
        id: &str,
    ) -> Result<Component<E>, ModalError> {
        module.load().await.map_err(|source| {
            error!(target: TARGET, modal = %id, error = %source, "module loader failed");
            ModalError::Load {
                name: id.to_owned(),
                source,
            }
        })
    }

    /// Load every spinner, global spinner and eager modal the discovery
    /// capability knows about.
    ///
    /// Placeholders load first so later lazy resolutions can pick them up.
    /// Failures are logged and collected, never fatal.
    pub async fn install(&self) -> InstallReport {
        let mut report = InstallReport::default();
        let Some(discovery) = self.inner.discovery.clone() else {
            return report;
        };
        let modules = discovery.modules();
        let naming = &self.inner.config.naming;
        let of_kind = |kind: ModuleKind| {
            modules
                .iter()
                .filter(|m| naming.parse(m.identifier(), kind).is_some())
                .cloned()
                .collect::<Vec<_>>()
        };
        let spinners = of_kind(ModuleKind::Spinner);
        let globals = of_kind(ModuleKind::GlobalSpinner);
        let eager = of_kind(ModuleKind::Eager);

        for module in spinners {
            match self.register_spinner(module, None, None).await {
                Ok(added) => report.spinners += usize::from(added),
                Err(err) => report.failures.push(err),
            }
        }
        for module in globals {
            match self.load_global_spinner(module, None).await {
                Ok(()) => report.global_spinner = true,
                Err(err) => report.failures.push(err),
            }
        }
        for module in eager {
            match self.cache_module(module, None, true).await {
                Ok(added) => report.modals += usize::from(added),
                Err(err) => report.failures.push(err),
            }
        }
        debug!(
            target: TARGET,
            spinners = report.spinners,
            modals = report.modals,
            failures = report.failures.len(),
            "modules installed"
        );
        report
    }

    // --- Rendering ---

    /// Render the cached node for `name` through the frame, with its options
    /// and the payload of the topmost request of that name.
    ///
    /// Returns `None` when nothing is cached for `name` or its lazy load
    /// failed. Lazy nodes start loading here.
    pub fn render(&self, name: &str) -> Option<E> {
        let resolved = self.lookup(name)?;
        let data = self
            .inner
            .stack
            .borrow()
            .get(name)
            .and_then(|r| r.data.clone());
        let options = self.inner.options.get(name);
        resolved.node.render(options.as_ref(), data.as_ref())
    }

    /// Render the active request.
    pub fn render_top(&self) -> Option<E> {
        let name = self.inner.stack.borrow().top().map(|r| r.name.clone())?;
        self.render(&name)
    }

    /// Drive every started lazy load. Ready once none is pending.
    pub fn poll_pending(&self, cx: &mut Context<'_>) -> Poll<()> {
        let in_flight = self.inner.cache.borrow().in_flight();
        let mut pending = false;
        for lazy in in_flight {
            if lazy.poll_load(cx).is_pending() {
                pending = true;
            }
        }
        if pending { Poll::Pending } else { Poll::Ready(()) }
    }

    /// Wait for every started lazy load to settle.
    pub async fn settle(&self) {
        std::future::poll_fn(|cx| self.poll_pending(cx)).await;
    }

    // --- Observation ---

    /// Observe the stack (top first) after every change.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&[ModalRequest]) + 'static) -> Subscription {
        self.inner
            .view
            .subscribe(move |requests: &Vec<ModalRequest>| callback(requests.as_slice()))
    }

    /// The active request as a lazily evaluated binding.
    #[must_use]
    pub fn active_binding(&self) -> Binding<Option<ModalRequest>> {
        bind_mapped(&self.inner.view, |requests| requests.first().cloned())
    }

    /// Cached modal names, most recent first.
    #[must_use]
    pub fn resolved_ids(&self) -> Vec<String> {
        self.inner.cache.borrow().ids()
    }

    /// Whether a node is cached for `name` or its eager alias.
    #[must_use]
    pub fn is_resolved(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Registered named spinners, most recent first.
    #[must_use]
    pub fn spinner_ids(&self) -> Vec<String> {
        self.inner.spinners.borrow().ids()
    }

    #[must_use]
    pub fn config(&self) -> &ModalConfig {
        &self.inner.config
    }

    /// Empty the stack and every registry without running hooks or callbacks.
    ///
    /// Observers see the empty stack. External subscriptions survive and keep
    /// running after the resolution watcher.
    pub fn reset(&self) {
        self.inner.stack.borrow_mut().clear();
        self.inner.hooks.borrow_mut().clear();
        self.inner.spinners.borrow_mut().clear();
        self.inner.cache.borrow_mut().clear();
        self.inner.options.clear();
        self.publish();
        debug!(target: TARGET, "store reset");
    }
}
