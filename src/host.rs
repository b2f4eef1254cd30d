//! Minimal host application model the toaster plugs into.
//!
//! [`App`] plays the part of a UI framework application: it offers typed
//! dependency injection, named global properties, a registry of toast
//! components and, unless headless, a [`Document`] render surfaces mount into.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

use crate::container::ToastComponent;

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

/// Typed key for [`App::provide`]/[`App::inject`]. Every key is distinct,
/// even when two share a description.
pub struct InjectionKey<T> {
    id: u64,
    description: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> InjectionKey<T> {
    #[must_use]
    pub fn new(description: &'static str) -> Self {
        Self {
            id: NEXT_KEY.fetch_add(1, Ordering::Relaxed),
            description,
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for InjectionKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InjectionKey({}#{})", self.description, self.id)
    }
}

/// Something installable on an [`App`].
pub trait Plugin {
    fn install(&self, app: &mut App);
}

/// Interaction a render surface can receive, addressed by transition key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceEvent {
    Click(String),
    Close(String),
    PointerEnter(String),
    PointerLeave(String),
}

/// Anything that can be mounted into a [`Document`].
pub trait RenderSurface: Send + Sync {
    fn render(&self) -> String;

    /// Handles an interaction. Returns `false` when it had no effect.
    fn dispatch(&self, event: &SurfaceEvent) -> bool;
}

/// Mounted render surfaces keyed by element id, in mount order.
#[derive(Default)]
pub struct Document {
    mounts: Vec<(String, Arc<dyn RenderSurface>)>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn query_selector(&self, id: &str) -> Option<Arc<dyn RenderSurface>> {
        self.mounts
            .iter()
            .find(|(mounted, _)| mounted == id)
            .map(|(_, surface)| Arc::clone(surface))
    }

    /// Mounts `surface` under `id`. Returns `false` when the id is taken.
    pub fn mount(&mut self, id: impl Into<String>, surface: Arc<dyn RenderSurface>) -> bool {
        let id = id.into();
        if self.query_selector(&id).is_some() {
            warn!(%id, "element id already mounted");
            return false;
        }
        self.mounts.push((id, surface));
        true
    }

    #[must_use]
    pub fn mount_count(&self) -> usize {
        self.mounts.len()
    }

    /// Renders every mounted surface, one after the other.
    #[must_use]
    pub fn render(&self) -> String {
        self.mounts
            .iter()
            .map(|(_, surface)| surface.render())
            .collect()
    }

    /// Routes `event` to the surface mounted under `id`.
    pub fn dispatch(&self, id: &str, event: &SurfaceEvent) -> bool {
        self.query_selector(id)
            .is_some_and(|surface| surface.dispatch(event))
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.mounts.iter().map(|(id, _)| id))
            .finish()
    }
}

pub type ComponentRegistry = HashMap<String, Arc<dyn ToastComponent>>;

/// Host application.
#[derive(Default)]
pub struct App {
    provides: HashMap<u64, Box<dyn Any + Send + Sync>>,
    global_properties: HashMap<String, Box<dyn Any + Send + Sync>>,
    components: ComponentRegistry,
    document: Option<Document>,
}

impl App {
    /// Application with a document to mount into.
    #[must_use]
    pub fn new() -> Self {
        Self {
            document: Some(Document::new()),
            ..Self::default()
        }
    }

    /// Application without a document, as when rendering server side.
    #[must_use]
    pub fn headless() -> Self {
        Self::default()
    }

    pub fn use_plugin<P: Plugin + ?Sized>(&mut self, plugin: &P) -> &mut Self {
        plugin.install(self);
        self
    }

    pub fn provide<T: Send + Sync + 'static>(&mut self, key: &InjectionKey<T>, value: T) {
        self.provides.insert(key.id, Box::new(value));
    }

    #[must_use]
    pub fn inject<T: Clone + 'static>(&self, key: &InjectionKey<T>) -> Option<T> {
        self.provides
            .get(&key.id)
            .and_then(|value| value.downcast_ref::<T>())
            .cloned()
    }

    pub fn set_global_property<T: Send + Sync + 'static>(
        &mut self,
        name: impl Into<String>,
        value: T,
    ) {
        self.global_properties.insert(name.into(), Box::new(value));
    }

    #[must_use]
    pub fn global_property<T: Clone + 'static>(&self, name: &str) -> Option<T> {
        self.global_properties
            .get(name)
            .and_then(|value| value.downcast_ref::<T>())
            .cloned()
    }

    /// Registers a toast component that toasts can select by name.
    pub fn component(
        &mut self,
        name: impl Into<String>,
        component: Arc<dyn ToastComponent>,
    ) -> &mut Self {
        self.components.insert(name.into(), component);
        self
    }

    #[must_use]
    pub const fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    #[must_use]
    pub const fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn document_mut(&mut self) -> Option<&mut Document> {
        self.document.as_mut()
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("provides", &self.provides.len())
            .field("global_properties", &self.global_properties.keys())
            .field("components", &self.components.keys())
            .field("document", &self.document)
            .finish()
    }
}
