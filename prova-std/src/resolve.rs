//! Collaborator contracts for dispatcher construction.
//!
//! The dispatcher never discovers listeners or builds contexts itself; it
//! delegates both to collaborators handed in at construction and depends on
//! them only through their return values:
//!
//! - [`ListenerResolver`] produces the initial ordered listener sequence
//!   for a test class.
//! - [`ContextFactory`] produces a fresh context bound to the class.
//!
//! Resolution is data driven: a resolver is built from explicit listener
//! factories, never from scanning or global registration. Context reuse is
//! equally explicit: [`ContextCache`] is a value with its own
//! init/clear lifecycle, constructed by the embedding test runner and
//! passed *into* [`CachingContextFactory`].

use prova_core::{BoxListener, ClassId, TestContext, TestListener};
use std::{
    any::Any,
    collections::HashMap,
    sync::{Arc, Mutex},
};

/// Resolves the initial ordered listener sequence for a test class.
pub trait ListenerResolver {
    /// Produce fresh listeners for `class`, in the order they should be
    /// registered.
    fn resolve(&self, class: &ClassId) -> Vec<BoxListener>;
}

type ListenerFactory = Box<dyn Fn() -> BoxListener + Send + Sync>;

/// A data-driven resolver over an explicit list of listener factories.
///
/// Resolves the same ordered sequence for every class. Each resolution
/// invokes the factories anew, so every dispatcher gets its own listener
/// instances.
///
/// # Example
///
/// ```rust,ignore
/// let resolver = StaticResolver::new()
///     .with(|| LoggingListener)
///     .with(|| FixtureListener::default());
/// ```
#[derive(Default)]
pub struct StaticResolver {
    factories: Vec<ListenerFactory>,
}

impl StaticResolver {
    /// Create a resolver with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener factory; resolution order is declaration order.
    pub fn with<L, F>(mut self, factory: F) -> Self
    where
        L: TestListener + 'static,
        F: Fn() -> L + Send + Sync + 'static,
    {
        self.factories.push(Box::new(move || Box::new(factory())));
        self
    }

    /// The number of registered factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether the resolver has no factories.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl ListenerResolver for StaticResolver {
    fn resolve(&self, _class: &ClassId) -> Vec<BoxListener> {
        self.factories.iter().map(|f| f()).collect()
    }
}

/// Builds a fresh execution context bound to a test class.
pub trait ContextFactory {
    /// Produce a context for `class` with an empty state triple.
    fn create(&self, class: ClassId) -> TestContext;
}

/// Context factory with no shared state; every context starts empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainContextFactory;

impl ContextFactory for PlainContextFactory {
    fn create(&self, class: ClassId) -> TestContext {
        TestContext::new(class)
    }
}

type AttributeSeed = Vec<(String, Arc<dyn Any + Send + Sync>)>;

/// An explicitly scoped cache of per-class context seeds.
///
/// Stores the attribute values a context for a given class should start
/// with. Contexts themselves are single-owner per dispatcher, so what is
/// shared across dispatchers is the seed, not a live context.
///
/// Clones share the same underlying store, so one cache value can be handed
/// to several factories.
#[derive(Clone, Default)]
pub struct ContextCache {
    seeds: Arc<Mutex<HashMap<ClassId, AttributeSeed>>>,
}

impl ContextCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self) -> std::sync::MutexGuard<'_, HashMap<ClassId, AttributeSeed>> {
        match self.seeds.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Add an attribute to the seed for `class`.
    pub fn insert(&self, class: ClassId, key: impl Into<String>, value: Arc<dyn Any + Send + Sync>) {
        self.store()
            .entry(class)
            .or_default()
            .push((key.into(), value));
    }

    /// The seed attributes recorded for `class`.
    pub fn seed_for(&self, class: &ClassId) -> AttributeSeed {
        self.store().get(class).cloned().unwrap_or_default()
    }

    /// Whether a seed exists for `class`.
    pub fn contains(&self, class: &ClassId) -> bool {
        self.store().contains_key(class)
    }

    /// Drop all seeds.
    pub fn clear(&self) {
        self.store().clear();
    }

    /// Number of classes with a recorded seed.
    pub fn len(&self) -> usize {
        self.store().len()
    }

    /// Whether the cache holds no seeds.
    pub fn is_empty(&self) -> bool {
        self.store().is_empty()
    }
}

/// Context factory that seeds new contexts from a shared [`ContextCache`].
///
/// The cache is passed in at construction; the factory holds no other
/// state.
pub struct CachingContextFactory {
    cache: ContextCache,
}

impl CachingContextFactory {
    /// Create a factory over the given cache.
    pub fn new(cache: ContextCache) -> Self {
        Self { cache }
    }

    /// The cache this factory seeds from.
    pub fn cache(&self) -> &ContextCache {
        &self.cache
    }
}

impl ContextFactory for CachingContextFactory {
    fn create(&self, class: ClassId) -> TestContext {
        let ctx = TestContext::new(class.clone());
        let seed = self.cache.seed_for(&class);
        if seed.is_empty() {
            tracing::debug!(class = %class, "no cached seed for class");
        } else {
            tracing::debug!(class = %class, attributes = seed.len(), "seeding context from cache");
            for (key, value) in seed {
                ctx.set_attribute(key, value);
            }
        }
        ctx
    }
}
