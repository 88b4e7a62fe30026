//! Registry module for listener management.
//!
//! A thin ordered container owned by the dispatcher. Registration is
//! append-only, duplicates are permitted, and there is no internal
//! synchronization; the dispatcher's `&mut` discipline is the only
//! concurrency control.

use prova_core::{BoxListener, TestListener};

/// An ordered sequence of registered listeners.
///
/// Forward iteration yields listeners in registration order (used by setup
/// phases); reverse iteration yields them last-registered first (used by
/// teardown phases), giving the LIFO discipline of nested-resource release.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<BoxListener>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener.
    pub fn register(&mut self, listener: impl TestListener + 'static) {
        self.register_boxed(Box::new(listener));
    }

    /// Append an already boxed listener.
    pub fn register_boxed(&mut self, listener: BoxListener) {
        tracing::trace!(listener = listener.name(), "registering listener");
        self.listeners.push(listener);
    }

    /// Append listeners in the given order.
    pub fn register_all(&mut self, listeners: impl IntoIterator<Item = BoxListener>) {
        for listener in listeners {
            self.register_boxed(listener);
        }
    }

    /// Iterate in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn TestListener> {
        self.listeners.iter().map(|l| &**l)
    }

    /// Iterate in reverse registration order.
    pub fn iter_reversed(&self) -> impl Iterator<Item = &dyn TestListener> {
        self.listeners.iter().rev().map(|l| &**l)
    }

    /// Live mutable access to the registered listeners, for reordering or
    /// replacement between test executions.
    pub fn as_mut_slice(&mut self) -> &mut [BoxListener] {
        &mut self.listeners
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
