//! Lifecycle dispatcher.
//!
//! [`LifecycleDispatcher`] is the main entry point into Prova. One
//! dispatcher manages a single [`TestContext`] and signals the registered
//! listeners at five well defined execution points: before the test class,
//! on test instance preparation, before and after each test method, and
//! after the test class.
//!
//! # Policies
//!
//! Setup phases traverse the registry forward and **fail fast**: the first
//! listener failure stops the traversal and propagates, leaving later
//! listeners un-notified. Teardown phases traverse in reverse and
//! **collect and continue**: every listener runs, the first failure is
//! propagated after the traversal, later failures are logged only. The
//! reverse order gives wrapper-style execution, with the last-registered
//! listener tearing down first.
//!
//! # Sequencing
//!
//! The caller is trusted to drive the phases in lifecycle order:
//! `before_test_class`, then per test method `prepare_test_instance`,
//! `before_test_method`, `after_test_method`, and finally
//! `after_test_class`. No internal ordering validation is performed.

use crate::registry::ListenerRegistry;
use prova_core::{
    BoxListener, ClassId, DispatchError, FailureCause, MethodId, Phase, TestContext, TestInstance,
    TestListener,
};
use prova_std::resolve::{ContextFactory, ListenerResolver};
use tracing::{trace, warn};

/// Orchestrates the five lifecycle phases for one test class.
///
/// Owns the execution context and the listener registry. All phase
/// operations take `&mut self`, so a dispatcher can only be driven by one
/// logical thread of control at a time; a host runner executing classes
/// concurrently gives each class its own dispatcher.
pub struct LifecycleDispatcher {
    context: TestContext,
    registry: ListenerRegistry,
}

impl LifecycleDispatcher {
    /// Construct a dispatcher for `class`, delegating to the collaborators:
    /// the factory builds the context bound to the class, the resolver
    /// produces the initial ordered listener sequence.
    pub fn new<R, F>(class: ClassId, resolver: &R, factory: &F) -> Self
    where
        R: ListenerResolver + ?Sized,
        F: ContextFactory + ?Sized,
    {
        let context = factory.create(class.clone());
        let mut registry = ListenerRegistry::new();
        registry.register_all(resolver.resolve(&class));
        Self { context, registry }
    }

    /// Construct a dispatcher for `class` over an explicit listener
    /// sequence and a plain, factory-less context.
    pub fn with_listeners(
        class: ClassId,
        listeners: impl IntoIterator<Item = BoxListener>,
    ) -> Self {
        let mut registry = ListenerRegistry::new();
        registry.register_all(listeners);
        Self {
            context: TestContext::new(class),
            registry,
        }
    }

    /// The execution context managed by this dispatcher.
    pub fn context(&self) -> &TestContext {
        &self.context
    }

    /// The registered listeners, in registration order.
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.registry
    }

    /// Live mutable access to the registry.
    ///
    /// Callers may reorder or extend the sequence between test executions,
    /// but must keep it stable while a phase is in flight.
    pub fn listeners_mut(&mut self) -> &mut ListenerRegistry {
        &mut self.registry
    }

    /// Append a listener to the registry.
    pub fn register_listener(&mut self, listener: impl TestListener + 'static) {
        self.registry.register(listener);
    }

    /// Append listeners to the registry in the given order.
    pub fn register_listeners(&mut self, listeners: impl IntoIterator<Item = BoxListener>) {
        self.registry.register_all(listeners);
    }

    /// Notify listeners before any test method of the class runs.
    ///
    /// Forward traversal, fail fast: if a listener fails, the remaining
    /// listeners are not called and that failure propagates.
    pub fn before_test_class(&mut self) -> Result<(), DispatchError> {
        trace!(class = %self.context.test_class(), "before_test_class");
        self.context.update_state(None, None, None);
        self.notify_forward(Phase::BeforeClass)
    }

    /// Notify listeners that the test instance has been created.
    ///
    /// Forward traversal, fail fast. Returns
    /// [`DispatchError::MissingArgument`] without touching the context or
    /// registry when `instance` is `None`.
    pub fn prepare_test_instance(
        &mut self,
        instance: Option<TestInstance>,
    ) -> Result<(), DispatchError> {
        let instance = instance.ok_or(DispatchError::MissingArgument("test instance"))?;
        trace!(class = %self.context.test_class(), "prepare_test_instance");
        self.context.update_state(Some(instance), None, None);
        self.notify_forward(Phase::PrepareInstance)
    }

    /// Notify listeners before `method` runs on `instance`.
    ///
    /// Forward traversal, fail fast. Returns
    /// [`DispatchError::MissingArgument`] without touching the context or
    /// registry when `instance` is `None`.
    pub fn before_test_method(
        &mut self,
        instance: Option<TestInstance>,
        method: MethodId,
    ) -> Result<(), DispatchError> {
        let instance = instance.ok_or(DispatchError::MissingArgument("test instance"))?;
        trace!(
            class = %self.context.test_class(),
            method = %method,
            "before_test_method",
        );
        self.context.update_state(Some(instance), Some(method), None);
        self.notify_forward(Phase::BeforeMethod)
    }

    /// Notify listeners after `method` has run on `instance`.
    ///
    /// `failure` is the error raised by the test body, or `None` if the
    /// test passed; it is recorded in the context for listeners to inspect
    /// and is not rethrown here.
    ///
    /// Reverse traversal, collect and continue: every listener runs, the
    /// first listener failure propagates after the traversal, later
    /// failures are logged only.
    pub fn after_test_method(
        &mut self,
        instance: Option<TestInstance>,
        method: MethodId,
        failure: Option<FailureCause>,
    ) -> Result<(), DispatchError> {
        let instance = instance.ok_or(DispatchError::MissingArgument("test instance"))?;
        trace!(
            class = %self.context.test_class(),
            method = %method,
            failed = failure.is_some(),
            "after_test_method",
        );
        self.context
            .update_state(Some(instance), Some(method), failure);
        self.notify_reverse(Phase::AfterMethod)
    }

    /// Notify listeners after all test methods of the class have run.
    ///
    /// Reverse traversal, collect and continue, same as
    /// [`after_test_method`](Self::after_test_method).
    pub fn after_test_class(&mut self) -> Result<(), DispatchError> {
        trace!(class = %self.context.test_class(), "after_test_class");
        self.context.update_state(None, None, None);
        self.notify_reverse(Phase::AfterClass)
    }

    fn notify_forward(&self, phase: Phase) -> Result<(), DispatchError> {
        for listener in self.registry.iter() {
            if let Err(source) = phase.dispatch(listener, &self.context) {
                warn!(
                    %phase,
                    listener = listener.name(),
                    error = %source,
                    "listener failed; skipping remaining listeners",
                );
                return Err(DispatchError::Listener {
                    phase,
                    listener: listener.name().to_string(),
                    source,
                });
            }
        }
        Ok(())
    }

    fn notify_reverse(&self, phase: Phase) -> Result<(), DispatchError> {
        let mut first_failure: Option<DispatchError> = None;
        for listener in self.registry.iter_reversed() {
            if let Err(source) = phase.dispatch(listener, &self.context) {
                warn!(
                    %phase,
                    listener = listener.name(),
                    error = %source,
                    "listener failed; continuing with remaining listeners",
                );
                // Only the first failure propagates; the rest are logged.
                if first_failure.is_none() {
                    first_failure = Some(DispatchError::Listener {
                        phase,
                        listener: listener.name().to_string(),
                        source,
                    });
                }
            }
        }
        match first_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
