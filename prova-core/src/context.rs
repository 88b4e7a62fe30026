//! # Execution Context
//!
//! The [`TestContext`] is the shared state record passed to every listener
//! hook. It describes what is currently executing: the test class (fixed at
//! construction), the instance under test, the current test method, and the
//! failure raised by the most recent test body.
//!
//! # Ownership
//!
//! The context has a single owner, the dispatcher, which holds it mutably
//! and replaces the instance/method/failure triple through one call to
//! [`TestContext::update_state`] immediately before each phase's
//! notifications. Listeners receive `&TestContext` and therefore can only
//! read the triple; their one write surface is the attribute map, a
//! string-keyed side channel for auxiliary data.

use std::{
    any::Any,
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

/// Immutable identifier of a test class.
///
/// Cheap to clone and hashable, so it can key an external context cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassId(Arc<str>);

impl ClassId {
    /// Create a class identifier from a name.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    /// The class name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ClassId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Identifier of a test method within a class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodId(Arc<str>);

impl MethodId {
    /// Create a method identifier from a name.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    /// The method name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MethodId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for MethodId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Opaque handle to the object under test.
///
/// `Arc::ptr_eq` is the instance identity; the dispatcher never looks
/// inside. Listeners that need the concrete type can downcast.
pub type TestInstance = Arc<dyn Any + Send + Sync>;

/// Opaque failure raised by a test body, carried into method teardown.
pub type FailureCause = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// The three fields that are only ever replaced together.
#[derive(Default)]
struct ExecutionState {
    instance: Option<TestInstance>,
    method: Option<MethodId>,
    failure: Option<FailureCause>,
}

/// Shared execution-state record for one test class lifecycle.
pub struct TestContext {
    class: ClassId,
    state: ExecutionState,
    attributes: Mutex<HashMap<String, Arc<dyn Any + Send + Sync>>>,
}

impl TestContext {
    /// Create a fresh context bound to `class`, with an empty state triple
    /// and no attributes.
    pub fn new(class: ClassId) -> Self {
        Self {
            class,
            state: ExecutionState::default(),
            attributes: Mutex::new(HashMap::new()),
        }
    }

    /// The test class this context is bound to. Never changes.
    pub fn test_class(&self) -> &ClassId {
        &self.class
    }

    /// The instance under test, present from instance preparation through
    /// method teardown.
    pub fn test_instance(&self) -> Option<&TestInstance> {
        self.state.instance.as_ref()
    }

    /// The current test method, present only during method setup/teardown.
    pub fn test_method(&self) -> Option<&MethodId> {
        self.state.method.as_ref()
    }

    /// The failure raised by the test body, meaningful only during the
    /// after-method phase. `None` means the test passed.
    pub fn last_failure(&self) -> Option<&FailureCause> {
        self.state.failure.as_ref()
    }

    /// Replace the instance/method/failure triple in one step.
    ///
    /// The triple is never updated field by field; `&mut self` gives the
    /// dispatcher exclusive access for the replacement, so no listener can
    /// observe a partially updated record.
    pub fn update_state(
        &mut self,
        instance: Option<TestInstance>,
        method: Option<MethodId>,
        failure: Option<FailureCause>,
    ) {
        self.state = ExecutionState {
            instance,
            method,
            failure,
        };
    }

    // A poisoned lock still yields the map; attribute state is plain data.
    fn attrs(&self) -> MutexGuard<'_, HashMap<String, Arc<dyn Any + Send + Sync>>> {
        match self.attributes.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Attach an auxiliary value under `key`, replacing any previous value.
    ///
    /// This is the listeners' write surface; it does not touch the state
    /// triple.
    pub fn set_attribute(&self, key: impl Into<String>, value: Arc<dyn Any + Send + Sync>) {
        self.attrs().insert(key.into(), value);
    }

    /// Look up an auxiliary value by key.
    pub fn get_attribute(&self, key: &str) -> Option<Arc<dyn Any + Send + Sync>> {
        self.attrs().get(key).cloned()
    }

    /// Remove and return the auxiliary value under `key`.
    pub fn remove_attribute(&self, key: &str) -> Option<Arc<dyn Any + Send + Sync>> {
        self.attrs().remove(key)
    }

    /// Names of all attached attributes.
    pub fn attribute_names(&self) -> Vec<String> {
        self.attrs().keys().cloned().collect()
    }
}

impl fmt::Debug for TestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestContext")
            .field("class", &self.class)
            .field("has_instance", &self.state.instance.is_some())
            .field("method", &self.state.method)
            .field("has_failure", &self.state.failure.is_some())
            .finish()
    }
}
