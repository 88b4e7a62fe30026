//! Testing utilities for Prova.
//!
//! This module provides utilities to make testing listeners and dispatch
//! policies easier.
//!
//! # Features
//!
//! - [`InvocationRecord`]: a shared log of which listener ran in which phase
//! - [`RecordingListener`]: a listener that records every hook call and the
//!   context state it observed
//! - [`FailingListener`]: a listener programmed to fail in chosen phases

use prova_core::{
    BoxError, FailureCause, MethodId, Phase, TestContext, TestInstance, TestListener,
};
use std::sync::{Arc, Mutex};
use thiserror::Error;

// ============================================================================
// Invocation Record
// ============================================================================

/// A shared, cloneable log of listener invocations in order.
///
/// Clones share the same underlying log, so one record can be threaded
/// through several listeners and inspected after dispatch.
///
/// # Example
///
/// ```rust,ignore
/// let record = InvocationRecord::new();
/// let a = RecordingListener::new("a", record.clone());
/// let b = RecordingListener::new("b", record.clone());
///
/// // dispatch...
///
/// assert_eq!(record.labels(), ["a", "b"]);
/// ```
#[derive(Clone, Default)]
pub struct InvocationRecord {
    entries: Arc<Mutex<Vec<(String, Phase)>>>,
}

impl InvocationRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an invocation.
    pub fn push(&self, label: &str, phase: Phase) {
        self.entries.lock().unwrap().push((label.to_string(), phase));
    }

    /// Snapshot of all `(label, phase)` entries in invocation order.
    pub fn entries(&self) -> Vec<(String, Phase)> {
        self.entries.lock().unwrap().clone()
    }

    /// Snapshot of just the listener labels, in invocation order.
    pub fn labels(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|(label, _)| label.clone())
            .collect()
    }

    /// Number of recorded invocations.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    /// Clear all recorded invocations.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

// ============================================================================
// Recording Listener
// ============================================================================

/// The context triple as seen by a listener during one hook call.
#[derive(Clone)]
pub struct ObservedState {
    /// Phase the hook ran in.
    pub phase: Phase,
    /// Instance present in the context at call time.
    pub instance: Option<TestInstance>,
    /// Method present in the context at call time.
    pub method: Option<MethodId>,
    /// Failure present in the context at call time.
    pub failure: Option<FailureCause>,
}

/// A listener that records every hook call it receives.
///
/// Each call is appended to the shared [`InvocationRecord`] and the context
/// triple observed at call time is kept for later assertions. Clones share
/// the same observation log, so a test can register a clone and keep the
/// original for inspection.
pub struct RecordingListener {
    label: String,
    record: InvocationRecord,
    observed: Arc<Mutex<Vec<ObservedState>>>,
}

impl RecordingListener {
    /// Create a recording listener with the given label.
    pub fn new(label: impl Into<String>, record: InvocationRecord) -> Self {
        Self {
            label: label.into(),
            record,
            observed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Snapshot of the context states observed so far, in call order.
    pub fn observed(&self) -> Vec<ObservedState> {
        self.observed.lock().unwrap().clone()
    }

    /// Number of hook calls received.
    pub fn call_count(&self) -> usize {
        self.observed.lock().unwrap().len()
    }

    fn observe(&self, phase: Phase, ctx: &TestContext) -> Result<(), BoxError> {
        self.record.push(&self.label, phase);
        self.observed.lock().unwrap().push(ObservedState {
            phase,
            instance: ctx.test_instance().cloned(),
            method: ctx.test_method().cloned(),
            failure: ctx.last_failure().cloned(),
        });
        Ok(())
    }
}

impl Clone for RecordingListener {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            record: self.record.clone(),
            observed: self.observed.clone(),
        }
    }
}

impl TestListener for RecordingListener {
    fn before_class(&self, ctx: &TestContext) -> Result<(), BoxError> {
        self.observe(Phase::BeforeClass, ctx)
    }

    fn prepare_instance(&self, ctx: &TestContext) -> Result<(), BoxError> {
        self.observe(Phase::PrepareInstance, ctx)
    }

    fn before_method(&self, ctx: &TestContext) -> Result<(), BoxError> {
        self.observe(Phase::BeforeMethod, ctx)
    }

    fn after_method(&self, ctx: &TestContext) -> Result<(), BoxError> {
        self.observe(Phase::AfterMethod, ctx)
    }

    fn after_class(&self, ctx: &TestContext) -> Result<(), BoxError> {
        self.observe(Phase::AfterClass, ctx)
    }

    fn name(&self) -> &str {
        &self.label
    }
}

// ============================================================================
// Failing Listener
// ============================================================================

/// The error produced by a [`FailingListener`].
///
/// Carries the failing listener's label and phase so tests can assert which
/// configured failure actually propagated.
#[derive(Debug, Error)]
#[error("{listener} refused {phase}")]
pub struct InjectedFailure {
    /// Label of the listener that produced this failure.
    pub listener: String,
    /// Phase the failure was injected in.
    pub phase: Phase,
}

/// A listener programmed to fail in a chosen set of phases.
///
/// Calls are recorded in the shared [`InvocationRecord`] before the failure
/// is raised, so ordering assertions still see the failing listener.
///
/// # Example
///
/// ```rust,ignore
/// let record = InvocationRecord::new();
/// let bad = FailingListener::new("bad", record.clone())
///     .fail_on(Phase::BeforeMethod);
/// ```
pub struct FailingListener {
    label: String,
    record: InvocationRecord,
    failing: Vec<Phase>,
}

impl FailingListener {
    /// Create a listener that fails in no phases yet.
    pub fn new(label: impl Into<String>, record: InvocationRecord) -> Self {
        Self {
            label: label.into(),
            record,
            failing: Vec::new(),
        }
    }

    /// Mark a phase as failing.
    pub fn fail_on(mut self, phase: Phase) -> Self {
        self.failing.push(phase);
        self
    }

    /// Mark every phase as failing.
    pub fn fail_on_all(mut self) -> Self {
        self.failing.extend(Phase::ALL);
        self
    }

    fn run(&self, phase: Phase) -> Result<(), BoxError> {
        self.record.push(&self.label, phase);
        if self.failing.contains(&phase) {
            Err(Box::new(InjectedFailure {
                listener: self.label.clone(),
                phase,
            }))
        } else {
            Ok(())
        }
    }
}

impl TestListener for FailingListener {
    fn before_class(&self, ctx: &TestContext) -> Result<(), BoxError> {
        let _ = ctx;
        self.run(Phase::BeforeClass)
    }

    fn prepare_instance(&self, ctx: &TestContext) -> Result<(), BoxError> {
        let _ = ctx;
        self.run(Phase::PrepareInstance)
    }

    fn before_method(&self, ctx: &TestContext) -> Result<(), BoxError> {
        let _ = ctx;
        self.run(Phase::BeforeMethod)
    }

    fn after_method(&self, ctx: &TestContext) -> Result<(), BoxError> {
        let _ = ctx;
        self.run(Phase::AfterMethod)
    }

    fn after_class(&self, ctx: &TestContext) -> Result<(), BoxError> {
        let _ = ctx;
        self.run(Phase::AfterClass)
    }

    fn name(&self) -> &str {
        &self.label
    }
}
