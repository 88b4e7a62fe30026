//! Lifecycle phases.
//!
//! A test class passes through five notification points. The [`Phase`] enum
//! names them and acts as the dispatch table that routes a phase to the
//! matching hook on a [`TestListener`].
//!
//! [`TestListener`]: crate::TestListener

use crate::{context::TestContext, error::BoxError, listener::TestListener};

/// One of the five notification points in a test class lifecycle.
///
/// Setup phases (`BeforeClass`, `PrepareInstance`, `BeforeMethod`) notify
/// listeners in registration order and stop at the first failure. Teardown
/// phases (`AfterMethod`, `AfterClass`) notify in reverse registration order
/// and always run every listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Before any test method of the class runs.
    BeforeClass,
    /// Immediately after the test instance has been created.
    PrepareInstance,
    /// Before an individual test method runs.
    BeforeMethod,
    /// After an individual test method has run.
    AfterMethod,
    /// After all test methods of the class have run.
    AfterClass,
}

impl Phase {
    /// All phases, in lifecycle order.
    pub const ALL: [Phase; 5] = [
        Phase::BeforeClass,
        Phase::PrepareInstance,
        Phase::BeforeMethod,
        Phase::AfterMethod,
        Phase::AfterClass,
    ];

    /// Invoke the hook matching this phase on `listener`.
    pub fn dispatch(
        self,
        listener: &dyn TestListener,
        ctx: &TestContext,
    ) -> Result<(), BoxError> {
        match self {
            Phase::BeforeClass => listener.before_class(ctx),
            Phase::PrepareInstance => listener.prepare_instance(ctx),
            Phase::BeforeMethod => listener.before_method(ctx),
            Phase::AfterMethod => listener.after_method(ctx),
            Phase::AfterClass => listener.after_class(ctx),
        }
    }

    /// Whether this phase notifies listeners in reverse registration order.
    pub fn is_teardown(self) -> bool {
        matches!(self, Phase::AfterMethod | Phase::AfterClass)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::BeforeClass => "before class",
            Phase::PrepareInstance => "prepare instance",
            Phase::BeforeMethod => "before method",
            Phase::AfterMethod => "after method",
            Phase::AfterClass => "after class",
        };
        f.write_str(name)
    }
}
