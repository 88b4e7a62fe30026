//! # Listener Contract
//!
//! A [`TestListener`] is a pluggable observer notified at each of the five
//! lifecycle phases of a test class. Every hook receives a shared reference
//! to the [`TestContext`] managed by the dispatcher and may fail with an
//! opaque error; the dispatcher decides when and whether that error
//! propagates, never what it means.
//!
//! # Responsibilities
//!
//! 1. **Observation**: inspect the current class, instance, method, and
//!    failure through the context's read accessors.
//! 2. **Side effects**: perform setup/teardown work (fixtures, injection,
//!    transactions) appropriate to the phase.
//! 3. **Auxiliary state**: attach data to the context via its attribute map
//!    for later phases or other listeners.
//!
//! Listeners never mutate the context's state triple; that is the
//! dispatcher's job, enforced by the `&TestContext` receiver.

use crate::{context::TestContext, error::BoxError};

/// A pluggable observer notified at each test lifecycle phase.
///
/// All five hooks default to no-ops, so an implementation only overrides the
/// phases it cares about. Hooks run on the caller's thread and block the
/// phase until they return.
///
/// Setup hooks (`before_class`, `prepare_instance`, `before_method`) are not
/// guaranteed to run if an earlier listener in the same phase failed.
/// Teardown hooks (`after_method`, `after_class`) always run.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `TestListener`",
    label = "missing `TestListener` implementation",
    note = "Listeners observe lifecycle phases by overriding the hooks they need."
)]
pub trait TestListener: Send + Sync {
    /// Called once before any test method of the class runs.
    ///
    /// The context carries no instance, method, or failure at this point.
    fn before_class(&self, ctx: &TestContext) -> Result<(), BoxError> {
        let _ = ctx;
        Ok(())
    }

    /// Called immediately after the test instance has been created, before
    /// any test method runs on it.
    fn prepare_instance(&self, ctx: &TestContext) -> Result<(), BoxError> {
        let _ = ctx;
        Ok(())
    }

    /// Called before an individual test method runs.
    fn before_method(&self, ctx: &TestContext) -> Result<(), BoxError> {
        let _ = ctx;
        Ok(())
    }

    /// Called after an individual test method has run.
    ///
    /// `ctx.last_failure()` carries the test body's failure, or `None` if
    /// the test passed. It is informational; returning `Ok` here does not
    /// rethrow it.
    fn after_method(&self, ctx: &TestContext) -> Result<(), BoxError> {
        let _ = ctx;
        Ok(())
    }

    /// Called once after all test methods of the class have run.
    fn after_class(&self, ctx: &TestContext) -> Result<(), BoxError> {
        let _ = ctx;
        Ok(())
    }

    /// Identity used in log and error output.
    fn name(&self) -> &str {
        std::any::type_name_of_val(self)
    }
}

/// A boxed, dynamically dispatched listener.
pub type BoxListener = Box<dyn TestListener>;

impl TestListener for BoxListener {
    fn before_class(&self, ctx: &TestContext) -> Result<(), BoxError> {
        (**self).before_class(ctx)
    }

    fn prepare_instance(&self, ctx: &TestContext) -> Result<(), BoxError> {
        (**self).prepare_instance(ctx)
    }

    fn before_method(&self, ctx: &TestContext) -> Result<(), BoxError> {
        (**self).before_method(ctx)
    }

    fn after_method(&self, ctx: &TestContext) -> Result<(), BoxError> {
        (**self).after_method(ctx)
    }

    fn after_class(&self, ctx: &TestContext) -> Result<(), BoxError> {
        (**self).after_class(ctx)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ClassId;

    struct Silent;

    impl TestListener for Silent {}

    #[test]
    fn default_hooks_are_no_ops() {
        let ctx = TestContext::new(ClassId::new("DefaultHooks"));
        let listener = Silent;
        assert!(listener.before_class(&ctx).is_ok());
        assert!(listener.prepare_instance(&ctx).is_ok());
        assert!(listener.before_method(&ctx).is_ok());
        assert!(listener.after_method(&ctx).is_ok());
        assert!(listener.after_class(&ctx).is_ok());
    }

    #[test]
    fn default_name_is_type_name() {
        let listener = Silent;
        assert!(listener.name().ends_with("Silent"));
    }

    #[test]
    fn boxed_listener_forwards() {
        let ctx = TestContext::new(ClassId::new("Boxed"));
        let boxed: BoxListener = Box::new(Silent);
        assert!(boxed.before_class(&ctx).is_ok());
        assert!(boxed.name().ends_with("Silent"));
    }
}
