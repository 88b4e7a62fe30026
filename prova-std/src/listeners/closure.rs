//! Closure-based listener adapter.
//!
//! [`FnListener`] builds a [`TestListener`] out of per-phase closures, so a
//! one-off listener doesn't need its own type. Phases without a closure are
//! no-ops.

use prova_core::{BoxError, TestContext, TestListener};

type PhaseFn = Box<dyn Fn(&TestContext) -> Result<(), BoxError> + Send + Sync>;

/// A listener assembled from per-phase closures.
///
/// # Example
///
/// ```rust,ignore
/// let listener = FnListener::named("fixtures")
///     .on_before_method(|ctx| {
///         println!("entering {:?}", ctx.test_method());
///         Ok(())
///     })
///     .on_after_method(|_ctx| Ok(()));
/// ```
#[derive(Default)]
pub struct FnListener {
    label: Option<String>,
    before_class: Option<PhaseFn>,
    prepare_instance: Option<PhaseFn>,
    before_method: Option<PhaseFn>,
    after_method: Option<PhaseFn>,
    after_class: Option<PhaseFn>,
}

impl FnListener {
    /// Create an empty listener; every phase is a no-op until set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty listener with a label used in log and error output.
    pub fn named(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    /// Set the before-class hook.
    pub fn on_before_class<F>(mut self, f: F) -> Self
    where
        F: Fn(&TestContext) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.before_class = Some(Box::new(f));
        self
    }

    /// Set the prepare-instance hook.
    pub fn on_prepare_instance<F>(mut self, f: F) -> Self
    where
        F: Fn(&TestContext) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.prepare_instance = Some(Box::new(f));
        self
    }

    /// Set the before-method hook.
    pub fn on_before_method<F>(mut self, f: F) -> Self
    where
        F: Fn(&TestContext) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.before_method = Some(Box::new(f));
        self
    }

    /// Set the after-method hook.
    pub fn on_after_method<F>(mut self, f: F) -> Self
    where
        F: Fn(&TestContext) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.after_method = Some(Box::new(f));
        self
    }

    /// Set the after-class hook.
    pub fn on_after_class<F>(mut self, f: F) -> Self
    where
        F: Fn(&TestContext) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.after_class = Some(Box::new(f));
        self
    }

    fn call(slot: &Option<PhaseFn>, ctx: &TestContext) -> Result<(), BoxError> {
        match slot {
            Some(f) => f(ctx),
            None => Ok(()),
        }
    }
}

impl TestListener for FnListener {
    fn before_class(&self, ctx: &TestContext) -> Result<(), BoxError> {
        Self::call(&self.before_class, ctx)
    }

    fn prepare_instance(&self, ctx: &TestContext) -> Result<(), BoxError> {
        Self::call(&self.prepare_instance, ctx)
    }

    fn before_method(&self, ctx: &TestContext) -> Result<(), BoxError> {
        Self::call(&self.before_method, ctx)
    }

    fn after_method(&self, ctx: &TestContext) -> Result<(), BoxError> {
        Self::call(&self.after_method, ctx)
    }

    fn after_class(&self, ctx: &TestContext) -> Result<(), BoxError> {
        Self::call(&self.after_class, ctx)
    }

    fn name(&self) -> &str {
        self.label.as_deref().unwrap_or("FnListener")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prova_core::ClassId;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    #[test]
    fn unset_phases_are_no_ops() {
        let ctx = TestContext::new(ClassId::new("Unset"));
        let listener = FnListener::new();
        assert!(listener.before_class(&ctx).is_ok());
        assert!(listener.after_class(&ctx).is_ok());
    }

    #[test]
    fn set_phase_runs_its_closure() {
        let ctx = TestContext::new(ClassId::new("Set"));
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in = calls.clone();
        let listener = FnListener::new().on_before_method(move |_ctx| {
            calls_in.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        assert!(listener.before_method(&ctx).is_ok());
        assert!(listener.before_class(&ctx).is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn closure_errors_surface() {
        let ctx = TestContext::new(ClassId::new("Err"));
        let listener =
            FnListener::named("flaky").on_after_method(|_ctx| Err("teardown broke".into()));
        let err = listener.after_method(&ctx).unwrap_err();
        assert_eq!(err.to_string(), "teardown broke");
        assert_eq!(listener.name(), "flaky");
    }
}
