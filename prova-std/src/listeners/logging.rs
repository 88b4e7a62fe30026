//! Logging listener for lifecycle observation.

use prova_core::{BoxError, TestContext, TestListener};

/// A listener that logs every lifecycle phase for debugging/observation.
///
/// Emits one `tracing` debug event per hook, carrying the context fields
/// that are populated in that phase.
pub struct LoggingListener;

impl TestListener for LoggingListener {
    fn before_class(&self, ctx: &TestContext) -> Result<(), BoxError> {
        tracing::debug!(class = %ctx.test_class(), "before class");
        Ok(())
    }

    fn prepare_instance(&self, ctx: &TestContext) -> Result<(), BoxError> {
        tracing::debug!(class = %ctx.test_class(), "prepare instance");
        Ok(())
    }

    fn before_method(&self, ctx: &TestContext) -> Result<(), BoxError> {
        tracing::debug!(
            class = %ctx.test_class(),
            method = ctx.test_method().map(|m| m.as_str()),
            "before method",
        );
        Ok(())
    }

    fn after_method(&self, ctx: &TestContext) -> Result<(), BoxError> {
        tracing::debug!(
            class = %ctx.test_class(),
            method = ctx.test_method().map(|m| m.as_str()),
            failed = ctx.last_failure().is_some(),
            "after method",
        );
        Ok(())
    }

    fn after_class(&self, ctx: &TestContext) -> Result<(), BoxError> {
        tracing::debug!(class = %ctx.test_class(), "after class");
        Ok(())
    }

    fn name(&self) -> &str {
        "LoggingListener"
    }
}
