//! Error types for Prova.
//!
//! This module provides the error taxonomy of the dispatch boundary using
//! `thiserror`:
//!
//! - [`BoxError`] - the opaque error a listener hook may return
//! - [`DispatchError`] - the tagged error returned by phase operations,
//!   distinguishing argument failures from listener failures

use crate::phase::Phase;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by the lifecycle dispatch operations.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A required argument was absent.
    ///
    /// Raised before any state mutation or listener notification; no
    /// listener runs when this is returned.
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    /// A listener hook failed during a phase.
    ///
    /// The listener's own error is carried as the source, untouched; the
    /// dispatcher controls only when it propagates, never what it means.
    #[error("listener {listener} failed during {phase}")]
    Listener {
        /// Phase in which the failure occurred.
        phase: Phase,
        /// Identity of the failing listener.
        listener: String,
        /// The listener's error, unchanged.
        #[source]
        source: BoxError,
    },
}

impl DispatchError {
    /// The failing listener's own error, when this is a listener failure.
    pub fn listener_error(&self) -> Option<&BoxError> {
        match self {
            DispatchError::Listener { source, .. } => Some(source),
            DispatchError::MissingArgument(_) => None,
        }
    }

    /// Whether this is an argument error raised before any notification.
    pub fn is_missing_argument(&self) -> bool {
        matches!(self, DispatchError::MissingArgument(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn listener_error_preserves_source() {
        let source: BoxError = "hook exploded".into();
        let err = DispatchError::Listener {
            phase: Phase::BeforeMethod,
            listener: "fixture".into(),
            source,
        };
        assert_eq!(err.listener_error().unwrap().to_string(), "hook exploded");
        assert_eq!(err.source().unwrap().to_string(), "hook exploded");
        assert_eq!(
            err.to_string(),
            "listener fixture failed during before method"
        );
    }

    #[test]
    fn missing_argument_has_no_source() {
        let err = DispatchError::MissingArgument("test instance");
        assert!(err.is_missing_argument());
        assert!(err.listener_error().is_none());
        assert!(err.source().is_none());
    }
}
