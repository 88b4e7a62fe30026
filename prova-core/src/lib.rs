//! # prova-core
//!
//! Core contracts for the Prova test lifecycle framework.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! listeners and extensions that don't need the full `prova-std`
//! implementation.
//!
//! # Architecture
//!
//! Prova coordinates pluggable observers around the execution of a test
//! class. Three contracts make that up:
//!
//! ## Listener ([`TestListener`])
//!
//! The observer contract: five hooks, one per lifecycle phase, each taking
//! the shared execution context and able to fail with an opaque error.
//! All hooks default to no-ops.
//!
//! ## Context ([`TestContext`])
//!
//! The shared state record: the test class (fixed at construction) plus an
//! instance/method/failure triple that the dispatcher replaces atomically
//! before each phase. Listeners read the triple and may attach auxiliary
//! attributes, but cannot touch the triple themselves.
//!
//! ## Phase ([`Phase`])
//!
//! The five notification points, with the dispatch table routing a phase to
//! the matching listener hook. Setup phases notify forward and fail fast;
//! teardown phases notify in reverse and run every listener.
//!
//! # Error Types
//!
//! - [`BoxError`] - opaque listener failure
//! - [`DispatchError`] - tagged phase-operation error

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod context;
mod error;
mod listener;
mod phase;

// Re-exports
pub use context::{ClassId, FailureCause, MethodId, TestContext, TestInstance};
pub use error::{BoxError, DispatchError};
pub use listener::{BoxListener, TestListener};
pub use phase::Phase;
