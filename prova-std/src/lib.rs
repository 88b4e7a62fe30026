//! # prova-std
//!
//! Standard implementations for the Prova test lifecycle framework.
//!
//! This crate provides:
//! - **Standard listeners**: [`LoggingListener`], [`FnListener`]
//! - **Collaborators**: [`StaticResolver`], [`PlainContextFactory`],
//!   [`CachingContextFactory`] with its explicit [`ContextCache`]
//! - **Testing utilities**: [`RecordingListener`], [`FailingListener`]
//!
//! [`LoggingListener`]: listeners::LoggingListener
//! [`FnListener`]: listeners::FnListener
//! [`StaticResolver`]: resolve::StaticResolver
//! [`PlainContextFactory`]: resolve::PlainContextFactory
//! [`CachingContextFactory`]: resolve::CachingContextFactory
//! [`ContextCache`]: resolve::ContextCache
//! [`RecordingListener`]: testing::RecordingListener
//! [`FailingListener`]: testing::FailingListener

#![deny(clippy::pub_use, clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use prova_core;

// Modules
pub mod listeners;
pub mod resolve;
pub mod testing;
