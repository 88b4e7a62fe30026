//! # prova - Test Lifecycle Event Dispatching
//!
//! `prova` coordinates pluggable observers ([`TestListener`]s) around the
//! execution of a test class: five notification points, a shared execution
//! context, and two failure-propagation disciplines.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use prova::{ClassId, LifecycleDispatcher, MethodId};
//! use std::sync::Arc;
//!
//! let mut dispatcher = LifecycleDispatcher::with_listeners(
//!     ClassId::new("WidgetTest"),
//!     [Box::new(MyListener) as prova::BoxListener],
//! );
//!
//! let instance: prova::TestInstance = Arc::new(WidgetFixture::default());
//!
//! dispatcher.before_test_class()?;
//! dispatcher.prepare_test_instance(Some(instance.clone()))?;
//! dispatcher.before_test_method(Some(instance.clone()), MethodId::new("renders"))?;
//! // ... run the test body ...
//! dispatcher.after_test_method(Some(instance), MethodId::new("renders"), None)?;
//! dispatcher.after_test_class()?;
//! ```

#![deny(clippy::pub_use, clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use prova_core::{
    // Error types
    BoxError,
    // Listener contract
    BoxListener,
    // Context
    ClassId,
    DispatchError,
    FailureCause,
    MethodId,
    // Phases
    Phase,
    TestContext,
    TestInstance,
    TestListener,
};

mod dispatcher;
mod registry;

pub use dispatcher::LifecycleDispatcher;
pub use registry::ListenerRegistry;

// Collaborator contracts and implementations
pub use prova_std::resolve::{
    CachingContextFactory, ContextCache, ContextFactory, ListenerResolver, PlainContextFactory,
    StaticResolver,
};

/// Standard listener implementations.
pub mod listeners {
    #![allow(clippy::wildcard_imports)]
    pub use prova_std::listeners::*;
}

/// Collaborator contracts for dispatcher construction.
pub mod resolve {
    #![allow(clippy::wildcard_imports)]
    pub use prova_std::resolve::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use prova_std::testing::*;
}

/// Prelude module - common imports for Prova.
///
/// # Usage
///
/// ```rust,ignore
/// use prova::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError,
        BoxListener,
        ClassId,
        DispatchError,
        LifecycleDispatcher,
        ListenerRegistry,
        MethodId,
        Phase,
        TestContext,
        TestInstance,
        TestListener,
    };
}
