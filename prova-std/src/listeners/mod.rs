//! Standard listener implementations.

pub mod closure;
pub mod logging;

pub use closure::FnListener;
pub use logging::LoggingListener;
