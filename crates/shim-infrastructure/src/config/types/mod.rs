//! Configuration types module

pub mod app;
pub mod logging;
pub mod runtime;

pub use app::ShimConfig;
pub use logging::LoggingConfig;
pub use runtime::RuntimeConfig;
