//! Native runtime
//!
//! The capability bundle and the small pieces of process state it shares
//! across bundles: the deprecation flag and abort-controller factories.

pub mod abort;
pub mod deprecation;
pub mod native;

pub use abort::{LinkedAbortControllerFactory, NativeAbortControllerFactory};
pub use deprecation::DeprecationNotice;
pub use native::NativeShims;
