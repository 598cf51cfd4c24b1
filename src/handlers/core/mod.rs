//! Core handler infrastructure.
//!
//! This module contains the fundamental types for the command handler
//! system: the [`Dispatcher`], the per-command [`Context`] and the
//! [`Handler`] trait with its [`Admission`] requirements.

pub mod context;
pub mod dispatcher;
pub mod traits;

pub use context::Context;
pub use dispatcher::Dispatcher;
pub use traits::{Admission, Handler, HandlerFactory, Registration};
