//! IRC command handlers.
//!
//! One handler type per command. The [`Dispatcher`] builds a fresh handler
//! for every inbound line, runs the admission checks and the handler's
//! `validate`, and only then `execute`. Handlers receive `MessageRef<'_>`,
//! which borrows from the line being processed; anything needed after
//! validation is copied into the handler itself.

mod channel;
mod connection;
pub mod core;
mod helpers;
mod messaging;
mod mode;
mod oper;
mod server;
mod server_query;
mod user_query;
mod user_status;

pub use connection::disconnect;
pub use core::{Admission, Context, Dispatcher, Handler, HandlerFactory, Registration};
