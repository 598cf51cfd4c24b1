//! Server-to-server stubs.
//!
//! A peer may register with SERVER and report problems with ERROR. Nothing
//! is relayed to it beyond what the router forwards by server mask.

mod error;
mod link;

pub use error::ErrorHandler;
pub use link::ServerHandler;
