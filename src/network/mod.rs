//! Network module.
//!
//! The socket side of the server: the [`Gateway`] accepts TCP connections
//! and every [`Connection`] pumps lines between its socket and the engine.

mod codec;
mod connection;
mod gateway;

pub use codec::IrcLineCodec;
pub use connection::Connection;
pub use gateway::Gateway;
