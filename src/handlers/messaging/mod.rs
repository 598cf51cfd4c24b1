//! Messaging command handlers (PRIVMSG, NOTICE, SQUERY).

mod delivery;
mod squery;

pub use delivery::{NoticeHandler, PrivmsgHandler};
pub use squery::SqueryHandler;
