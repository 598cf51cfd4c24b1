//! parlance - an RFC 2812 IRC daemon.
//!
//! The protocol engine lives in [`handlers`], [`state`] and [`router`]; the
//! [`network`] module feeds it lines from TCP sockets. Wire-level types
//! (tokenizer, replies, masks, mode parsing) come from `parlance-proto`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod network;
pub mod router;
pub mod state;
pub mod telemetry;
