//! Connection and registration handlers.
//!
//! Handles NICK, USER, SERVICE, PING, PONG, QUIT and the welcome burst
//! that completes registration.

mod nick;
mod ping;
mod quit;
mod service;
mod user;
mod welcome;

pub use nick::NickHandler;
pub use ping::{PingHandler, PongHandler};
pub use quit::{QuitHandler, disconnect};
pub use service::ServiceHandler;
pub use user::UserHandler;
pub use welcome::complete_registration;
