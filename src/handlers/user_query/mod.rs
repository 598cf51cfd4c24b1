//! User query handlers: WHO, WHOIS, WHOWAS, ISON, USERHOST.

mod ison;
mod who;
mod whois;
mod whowas;

pub use ison::{IsonHandler, UserhostHandler};
pub use who::WhoHandler;
pub use whois::WhoisHandler;
pub use whowas::WhowasHandler;
