//! Operator command handlers.

mod admin;
mod auth;
mod kill;
mod squit;
mod wallops;

pub use admin::{DieHandler, RehashHandler, RestartHandler};
pub use auth::OperHandler;
pub use kill::KillHandler;
pub use squit::SquitHandler;
pub use wallops::WallopsHandler;
