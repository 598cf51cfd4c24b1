//! State management module.
//!
//! Contains the [`ServerContext`] (shared server state), the [`Directory`]
//! of named entities and the Talker model.

mod channel;
mod context;
mod directory;
mod link;
mod service;
mod talker;
mod user;

pub use channel::{Channel, ChannelModes, ChannelState, Member, MemberModes, Topic};
pub use context::{ServerContext, ServerInfo};
pub use directory::{Census, Directory, Joined};
pub use link::{CommandReport, Link, LinkId, LinkState, LinkStats};
pub use service::{Server, Service};
pub use talker::{Talker, TalkerKind};
pub use user::{DriedUser, User, UserInfo, UserModes};
