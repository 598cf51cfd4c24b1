//! Command handler context.

use std::sync::Arc;

use parlance_proto::{Message, Prefix};

use super::dispatcher::Dispatcher;
use crate::router::Router;
use crate::state::{ServerContext, Talker, User};

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// Shared server state.
    pub server: &'a ServerContext,
    /// Who sent the line. Registration may replace it.
    pub sender: &'a mut Talker,
    /// Command table (for STATS m).
    pub dispatcher: &'a Dispatcher,
    /// The command word, uppercased.
    pub command: &'static str,
}

impl<'a> Context<'a> {
    pub fn router(&self) -> Router<'a> {
        self.server.router()
    }

    /// The sender's nickname, `*` before NICK.
    pub fn nick(&self) -> String {
        self.sender.nickname()
    }

    /// The sender as a user, if it is one.
    pub fn user(&self) -> Option<Arc<User>> {
        self.sender.as_user().cloned()
    }

    pub fn server_prefix(&self) -> Prefix {
        Prefix::server(self.server.name())
    }

    /// Send a server reply to the sender.
    pub fn reply(&self, msg: Message) {
        self.router().reply(&*self.sender, msg);
    }

    /// Send a line to the sender as is.
    pub fn send(&self, msg: &Message) {
        self.router().send(&*self.sender, msg);
    }
}
