//! Channel command handlers.
//!
//! Handles JOIN, PART, TOPIC, NAMES, LIST, INVITE and KICK. Commands taking
//! comma separated channel lists report failures per channel and carry on
//! with the rest.

mod invite;
mod join;
mod kick;
mod list;
mod names;
mod part;
mod topic;

pub use invite::InviteHandler;
pub use join::JoinHandler;
pub use kick::KickHandler;
pub use list::ListHandler;
pub use names::{NamesHandler, send_names};
pub use part::PartHandler;
pub use topic::{TopicHandler, send_topic};

use std::sync::Arc;

use parlance_proto::{Grammar, Response};

use super::core::Context;
use crate::error::ChannelError;
use crate::state::Channel;

/// Report a per-channel failure to the sender.
pub(super) fn report(ctx: &Context<'_>, err: &ChannelError, channel: &str) {
    ctx.reply(err.to_irc_reply(&ctx.nick(), channel));
}

/// Look up a channel the sender named, answering ERR_NOSUCHCHANNEL if it
/// does not exist or the name is malformed.
pub(super) fn existing_channel(ctx: &Context<'_>, name: &str) -> Option<Arc<Channel>> {
    let found = Grammar::Channel
        .is_match(name)
        .then(|| ctx.server.directory().find_channel(name))
        .flatten();
    if found.is_none() {
        ctx.reply(Response::err_nosuchchannel(&ctx.nick(), name));
    }
    found
}
