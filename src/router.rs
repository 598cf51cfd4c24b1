//! Message delivery.
//!
//! The [`Router`] turns [`Message`]s into wire text and puts them on the
//! output queues of their recipients. Delivery never blocks: a full queue
//! drops the line (see [`Link::send`](crate::state::Link::send)).

use std::collections::HashSet;

use parlance_proto::{Message, Prefix, Response, mask};
use tracing::trace;

use crate::state::{Channel, CommandReport, Link, LinkId, ServerContext, Talker, User};

/// Apparent origin of every line relayed through a `+a` channel.
pub const ANONYMOUS: &str = "anonymous!anonymous@anonymous.";

/// Delivery helper borrowed from the [`ServerContext`].
#[derive(Clone, Copy)]
pub struct Router<'a> {
    server: &'a ServerContext,
}

impl<'a> Router<'a> {
    pub fn new(server: &'a ServerContext) -> Self {
        Self { server }
    }

    fn deliver(link: &Link, msg: &Message, recipient: String) -> bool {
        let origin = msg
            .prefix
            .as_ref()
            .map(|p| p.name().to_string())
            .unwrap_or_default();
        link.send(CommandReport::new(msg.to_string(), recipient, origin))
    }

    /// Deliver `msg` as is.
    pub fn send(&self, to: &Talker, msg: &Message) -> bool {
        match to.link() {
            Some(link) => Self::deliver(link, msg, to.nickname()),
            None => false,
        }
    }

    pub fn send_user(&self, to: &User, msg: &Message) -> bool {
        Self::deliver(to.link(), msg, to.nickname())
    }

    /// Deliver `msg` from this server, adding the server prefix if the
    /// message has none.
    pub fn reply(&self, to: &Talker, msg: Message) -> bool {
        let msg = msg.or_prefix(|| Prefix::server(self.server.name()));
        self.send(to, &msg)
    }

    /// Deliver to every member of `channel` but `except`. In an anonymous
    /// channel the origin is masked.
    pub fn broadcast(&self, channel: &Channel, msg: &Message, except: Option<LinkId>) {
        let state = channel.lock();
        let masked;
        let msg = if state.modes.anonymous && msg.prefix.as_ref().is_some_and(is_user_prefix) {
            masked = Message {
                prefix: Some(anonymous_prefix()),
                ..msg.clone()
            };
            &masked
        } else {
            msg
        };
        let text = msg.to_string();
        let origin = msg.prefix.as_ref().map(|p| p.name().to_string()).unwrap_or_default();
        for (id, member) in &state.members {
            if Some(*id) == except {
                continue;
            }
            let report = CommandReport::new(text.clone(), member.user.nickname(), origin.as_str());
            if !member.user.link().send(report) {
                trace!(channel = %channel.name(), link = id, "Member queue closed");
            }
        }
    }

    /// Deliver once to every user sharing a channel with `user`, and to
    /// `user` itself when `include_self` is set.
    pub fn broadcast_shared(&self, user: &User, msg: &Message, include_self: bool) {
        let mut seen = HashSet::new();
        let own = user.link().id();
        if include_self {
            self.send_user(user, msg);
        }
        seen.insert(own);

        let joined: Vec<String> = user.info().channels.iter().cloned().collect();
        for name in joined {
            let Some(channel) = self.server.directory().find_channel(&name) else {
                continue;
            };
            let recipients: Vec<_> = {
                let state = channel.lock();
                state
                    .members
                    .iter()
                    .filter(|(id, _)| seen.insert(**id))
                    .map(|(_, m)| m.user.clone())
                    .collect()
            };
            for member in recipients {
                self.send_user(&member, msg);
            }
        }
    }

    /// Deliver to every registered local user.
    pub fn broadcast_users(&self, msg: &Message, filter: impl Fn(&User) -> bool) {
        for user in self.server.directory().users() {
            if filter(&user) {
                self.send_user(&user, msg);
            }
        }
    }

    /// Resolve a server mask for a query addressed to other servers.
    ///
    /// Every matching remote server with a connection of its own gets a copy
    /// of `forward`. No match at all answers the requester with
    /// ERR_NOSUCHSERVER. Returns whether this server matched and should
    /// answer locally.
    pub fn forward_with_mask(&self, requester: &Talker, server_mask: &str, forward: &Message) -> bool {
        let mut local = false;
        let mut matched = false;
        for server in self.server.directory().servers() {
            if !mask::matches(server_mask, server.name()) {
                continue;
            }
            matched = true;
            if std::ptr::eq(server.as_ref(), self.server.local().as_ref()) {
                local = true;
            } else if let Some(link) = server.link() {
                Self::deliver(link, forward, server.name().to_string());
            }
        }
        if !matched {
            self.reply(
                requester,
                Response::err_nosuchserver(&requester.nickname(), server_mask),
            );
        }
        local
    }
}

fn is_user_prefix(prefix: &Prefix) -> bool {
    matches!(prefix, Prefix::User { .. })
}

fn anonymous_prefix() -> Prefix {
    Prefix::user("anonymous", "anonymous", "anonymous.")
}
