//! KICK command handler.

use parlance_proto::{Message, MessageRef};
use tracing::{debug, info};

use super::{existing_channel, report};
use crate::error::{ChannelError, ProtocolError};
use crate::handlers::core::{Admission, Context, Handler};
use crate::handlers::helpers::split_list;

/// Handler for KICK command.
///
/// # RFC 2812 §3.2.8
///
/// Either one channel and any number of users, or as many channels as
/// users, paired in order. The default comment is the kicker's nickname.
#[derive(Default)]
pub struct KickHandler {
    pairs: Vec<(String, String)>,
    comment: Option<String>,
}

impl Handler for KickHandler {
    fn admission(&self) -> Admission {
        Admission::users(2)
    }

    fn validate(&mut self, _ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        let channels: Vec<&str> = split_list(msg.params[0]).collect();
        let users: Vec<&str> = split_list(msg.params[1]).collect();
        self.pairs = match (channels.as_slice(), users.len()) {
            ([channel], _) => users.iter().map(|u| (channel.to_string(), u.to_string())).collect(),
            (_, n) if n == channels.len() => channels
                .iter()
                .zip(&users)
                .map(|(c, u)| (c.to_string(), u.to_string()))
                .collect(),
            _ => return Err(ProtocolError::NeedMoreParams),
        };
        if self.pairs.is_empty() {
            return Err(ProtocolError::NeedMoreParams);
        }
        self.comment = msg.param(2).map(str::to_string);
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        let Some(user) = ctx.user() else {
            return;
        };
        let id = user.link().id();
        let comment = self.comment.unwrap_or_else(|| user.nickname());

        for (name, nick) in &self.pairs {
            let Some(channel) = existing_channel(ctx, name) else {
                continue;
            };
            let victim = {
                let state = channel.lock();
                if !state.is_member(id) {
                    Err(ChannelError::NotOnChannel)
                } else if !state.is_operator(id) {
                    Err(ChannelError::ChanOpPrivsNeeded)
                } else {
                    state
                        .member_by_nick(nick)
                        .map(|(_, m)| m.user.clone())
                        .ok_or_else(|| ChannelError::UserNotInChannel(nick.clone()))
                }
            };
            let victim = match victim {
                Ok(victim) => victim,
                Err(err) => {
                    report(ctx, &err, channel.name());
                    continue;
                }
            };

            let victim_nick = victim.nickname();
            let msg = Message::kick(channel.name(), &victim_nick, &comment).with_prefix(user.prefix());
            ctx.router().broadcast(&channel, &msg, None);
            if let Err(err) = ctx.server.directory().leave(&victim, &channel) {
                debug!(error = %err, victim = %victim_nick, "Kicked user already gone");
            }
            info!(
                kicker = %user.nickname(),
                victim = %victim_nick,
                channel = %channel.name(),
                "User kicked"
            );
        }
    }
}
