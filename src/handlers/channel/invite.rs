//! INVITE command handler.

use parlance_proto::{Message, MessageRef, Response};
use tracing::debug;

use super::report;
use crate::error::{ChannelError, ProtocolError};
use crate::handlers::core::{Admission, Context, Handler};
use crate::handlers::helpers::numeric;

/// Handler for INVITE command.
///
/// # RFC 2812 §3.2.7
///
/// An invitation to an existing channel grants one pass through `+i`.
#[derive(Default)]
pub struct InviteHandler {
    nick: String,
    channel: String,
}

impl Handler for InviteHandler {
    fn admission(&self) -> Admission {
        Admission::users(2)
    }

    fn validate(&mut self, _ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        self.nick = msg.params[0].to_string();
        self.channel = msg.params[1].to_string();
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        let Some(user) = ctx.user() else {
            return;
        };
        let Some(target) = ctx.server.directory().find_user(&self.nick) else {
            ctx.reply(Response::err_nosuchnick(&ctx.nick(), &self.nick));
            return;
        };

        let mut channel_name = self.channel.clone();
        if let Some(channel) = ctx.server.directory().find_channel(&self.channel) {
            channel_name = channel.name().to_string();
            let mut state = channel.lock();
            let refusal = if !state.is_member(user.link().id()) {
                Some(ChannelError::NotOnChannel)
            } else if state.is_member(target.link().id()) {
                Some(ChannelError::UserOnChannel(target.nickname()))
            } else if state.modes.invite_only && !state.is_operator(user.link().id()) {
                Some(ChannelError::ChanOpPrivsNeeded)
            } else {
                None
            };
            if let Some(err) = refusal {
                drop(state);
                report(ctx, &err, &channel_name);
                return;
            }
            state.invited.insert(target.link().id());
        }

        let target_nick = target.nickname();
        debug!(from = %user.nickname(), to = %target_nick, channel = %channel_name, "Invite");
        ctx.reply(
            numeric(
                ctx,
                Response::RPL_INVITING,
                vec![channel_name.clone(), target_nick.clone()],
            )
            .without_trailing(),
        );
        let invite = Message::invite(&target_nick, &channel_name).with_prefix(user.prefix());
        ctx.router().send_user(&target, &invite);

        if let Some(away) = target.info().away.clone() {
            ctx.reply(numeric(ctx, Response::RPL_AWAY, vec![target_nick, away]));
        }
    }
}
