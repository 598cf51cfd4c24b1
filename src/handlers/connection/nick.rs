//! NICK command handler.

use parlance_proto::{Grammar, Message, MessageRef, Response};
use tracing::{debug, info};

use super::welcome::complete_registration;
use crate::error::ProtocolError;
use crate::handlers::core::{Admission, Context, Handler};

/// Handler for NICK command.
///
/// # RFC 2812 §3.1.2
///
/// Before registration the nickname is reserved in the directory straight
/// away (hidden from lookups); the welcome burst follows once USER has
/// been seen too. After registration it is a rename.
#[derive(Default)]
pub struct NickHandler {
    nick: String,
}

impl Handler for NickHandler {
    fn admission(&self) -> Admission {
        Admission::handshake(0).at_any_time()
    }

    fn validate(&mut self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        let current = ctx.nick();
        let nick = msg
            .param(0)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ProtocolError::reply(Response::err_nonicknamegiven(&current)))?;

        let max = ctx.server.config().limits.nick_length;
        if nick.len() > max || !Grammar::Nickname.is_match(nick) {
            return Err(ProtocolError::reply(Response::err_erroneusnickname(&current, nick)));
        }
        if ctx.sender.is_registered() && ctx.user().is_some_and(|u| u.is_restricted()) {
            return Err(ProtocolError::reply(Response::err_restricted(&current)));
        }
        self.nick = nick.to_string();
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        let Some(user) = ctx.user() else {
            return;
        };
        let old_prefix = user.prefix();
        let old_nick = user.nickname();
        if old_nick == self.nick {
            return;
        }
        if let Err(err) = ctx.server.directory().claim_nick(&user, &self.nick) {
            debug!(error = %err, "Nickname rejected");
            ctx.reply(err.to_irc_reply(&old_nick));
            return;
        }

        if ctx.sender.is_registered() {
            info!(old = %old_nick, new = %self.nick, "Nick change");
            let msg = Message::nick(&self.nick).with_prefix(old_prefix);
            ctx.router().broadcast_shared(&user, &msg, true);
        } else if user.has_identity() {
            complete_registration(ctx, &user);
        }
    }
}
