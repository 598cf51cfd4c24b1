//! PRIVMSG and NOTICE.
//!
//! Both commands share one delivery path; NOTICE differs only in never
//! answering with an error or an away message.

use std::collections::HashSet;

use parlance_proto::{Grammar, Message, MessageRef, Response, irc_to_lower, mask};
use tracing::debug;

use crate::error::{ChannelError, ProtocolError};
use crate::handlers::core::{Admission, Context, Handler};
use crate::handlers::helpers::{is_channel_name, numeric, split_list};
use crate::state::{LinkId, Talker};

/// Parsed PRIVMSG/NOTICE parameters.
#[derive(Default)]
struct Delivery {
    targets: Vec<String>,
    text: String,
}

impl Delivery {
    fn validate(&mut self, ctx: &Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        let nick = ctx.nick();
        let Some(targets) = msg.param(0).filter(|t| !t.is_empty()) else {
            return Err(ProtocolError::reply(Response::err_norecipient(&nick, ctx.command)));
        };
        let Some(text) = msg.param(1).filter(|t| !t.is_empty()) else {
            return Err(ProtocolError::reply(Response::err_notexttosend(&nick)));
        };
        self.targets = split_list(targets).map(str::to_string).collect();
        self.text = text.to_string();
        Ok(())
    }

    fn execute(self, ctx: &Context<'_>, verb: &'static str, silent: bool) {
        let nick = ctx.nick();
        let origin = ctx.sender.prefix();
        let link_id = ctx.sender.link_id();
        let mut seen = HashSet::new();

        for target in &self.targets {
            if !seen.insert(irc_to_lower(target)) {
                if !silent {
                    ctx.reply(Response::err_toomanytargets(&nick, target));
                }
                continue;
            }
            let msg = Message::new(verb, vec![target.clone(), self.text.clone()])
                .with_trailing()
                .with_prefix(origin.clone());
            let outcome = if let Some(mask) = target.strip_prefix('$') {
                to_server_mask(ctx, mask, &msg)
            } else if is_channel_name(target) {
                to_channel(ctx, target, &msg, link_id)
            } else {
                to_nick(ctx, target, &msg, silent)
            };
            if let Err(reply) = outcome {
                debug!(target = %target, "Message not delivered");
                if !silent {
                    ctx.reply(reply);
                }
            }
        }
    }
}

/// `$<servermask>`: every local user, operators only.
fn to_server_mask(ctx: &Context<'_>, server_mask: &str, msg: &Message) -> Result<(), Message> {
    let nick = ctx.nick();
    if !ctx.sender.is_operator() {
        return Err(Response::err_noprivileges(&nick));
    }
    let Some((_, top)) = server_mask.rsplit_once('.') else {
        return Err(Response::err_notoplevel(&nick, server_mask));
    };
    if mask::has_wildcards(top) {
        return Err(Response::err_wildtoplevel(&nick, server_mask));
    }
    if mask::matches(server_mask, ctx.server.name()) {
        ctx.router().broadcast_users(msg, |_| true);
    }
    Ok(())
}

fn to_channel(ctx: &Context<'_>, name: &str, msg: &Message, from: Option<LinkId>) -> Result<(), Message> {
    let nick = ctx.nick();
    let Some(channel) = ctx.server.directory().find_channel(name) else {
        return Err(Response::err_nosuchnick(&nick, name));
    };
    let allowed = match &*ctx.sender {
        Talker::User(user) => channel.lock().can_send(user),
        _ => Err(ChannelError::CannotSendToChan),
    };
    if let Err(err) = allowed {
        return Err(err.to_irc_reply(&nick, channel.name()));
    }
    let mut msg = msg.clone();
    msg.params[0] = channel.name().to_string();
    ctx.router().broadcast(&channel, &msg, from);
    Ok(())
}

/// `nick` or `nick@server`.
fn to_nick(ctx: &Context<'_>, target: &str, msg: &Message, silent: bool) -> Result<(), Message> {
    let nick = ctx.nick();
    let (name, server) = match target.split_once('@') {
        Some((name, server)) => (name, Some(server)),
        None => (target, None),
    };
    if !Grammar::Nickname.is_match(name) {
        return Err(Response::err_nosuchnick(&nick, target));
    }
    let directory = ctx.server.directory();

    if let Some(user) = directory.find_user(name) {
        if server.is_some_and(|s| !mask::matches(s, user.server())) {
            return Err(Response::err_nosuchnick(&nick, target));
        }
        ctx.router().send_user(&user, msg);
        let away = user.info().away.clone();
        if let Some(away) = away
            && !silent
        {
            ctx.reply(numeric(ctx, Response::RPL_AWAY, vec![user.nickname(), away]));
        }
        return Ok(());
    }
    if let Some(service) = directory.find_service(name) {
        ctx.router().send(&Talker::Service(service), msg);
        return Ok(());
    }
    Err(Response::err_nosuchnick(&nick, target))
}

/// Handler for PRIVMSG command.
///
/// # RFC 2812 §3.3.1
#[derive(Default)]
pub struct PrivmsgHandler(Delivery);

impl Handler for PrivmsgHandler {
    fn admission(&self) -> Admission {
        Admission::clients(0)
    }

    fn validate(&mut self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        self.0.validate(ctx, msg)
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        self.0.execute(ctx, "PRIVMSG", false);
    }
}

/// Handler for NOTICE command.
///
/// # RFC 2812 §3.3.2
#[derive(Default)]
pub struct NoticeHandler(Delivery);

impl Handler for NoticeHandler {
    fn admission(&self) -> Admission {
        Admission::clients(0)
    }

    fn validate(&mut self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        self.0.validate(ctx, msg)
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        self.0.execute(ctx, "NOTICE", true);
    }

    fn is_silent(&self) -> bool {
        true
    }
}
