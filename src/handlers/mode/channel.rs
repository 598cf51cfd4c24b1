//! Channel modes.

use std::sync::Arc;

use parlance_proto::mode::render_changes;
use parlance_proto::{ChannelMode, Message, ModeError, ModeOp, Response, mode::parse_channel_modes};
use tracing::debug;

use crate::error::ChannelError;
use crate::handlers::core::Context;
use crate::handlers::helpers::numeric;
use crate::state::{Channel, User};

pub(super) fn change(
    ctx: &Context<'_>,
    user: &Arc<User>,
    name: &str,
    modestring: Option<&str>,
    args: &[&str],
) {
    let nick = ctx.nick();
    let Some(channel) = ctx.server.directory().find_channel(name) else {
        ctx.reply(Response::err_nosuchchannel(&nick, name));
        return;
    };
    let Some(modestring) = modestring else {
        send_channel_modes(ctx, &channel, user);
        return;
    };

    let id = user.link().id();
    let restricted = user.is_restricted();
    let mut applied = Vec::new();
    let mut refused_privileges = false;

    for parsed in parse_channel_modes(modestring, args) {
        let change = match parsed {
            Ok(change) => change,
            Err(err) => {
                debug!(error = %err, "Mode flag rejected");
                reply_mode_error(ctx, &err, channel.name());
                continue;
            }
        };
        if change.op() == ModeOp::List {
            send_list(ctx, &channel, change.mode());
            continue;
        }

        let outcome = {
            let mut state = channel.lock();
            if !state.is_operator(id) {
                Err(ChannelError::ChanOpPrivsNeeded)
            } else if restricted && matches!(change.mode(), ChannelMode::Oper | ChannelMode::Voice) {
                Err(ChannelError::Restricted)
            } else {
                state.update_mode(&change)
            }
        };
        match outcome {
            Ok(done) => applied.push(done),
            Err(ChannelError::ChanOpPrivsNeeded) if refused_privileges => {}
            Err(err) => {
                refused_privileges |= err == ChannelError::ChanOpPrivsNeeded;
                ctx.reply(err.to_irc_reply(&nick, channel.name()));
            }
        }
    }

    if applied.is_empty() {
        return;
    }
    let (flags, params) = render_changes(&applied);
    let msg = Message::mode(channel.name(), &flags, &params).with_prefix(user.prefix());
    ctx.router().broadcast(&channel, &msg, None);
}

fn reply_mode_error(ctx: &Context<'_>, err: &ModeError, channel: &str) {
    ctx.reply(Response::err_unknownmode(&ctx.nick(), err.mode_char(), channel));
}

/// RPL_CHANNELMODEIS; the key is only shown to members.
fn send_channel_modes(ctx: &Context<'_>, channel: &Arc<Channel>, user: &User) {
    let (flags, params) = {
        let state = channel.lock();
        state.modes.as_mode_string(state.is_member(user.link().id()))
    };
    let mut all = vec![channel.name().to_string(), flags];
    all.extend(params);
    ctx.reply(numeric(ctx, Response::RPL_CHANNELMODEIS, all).without_trailing());
}

/// Entries of a list mode followed by its end marker.
fn send_list(ctx: &Context<'_>, channel: &Arc<Channel>, mode: ChannelMode) {
    let name = channel.name().to_string();
    let nick = ctx.nick();
    if mode == ChannelMode::Creator {
        let creator = {
            let state = channel.lock();
            state
                .members
                .values()
                .find(|m| m.modes.creator)
                .map(|m| m.user.nickname())
        };
        if let Some(creator) = creator {
            ctx.reply(numeric(ctx, Response::RPL_UNIQOPIS, vec![name, creator]).without_trailing());
        }
        return;
    }

    let entries = channel.lock().list_mode(mode).to_vec();
    let (item, end) = match mode {
        ChannelMode::Except => (Response::RPL_EXCEPTLIST, Response::rpl_endofexceptlist(&nick, &name)),
        ChannelMode::InviteExcept => (
            Response::RPL_INVITELIST,
            Response::rpl_endofinvitelist(&nick, &name),
        ),
        _ => (Response::RPL_BANLIST, Response::rpl_endofbanlist(&nick, &name)),
    };
    for entry in entries {
        ctx.reply(numeric(ctx, item, vec![name.clone(), entry]).without_trailing());
    }
    ctx.reply(end);
}
