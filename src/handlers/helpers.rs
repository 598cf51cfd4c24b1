//! Helper functions for IRC command handlers.

use parlance_proto::{Grammar, Message, Response};

use super::core::Context;
use crate::error::ProtocolError;
use crate::state::User;

/// Comma separated list elements, empty ones skipped.
pub fn split_list(param: &str) -> impl Iterator<Item = &str> {
    param.split(',').filter(|s| !s.is_empty())
}

/// Whether `name` is a channel name rather than a nickname.
pub fn is_channel_name(name: &str) -> bool {
    name.starts_with(['#', '&', '+', '!'])
}

/// Build a numeric for the sender: `<nick> <params...>`.
pub fn numeric(ctx: &Context<'_>, response: Response, params: Vec<String>) -> Message {
    let mut all = Vec::with_capacity(params.len() + 1);
    all.push(ctx.nick());
    all.extend(params);
    Message::numeric(response, all)
}

/// Reject with ERR_NOPRIVILEGES unless the sender is an operator.
pub fn require_oper(ctx: &Context<'_>) -> Result<(), ProtocolError> {
    if ctx.sender.is_operator() {
        Ok(())
    } else {
        Err(ProtocolError::reply(Response::err_noprivileges(&ctx.nick())))
    }
}

/// Check a parameter against its grammar, rejecting with `otherwise`.
pub fn check<'p>(grammar: Grammar, value: &'p str, otherwise: impl FnOnce() -> Message) -> Result<&'p str, ProtocolError> {
    grammar.check(value).map_err(|_| ProtocolError::reply(otherwise()))
}

/// Optional target server parameter of the query commands.
pub fn server_target(ctx: &Context<'_>, param: Option<&str>) -> Result<Option<String>, ProtocolError> {
    match param {
        None => Ok(None),
        Some(mask) if Grammar::ServerMask.is_match(mask) || Grammar::Nickname.is_match(mask) => {
            Ok(Some(mask.to_string()))
        }
        Some(mask) => Err(ProtocolError::reply(Response::err_nosuchserver(&ctx.nick(), mask))),
    }
}

/// Whether a query with an optional target server should be answered
/// here. A nickname target is resolved to the user's server; anything else
/// goes through the router's mask forwarding.
pub fn answer_locally(ctx: &Context<'_>, target: Option<&str>) -> bool {
    let Some(target) = target else {
        return true;
    };
    if let Some(user) = ctx.server.directory().find_user(target) {
        return user.server() == ctx.server.name();
    }
    let forward = Message::new(ctx.command, vec![target.to_string()])
        .with_prefix(ctx.sender.prefix());
    ctx.router().forward_with_mask(&*ctx.sender, target, &forward)
}

/// Whether two users have a channel in common.
pub fn shares_channel(a: &User, b: &User) -> bool {
    let mine = a.info().channels.clone();
    let theirs = b.info();
    mine.iter().any(|name| theirs.channels.contains(name))
}

/// Whether `viewer` may see `target` in WHO/WHOIS/NAMES style listings.
pub fn is_visible(viewer: &User, target: &User) -> bool {
    !target.modes().invisible
        || viewer.link().id() == target.link().id()
        || shares_channel(viewer, target)
}
