//! WHO command handler.

use std::sync::Arc;

use parlance_proto::{Message, MessageRef, Response, mask};

use crate::error::ProtocolError;
use crate::handlers::core::{Admission, Context, Handler};
use crate::handlers::helpers::{is_channel_name, is_visible, numeric};
use crate::state::{MemberModes, User};

/// Handler for WHO command.
///
/// # RFC 2812 §3.6.1
///
/// `WHO [<mask> ["o"]]`. A channel mask lists its members; anything else is
/// matched against nickname, username, host, server and real name.
#[derive(Default)]
pub struct WhoHandler {
    mask: Option<String>,
    operators_only: bool,
}

impl Handler for WhoHandler {
    fn admission(&self) -> Admission {
        Admission::users(0)
    }

    fn validate(&mut self, _ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        // "0" and "*" both mean everyone.
        self.mask = msg
            .param(0)
            .filter(|m| !m.is_empty() && *m != "0" && *m != "*")
            .map(str::to_string);
        self.operators_only = msg.param(1) == Some("o");
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        let Some(viewer) = ctx.user() else {
            return;
        };

        match self.mask.as_deref() {
            Some(name) if is_channel_name(name) => {
                if let Some(channel) = ctx.server.directory().find_channel(name) {
                    let members: Vec<(Arc<User>, MemberModes)> = {
                        let state = channel.lock();
                        let id = viewer.link().id();
                        if !state.is_visible_to(id) {
                            Vec::new()
                        } else {
                            let member = state.is_member(id);
                            state
                                .members
                                .values()
                                .filter(|m| member || !m.user.modes().invisible)
                                .map(|m| (Arc::clone(&m.user), m.modes))
                                .collect()
                        }
                    };
                    for (user, modes) in members {
                        if self.operators_only && !user.is_operator() {
                            continue;
                        }
                        ctx.reply(who_reply(ctx, &user, channel.name(), modes.prefix_char()));
                    }
                }
            }
            pattern => {
                for user in ctx.server.directory().users() {
                    if self.operators_only && !user.is_operator() {
                        continue;
                    }
                    if !is_visible(&viewer, &user) {
                        continue;
                    }
                    if pattern.is_some_and(|p| !matches_user(p, &user)) {
                        continue;
                    }
                    ctx.reply(who_reply(ctx, &user, "*", None));
                }
            }
        }

        let end = self.mask.as_deref().unwrap_or("*");
        ctx.reply(Response::rpl_endofwho(&ctx.nick(), end));
    }
}

fn matches_user(pattern: &str, user: &User) -> bool {
    let info = user.info();
    let nick = info.nickname.as_deref().unwrap_or_default();
    let username = info.username.as_deref().unwrap_or_default();
    [nick, username, user.hostname(), user.server(), info.realname.as_str()]
        .into_iter()
        .any(|field| mask::matches(pattern, field))
}

/// `352 <channel> <user> <host> <server> <nick> <H|G>[*][@|+] :<hopcount> <real name>`
fn who_reply(ctx: &Context<'_>, user: &User, channel: &str, status: Option<char>) -> Message {
    let info = user.info();
    let mut flags = String::from(if info.away.is_some() { "G" } else { "H" });
    if info.modes.is_operator() {
        flags.push('*');
    }
    flags.extend(status);
    numeric(
        ctx,
        Response::RPL_WHOREPLY,
        vec![
            channel.to_string(),
            info.username.clone().unwrap_or_default(),
            user.hostname().to_string(),
            user.server().to_string(),
            info.nickname.clone().unwrap_or_default(),
            flags,
            format!("0 {}", info.realname),
        ],
    )
}
