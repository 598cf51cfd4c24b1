//! WHOIS command handler.

use std::sync::Arc;

use parlance_proto::{MessageRef, Response, mask};

use crate::error::ProtocolError;
use crate::handlers::core::{Admission, Context, Handler};
use crate::handlers::helpers::{answer_locally, is_visible, numeric, split_list};
use crate::state::User;

/// Handler for WHOIS command.
///
/// # RFC 2812 §3.6.2
///
/// `WHOIS [<target>] <mask>[,<mask>]`
#[derive(Default)]
pub struct WhoisHandler {
    target: Option<String>,
    masks: String,
}

impl Handler for WhoisHandler {
    fn admission(&self) -> Admission {
        Admission::users(0)
    }

    fn validate(&mut self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        let masks = match (msg.param(0), msg.param(1)) {
            (Some(target), Some(masks)) => {
                self.target = Some(target.to_string());
                masks
            }
            (Some(masks), None) => masks,
            _ => {
                return Err(ProtocolError::reply(Response::err_nonicknamegiven(&ctx.nick())));
            }
        };
        self.masks = masks.to_string();
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        if !answer_locally(ctx, self.target.as_deref()) {
            return;
        }
        let Some(viewer) = ctx.user() else {
            return;
        };
        let directory = ctx.server.directory();

        for pattern in split_list(&self.masks) {
            let found: Vec<Arc<User>> = if mask::has_wildcards(pattern) {
                directory
                    .users()
                    .into_iter()
                    .filter(|u| mask::matches(pattern, &u.nickname()) && is_visible(&viewer, u))
                    .collect()
            } else {
                directory.find_user(pattern).into_iter().collect()
            };
            if found.is_empty() {
                ctx.reply(Response::err_nosuchnick(&ctx.nick(), pattern));
                continue;
            }
            for user in found {
                send_whois(ctx, &viewer, &user);
            }
        }
        ctx.reply(Response::rpl_endofwhois(&ctx.nick(), &self.masks));
    }
}

fn send_whois(ctx: &Context<'_>, viewer: &User, user: &User) {
    let info = user.info().clone();
    let nick = info.nickname.clone().unwrap_or_default();

    ctx.reply(numeric(
        ctx,
        Response::RPL_WHOISUSER,
        vec![
            nick.clone(),
            info.username.clone().unwrap_or_default(),
            user.hostname().to_string(),
            "*".to_string(),
            info.realname.clone(),
        ],
    ));

    let server_info = ctx
        .server
        .directory()
        .find_server(user.server())
        .map(|s| s.info().to_string())
        .unwrap_or_default();
    ctx.reply(numeric(
        ctx,
        Response::RPL_WHOISSERVER,
        vec![nick.clone(), user.server().to_string(), server_info],
    ));

    if info.modes.is_operator() {
        ctx.reply(Response::rpl_whoisoperator(&ctx.nick(), &nick));
    }
    if let Some(away) = &info.away {
        ctx.reply(numeric(ctx, Response::RPL_AWAY, vec![nick.clone(), away.clone()]));
    }

    let viewer_id = viewer.link().id();
    let mut channels = Vec::new();
    for name in &info.channels {
        let Some(channel) = ctx.server.directory().find_channel(name) else {
            continue;
        };
        let state = channel.lock();
        if !state.is_visible_to(viewer_id) {
            continue;
        }
        let status = state.member_modes(user.link().id()).and_then(|m| m.prefix_char());
        channels.push(match status {
            Some(c) => format!("{c}{}", channel.name()),
            None => channel.name().to_string(),
        });
    }
    if !channels.is_empty() {
        ctx.reply(numeric(
            ctx,
            Response::RPL_WHOISCHANNELS,
            vec![nick.clone(), channels.join(" ")],
        ));
    }

    let idle = user.link().last_seen().elapsed().as_secs();
    ctx.reply(numeric(
        ctx,
        Response::RPL_WHOISIDLE,
        vec![
            nick,
            idle.to_string(),
            info.signon.timestamp().to_string(),
            "seconds idle, signon time".to_string(),
        ],
    ));
}
