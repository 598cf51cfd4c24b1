//! User modes.

use std::sync::Arc;

use parlance_proto::mode::{parse_user_modes, render_changes};
use parlance_proto::{Message, Response, irc_eq};

use crate::handlers::core::Context;
use crate::handlers::helpers::numeric;
use crate::state::User;

pub(super) fn change(ctx: &Context<'_>, user: &Arc<User>, target: &str, modestring: Option<&str>) {
    let nick = ctx.nick();
    if ctx.server.directory().find_user(target).is_none() {
        ctx.reply(Response::err_nosuchnick(&nick, target));
        return;
    }
    if !irc_eq(target, &nick) {
        ctx.reply(Response::err_usersdontmatch(&nick));
        return;
    }
    let Some(modestring) = modestring else {
        let modes = user.modes().as_mode_string();
        ctx.reply(numeric(ctx, Response::RPL_UMODEIS, vec![modes]).without_trailing());
        return;
    };

    let mut applied = Vec::new();
    let mut unknown = false;
    {
        let mut info = user.info_mut();
        for parsed in parse_user_modes(modestring) {
            match parsed {
                Ok(change) => {
                    if info.modes.apply(change.mode(), change.op()) {
                        applied.push(change);
                    }
                }
                Err(_) => unknown = true,
            }
        }
    }
    if unknown {
        ctx.reply(Response::err_umodeunknownflag(&nick));
    }
    if applied.is_empty() {
        return;
    }
    let (flags, _) = render_changes(&applied);
    let msg = Message::mode(&nick, &flags, &[]).with_prefix(user.prefix()).with_trailing();
    ctx.send(&msg);
}
