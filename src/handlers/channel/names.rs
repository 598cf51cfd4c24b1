//! NAMES command handler.

use std::collections::HashSet;
use std::sync::Arc;

use parlance_proto::{MessageRef, Response};

use crate::error::ProtocolError;
use crate::handlers::core::{Admission, Context, Handler};
use crate::handlers::helpers::{answer_locally, numeric, server_target, split_list};
use crate::state::Channel;

/// Nicknames per RPL_NAMREPLY line are capped to keep lines under 512 bytes.
const NAMES_LINE_BUDGET: usize = 400;

/// Handler for NAMES command.
///
/// # RFC 2812 §3.2.5
#[derive(Default)]
pub struct NamesHandler {
    channels: Vec<String>,
    target: Option<String>,
}

impl Handler for NamesHandler {
    fn admission(&self) -> Admission {
        Admission::users(0)
    }

    fn validate(&mut self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        self.channels = msg
            .param(0)
            .map(|p| split_list(p).map(str::to_string).collect())
            .unwrap_or_default();
        self.target = server_target(ctx, msg.param(1))?;
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        if !answer_locally(ctx, self.target.as_deref()) {
            return;
        }
        let Some(user) = ctx.user() else {
            return;
        };
        let id = user.link().id();
        let directory = ctx.server.directory();

        if self.channels.is_empty() {
            let mut listed = HashSet::new();
            for channel in directory.channels() {
                if channel.lock().is_visible_to(id) {
                    send_names_lines(ctx, &channel);
                    listed.extend(channel.lock().members.keys().copied());
                }
            }
            let loners: Vec<String> = directory
                .users()
                .into_iter()
                .filter(|u| !listed.contains(&u.link().id()) && !u.modes().invisible)
                .map(|u| u.nickname())
                .collect();
            for chunk in chunk_names(&loners) {
                ctx.reply(numeric(
                    ctx,
                    Response::RPL_NAMREPLY,
                    vec!["*".into(), "*".into(), chunk],
                ));
            }
            ctx.reply(Response::rpl_endofnames(&ctx.nick(), "*"));
            return;
        }

        for name in &self.channels {
            match directory.find_channel(name) {
                Some(channel) if channel.lock().is_visible_to(id) => send_names(ctx, &channel),
                _ => ctx.reply(Response::rpl_endofnames(&ctx.nick(), name)),
            }
        }
    }
}

/// RPL_NAMREPLY lines followed by RPL_ENDOFNAMES.
pub fn send_names(ctx: &Context<'_>, channel: &Arc<Channel>) {
    send_names_lines(ctx, channel);
    ctx.reply(Response::rpl_endofnames(&ctx.nick(), channel.name()));
}

fn send_names_lines(ctx: &Context<'_>, channel: &Arc<Channel>) {
    let viewer = ctx.sender.link_id().unwrap_or_default();
    let symbol = channel.symbol().to_string();
    let names = {
        let state = channel.lock();
        state.names(state.is_member(viewer))
    };
    for chunk in chunk_names(&names) {
        ctx.reply(numeric(
            ctx,
            Response::RPL_NAMREPLY,
            vec![symbol.clone(), channel.name().to_string(), chunk],
        ));
    }
}

fn chunk_names(names: &[String]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for name in names {
        if !line.is_empty() && line.len() + name.len() + 1 > NAMES_LINE_BUDGET {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(name);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_name_lists_are_split() {
        let names: Vec<String> = (0..100).map(|i| format!("user{i:05}")).collect();
        let lines = chunk_names(&names);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.len() <= NAMES_LINE_BUDGET));
        assert_eq!(lines.join(" ").split(' ').count(), 100);
    }

    #[test]
    fn empty_list_has_no_lines() {
        assert!(chunk_names(&[]).is_empty());
    }
}
