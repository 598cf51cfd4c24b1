//! STATS command handler.

use std::sync::atomic::Ordering;

use parlance_proto::{MessageRef, Response};

use super::target_param;
use crate::error::ProtocolError;
use crate::handlers::core::{Admission, Context, Handler};
use crate::handlers::helpers::{answer_locally, numeric};

/// Handler for STATS command.
///
/// # RFC 2812 §3.4.4
///
/// `STATS [<query> [<target>]]`. Supported letters are `l`, `m`, `o` and
/// `u`; every query ends with RPL_ENDOFSTATS.
#[derive(Default)]
pub struct StatsHandler {
    query: Option<char>,
    target: Option<String>,
}

impl Handler for StatsHandler {
    fn admission(&self) -> Admission {
        Admission::clients(0)
    }

    fn validate(&mut self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        self.query = msg.param(0).and_then(|q| q.chars().next());
        self.target = target_param(ctx, msg, 1)?;
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        if !answer_locally(ctx, self.target.as_deref()) {
            return;
        }
        match self.query {
            Some('l') => link_info(ctx),
            Some('m') => command_usage(ctx),
            Some('o') => oper_lines(ctx),
            Some('u') => uptime(ctx),
            _ => {}
        }
        let letter = self.query.map_or_else(|| "*".to_string(), |q| q.to_string());
        ctx.reply(Response::rpl_endofstats(&ctx.nick(), &letter));
    }
}

/// `211 <link> <sendq> <sent msgs> <sent KB> <recv msgs> <recv KB> <open secs>`
fn link_info(ctx: &Context<'_>) {
    let mut links = ctx.server.links();
    links.sort_by_key(|link| link.id());
    for link in links {
        let stats = &link.stats;
        let name = match link.peer() {
            Some(peer) => format!("{}[{}]", link.id(), peer),
            None => link.id().to_string(),
        };
        ctx.reply(
            numeric(
                ctx,
                Response::RPL_STATSLINKINFO,
                vec![
                    name,
                    link.queued().to_string(),
                    stats.sent_messages.load(Ordering::Relaxed).to_string(),
                    (stats.sent_bytes.load(Ordering::Relaxed) / 1024).to_string(),
                    stats.received_messages.load(Ordering::Relaxed).to_string(),
                    (stats.received_bytes.load(Ordering::Relaxed) / 1024).to_string(),
                    link.opened().elapsed().as_secs().to_string(),
                ],
            )
            .without_trailing(),
        );
    }
}

/// `212 <command> <count> <bytes> <remote count>`
fn command_usage(ctx: &Context<'_>) {
    for (command, count, bytes, remote) in ctx.dispatcher.command_stats() {
        ctx.reply(
            numeric(
                ctx,
                Response::RPL_STATSCOMMANDS,
                vec![
                    command.to_string(),
                    count.to_string(),
                    bytes.to_string(),
                    remote.to_string(),
                ],
            )
            .without_trailing(),
        );
    }
}

/// `243 O <hostmask> * <name>`
fn oper_lines(ctx: &Context<'_>) {
    let blocks = ctx.server.config().oper.clone();
    for block in blocks {
        ctx.reply(
            numeric(
                ctx,
                Response::RPL_STATSOLINE,
                vec![
                    "O".to_string(),
                    block.hostmask.unwrap_or_else(|| "*@*".to_string()),
                    "*".to_string(),
                    block.name,
                ],
            )
            .without_trailing(),
        );
    }
}

/// `242 :Server Up <days> days <h>:<mm>:<ss>`
fn uptime(ctx: &Context<'_>) {
    let secs = ctx.server.uptime().as_secs();
    let text = format!(
        "Server Up {} days {}:{:02}:{:02}",
        secs / 86_400,
        (secs % 86_400) / 3_600,
        (secs % 3_600) / 60,
        secs % 60
    );
    ctx.reply(numeric(ctx, Response::RPL_STATSUPTIME, vec![text]));
}
