//! LINKS and SERVLIST handlers.

use parlance_proto::{MessageRef, Response, mask};

use super::target_param;
use crate::error::ProtocolError;
use crate::handlers::core::{Admission, Context, Handler};
use crate::handlers::helpers::{answer_locally, numeric};

/// Handler for LINKS command.
///
/// # RFC 2812 §3.4.5
///
/// `LINKS [[<remote server>] <server mask>]`
#[derive(Default)]
pub struct LinksHandler {
    target: Option<String>,
    mask: Option<String>,
}

impl Handler for LinksHandler {
    fn admission(&self) -> Admission {
        Admission::clients(0)
    }

    fn validate(&mut self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        match msg.param_count() {
            0 => {}
            1 => self.mask = msg.param(0).map(str::to_string),
            _ => {
                self.target = target_param(ctx, msg, 0)?;
                self.mask = msg.param(1).map(str::to_string);
            }
        }
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        if !answer_locally(ctx, self.target.as_deref()) {
            return;
        }
        let pattern = self.mask.as_deref().unwrap_or("*");
        for server in ctx.server.directory().servers() {
            if !mask::matches(pattern, server.name()) {
                continue;
            }
            // Every known server hangs off this one.
            ctx.reply(numeric(
                ctx,
                Response::RPL_LINKS,
                vec![
                    pattern.to_string(),
                    server.name().to_string(),
                    format!("{} {}", server.hopcount(), server.info()),
                ],
            ));
        }
        ctx.reply(Response::rpl_endoflinks(&ctx.nick(), pattern));
    }
}

/// Handler for SERVLIST command.
///
/// # RFC 2812 §3.5.1
///
/// `SERVLIST [<mask> [<type>]]`
#[derive(Default)]
pub struct ServlistHandler {
    mask: Option<String>,
    kind: Option<String>,
}

impl Handler for ServlistHandler {
    fn admission(&self) -> Admission {
        Admission::clients(0)
    }

    fn validate(&mut self, _ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        self.mask = msg.param(0).map(str::to_string);
        self.kind = msg.param(1).map(str::to_string);
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        let pattern = self.mask.as_deref().unwrap_or("*");
        let kind = self.kind.as_deref().unwrap_or("*");
        for service in ctx.server.directory().services() {
            if !mask::matches(pattern, service.nickname()) || !mask::matches(kind, service.kind()) {
                continue;
            }
            ctx.reply(numeric(
                ctx,
                Response::RPL_SERVLIST,
                vec![
                    service.nickname().to_string(),
                    service.server().to_string(),
                    service.distribution().to_string(),
                    service.kind().to_string(),
                    "0".to_string(),
                    service.info().to_string(),
                ],
            ));
        }
        ctx.reply(Response::rpl_servlistend(&ctx.nick(), pattern, kind));
    }
}
