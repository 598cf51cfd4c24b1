//! MOTD command handler.

use parlance_proto::{MessageRef, Response};

use super::target_param;
use crate::error::ProtocolError;
use crate::handlers::core::{Admission, Context, Handler};
use crate::handlers::helpers::{answer_locally, numeric};

/// Send the message of the day, or ERR_NOMOTD when there is none.
pub fn send_motd(ctx: &Context<'_>) {
    let nick = ctx.nick();
    let Some(lines) = ctx.server.motd() else {
        ctx.reply(Response::err_nomotd(&nick));
        return;
    };
    ctx.reply(numeric(
        ctx,
        Response::RPL_MOTDSTART,
        vec![format!("- {} Message of the day - ", ctx.server.name())],
    ));
    for line in lines {
        ctx.reply(numeric(ctx, Response::RPL_MOTD, vec![format!("- {line}")]));
    }
    ctx.reply(Response::rpl_endofmotd(&nick));
}

/// Handler for MOTD command.
///
/// # RFC 2812 §3.4.1
#[derive(Default)]
pub struct MotdHandler {
    target: Option<String>,
}

impl Handler for MotdHandler {
    fn admission(&self) -> Admission {
        Admission::clients(0)
    }

    fn validate(&mut self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        self.target = target_param(ctx, msg, 0)?;
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        if answer_locally(ctx, self.target.as_deref()) {
            send_motd(ctx);
        }
    }
}
