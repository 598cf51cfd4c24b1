//! PING and PONG handlers.

use parlance_proto::{Message, MessageRef, Response, irc_eq};

use crate::error::ProtocolError;
use crate::handlers::core::{Admission, Context, Handler};

/// Handler for PING command.
///
/// # RFC 2812 §3.7.2
#[derive(Default)]
pub struct PingHandler {
    token: String,
}

impl Handler for PingHandler {
    fn admission(&self) -> Admission {
        Admission::anyone(0).at_any_time()
    }

    fn validate(&mut self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        let nick = ctx.nick();
        let token = msg
            .param(0)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ProtocolError::reply(Response::err_noorigin(&nick)))?;
        if let Some(target) = msg.param(1)
            && !irc_eq(target, ctx.server.name())
        {
            return Err(ProtocolError::reply(Response::err_nosuchserver(&nick, target)));
        }
        self.token = token.to_string();
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        let pong = Message::pong(ctx.server.name(), &self.token).with_prefix(ctx.server_prefix());
        ctx.send(&pong);
    }
}

/// Handler for PONG command.
///
/// Any inbound line refreshes the link's idle clock, so a valid PONG has
/// nothing left to do.
#[derive(Default)]
pub struct PongHandler;

impl Handler for PongHandler {
    fn admission(&self) -> Admission {
        Admission::anyone(0).at_any_time()
    }

    fn validate(&mut self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        match msg.param(0) {
            Some(origin) if !origin.is_empty() => Ok(()),
            _ => Err(ProtocolError::reply(Response::err_noorigin(&ctx.nick()))),
        }
    }

    fn execute(self: Box<Self>, _ctx: &mut Context<'_>) {}
}
