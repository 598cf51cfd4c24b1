//! SQUERY command handler.

use parlance_proto::{Message, MessageRef, Response};
use tracing::debug;

use crate::error::ProtocolError;
use crate::handlers::core::{Admission, Context, Handler};
use crate::state::Talker;

/// Handler for SQUERY command.
///
/// # RFC 2812 §3.3.3
///
/// Like PRIVMSG, but the target must be a registered service.
#[derive(Default)]
pub struct SqueryHandler {
    service: String,
    text: String,
}

impl Handler for SqueryHandler {
    fn admission(&self) -> Admission {
        Admission::users(0)
    }

    fn validate(&mut self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        let nick = ctx.nick();
        let Some(service) = msg.param(0).filter(|s| !s.is_empty()) else {
            return Err(ProtocolError::reply(Response::err_norecipient(&nick, "SQUERY")));
        };
        let Some(text) = msg.param(1).filter(|t| !t.is_empty()) else {
            return Err(ProtocolError::reply(Response::err_notexttosend(&nick)));
        };
        self.service = service.to_string();
        self.text = text.to_string();
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        let Some(service) = ctx.server.directory().find_service(&self.service) else {
            ctx.reply(Response::err_nosuchservice(&ctx.nick(), &self.service));
            return;
        };
        debug!(service = %service.nickname(), "Service query");
        let query = Message::new("SQUERY", vec![service.nickname().to_string(), self.text])
            .with_trailing()
            .with_prefix(ctx.sender.prefix());
        ctx.router().send(&Talker::Service(service), &query);
    }
}
