//! SERVICE command handler.

use std::sync::Arc;

use parlance_proto::{Grammar, MessageRef, Response};
use tracing::info;

use super::welcome::service_burst;
use crate::error::ProtocolError;
use crate::handlers::core::{Admission, Context, Handler};
use crate::state::{LinkState, Service, Talker};

/// Handler for SERVICE command.
///
/// # RFC 2812 §3.1.6
///
/// `SERVICE <nickname> <reserved> <distribution> <type> <reserved> <info>`
///
/// Registers the connection as a service in place of a user.
#[derive(Default)]
pub struct ServiceHandler {
    nickname: String,
    distribution: String,
    kind: String,
    info: String,
}

impl Handler for ServiceHandler {
    fn admission(&self) -> Admission {
        Admission::handshake(6)
    }

    fn validate(&mut self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        let nick = ctx.nick();
        let params = &msg.params;
        if !Grammar::Nickname.is_match(params[0]) {
            return Err(ProtocolError::reply(Response::err_erroneusnickname(&nick, params[0])));
        }
        if !Grammar::ServerMask.is_match(params[2]) && params[2] != "*" {
            return Err(ProtocolError::UnknownCommand);
        }
        self.nickname = params[0].to_string();
        self.distribution = params[2].to_string();
        self.kind = params[3].to_string();
        self.info = params[5].to_string();
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        let Some(user) = ctx.user() else {
            return;
        };
        let link = Arc::clone(user.link());
        let service = Arc::new(Service::new(
            link,
            self.nickname,
            ctx.server.name().to_string(),
            self.distribution,
            self.kind,
            self.info,
        ));

        let directory = ctx.server.directory();
        if let Err(err) = directory.promote_to_service(&user, Arc::clone(&service)) {
            ctx.reply(err.to_irc_reply(&ctx.nick()));
            return;
        }
        service.link().set_state(LinkState::Operational);
        *ctx.sender = Talker::Service(Arc::clone(&service));
        info!(service = %service.nickname(), kind = %service.kind(), "Service registered");

        for msg in service_burst(ctx, service.nickname()) {
            ctx.reply(msg);
        }
    }
}
