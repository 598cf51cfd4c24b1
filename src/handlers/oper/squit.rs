//! SQUIT command handler.

use parlance_proto::{MessageRef, Response, irc_eq};
use tracing::info;

use crate::error::ProtocolError;
use crate::handlers::connection::disconnect;
use crate::handlers::core::{Admission, Context, Handler};
use crate::handlers::helpers::require_oper;
use crate::state::Talker;

/// Handler for SQUIT command.
///
/// # RFC 2812 §3.1.8
///
/// Drops a directly linked server. This server cannot be named.
#[derive(Default)]
pub struct SquitHandler {
    server: String,
    comment: String,
}

impl Handler for SquitHandler {
    fn admission(&self) -> Admission {
        Admission::users(2)
    }

    fn validate(&mut self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        require_oper(ctx)?;
        self.server = msg.params[0].to_string();
        self.comment = msg.params[1].to_string();
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        let nick = ctx.nick();
        let directory = ctx.server.directory();
        let linked = directory
            .find_server(&self.server)
            .filter(|s| !irc_eq(s.name(), ctx.server.name()));
        let Some(server) = linked else {
            ctx.reply(Response::err_nosuchserver(&nick, &self.server));
            return;
        };

        info!(oper = %nick, server = %server.name(), comment = %self.comment, "Server link dropped");
        disconnect(ctx.server, &Talker::Server(server), &self.comment);
    }
}
