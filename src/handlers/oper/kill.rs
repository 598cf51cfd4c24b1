//! KILL command handler.

use parlance_proto::{Message, MessageRef, Response};
use tracing::info;

use crate::error::ProtocolError;
use crate::handlers::connection::disconnect;
use crate::handlers::core::{Admission, Context, Handler};
use crate::handlers::helpers::require_oper;
use crate::state::Talker;

/// Handler for KILL command.
///
/// # RFC 2812 §3.7.1
#[derive(Default)]
pub struct KillHandler {
    target: String,
    comment: String,
}

impl Handler for KillHandler {
    fn admission(&self) -> Admission {
        Admission::users(2)
    }

    fn validate(&mut self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        require_oper(ctx)?;
        self.target = msg.params[0].to_string();
        self.comment = msg.params[1].to_string();
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        let nick = ctx.nick();
        let directory = ctx.server.directory();
        if directory.find_server(&self.target).is_some() {
            ctx.reply(Response::err_cantkillserver(&nick));
            return;
        }
        let Some(victim) = directory.find_user(&self.target) else {
            ctx.reply(Response::err_nosuchnick(&nick, &self.target));
            return;
        };

        let killer = ctx.sender.prefix();
        let notice = Message::kill(&victim.nickname(), &self.comment).with_prefix(killer);
        ctx.router().send_user(&victim, &notice);

        let reason = format!("Killed ({nick} ({}))", self.comment);
        info!(killer = %nick, victim = %victim.nickname(), comment = %self.comment, "User killed");
        disconnect(ctx.server, &Talker::User(victim), &reason);
    }
}
