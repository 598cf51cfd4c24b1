//! OPER command handler.

use parlance_proto::{Message, MessageRef, Response};
use tracing::{info, warn};

use crate::error::ProtocolError;
use crate::handlers::core::{Admission, Context, Handler};

/// Handler for OPER command.
///
/// # RFC 2812 §3.1.4
///
/// `OPER <name> <password>`, checked against the `[[oper]]` blocks. The
/// block's host mask is checked before the password.
#[derive(Default)]
pub struct OperHandler {
    name: String,
    password: String,
}

impl Handler for OperHandler {
    fn admission(&self) -> Admission {
        Admission::users(2)
    }

    fn validate(&mut self, _ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        self.name = msg.params[0].to_string();
        self.password = msg.params[1].to_string();
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        let Some(user) = ctx.user() else {
            return;
        };
        let nick = ctx.nick();

        let verdict = {
            let config = ctx.server.config();
            let username = user.username();
            let block = config
                .oper
                .iter()
                .find(|b| b.name == self.name && b.allows(&username, user.hostname()));
            match block {
                None => Err(Response::err_nooperhost(&nick)),
                Some(block) if !block.verify_password(&self.password) => {
                    Err(Response::err_passwdmismatch(&nick))
                }
                Some(_) => Ok(()),
            }
        };
        if let Err(reply) = verdict {
            warn!(nick = %nick, oper = %self.name, "OPER failed");
            ctx.reply(reply);
            return;
        }

        let changed = !user.is_operator();
        user.info_mut().modes.oper = true;
        info!(nick = %nick, oper = %self.name, "Operator authenticated");

        if changed {
            let echo = Message::mode(&nick, "+o", &[])
                .with_prefix(user.prefix())
                .with_trailing();
            ctx.send(&echo);
        }
        ctx.reply(Response::rpl_youreoper(&nick));
    }
}
