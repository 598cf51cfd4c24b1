//! WHOWAS command handler.

use parlance_proto::{MessageRef, Response};

use crate::error::ProtocolError;
use crate::handlers::core::{Admission, Context, Handler};
use crate::handlers::helpers::{answer_locally, numeric, server_target, split_list};

/// Handler for WHOWAS command.
///
/// # RFC 2812 §3.6.3
///
/// `WHOWAS <nick>[,<nick>] [<count> [<target>]]`. A count of zero or less
/// means every entry.
#[derive(Default)]
pub struct WhowasHandler {
    nicks: Vec<String>,
    count: Option<usize>,
    target: Option<String>,
}

impl Handler for WhowasHandler {
    fn admission(&self) -> Admission {
        Admission::users(0)
    }

    fn validate(&mut self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        let Some(nicks) = msg.param(0).filter(|n| !n.is_empty()) else {
            return Err(ProtocolError::reply(Response::err_nonicknamegiven(&ctx.nick())));
        };
        self.nicks = split_list(nicks).map(str::to_string).collect();
        self.count = msg
            .param(1)
            .and_then(|c| c.parse::<i64>().ok())
            .filter(|c| *c > 0)
            .and_then(|c| usize::try_from(c).ok());
        self.target = server_target(ctx, msg.param(2))?;
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        if !answer_locally(ctx, self.target.as_deref()) {
            return;
        }
        for nick in &self.nicks {
            let entries = ctx.server.directory().whowas(nick, self.count);
            if entries.is_empty() {
                ctx.reply(Response::err_wasnosuchnick(&ctx.nick(), nick));
            }
            for dried in entries {
                ctx.reply(numeric(
                    ctx,
                    Response::RPL_WHOWASUSER,
                    vec![
                        dried.nickname.clone(),
                        dried.username,
                        dried.hostname,
                        "*".to_string(),
                        dried.realname,
                    ],
                ));
                ctx.reply(numeric(
                    ctx,
                    Response::RPL_WHOISSERVER,
                    vec![
                        dried.nickname,
                        dried.server,
                        dried.signoff.format("%a %b %e %H:%M:%S %Y").to_string(),
                    ],
                ));
            }
            ctx.reply(Response::rpl_endofwhowas(&ctx.nick(), nick));
        }
    }
}
