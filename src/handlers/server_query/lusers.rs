//! LUSERS command handler.

use parlance_proto::{MessageRef, Response};

use super::target_param;
use crate::error::ProtocolError;
use crate::handlers::core::{Admission, Context, Handler};
use crate::handlers::helpers::{answer_locally, numeric};

/// Handler for LUSERS command.
///
/// # RFC 2812 §3.4.2
///
/// `LUSERS [<mask> [<target>]]`. The operator, unknown and channel lines
/// are only sent when their count is non-zero.
#[derive(Default)]
pub struct LusersHandler {
    target: Option<String>,
}

impl Handler for LusersHandler {
    fn admission(&self) -> Admission {
        Admission::clients(0)
    }

    fn validate(&mut self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        self.target = target_param(ctx, msg, 1)?;
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        if !answer_locally(ctx, self.target.as_deref()) {
            return;
        }
        let census = ctx.server.directory().census();
        let unknown = ctx.server.unknown_connections();
        let linked = ctx
            .server
            .directory()
            .servers()
            .iter()
            .filter(|s| s.link().is_some())
            .count();

        ctx.reply(numeric(
            ctx,
            Response::RPL_LUSERCLIENT,
            vec![format!(
                "There are {} users and {} services on {} servers",
                census.visible + census.invisible,
                census.services,
                census.servers
            )],
        ));
        let optional = [
            (Response::RPL_LUSEROP, census.operators, "operator(s) online"),
            (Response::RPL_LUSERUNKNOWN, unknown, "unknown connection(s)"),
            (Response::RPL_LUSERCHANNELS, census.channels, "channels formed"),
        ];
        for (response, count, text) in optional {
            if count > 0 {
                ctx.reply(numeric(ctx, response, vec![count.to_string(), text.to_string()]));
            }
        }
        ctx.reply(numeric(
            ctx,
            Response::RPL_LUSERME,
            vec![format!(
                "I have {} clients and {} servers",
                census.visible + census.invisible + census.services,
                linked
            )],
        ));
    }
}
