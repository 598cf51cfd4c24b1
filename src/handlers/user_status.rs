//! AWAY command handler.

use parlance_proto::{MessageRef, Response};
use tracing::debug;

use crate::error::ProtocolError;
use crate::handlers::core::{Admission, Context, Handler};

/// Handler for AWAY command.
///
/// # RFC 2812 §4.1
///
/// With a message the user is marked away (`+a`); without one, or with an
/// empty one, the mark is cleared.
#[derive(Default)]
pub struct AwayHandler {
    message: Option<String>,
}

impl Handler for AwayHandler {
    fn admission(&self) -> Admission {
        Admission::users(0)
    }

    fn validate(&mut self, _ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        self.message = msg.param(0).filter(|m| !m.is_empty()).map(str::to_string);
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        let Some(user) = ctx.user() else {
            return;
        };
        let away = self.message.is_some();
        {
            let mut info = user.info_mut();
            info.modes.away = away;
            info.away = self.message;
        }
        debug!(nick = %user.nickname(), away, "Away status changed");

        let nick = ctx.nick();
        if away {
            ctx.reply(Response::rpl_nowaway(&nick));
        } else {
            ctx.reply(Response::rpl_unaway(&nick));
        }
    }
}
