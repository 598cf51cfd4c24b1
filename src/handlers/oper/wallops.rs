//! WALLOPS command handler.

use parlance_proto::{Message, MessageRef};

use crate::error::ProtocolError;
use crate::handlers::core::{Admission, Context, Handler};
use crate::handlers::helpers::require_oper;

/// Handler for WALLOPS command.
///
/// # RFC 2812 §4.7
///
/// Delivered to every local user with `+w`.
#[derive(Default)]
pub struct WallopsHandler {
    text: String,
}

impl Handler for WallopsHandler {
    fn admission(&self) -> Admission {
        Admission::clients(1)
    }

    fn validate(&mut self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        require_oper(ctx)?;
        self.text = msg.params[0].to_string();
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        let msg = Message::wallops(&self.text).with_prefix(ctx.sender.prefix());
        ctx.router().broadcast_users(&msg, |user| user.modes().wallops);
    }
}
