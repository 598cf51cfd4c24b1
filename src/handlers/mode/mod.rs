//! MODE command handler.
//!
//! # RFC 2812 §3.1.5, §3.2.3
//!
//! Dispatches to the channel or user flavour depending on the target.

mod channel;
mod user;

use parlance_proto::MessageRef;

use crate::error::ProtocolError;
use crate::handlers::core::{Admission, Context, Handler};
use crate::handlers::helpers::is_channel_name;

/// Handler for MODE command.
#[derive(Default)]
pub struct ModeHandler {
    target: String,
    modestring: Option<String>,
    args: Vec<String>,
}

impl Handler for ModeHandler {
    fn admission(&self) -> Admission {
        Admission::users(1)
    }

    fn validate(&mut self, _ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        self.target = msg.params[0].to_string();
        self.modestring = msg.param(1).map(str::to_string);
        self.args = msg.params.iter().skip(2).map(|a| a.to_string()).collect();
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        let Some(user) = ctx.user() else {
            return;
        };
        let args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        if is_channel_name(&self.target) {
            channel::change(ctx, &user, &self.target, self.modestring.as_deref(), &args);
        } else {
            user::change(ctx, &user, &self.target, self.modestring.as_deref());
        }
    }
}
