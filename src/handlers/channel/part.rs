//! PART command handler.

use parlance_proto::{Message, MessageRef};
use tracing::info;

use super::{existing_channel, report};
use crate::error::{ChannelError, ProtocolError};
use crate::handlers::core::{Admission, Context, Handler};
use crate::handlers::helpers::split_list;

/// Handler for PART command.
///
/// # RFC 2812 §3.2.2
#[derive(Default)]
pub struct PartHandler {
    channels: Vec<String>,
    reason: Option<String>,
}

impl Handler for PartHandler {
    fn admission(&self) -> Admission {
        Admission::users(1)
    }

    fn validate(&mut self, _ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        self.channels = split_list(msg.params[0]).map(str::to_string).collect();
        self.reason = msg.param(1).map(str::to_string);
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        let Some(user) = ctx.user() else {
            return;
        };
        let id = user.link().id();
        for name in &self.channels {
            let Some(channel) = existing_channel(ctx, name) else {
                continue;
            };
            if !channel.lock().is_member(id) {
                report(ctx, &ChannelError::NotOnChannel, channel.name());
                continue;
            }
            let msg = Message::part(channel.name(), self.reason.as_deref()).with_prefix(user.prefix());
            ctx.router().broadcast(&channel, &msg, None);
            if let Err(err) = ctx.server.directory().leave(&user, &channel) {
                report(ctx, &err, channel.name());
                continue;
            }
            info!(nick = %user.nickname(), channel = %channel.name(), "User parted");
        }
    }
}
