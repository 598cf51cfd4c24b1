//! LIST command handler.

use parlance_proto::{MessageRef, Response};

use crate::error::ProtocolError;
use crate::handlers::core::{Admission, Context, Handler};
use crate::handlers::helpers::{answer_locally, numeric, server_target, split_list};

/// Handler for LIST command.
///
/// # RFC 2812 §3.2.6
///
/// Secret and private channels are only listed to their members. No
/// RPL_LISTSTART is sent.
#[derive(Default)]
pub struct ListHandler {
    channels: Vec<String>,
    target: Option<String>,
}

impl Handler for ListHandler {
    fn admission(&self) -> Admission {
        Admission::users(0)
    }

    fn validate(&mut self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        self.channels = msg
            .param(0)
            .map(|p| split_list(p).map(str::to_string).collect())
            .unwrap_or_default();
        self.target = server_target(ctx, msg.param(1))?;
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        if !answer_locally(ctx, self.target.as_deref()) {
            return;
        }
        let viewer = ctx.sender.link_id().unwrap_or_default();
        let directory = ctx.server.directory();
        let channels = if self.channels.is_empty() {
            directory.channels()
        } else {
            self.channels
                .iter()
                .filter_map(|name| directory.find_channel(name))
                .collect()
        };

        for channel in channels {
            let entry = {
                let state = channel.lock();
                state.is_visible_to(viewer).then(|| {
                    let topic = state.topic.as_ref().map(|t| t.text.clone()).unwrap_or_default();
                    (state.visible_count(viewer), topic)
                })
            };
            if let Some((count, topic)) = entry {
                ctx.reply(numeric(
                    ctx,
                    Response::RPL_LIST,
                    vec![channel.name().to_string(), count.to_string(), topic],
                ));
            }
        }
        ctx.reply(Response::rpl_listend(&ctx.nick()));
    }
}
