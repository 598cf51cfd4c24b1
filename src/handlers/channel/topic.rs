//! TOPIC command handler.

use std::sync::Arc;

use chrono::Utc;
use parlance_proto::{Message, MessageRef, Response};

use super::{existing_channel, report};
use crate::error::{ChannelError, ProtocolError};
use crate::handlers::core::{Admission, Context, Handler};
use crate::handlers::helpers::numeric;
use crate::state::{Channel, Topic};

/// Handler for TOPIC command.
///
/// # RFC 2812 §3.2.4
///
/// `TOPIC <channel> [ <topic> ]`. An empty topic clears it.
#[derive(Default)]
pub struct TopicHandler {
    channel: String,
    topic: Option<String>,
}

impl Handler for TopicHandler {
    fn admission(&self) -> Admission {
        Admission::users(1)
    }

    fn validate(&mut self, _ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        self.channel = msg.params[0].to_string();
        self.topic = msg.param(1).map(str::to_string);
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        let Some(user) = ctx.user() else {
            return;
        };
        let Some(channel) = existing_channel(ctx, &self.channel) else {
            return;
        };
        let id = user.link().id();

        let Some(text) = self.topic else {
            if channel.lock().is_member(id) {
                send_topic(ctx, &channel);
            } else {
                report(ctx, &ChannelError::NotOnChannel, channel.name());
            }
            return;
        };

        {
            let mut state = channel.lock();
            if !state.is_member(id) {
                drop(state);
                report(ctx, &ChannelError::NotOnChannel, channel.name());
                return;
            }
            if state.modes.topic_lock && !state.is_operator(id) {
                drop(state);
                report(ctx, &ChannelError::ChanOpPrivsNeeded, channel.name());
                return;
            }
            state.topic = (!text.is_empty()).then(|| Topic {
                text: text.clone(),
                set_by: user.nickname(),
                set_at: Utc::now().timestamp(),
            });
        }

        let msg = Message::topic(channel.name(), &text).with_prefix(user.prefix());
        ctx.router().broadcast(&channel, &msg, None);
    }
}

/// RPL_TOPIC and RPL_TOPICWHOTIME, or RPL_NOTOPIC.
pub fn send_topic(ctx: &Context<'_>, channel: &Arc<Channel>) {
    let topic = channel.lock().topic.clone();
    match topic {
        Some(topic) => {
            ctx.reply(numeric(
                ctx,
                Response::RPL_TOPIC,
                vec![channel.name().to_string(), topic.text],
            ));
            ctx.reply(
                numeric(
                    ctx,
                    Response::RPL_TOPICWHOTIME,
                    vec![channel.name().to_string(), topic.set_by, topic.set_at.to_string()],
                )
                .without_trailing(),
            );
        }
        None => ctx.reply(Response::rpl_notopic(&ctx.nick(), channel.name())),
    }
}
