//! JOIN command handler.

use parlance_proto::{Grammar, Message, MessageRef, Response};
use tracing::{debug, info};

use super::{names::send_names, report, topic::send_topic};
use crate::error::ProtocolError;
use crate::handlers::core::{Admission, Context, Handler};
use crate::handlers::helpers::split_list;

/// Handler for JOIN command.
///
/// # RFC 2812 §3.2.1
///
/// `JOIN ( <channel> *( "," <channel> ) [ <key> *( "," <key> ) ] ) / "0"`
#[derive(Default)]
pub struct JoinHandler {
    targets: Vec<(String, Option<String>)>,
    part_all: bool,
}

impl Handler for JoinHandler {
    fn admission(&self) -> Admission {
        Admission::users(1)
    }

    fn validate(&mut self, _ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        let channels = msg.params[0];
        if channels == "0" {
            self.part_all = true;
            return Ok(());
        }
        let mut keys = msg.param(1).map(|k| k.split(',')).into_iter().flatten();
        self.targets = split_list(channels)
            .map(|name| {
                let key = keys.next().filter(|k| !k.is_empty()).map(str::to_string);
                (name.to_string(), key)
            })
            .collect();
        if self.targets.is_empty() {
            return Err(ProtocolError::NeedMoreParams);
        }
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        let Some(user) = ctx.user() else {
            return;
        };
        let directory = ctx.server.directory();
        let router = ctx.router();

        if self.part_all {
            let joined: Vec<String> = user.info().channels.iter().cloned().collect();
            for name in joined {
                let Some(channel) = directory.find_channel(&name) else {
                    continue;
                };
                let part = Message::part(channel.name(), None).with_prefix(user.prefix());
                router.broadcast(&channel, &part, None);
                if let Err(err) = directory.leave(&user, &channel) {
                    debug!(error = %err, channel = %channel.name(), "Leave during JOIN 0 failed");
                }
            }
            return;
        }

        let max_channels = ctx.server.limits().max_channels;
        for (name, key) in self.targets {
            if !Grammar::Channel.is_match(&name) {
                ctx.reply(Response::err_nosuchchannel(&ctx.nick(), &name));
                continue;
            }
            let joined = match directory.join(&user, &name, key.as_deref(), max_channels) {
                Ok(Some(joined)) => joined,
                Ok(None) => continue,
                Err(err) => {
                    report(ctx, &err, &name);
                    continue;
                }
            };
            let channel = joined.channel;
            info!(nick = %user.nickname(), channel = %channel.name(), created = joined.created, "User joined");

            let msg = Message::join(channel.name()).with_prefix(user.prefix());
            ctx.send(&msg);
            router.broadcast(&channel, &msg, Some(user.link().id()));
            if channel.lock().topic.is_some() {
                send_topic(ctx, &channel);
            }
            send_names(ctx, &channel);
        }
    }
}
