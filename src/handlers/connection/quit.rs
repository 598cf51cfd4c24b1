//! QUIT command handler and the shared disconnect path.

use parlance_proto::{Message, MessageRef};
use tracing::info;

use crate::error::ProtocolError;
use crate::handlers::core::{Admission, Context, Handler};
use crate::state::{ServerContext, Talker};

/// Handler for QUIT command.
///
/// # RFC 2812 §3.1.7
#[derive(Default)]
pub struct QuitHandler {
    message: Option<String>,
}

impl Handler for QuitHandler {
    fn admission(&self) -> Admission {
        Admission::anyone(0).at_any_time()
    }

    fn validate(&mut self, _ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        self.message = msg.param(0).map(str::to_string);
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        let nick = ctx.nick();
        let reason = self.message.unwrap_or_else(|| nick.clone());
        info!(nick = %nick, reason = %reason, "Client quit");
        disconnect(ctx.server, ctx.sender, &reason);
    }
}

/// Take a talker off the network.
///
/// The call that moves the link into its closing state announces the
/// departure (ERROR to the talker, QUIT to everyone sharing a channel);
/// later calls only make sure the directory no longer holds it.
pub fn disconnect(server: &ServerContext, talker: &Talker, reason: &str) {
    let registered = talker.is_registered();
    let first = talker.begin_close(reason);
    let router = server.router();

    if first {
        router.send(talker, &Message::error(&format!("Closing Link: {reason}")));
    }

    let directory = server.directory();
    match talker {
        Talker::User(user) => {
            if first && registered {
                let msg = Message::quit(reason).with_prefix(user.prefix());
                router.broadcast_shared(user, &msg, false);
            }
            directory.unregister_user(user);
        }
        Talker::Service(service) => directory.unregister_service(service),
        Talker::Server(server) => {
            directory.unregister_server(server.name());
        }
    }
    talker.close(reason);
}
