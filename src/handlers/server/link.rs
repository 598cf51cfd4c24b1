//! SERVER command handler.

use std::sync::Arc;

use parlance_proto::{Grammar, Message, MessageRef};
use tracing::{info, warn};

use crate::error::ProtocolError;
use crate::handlers::core::{Admission, Context, Handler};
use crate::state::{LinkState, Server, Talker};

/// Handler for SERVER command.
///
/// # RFC 2813 §4.1.2
///
/// `SERVER <servername> <hopcount> <token> <info>`
///
/// Records the peer in the directory so that mask forwarding can reach
/// it. No state burst is exchanged.
#[derive(Default)]
pub struct ServerHandler {
    name: String,
    hopcount: u32,
    info: String,
}

impl Handler for ServerHandler {
    fn admission(&self) -> Admission {
        Admission::handshake(4)
    }

    fn validate(&mut self, _ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        let name = msg.params[0];
        if !Grammar::Host.is_match(name) {
            return Err(ProtocolError::UnknownCommand);
        }
        self.hopcount = msg.params[1].parse().map_err(|_| ProtocolError::UnknownCommand)?;
        self.name = name.to_string();
        self.info = msg.params[3].to_string();
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        let Some(user) = ctx.user() else {
            return;
        };
        let link = Arc::clone(user.link());
        let server = Arc::new(Server::new(self.name, self.hopcount, self.info).with_link(Arc::clone(&link)));

        let directory = ctx.server.directory();
        directory.unregister_user(&user);
        if let Err(err) = directory.register_server(Arc::clone(&server)) {
            warn!(error = %err, "Server link refused");
            let reason = format!("ID \"{}\" already registered", server.name());
            ctx.send(&Message::error(&reason));
            link.close(&reason);
            return;
        }
        link.set_state(LinkState::Operational);
        *ctx.sender = Talker::Server(Arc::clone(&server));
        info!(server = %server.name(), hopcount = server.hopcount(), "Server linked");
    }
}
