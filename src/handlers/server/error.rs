//! ERROR command handler.

use parlance_proto::MessageRef;
use tracing::warn;

use crate::error::ProtocolError;
use crate::handlers::core::{Admission, Context, Handler};

/// Handler for ERROR command.
///
/// # RFC 2812 §3.7.4
///
/// Only linked servers may report errors; the report is logged.
#[derive(Default)]
pub struct ErrorHandler {
    message: String,
}

impl Handler for ErrorHandler {
    fn admission(&self) -> Admission {
        Admission::servers(1)
    }

    fn validate(&mut self, _ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        self.message = msg.params[0].to_string();
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        warn!(server = %ctx.nick(), message = %self.message, "Peer reported an error");
    }
}
