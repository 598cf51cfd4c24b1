//! Server administration: DIE, RESTART and REHASH.

use parlance_proto::{Message, MessageRef, Response};
use tracing::{info, warn};

use crate::error::ProtocolError;
use crate::handlers::core::{Admission, Context, Handler};
use crate::handlers::helpers::require_oper;

/// Tell every local user the server is going away, then raise the down flag.
fn go_down(ctx: &Context<'_>, restart: bool) {
    let nick = ctx.nick();
    let text = if restart {
        format!("Server restarting by request of {nick}")
    } else {
        format!("Server terminating by request of {nick}")
    };
    let prefix = ctx.server_prefix();
    for user in ctx.server.directory().users() {
        let notice = Message::notice(&user.nickname(), &text).with_prefix(prefix.clone());
        ctx.router().send_user(&user, &notice);
    }
    warn!(oper = %nick, restart, "Server going down");
    ctx.server.shut_down(restart);
}

/// Handler for DIE command.
///
/// # RFC 2812 §4.4
#[derive(Default)]
pub struct DieHandler;

impl Handler for DieHandler {
    fn admission(&self) -> Admission {
        Admission::users(0)
    }

    fn validate(&mut self, ctx: &mut Context<'_>, _msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        require_oper(ctx)
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        go_down(ctx, false);
    }
}

/// Handler for RESTART command.
///
/// # RFC 2812 §4.5
#[derive(Default)]
pub struct RestartHandler;

impl Handler for RestartHandler {
    fn admission(&self) -> Admission {
        Admission::users(0)
    }

    fn validate(&mut self, ctx: &mut Context<'_>, _msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        require_oper(ctx)
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        go_down(ctx, true);
    }
}

/// Handler for REHASH command.
///
/// # RFC 2812 §4.2
#[derive(Default)]
pub struct RehashHandler;

impl Handler for RehashHandler {
    fn admission(&self) -> Admission {
        Admission::users(0)
    }

    fn validate(&mut self, ctx: &mut Context<'_>, _msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        require_oper(ctx)
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        let nick = ctx.nick();
        let file = ctx
            .server
            .config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        ctx.reply(Response::rpl_rehashing(&nick, &file));

        match ctx.server.rehash() {
            Ok(()) => info!(oper = %nick, file = %file, "Rehash complete"),
            Err(err) => {
                warn!(oper = %nick, error = %err, "Rehash failed");
                let notice = Message::notice(&nick, &format!("Rehash failed: {err}"))
                    .with_prefix(ctx.server_prefix());
                ctx.send(&notice);
            }
        }
    }
}
