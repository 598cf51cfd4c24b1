//! ISON and USERHOST handlers.

use parlance_proto::{MessageRef, Response};

use crate::error::ProtocolError;
use crate::handlers::core::{Admission, Context, Handler};
use crate::handlers::helpers::numeric;

/// USERHOST answers at most this many nicknames.
const USERHOST_LIMIT: usize = 5;

/// Handler for ISON command.
///
/// # RFC 2812 §4.9
#[derive(Default)]
pub struct IsonHandler {
    nicks: Vec<String>,
}

impl Handler for IsonHandler {
    fn admission(&self) -> Admission {
        Admission::users(1)
    }

    fn validate(&mut self, _ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        // A trailing parameter may carry several space separated names.
        self.nicks = msg
            .params
            .iter()
            .flat_map(|p| p.split(' '))
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect();
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        let directory = ctx.server.directory();
        let online: Vec<String> = self
            .nicks
            .iter()
            .filter_map(|nick| directory.find_user(nick))
            .map(|user| user.nickname())
            .collect();
        ctx.reply(numeric(ctx, Response::RPL_ISON, vec![online.join(" ")]));
    }
}

/// Handler for USERHOST command.
///
/// # RFC 2812 §4.8
///
/// Each entry is `nick[*]=<+|->user@host`; `*` marks an operator and `-`
/// an away user.
#[derive(Default)]
pub struct UserhostHandler {
    nicks: Vec<String>,
}

impl Handler for UserhostHandler {
    fn admission(&self) -> Admission {
        Admission::users(1)
    }

    fn validate(&mut self, _ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        self.nicks = msg
            .params
            .iter()
            .flat_map(|p| p.split(' '))
            .filter(|n| !n.is_empty())
            .take(USERHOST_LIMIT)
            .map(str::to_string)
            .collect();
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        let directory = ctx.server.directory();
        let entries: Vec<String> = self
            .nicks
            .iter()
            .filter_map(|nick| directory.find_user(nick))
            .map(|user| {
                let info = user.info();
                format!(
                    "{}{}={}{}@{}",
                    info.nickname.as_deref().unwrap_or_default(),
                    if info.modes.is_operator() { "*" } else { "" },
                    if info.away.is_some() { '-' } else { '+' },
                    info.username.as_deref().unwrap_or_default(),
                    user.hostname(),
                )
            })
            .collect();
        ctx.reply(numeric(ctx, Response::RPL_USERHOST, vec![entries.join(" ")]));
    }
}
