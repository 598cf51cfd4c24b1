//! USER command handler.

use parlance_proto::{Grammar, MessageRef};

use super::welcome::complete_registration;
use crate::error::ProtocolError;
use crate::handlers::core::{Admission, Context, Handler};
use crate::state::UserModes;

/// Bit of the USER mode parameter that requests `+w`.
const MODE_WALLOPS: u32 = 1 << 2;
/// Bit of the USER mode parameter that requests `+i`.
const MODE_INVISIBLE: u32 = 1 << 3;

/// Handler for USER command.
///
/// # RFC 2812 §3.1.3
///
/// `USER <user> <mode> <unused> <realname>`
#[derive(Default)]
pub struct UserHandler {
    username: String,
    realname: String,
    modes: UserModes,
}

impl Handler for UserHandler {
    fn admission(&self) -> Admission {
        Admission::handshake(4)
    }

    fn validate(&mut self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        if ctx.user().is_some_and(|u| u.info().username.is_some()) {
            return Err(ProtocolError::AlreadyRegistered);
        }
        let (Some(username), Some(mode), Some(realname)) = (msg.param(0), msg.param(1), msg.param(3))
        else {
            return Err(ProtocolError::NeedMoreParams);
        };
        if !Grammar::User.is_match(username) {
            return Err(ProtocolError::UnknownCommand);
        }

        let bits: u32 = mode.parse().unwrap_or(0);
        self.modes.wallops = bits & MODE_WALLOPS != 0;
        self.modes.invisible = bits & MODE_INVISIBLE != 0;
        self.username = username.to_string();
        self.realname = realname.to_string();
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        let Some(user) = ctx.user() else {
            return;
        };
        {
            let mut info = user.info_mut();
            info.username = Some(self.username);
            info.realname = self.realname;
            info.modes = self.modes;
        }
        if user.has_identity() {
            complete_registration(ctx, &user);
        }
    }
}
