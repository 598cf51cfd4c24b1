//! SUMMON and USERS, both disabled.

use parlance_proto::{MessageRef, Response};

use crate::error::ProtocolError;
use crate::handlers::core::{Admission, Context, Handler};

/// Handler for SUMMON command.
///
/// # RFC 2812 §4.5
#[derive(Default)]
pub struct SummonHandler;

impl Handler for SummonHandler {
    fn admission(&self) -> Admission {
        Admission::users(0)
    }

    fn validate(&mut self, ctx: &mut Context<'_>, _msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        Err(ProtocolError::reply(Response::err_summondisabled(&ctx.nick())))
    }

    fn execute(self: Box<Self>, _ctx: &mut Context<'_>) {}
}

/// Handler for USERS command.
///
/// # RFC 2812 §4.6
#[derive(Default)]
pub struct UsersHandler;

impl Handler for UsersHandler {
    fn admission(&self) -> Admission {
        Admission::users(0)
    }

    fn validate(&mut self, ctx: &mut Context<'_>, _msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        Err(ProtocolError::reply(Response::err_usersdisabled(&ctx.nick())))
    }

    fn execute(self: Box<Self>, _ctx: &mut Context<'_>) {}
}
