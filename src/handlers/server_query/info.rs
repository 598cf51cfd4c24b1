//! ADMIN, INFO, VERSION and TIME handlers.

use chrono::Local;
use parlance_proto::{MessageRef, Response};

use super::target_param;
use crate::error::ProtocolError;
use crate::handlers::core::{Admission, Context, Handler};
use crate::handlers::helpers::{answer_locally, numeric};

/// Handler for VERSION command.
///
/// # RFC 2812 §3.4.3
#[derive(Default)]
pub struct VersionHandler {
    target: Option<String>,
}

impl Handler for VersionHandler {
    fn admission(&self) -> Admission {
        Admission::clients(0)
    }

    fn validate(&mut self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        self.target = target_param(ctx, msg, 0)?;
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        if !answer_locally(ctx, self.target.as_deref()) {
            return;
        }
        let info = ctx.server.info();
        ctx.reply(numeric(
            ctx,
            Response::RPL_VERSION,
            vec![info.version.clone(), info.name.clone(), info.description.clone()],
        ));
    }
}

/// Handler for TIME command.
///
/// # RFC 2812 §3.4.6
#[derive(Default)]
pub struct TimeHandler {
    target: Option<String>,
}

impl Handler for TimeHandler {
    fn admission(&self) -> Admission {
        Admission::clients(0)
    }

    fn validate(&mut self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        self.target = target_param(ctx, msg, 0)?;
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        if !answer_locally(ctx, self.target.as_deref()) {
            return;
        }
        let now = Local::now().format("%A %B %e %Y -- %H:%M:%S %:z").to_string();
        ctx.reply(numeric(
            ctx,
            Response::RPL_TIME,
            vec![ctx.server.name().to_string(), now],
        ));
    }
}

/// Handler for ADMIN command.
///
/// # RFC 2812 §3.4.9
#[derive(Default)]
pub struct AdminHandler {
    target: Option<String>,
}

impl Handler for AdminHandler {
    fn admission(&self) -> Admission {
        Admission::clients(0)
    }

    fn validate(&mut self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        self.target = target_param(ctx, msg, 0)?;
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        if !answer_locally(ctx, self.target.as_deref()) {
            return;
        }
        let server = ctx.server.config().server.clone();
        if !server.has_admin_info() {
            ctx.reply(Response::err_noadmininfo(&ctx.nick(), ctx.server.name()));
            return;
        }
        ctx.reply(numeric(
            ctx,
            Response::RPL_ADMINME,
            vec![ctx.server.name().to_string(), "Administrative info".to_string()],
        ));
        let lines = [
            (Response::RPL_ADMINLOC1, server.admin_loc1),
            (Response::RPL_ADMINLOC2, server.admin_loc2),
            (Response::RPL_ADMINEMAIL, server.admin_email),
        ];
        for (response, text) in lines {
            ctx.reply(numeric(ctx, response, vec![text.unwrap_or_default()]));
        }
    }
}

/// Handler for INFO command.
///
/// # RFC 2812 §3.4.10
#[derive(Default)]
pub struct InfoHandler {
    target: Option<String>,
}

impl Handler for InfoHandler {
    fn admission(&self) -> Admission {
        Admission::clients(0)
    }

    fn validate(&mut self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
        self.target = target_param(ctx, msg, 0)?;
        Ok(())
    }

    fn execute(self: Box<Self>, ctx: &mut Context<'_>) {
        if !answer_locally(ctx, self.target.as_deref()) {
            return;
        }
        let mut lines = ctx.server.config().info.lines.clone();
        let info = ctx.server.info();
        lines.push(format!("Birth date: {}", info.created.format("%a %b %e %Y at %H:%M:%S UTC")));
        lines.push(format!("On-line since {}s", ctx.server.uptime().as_secs()));
        for line in lines {
            ctx.reply(numeric(ctx, Response::RPL_INFO, vec![line]));
        }
        ctx.reply(Response::rpl_endofinfo(&ctx.nick()));
    }
}
