//! Registration completion.
//!
//! Sends RPL_WELCOME through RPL_ISUPPORT followed by the MOTD once a
//! connection has given both NICK and USER.

use std::sync::Arc;

use parlance_proto::{ChannelMode, Message, Response, UserMode, mode::flag_string};
use tracing::info;

use crate::handlers::core::Context;
use crate::handlers::helpers::numeric;
use crate::handlers::server_query::send_motd;
use crate::state::{LinkState, User};

/// Mark `user` operational and send the welcome burst.
pub fn complete_registration(ctx: &mut Context<'_>, user: &Arc<User>) {
    user.link().set_state(LinkState::Operational);
    info!(
        nick = %user.nickname(),
        user = %user.username(),
        host = %user.hostname(),
        "User registered"
    );

    let server = ctx.server.info();
    let limits = ctx.server.limits();
    let burst = [
        numeric(
            ctx,
            Response::RPL_WELCOME,
            vec![format!("Welcome to the Internet Relay Network {}", user.prefix())],
        ),
        numeric(
            ctx,
            Response::RPL_YOURHOST,
            vec![format!(
                "Your host is {}, running version {}",
                server.name, server.version
            )],
        ),
        numeric(
            ctx,
            Response::RPL_CREATED,
            vec![format!(
                "This server was created {}",
                server.created.format("%a %b %e %Y at %H:%M:%S UTC")
            )],
        ),
        numeric(
            ctx,
            Response::RPL_MYINFO,
            vec![
                server.name.clone(),
                server.version.clone(),
                flag_string(UserMode::ALL),
                flag_string(ChannelMode::ALL),
            ],
        )
        .without_trailing(),
        numeric(
            ctx,
            Response::RPL_ISUPPORT,
            vec![
                "CHANTYPES=#&".into(),
                "PREFIX=(ov)@+".into(),
                "CHANMODES=beI,k,l,aimnpqrst".into(),
                format!("NICKLEN={}", limits.nick_length),
                "CHANNELLEN=50".into(),
                format!("MAXCHANNELS={}", limits.max_channels),
                format!("NETWORK={}", server.network),
                "CASEMAPPING=rfc1459".into(),
                "are supported by this server".into(),
            ],
        ),
    ];
    for msg in burst {
        ctx.reply(msg);
    }
    send_motd(ctx);
}

/// RPL_YOURESERVICE and server information for a fresh service.
pub(super) fn service_burst(ctx: &Context<'_>, nick: &str) -> Vec<Message> {
    let server = ctx.server.info();
    vec![
        numeric(
            ctx,
            Response::RPL_YOURESERVICE,
            vec![format!("You are service {nick}")],
        ),
        numeric(
            ctx,
            Response::RPL_YOURHOST,
            vec![format!(
                "Your host is {}, running version {}",
                server.name, server.version
            )],
        ),
        numeric(
            ctx,
            Response::RPL_MYINFO,
            vec![
                server.name.clone(),
                server.version.clone(),
                flag_string(UserMode::ALL),
                flag_string(ChannelMode::ALL),
            ],
        )
        .without_trailing(),
    ]
}
