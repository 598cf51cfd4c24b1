//! Command dispatch.
//!
//! The [`Dispatcher`] maps command words to handler constructors, runs the
//! admission checks and the validate/execute protocol, and keeps the usage
//! counters reported by STATS m.

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};

use parlance_proto::{LineError, MessageRef, Response, irc_eq};
use tracing::{debug, debug_span, error, trace};

use super::context::Context;
use super::traits::{Admission, HandlerFactory, Registration, factory};
use crate::error::ProtocolError;
use crate::handlers::{
    channel::{
        InviteHandler, JoinHandler, KickHandler, ListHandler, NamesHandler, PartHandler,
        TopicHandler,
    },
    connection::{NickHandler, PingHandler, PongHandler, QuitHandler, ServiceHandler, UserHandler},
    messaging::{NoticeHandler, PrivmsgHandler, SqueryHandler},
    mode::ModeHandler,
    oper::{
        DieHandler, KillHandler, OperHandler, RehashHandler, RestartHandler, SquitHandler,
        WallopsHandler,
    },
    server::{ErrorHandler, ServerHandler},
    server_query::{
        AdminHandler, InfoHandler, LinksHandler, LusersHandler, MotdHandler, ServlistHandler,
        StatsHandler, SummonHandler, TimeHandler, UsersHandler, VersionHandler,
    },
    user_query::{IsonHandler, UserhostHandler, WhoHandler, WhoisHandler, WhowasHandler},
    user_status::AwayHandler,
};
use crate::state::{ServerContext, Talker, TalkerKind};
use crate::telemetry::{CommandStats, CommandTimer};

struct Entry {
    factory: HandlerFactory,
    stats: CommandStats,
}

/// Table of command handlers.
pub struct Dispatcher {
    handlers: HashMap<&'static str, Entry>,
}

impl Dispatcher {
    /// Create a dispatcher with every command registered.
    pub fn new() -> Self {
        let table: [(&'static str, HandlerFactory); 43] = [
            // Connection registration
            ("NICK", factory::<NickHandler>),
            ("USER", factory::<UserHandler>),
            ("SERVICE", factory::<ServiceHandler>),
            ("SERVER", factory::<ServerHandler>),
            ("QUIT", factory::<QuitHandler>),
            ("PING", factory::<PingHandler>),
            ("PONG", factory::<PongHandler>),
            ("ERROR", factory::<ErrorHandler>),
            // Channel operations
            ("JOIN", factory::<JoinHandler>),
            ("PART", factory::<PartHandler>),
            ("MODE", factory::<ModeHandler>),
            ("TOPIC", factory::<TopicHandler>),
            ("NAMES", factory::<NamesHandler>),
            ("LIST", factory::<ListHandler>),
            ("INVITE", factory::<InviteHandler>),
            ("KICK", factory::<KickHandler>),
            // Messaging
            ("PRIVMSG", factory::<PrivmsgHandler>),
            ("NOTICE", factory::<NoticeHandler>),
            ("SQUERY", factory::<SqueryHandler>),
            // User queries
            ("WHO", factory::<WhoHandler>),
            ("WHOIS", factory::<WhoisHandler>),
            ("WHOWAS", factory::<WhowasHandler>),
            ("ISON", factory::<IsonHandler>),
            ("USERHOST", factory::<UserhostHandler>),
            ("AWAY", factory::<AwayHandler>),
            // Server queries
            ("MOTD", factory::<MotdHandler>),
            ("LUSERS", factory::<LusersHandler>),
            ("VERSION", factory::<VersionHandler>),
            ("STATS", factory::<StatsHandler>),
            ("LINKS", factory::<LinksHandler>),
            ("TIME", factory::<TimeHandler>),
            ("ADMIN", factory::<AdminHandler>),
            ("INFO", factory::<InfoHandler>),
            ("SERVLIST", factory::<ServlistHandler>),
            ("SUMMON", factory::<SummonHandler>),
            ("USERS", factory::<UsersHandler>),
            // Operator commands
            ("OPER", factory::<OperHandler>),
            ("KILL", factory::<KillHandler>),
            ("WALLOPS", factory::<WallopsHandler>),
            ("DIE", factory::<DieHandler>),
            ("RESTART", factory::<RestartHandler>),
            ("REHASH", factory::<RehashHandler>),
            ("SQUIT", factory::<SquitHandler>),
        ];

        let handlers = table
            .into_iter()
            .map(|(name, factory)| {
                let entry = Entry {
                    factory,
                    stats: CommandStats::default(),
                };
                (name, entry)
            })
            .collect();
        Self { handlers }
    }

    /// Whether `command` (uppercase) has a handler.
    pub fn knows(&self, command: &str) -> bool {
        self.handlers.contains_key(command)
    }

    /// Usage counters for STATS m: `(command, count, bytes, remote)`, most
    /// used first. Commands never used are left out.
    pub fn command_stats(&self) -> Vec<(&'static str, u64, u64, u64)> {
        let mut stats: Vec<_> = self
            .handlers
            .iter()
            .map(|(name, entry)| {
                let (count, bytes, remote) = entry.stats.snapshot();
                (*name, count, bytes, remote)
            })
            .filter(|(_, count, _, _)| *count > 0)
            .collect();
        stats.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        stats
    }

    /// Process one inbound line from `sender`.
    pub fn dispatch(&self, server: &ServerContext, sender: &mut Talker, line: &str) {
        let msg = match MessageRef::parse(line) {
            Ok(msg) => msg,
            Err(LineError::InvalidCommand { hint }) => {
                let word = hint.unwrap_or_default();
                let reply = Response::err_unknowncommand(&sender.nickname(), &word);
                server.router().reply(sender, reply);
                return;
            }
            Err(err) => {
                trace!(error = %err, "Ignoring line");
                return;
            }
        };

        // RFC 2812 2.3: a prefix naming someone else is dropped silently.
        if let Some(origin) = msg.origin()
            && !irc_eq(origin, &sender.nickname())
        {
            debug!(origin, "Prefix does not match sender, line dropped");
            return;
        }

        if msg.is_numeric() {
            if sender.kind() != TalkerKind::Server {
                let reply = Response::err_unknowncommand(&sender.nickname(), msg.command);
                server.router().reply(sender, reply);
            }
            return;
        }

        let command = msg.command.to_ascii_uppercase();
        let Some((&name, entry)) = self.handlers.get_key_value(command.as_str()) else {
            let reply = Response::err_unknowncommand(&sender.nickname(), &command);
            server.router().reply(sender, reply);
            return;
        };

        entry
            .stats
            .record(line.len(), sender.kind() == TalkerKind::Server);
        let _timer = CommandTimer::new(&entry.stats);
        let span = debug_span!(
            "command",
            command = name,
            link = sender.link_id(),
            nick = %sender.nickname(),
        );
        let _enter = span.enter();

        let mut handler = (entry.factory)();
        let silent = handler.is_silent();
        let mut ctx = Context {
            server,
            sender,
            dispatcher: self,
            command: name,
        };

        let checked = admit(handler.admission(), &ctx, &msg)
            .and_then(|()| handler.validate(&mut ctx, &msg));
        if let Err(err) = checked {
            debug!(code = err.error_code(), "Command rejected");
            if !silent && let Some(reply) = err.into_reply(&ctx.nick(), name) {
                ctx.reply(reply);
            }
            return;
        }

        if catch_unwind(AssertUnwindSafe(|| handler.execute(&mut ctx))).is_err() {
            error!(command = name, "Command aborted by an internal error");
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Sender kind, then registration state, then parameter count.
fn admit(admission: Admission, ctx: &Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError> {
    if !admission.senders.contains(&ctx.sender.kind()) {
        return Err(ProtocolError::UnknownCommand);
    }
    match (admission.registration, ctx.sender.is_registered()) {
        (Registration::Required, false) => return Err(ProtocolError::NotRegistered),
        (Registration::Handshake, true) => return Err(ProtocolError::AlreadyRegistered),
        _ => {}
    }
    if msg.param_count() < admission.min_params {
        return Err(ProtocolError::NeedMoreParams);
    }
    Ok(())
}
