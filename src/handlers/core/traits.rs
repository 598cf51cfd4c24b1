//! Handler traits.
//!
//! Every command is a single-use [`Handler`]: the dispatcher builds a fresh
//! instance per line, runs [`Handler::validate`] and, only if that
//! succeeds, consumes it with [`Handler::execute`].

use parlance_proto::MessageRef;

use super::context::Context;
use crate::error::ProtocolError;
use crate::state::TalkerKind;

/// Where in the connection lifecycle a command is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// Only after registration; ERR_NOTREGISTERED before.
    Required,
    /// Only during the handshake; ERR_ALREADYREGISTRED after.
    Handshake,
    /// Either way.
    Any,
}

/// The checks the dispatcher runs before [`Handler::validate`], in order:
/// sender kind, registration state, parameter count.
#[derive(Debug, Clone, Copy)]
pub struct Admission {
    pub senders: &'static [TalkerKind],
    pub registration: Registration,
    pub min_params: usize,
}

impl Admission {
    const USERS: &'static [TalkerKind] = &[TalkerKind::User];
    const CLIENTS: &'static [TalkerKind] = &[TalkerKind::User, TalkerKind::Service];
    const SERVERS: &'static [TalkerKind] = &[TalkerKind::Server];
    const ALL: &'static [TalkerKind] = &[TalkerKind::User, TalkerKind::Service, TalkerKind::Server];

    /// Registered users only.
    pub const fn users(min_params: usize) -> Self {
        Self {
            senders: Self::USERS,
            registration: Registration::Required,
            min_params,
        }
    }

    /// Registered users and services.
    pub const fn clients(min_params: usize) -> Self {
        Self {
            senders: Self::CLIENTS,
            registration: Registration::Required,
            min_params,
        }
    }

    /// Any registered talker.
    pub const fn anyone(min_params: usize) -> Self {
        Self {
            senders: Self::ALL,
            registration: Registration::Required,
            min_params,
        }
    }

    /// Registered servers only.
    pub const fn servers(min_params: usize) -> Self {
        Self {
            senders: Self::SERVERS,
            registration: Registration::Required,
            min_params,
        }
    }

    /// Part of the registration handshake.
    pub const fn handshake(min_params: usize) -> Self {
        Self {
            senders: Self::USERS,
            registration: Registration::Handshake,
            min_params,
        }
    }

    #[must_use]
    pub const fn at_any_time(mut self) -> Self {
        self.registration = Registration::Any;
        self
    }
}

/// A command handler.
pub trait Handler: Send {
    /// Sender kind, registration and arity requirements.
    fn admission(&self) -> Admission;

    /// Check parameters against the grammar and the sender's state, keeping
    /// whatever `execute` needs. Must not mutate shared state.
    fn validate(&mut self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> Result<(), ProtocolError>;

    /// Apply the command and send its replies. Per-target failures are
    /// reported here and do not stop the remaining targets.
    fn execute(self: Box<Self>, ctx: &mut Context<'_>);

    /// Whether rejections stay unanswered (NOTICE).
    fn is_silent(&self) -> bool {
        false
    }
}

/// Constructor stored in the dispatcher table.
pub type HandlerFactory = fn() -> Box<dyn Handler>;

/// Factory for any default-constructible handler.
pub fn factory<H: Handler + Default + 'static>() -> Box<dyn Handler> {
    Box::<H>::default()
}
