//! The sender side of every connection.

use std::sync::Arc;

use parlance_proto::{Message, Prefix};

use super::link::{CommandReport, Link, LinkId, LinkState};
use super::service::{Server, Service};
use super::user::User;

/// Which class of entity is talking. Commands admit one or more kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TalkerKind {
    User,
    Service,
    Server,
}

/// An addressable protocol entity.
///
/// Every connection starts out as an unregistered [`Talker::User`]; a
/// SERVICE or SERVER registration swaps it for the matching variant.
#[derive(Debug, Clone)]
pub enum Talker {
    User(Arc<User>),
    Service(Arc<Service>),
    Server(Arc<Server>),
}

impl Talker {
    pub fn kind(&self) -> TalkerKind {
        match self {
            Self::User(_) => TalkerKind::User,
            Self::Service(_) => TalkerKind::Service,
            Self::Server(_) => TalkerKind::Server,
        }
    }

    /// The connection, if the entity has one of its own.
    pub fn link(&self) -> Option<&Arc<Link>> {
        match self {
            Self::User(user) => Some(user.link()),
            Self::Service(service) => Some(service.link()),
            Self::Server(server) => server.link(),
        }
    }

    pub fn link_id(&self) -> Option<LinkId> {
        self.link().map(|link| link.id())
    }

    /// Name used as the first parameter of replies, `*` before NICK.
    pub fn nickname(&self) -> String {
        match self {
            Self::User(user) => user.nickname(),
            Self::Service(service) => service.nickname().to_string(),
            Self::Server(server) => server.name().to_string(),
        }
    }

    pub fn prefix(&self) -> Prefix {
        match self {
            Self::User(user) => user.prefix(),
            Self::Service(service) => service.prefix(),
            Self::Server(server) => server.prefix(),
        }
    }

    /// Registration finished.
    pub fn is_registered(&self) -> bool {
        self.link()
            .is_none_or(|link| link.state() == LinkState::Operational)
    }

    pub fn is_operator(&self) -> bool {
        match self {
            Self::User(user) => user.is_operator(),
            Self::Service(_) | Self::Server(_) => false,
        }
    }

    pub fn as_user(&self) -> Option<&Arc<User>> {
        match self {
            Self::User(user) => Some(user),
            _ => None,
        }
    }

    /// Serialize and enqueue a message. Returns `false` once the
    /// connection's queue is gone.
    pub fn send(&self, msg: &Message, origin: &str) -> bool {
        match self.link() {
            Some(link) => link.send(CommandReport::new(msg.to_string(), self.nickname(), origin)),
            None => false,
        }
    }

    /// See [`Link::begin_close`]. A talker without a link of its own always
    /// gets `true`.
    pub fn begin_close(&self, reason: &str) -> bool {
        self.link().is_none_or(|link| link.begin_close(reason))
    }

    pub fn close(&self, reason: &str) {
        if let Some(link) = self.link() {
            link.close(reason);
        }
    }
}
