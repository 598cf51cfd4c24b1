//! Registered services and server entries.

use std::sync::Arc;

use parlance_proto::Prefix;

use super::link::Link;

/// A client registered through SERVICE.
///
/// Services share the user namespace but may only use the commands open to
/// them (SQUERY targets, SERVLIST entries, a handful of queries).
#[derive(Debug)]
pub struct Service {
    link: Arc<Link>,
    nickname: String,
    server: String,
    distribution: String,
    kind: String,
    info: String,
}

impl Service {
    pub fn new(
        link: Arc<Link>,
        nickname: String,
        server: String,
        distribution: String,
        kind: String,
        info: String,
    ) -> Self {
        Self {
            link,
            nickname,
            server,
            distribution,
            kind,
            info,
        }
    }

    pub fn link(&self) -> &Arc<Link> {
        &self.link
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    /// Server mask the service is visible to.
    pub fn distribution(&self) -> &str {
        &self.distribution
    }

    /// Service type, reserved for future use in RFC 2812.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    pub fn prefix(&self) -> Prefix {
        Prefix::user(&*self.nickname, &*self.nickname, &*self.server)
    }
}

/// A known server. The local server has no link; linked servers are
/// recorded but never relayed to beyond their own connection.
#[derive(Debug)]
pub struct Server {
    name: String,
    hopcount: u32,
    info: String,
    link: Option<Arc<Link>>,
}

impl Server {
    pub fn new(name: impl Into<String>, hopcount: u32, info: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hopcount,
            info: info.into(),
            link: None,
        }
    }

    /// A server reached over its own connection.
    pub fn with_link(mut self, link: Arc<Link>) -> Self {
        self.link = Some(link);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hopcount(&self) -> u32 {
        self.hopcount
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    pub fn link(&self) -> Option<&Arc<Link>> {
        self.link.as_ref()
    }

    pub fn prefix(&self) -> Prefix {
        Prefix::server(&*self.name)
    }
}
