//! Message origins.

use std::fmt;

/// The `:origin` in front of a line: a server name or a full user mask.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Prefix {
    /// A server host name.
    Server(String),
    /// `nick!user@host`.
    User {
        /// Nickname.
        nick: String,
        /// Username (ident).
        user: String,
        /// Host name.
        host: String,
    },
}

impl Prefix {
    /// Shorthand for [`Prefix::Server`].
    pub fn server(name: impl Into<String>) -> Self {
        Self::Server(name.into())
    }

    /// Shorthand for [`Prefix::User`].
    pub fn user(nick: impl Into<String>, user: impl Into<String>, host: impl Into<String>) -> Self {
        Self::User {
            nick: nick.into(),
            user: user.into(),
            host: host.into(),
        }
    }

    /// The identifying name: the server name, or the nickname of a user.
    pub fn name(&self) -> &str {
        match self {
            Self::Server(name) => name,
            Self::User { nick, .. } => nick,
        }
    }
}

/// The name part of a raw inbound prefix, up to the first `!` or `@`.
///
/// ```
/// assert_eq!(parlance_proto::prefix::origin_name("bob!b@host"), "bob");
/// assert_eq!(parlance_proto::prefix::origin_name("irc.example.org"), "irc.example.org");
/// ```
pub fn origin_name(raw: &str) -> &str {
    raw.split(['!', '@']).next().unwrap_or(raw)
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Server(name) => f.write_str(name),
            Self::User { nick, user, host } => write!(f, "{nick}!{user}@{host}"),
        }
    }
}
