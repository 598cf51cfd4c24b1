//! Owned outbound messages.

use std::fmt::{self, Write as _};

use crate::prefix::Prefix;
use crate::response::Response;

/// The command slot of an outbound line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verb {
    /// A command word such as `PRIVMSG`.
    Command(&'static str),
    /// A numeric reply.
    Numeric(Response),
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command(word) => f.write_str(word),
            Self::Numeric(resp) => write!(f, "{:03}", resp.code()),
        }
    }
}

/// An outbound line.
///
/// The last parameter is written with a leading `:` when `trailing` is set,
/// and also whenever it would otherwise not survive re-tokenizing (empty,
/// containing a space, or starting with `:`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Origin; `None` for lines like `ERROR` that carry no prefix.
    pub prefix: Option<Prefix>,
    /// Command or numeric.
    pub verb: Verb,
    /// Parameters in wire order.
    pub params: Vec<String>,
    /// Force the `:` marker on the last parameter.
    pub trailing: bool,
}

impl Message {
    /// A command line with no prefix.
    pub fn new(word: &'static str, params: Vec<String>) -> Self {
        Self {
            prefix: None,
            verb: Verb::Command(word),
            params,
            trailing: false,
        }
    }

    /// A numeric reply. Numerics carry text in their last parameter, so the
    /// `:` marker is on unless switched off with [`Message::without_trailing`].
    pub fn numeric(response: Response, params: Vec<String>) -> Self {
        Self {
            prefix: None,
            verb: Verb::Numeric(response),
            params,
            trailing: true,
        }
    }

    /// Set the origin.
    #[must_use]
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// Set the origin if none is set yet.
    #[must_use]
    pub fn or_prefix(mut self, prefix: impl FnOnce() -> Prefix) -> Self {
        if self.prefix.is_none() {
            self.prefix = Some(prefix());
        }
        self
    }

    /// Force `:` on the last parameter.
    #[must_use]
    pub fn with_trailing(mut self) -> Self {
        self.trailing = true;
        self
    }

    /// Only add `:` where the wire format needs it.
    #[must_use]
    pub fn without_trailing(mut self) -> Self {
        self.trailing = false;
        self
    }

    /// The numeric, if this is a reply.
    pub fn response(&self) -> Option<Response> {
        match self.verb {
            Verb::Numeric(r) => Some(r),
            Verb::Command(_) => None,
        }
    }

    /// `PRIVMSG <target> :<text>`.
    pub fn privmsg(target: &str, text: &str) -> Self {
        Self::new("PRIVMSG", vec![target.into(), text.into()]).with_trailing()
    }

    /// `NOTICE <target> :<text>`.
    pub fn notice(target: &str, text: &str) -> Self {
        Self::new("NOTICE", vec![target.into(), text.into()]).with_trailing()
    }

    /// `JOIN <channel>`.
    pub fn join(channel: &str) -> Self {
        Self::new("JOIN", vec![channel.into()])
    }

    /// `PART <channel> [:<reason>]`.
    pub fn part(channel: &str, reason: Option<&str>) -> Self {
        match reason {
            Some(reason) => Self::new("PART", vec![channel.into(), reason.into()]).with_trailing(),
            None => Self::new("PART", vec![channel.into()]),
        }
    }

    /// `QUIT :<reason>`.
    pub fn quit(reason: &str) -> Self {
        Self::new("QUIT", vec![reason.into()]).with_trailing()
    }

    /// `NICK <new>`.
    pub fn nick(new: &str) -> Self {
        Self::new("NICK", vec![new.into()])
    }

    /// `KICK <channel> <user> :<reason>`.
    pub fn kick(channel: &str, user: &str, reason: &str) -> Self {
        Self::new("KICK", vec![channel.into(), user.into(), reason.into()]).with_trailing()
    }

    /// `TOPIC <channel> :<topic>`.
    pub fn topic(channel: &str, topic: &str) -> Self {
        Self::new("TOPIC", vec![channel.into(), topic.into()]).with_trailing()
    }

    /// `INVITE <nick> <channel>`.
    pub fn invite(nick: &str, channel: &str) -> Self {
        Self::new("INVITE", vec![nick.into(), channel.into()])
    }

    /// `MODE <target> <modes> [<params>...]`.
    pub fn mode(target: &str, modes: &str, params: &[String]) -> Self {
        let mut all = Vec::with_capacity(params.len() + 2);
        all.push(target.to_owned());
        all.push(modes.to_owned());
        all.extend(params.iter().cloned());
        Self::new("MODE", all)
    }

    /// `PING :<token>`.
    pub fn ping(token: &str) -> Self {
        Self::new("PING", vec![token.into()]).with_trailing()
    }

    /// `PONG <server> :<token>`.
    pub fn pong(server: &str, token: &str) -> Self {
        Self::new("PONG", vec![server.into(), token.into()]).with_trailing()
    }

    /// `WALLOPS :<text>`.
    pub fn wallops(text: &str) -> Self {
        Self::new("WALLOPS", vec![text.into()]).with_trailing()
    }

    /// `KILL <nick> :<comment>`.
    pub fn kill(nick: &str, comment: &str) -> Self {
        Self::new("KILL", vec![nick.into(), comment.into()]).with_trailing()
    }

    /// `ERROR :<text>`.
    pub fn error(text: &str) -> Self {
        Self::new("ERROR", vec![text.into()]).with_trailing()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            write!(f, ":{prefix} ")?;
        }
        write!(f, "{}", self.verb)?;

        let Some((last, middle)) = self.params.split_last() else {
            return Ok(());
        };
        for param in middle {
            f.write_char(' ')?;
            f.write_str(param)?;
        }
        f.write_char(' ')?;
        if self.trailing || last.is_empty() || last.contains(' ') || last.starts_with(':') {
            f.write_char(':')?;
        }
        f.write_str(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageRef;

    #[test]
    fn numeric_is_zero_padded_with_trailing() {
        let msg = Message::numeric(Response::RPL_WELCOME, vec!["bob".into(), "Welcome".into()])
            .with_prefix(Prefix::server("irc.test"));
        assert_eq!(msg.to_string(), ":irc.test 001 bob :Welcome");
    }

    #[test]
    fn colon_added_only_when_needed() {
        assert_eq!(Message::join("#rust").to_string(), "JOIN #rust");
        assert_eq!(Message::mode("#rust", "+m", &[]).to_string(), "MODE #rust +m");
        assert_eq!(
            Message::new("FOO", vec!["a b".into()]).to_string(),
            "FOO :a b"
        );
        assert_eq!(Message::new("FOO", vec!["".into()]).to_string(), "FOO :");
    }

    #[test]
    fn survives_retokenizing() {
        let out = Message::privmsg("#rust", ":) hi").with_prefix(Prefix::user("a", "b", "c"));
        let text = out.to_string();
        let back = MessageRef::parse(&text).unwrap();
        assert_eq!(back.params.as_slice(), ["#rust", ":) hi"]);
        assert_eq!(back.prefix, Some("a!b@c"));
    }

    #[test]
    fn error_has_no_prefix() {
        assert_eq!(
            Message::error("Closing Link: bye").to_string(),
            "ERROR :Closing Link: bye"
        );
    }
}
