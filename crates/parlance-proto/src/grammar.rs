//! Parameter grammars.
//!
//! Every command validator checks its parameters against one of these
//! predicates before anything is executed. The shapes follow RFC 2812
//! section 2.3.1, with a few practical relaxations (hostnames may be
//! address literals, and user masks are checked only for forbidden bytes
//! because partial masks are normalised later).

use std::fmt;

use crate::error::GrammarError;

/// Longest nickname the grammar itself accepts. Servers may configure a
/// shorter limit on top of this.
pub const NICKNAME_MAX: usize = 30;

/// Longest channel name, prefix included.
pub const CHANNEL_MAX: usize = 50;

/// Longest channel key.
pub const KEY_MAX: usize = 23;

/// A named parameter shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    /// `letter / special` followed by letters, digits, specials or `-`.
    Nickname,
    /// `#` or `&` followed by at least one byte that is not a separator.
    Channel,
    /// A dotted host name or an IPv4/IPv6 literal.
    Host,
    /// A server name pattern: host characters plus `*` and `?`.
    ServerMask,
    /// A `nick!user@host` pattern, possibly partial, possibly wildcarded.
    UserMask,
    /// The ident part of a user: no NUL, CR, LF, space or `@`.
    User,
    /// A channel key: up to 23 printable bytes with no space or comma.
    Key,
    /// A channel user limit: a positive decimal integer.
    Limit,
    /// A plain decimal integer (WHOWAS count, USER mode bitmask).
    Integer,
    /// A mode string made of `+`, `-` and ASCII letters.
    ModeString,
    /// A `$servermask` or `#hostmask` message target.
    TargetMask,
    /// Free text: anything except NUL, CR and LF.
    Text,
}

impl Grammar {
    /// Whether `candidate` matches this grammar in full.
    pub fn is_match(self, candidate: &str) -> bool {
        match self {
            Self::Nickname => is_nickname(candidate),
            Self::Channel => is_channel(candidate),
            Self::Host => is_host(candidate),
            Self::ServerMask => is_server_mask(candidate),
            Self::UserMask => is_user_mask(candidate),
            Self::User => is_user(candidate),
            Self::Key => is_key(candidate),
            Self::Limit => candidate.parse::<u32>().is_ok_and(|n| n > 0) && all_digits(candidate),
            Self::Integer => is_integer(candidate),
            Self::ModeString => is_mode_string(candidate),
            Self::TargetMask => is_target_mask(candidate),
            Self::Text => !candidate.contains(['\0', '\r', '\n']),
        }
    }

    /// Like [`Grammar::is_match`], but hands the value back or says why not.
    pub fn check(self, candidate: &str) -> Result<&str, GrammarError> {
        if self.is_match(candidate) {
            Ok(candidate)
        } else {
            Err(GrammarError {
                grammar: self,
                value: candidate.to_owned(),
            })
        }
    }

    /// Human-readable name of the grammar.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nickname => "nickname",
            Self::Channel => "channel name",
            Self::Host => "host name",
            Self::ServerMask => "server mask",
            Self::UserMask => "user mask",
            Self::User => "user name",
            Self::Key => "channel key",
            Self::Limit => "channel limit",
            Self::Integer => "integer",
            Self::ModeString => "mode string",
            Self::TargetMask => "target mask",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// RFC 2812 `special`: `[ ] \ ` _ ^ { | }`.
#[inline]
pub const fn is_special(c: char) -> bool {
    matches!(c, '[' | ']' | '\\' | '`' | '_' | '^' | '{' | '|' | '}')
}

fn is_nickname(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    s.len() <= NICKNAME_MAX
        && (first.is_ascii_alphabetic() || is_special(first))
        && chars.all(|c| c.is_ascii_alphanumeric() || is_special(c) || c == '-')
}

/// Bytes that may never appear in a channel name.
#[inline]
fn is_chan_separator(c: char) -> bool {
    matches!(c, '\0' | '\x07' | '\r' | '\n' | ' ' | ',' | ':')
}

fn is_channel(s: &str) -> bool {
    let Some(rest) = s.strip_prefix(['#', '&']) else {
        return false;
    };
    !rest.is_empty() && s.len() <= CHANNEL_MAX && !rest.chars().any(is_chan_separator)
}

fn is_host(s: &str) -> bool {
    if s.is_empty() || s.len() > 255 {
        return false;
    }
    if s.contains(':') {
        return s.parse::<std::net::Ipv6Addr>().is_ok()
            || s.chars().all(|c| c.is_ascii_hexdigit() || c == ':' || c == '.');
    }
    s.split('.').all(|label| {
        !label.is_empty()
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '/')
    })
}

fn is_server_mask(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '*' | '?' | '_'))
}

fn is_user_mask(s: &str) -> bool {
    !s.is_empty() && !s.contains(['\0', '\r', '\n', ' ', ','])
}

fn is_user(s: &str) -> bool {
    !s.is_empty() && !s.contains(['\0', '\r', '\n', ' ', '@'])
}

fn is_key(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= KEY_MAX
        && s.bytes()
            .all(|b| matches!(b, 0x01..=0x05 | 0x07..=0x08 | 0x0C | 0x0E..=0x1F | 0x21..=0x7F) && b != b',')
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_integer(s: &str) -> bool {
    all_digits(s.strip_prefix('-').unwrap_or(s))
}

fn is_mode_string(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic() || c == '+' || c == '-')
}

fn is_target_mask(s: &str) -> bool {
    s.strip_prefix(['$', '#']).is_some_and(is_server_mask)
}
