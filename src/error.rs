//! Error types for the protocol engine.
//!
//! - [`ProtocolError`]: a command was rejected during validation; becomes
//!   exactly one numeric reply (or nothing, for NOTICE)
//! - [`ChannelError`]: a per-target failure during execution
//! - [`RegistryError`]: a name is already taken in the directory

use parlance_proto::{Message, Response};
use thiserror::Error;

// ============================================================================
// Protocol Errors (validation)
// ============================================================================

/// Why a command was rejected before execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("unknown command")]
    UnknownCommand,

    #[error("not registered")]
    NotRegistered,

    #[error("not enough parameters")]
    NeedMoreParams,

    #[error("already registered")]
    AlreadyRegistered,

    /// A command-specific numeric, already built.
    #[error("rejected with {}", .0.response().map_or("a reply", |r| r.name()))]
    Reply(Box<Message>),

    /// Rejected without any reply (NOTICE never answers).
    #[error("rejected silently")]
    Silent,
}

impl ProtocolError {
    /// Wrap a prebuilt reply.
    pub fn reply(msg: Message) -> Self {
        Self::Reply(Box::new(msg))
    }

    /// Get a static error code string for log fields.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "unknown_command",
            Self::NotRegistered => "not_registered",
            Self::NeedMoreParams => "need_more_params",
            Self::AlreadyRegistered => "already_registered",
            Self::Reply(_) => "reply",
            Self::Silent => "silent",
        }
    }

    /// Convert to the reply owed to the sender, without a prefix.
    pub fn into_reply(self, nick: &str, command: &str) -> Option<Message> {
        match self {
            Self::UnknownCommand => Some(Response::err_unknowncommand(nick, command)),
            Self::NotRegistered => Some(Response::err_notregistered(nick)),
            Self::NeedMoreParams => Some(Response::err_needmoreparams(nick, command)),
            Self::AlreadyRegistered => Some(Response::err_alreadyregistred(nick)),
            Self::Reply(msg) => Some(*msg),
            Self::Silent => None,
        }
    }
}

// ============================================================================
// Channel Errors (execution)
// ============================================================================

/// Channel operation errors.
///
/// Each maps to its own numeric; multi-target commands report them per
/// target and carry on with the rest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("no such channel")]
    NoSuchChannel,

    #[error("not on channel")]
    NotOnChannel,

    #[error("you're not channel operator")]
    ChanOpPrivsNeeded,

    #[error("user {0} is not on that channel")]
    UserNotInChannel(String),

    #[error("user {0} is already on that channel")]
    UserOnChannel(String),

    #[error("cannot send to channel")]
    CannotSendToChan,

    #[error("cannot join channel (+b)")]
    BannedFromChan,

    #[error("cannot join channel (+i)")]
    InviteOnlyChan,

    #[error("cannot join channel (+l)")]
    ChannelIsFull,

    #[error("cannot join channel (+k)")]
    BadChannelKey,

    #[error("channel key already set")]
    KeySet,

    #[error("too many channels")]
    TooManyChannels,

    #[error("restricted connection")]
    Restricted,
}

impl ChannelError {
    /// Convert to an IRC error reply message, without a prefix.
    pub fn to_irc_reply(&self, nick: &str, channel: &str) -> Message {
        match self {
            Self::NoSuchChannel => Response::err_nosuchchannel(nick, channel),
            Self::NotOnChannel => Response::err_notonchannel(nick, channel),
            Self::ChanOpPrivsNeeded => Response::err_chanoprivsneeded(nick, channel),
            Self::UserNotInChannel(target) => Response::err_usernotinchannel(nick, target, channel),
            Self::UserOnChannel(target) => Response::err_useronchannel(nick, target, channel),
            Self::CannotSendToChan => Response::err_cannotsendtochan(nick, channel),
            Self::BannedFromChan => Response::err_bannedfromchan(nick, channel),
            Self::InviteOnlyChan => Response::err_inviteonlychan(nick, channel),
            Self::ChannelIsFull => Response::err_channelisfull(nick, channel),
            Self::BadChannelKey => Response::err_badchannelkey(nick, channel),
            Self::KeySet => Response::err_keyset(nick, channel),
            Self::TooManyChannels => Response::err_toomanychannels(nick, channel),
            Self::Restricted => Response::err_restricted(nick),
        }
    }
}

// ============================================================================
// Registry Errors (directory)
// ============================================================================

/// Directory uniqueness failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("nickname {0} is already in use")]
    NicknameInUse(String),

    #[error("server {0} is already linked")]
    ServerExists(String),
}

impl RegistryError {
    /// Convert to an IRC error reply message, without a prefix.
    pub fn to_irc_reply(&self, nick: &str) -> Message {
        match self {
            Self::NicknameInUse(taken) => Response::err_nicknameinuse(nick, taken),
            Self::ServerExists(name) => Response::err_alreadyregistred(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_error_replies() {
        let reply = ProtocolError::NeedMoreParams.into_reply("bob", "JOIN").unwrap();
        assert_eq!(reply.to_string(), "461 bob JOIN :Not enough parameters");

        let reply = ProtocolError::UnknownCommand.into_reply("*", "FOO").unwrap();
        assert_eq!(reply.to_string(), "421 * FOO :Unknown command");

        assert!(ProtocolError::Silent.into_reply("bob", "NOTICE").is_none());
        assert_eq!(ProtocolError::NotRegistered.error_code(), "not_registered");
    }

    #[test]
    fn channel_error_replies() {
        let reply = ChannelError::UserNotInChannel("carol".into()).to_irc_reply("bob", "#rust");
        assert_eq!(reply.response(), Some(Response::ERR_USERNOTINCHANNEL));
        assert_eq!(
            ChannelError::BadChannelKey.to_irc_reply("bob", "#rust").to_string(),
            "475 bob #rust :Cannot join channel (+k)"
        );
    }
}
