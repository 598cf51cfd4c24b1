//! User and channel mode flags and their legality table.

use std::fmt;

use crate::grammar::Grammar;

/// Direction of a mode change. `List` queries a list mode without
/// changing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModeOp {
    /// `+`
    Add,
    /// `-`
    Remove,
    /// No sign, or a list mode with no argument left.
    List,
}

/// What the parser needs to know about a family of mode flags.
pub trait ModeKind: Copy + Eq + fmt::Debug {
    /// Look a flag up by character.
    fn from_char(c: char) -> Option<Self>;

    /// The flag character.
    fn as_char(self) -> char;

    /// Whether this flag may be used with this operation.
    fn is_legal(self, op: ModeOp) -> bool;

    /// The grammar of the argument this flag consumes under `op`, if any.
    fn param_grammar(self, _op: ModeOp) -> Option<Grammar> {
        None
    }

    /// List modes fall back to a query when their argument is missing.
    fn is_list(self) -> bool {
        false
    }
}

/// User modes (RFC 2812 section 3.1.5).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UserMode {
    /// `a`, only set through AWAY.
    Away,
    /// `i`
    Invisible,
    /// `w`
    Wallops,
    /// `r`, can be set but never removed by the user.
    Restricted,
    /// `o`, granted only by OPER.
    Oper,
    /// `O`, granted only by OPER.
    LocalOper,
    /// `s`
    ServerNotices,
}

impl UserMode {
    /// Every user mode, in the order advertised in RPL_MYINFO.
    pub const ALL: [UserMode; 7] = [
        Self::Away,
        Self::Invisible,
        Self::Wallops,
        Self::Restricted,
        Self::Oper,
        Self::LocalOper,
        Self::ServerNotices,
    ];
}

impl ModeKind for UserMode {
    fn from_char(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_char() == c)
    }

    fn as_char(self) -> char {
        match self {
            Self::Away => 'a',
            Self::Invisible => 'i',
            Self::Wallops => 'w',
            Self::Restricted => 'r',
            Self::Oper => 'o',
            Self::LocalOper => 'O',
            Self::ServerNotices => 's',
        }
    }

    fn is_legal(self, op: ModeOp) -> bool {
        match self {
            Self::Away => false,
            Self::Invisible | Self::Wallops | Self::ServerNotices => op != ModeOp::List,
            Self::Restricted => op == ModeOp::Add,
            Self::Oper | Self::LocalOper => op == ModeOp::Remove,
        }
    }
}

/// Channel modes (RFC 2811 section 4).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelMode {
    /// `O`, channel creator. Only queryable.
    Creator,
    /// `o`
    Oper,
    /// `v`
    Voice,
    /// `a`
    Anonymous,
    /// `i`
    InviteOnly,
    /// `m`
    Moderated,
    /// `n`
    NoExternal,
    /// `q`, reserved for servers.
    Quiet,
    /// `p`
    Private,
    /// `s`
    Secret,
    /// `r`
    Reop,
    /// `t`
    TopicLock,
    /// `k`
    Key,
    /// `l`
    Limit,
    /// `b`
    Ban,
    /// `e`
    Except,
    /// `I`
    InviteExcept,
}

impl ChannelMode {
    /// Every channel mode, in the order advertised in RPL_MYINFO.
    pub const ALL: [ChannelMode; 17] = [
        Self::Creator,
        Self::Oper,
        Self::Voice,
        Self::Anonymous,
        Self::InviteOnly,
        Self::Moderated,
        Self::NoExternal,
        Self::Quiet,
        Self::Private,
        Self::Secret,
        Self::Reop,
        Self::TopicLock,
        Self::Key,
        Self::Limit,
        Self::Ban,
        Self::Except,
        Self::InviteExcept,
    ];

    /// Whether the flag lives on a membership rather than on the channel.
    pub fn is_member_mode(self) -> bool {
        matches!(self, Self::Creator | Self::Oper | Self::Voice)
    }
}

impl ModeKind for ChannelMode {
    fn from_char(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_char() == c)
    }

    fn as_char(self) -> char {
        match self {
            Self::Creator => 'O',
            Self::Oper => 'o',
            Self::Voice => 'v',
            Self::Anonymous => 'a',
            Self::InviteOnly => 'i',
            Self::Moderated => 'm',
            Self::NoExternal => 'n',
            Self::Quiet => 'q',
            Self::Private => 'p',
            Self::Secret => 's',
            Self::Reop => 'r',
            Self::TopicLock => 't',
            Self::Key => 'k',
            Self::Limit => 'l',
            Self::Ban => 'b',
            Self::Except => 'e',
            Self::InviteExcept => 'I',
        }
    }

    fn is_legal(self, op: ModeOp) -> bool {
        match self {
            Self::Creator => op == ModeOp::List,
            Self::Quiet => false,
            Self::Ban | Self::Except | Self::InviteExcept => true,
            _ => op != ModeOp::List,
        }
    }

    fn param_grammar(self, op: ModeOp) -> Option<Grammar> {
        match (self, op) {
            (_, ModeOp::List) => None,
            (Self::Oper | Self::Voice, _) => Some(Grammar::Nickname),
            (Self::Key, _) => Some(Grammar::Key),
            (Self::Limit, ModeOp::Add) => Some(Grammar::Limit),
            (Self::Ban | Self::Except | Self::InviteExcept, _) => Some(Grammar::UserMask),
            _ => None,
        }
    }

    fn is_list(self) -> bool {
        matches!(self, Self::Ban | Self::Except | Self::InviteExcept)
    }
}

/// Concatenated flag characters, e.g. `aiwroOs`.
pub fn flag_string<M: ModeKind>(modes: impl IntoIterator<Item = M>) -> String {
    modes.into_iter().map(ModeKind::as_char).collect()
}

impl fmt::Display for UserMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_legality_table() {
        assert!(!UserMode::Away.is_legal(ModeOp::Add));
        assert!(UserMode::Restricted.is_legal(ModeOp::Add));
        assert!(!UserMode::Restricted.is_legal(ModeOp::Remove));
        assert!(!UserMode::Oper.is_legal(ModeOp::Add));
        assert!(UserMode::Oper.is_legal(ModeOp::Remove));
        assert!(UserMode::Invisible.is_legal(ModeOp::Remove));
    }

    #[test]
    fn channel_legality_table() {
        assert!(!ChannelMode::Creator.is_legal(ModeOp::Add));
        assert!(!ChannelMode::Creator.is_legal(ModeOp::Remove));
        assert!(ChannelMode::Creator.is_legal(ModeOp::List));
        assert!(!ChannelMode::Moderated.is_legal(ModeOp::List));
        assert!(ChannelMode::Ban.is_legal(ModeOp::List));
        assert_eq!(ChannelMode::Limit.param_grammar(ModeOp::Remove), None);
        assert_eq!(ChannelMode::Key.param_grammar(ModeOp::Remove), Some(Grammar::Key));
    }

    #[test]
    fn advertised_flags() {
        assert_eq!(flag_string(UserMode::ALL), "aiwroOs");
        assert_eq!(flag_string(ChannelMode::ALL), "OovaimnqpsrtklbeI");
    }
}
