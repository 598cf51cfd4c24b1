//! Channel-related types and state.
//!
//! A [`Channel`] wraps its mutable [`ChannelState`] in one mutex; all
//! membership and mode changes happen while holding it. The directory lock
//! is always taken before a channel lock, and a channel lock before a
//! user's info lock.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use parking_lot::{Mutex, MutexGuard};
use parlance_proto::mask::{self, normalize_user_mask};
use parlance_proto::mode::ModeKind;
use parlance_proto::{ChannelMode, ModeCarrier, ModeOp, irc_eq, irc_to_lower};

use super::link::LinkId;
use super::user::User;
use crate::error::ChannelError;

/// Channel topic with metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub text: String,
    pub set_by: String,
    pub set_at: i64,
}

/// Member modes (creator, op, voice).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MemberModes {
    pub creator: bool, // +O
    pub op: bool,      // +o (@)
    pub voice: bool,   // +v (+)
}

impl MemberModes {
    /// NAMES prefix character.
    pub fn prefix_char(&self) -> Option<char> {
        if self.op || self.creator {
            Some('@')
        } else if self.voice {
            Some('+')
        } else {
            None
        }
    }

    pub fn is_operator(&self) -> bool {
        self.creator || self.op
    }

    /// May speak in a moderated channel.
    pub fn has_voice_or_higher(&self) -> bool {
        self.is_operator() || self.voice
    }
}

/// One membership.
#[derive(Debug, Clone)]
pub struct Member {
    pub user: Arc<User>,
    pub modes: MemberModes,
}

/// Channel-wide flags.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChannelModes {
    pub anonymous: bool,   // +a
    pub invite_only: bool, // +i
    pub moderated: bool,   // +m
    pub no_external: bool, // +n
    pub private: bool,     // +p
    pub secret: bool,      // +s
    pub reop: bool,        // +r
    pub topic_lock: bool,  // +t
    pub key: Option<String>,
    pub limit: Option<usize>,
}

impl ChannelModes {
    fn flag(&self, mode: ChannelMode) -> bool {
        match mode {
            ChannelMode::Anonymous => self.anonymous,
            ChannelMode::InviteOnly => self.invite_only,
            ChannelMode::Moderated => self.moderated,
            ChannelMode::NoExternal => self.no_external,
            ChannelMode::Private => self.private,
            ChannelMode::Secret => self.secret,
            ChannelMode::Reop => self.reop,
            ChannelMode::TopicLock => self.topic_lock,
            _ => false,
        }
    }

    fn flag_mut(&mut self, mode: ChannelMode) -> Option<&mut bool> {
        Some(match mode {
            ChannelMode::Anonymous => &mut self.anonymous,
            ChannelMode::InviteOnly => &mut self.invite_only,
            ChannelMode::Moderated => &mut self.moderated,
            ChannelMode::NoExternal => &mut self.no_external,
            ChannelMode::Private => &mut self.private,
            ChannelMode::Secret => &mut self.secret,
            ChannelMode::Reop => &mut self.reop,
            ChannelMode::TopicLock => &mut self.topic_lock,
            _ => return None,
        })
    }

    /// Mode string and arguments for RPL_CHANNELMODEIS. The key is only
    /// shown to members.
    pub fn as_mode_string(&self, show_key: bool) -> (String, Vec<String>) {
        let mut flags = String::from("+");
        let mut params = Vec::new();
        flags.extend(
            ChannelMode::ALL
                .into_iter()
                .filter(|m| self.flag(*m))
                .map(ModeKind::as_char),
        );
        if let Some(key) = &self.key {
            flags.push('k');
            params.push(if show_key { key.clone() } else { "*".into() });
        }
        if let Some(limit) = self.limit {
            flags.push('l');
            params.push(limit.to_string());
        }
        (flags, params)
    }
}

/// The lockable part of a channel.
#[derive(Debug, Default)]
pub struct ChannelState {
    pub topic: Option<Topic>,
    pub modes: ChannelModes,
    /// Members in join order.
    pub members: IndexMap<LinkId, Member>,
    pub bans: Vec<String>,
    pub excepts: Vec<String>,
    pub invex: Vec<String>,
    /// One-shot passes through +i, consumed on join.
    pub invited: HashSet<LinkId>,
}

impl ChannelState {
    pub fn is_member(&self, id: LinkId) -> bool {
        self.members.contains_key(&id)
    }

    pub fn member_modes(&self, id: LinkId) -> Option<MemberModes> {
        self.members.get(&id).map(|m| m.modes)
    }

    pub fn is_operator(&self, id: LinkId) -> bool {
        self.member_modes(id).is_some_and(|m| m.is_operator())
    }

    /// Secret and private channels are only visible to their members.
    pub fn is_visible_to(&self, id: LinkId) -> bool {
        !(self.modes.secret || self.modes.private) || self.is_member(id)
    }

    /// Find a member by nickname.
    pub fn member_by_nick(&self, nick: &str) -> Option<(LinkId, &Member)> {
        self.members
            .iter()
            .find(|(_, m)| m.user.info().nickname.as_deref().is_some_and(|n| irc_eq(n, nick)))
            .map(|(id, m)| (*id, m))
    }

    fn is_banned(&self, user_mask: &str) -> bool {
        self.bans.iter().any(|b| mask::matches(b, user_mask))
            && !self.excepts.iter().any(|e| mask::matches(e, user_mask))
    }

    /// Whether `user` may send PRIVMSG/NOTICE to the channel.
    pub fn can_send(&self, user: &User) -> Result<(), ChannelError> {
        match self.member_modes(user.link().id()) {
            Some(modes) if modes.has_voice_or_higher() => Ok(()),
            Some(_) if self.modes.moderated => Err(ChannelError::CannotSendToChan),
            None if self.modes.no_external || self.modes.moderated => {
                Err(ChannelError::CannotSendToChan)
            }
            _ if self.is_banned(&user.mask()) => Err(ChannelError::CannotSendToChan),
            _ => Ok(()),
        }
    }

    /// Gatekeeping for JOIN: bans, invite-only, key, limit, in that order.
    pub fn check_join(&self, user: &User, key: Option<&str>) -> Result<(), ChannelError> {
        let user_mask = user.mask();
        let id = user.link().id();
        if self.is_banned(&user_mask) {
            return Err(ChannelError::BannedFromChan);
        }
        if self.modes.invite_only
            && !self.invited.contains(&id)
            && !self.invex.iter().any(|m| mask::matches(m, &user_mask))
        {
            return Err(ChannelError::InviteOnlyChan);
        }
        if self.modes.key.is_some() && self.modes.key.as_deref() != key {
            return Err(ChannelError::BadChannelKey);
        }
        if self
            .modes
            .limit
            .is_some_and(|limit| self.members.len() >= limit)
        {
            return Err(ChannelError::ChannelIsFull);
        }
        Ok(())
    }

    pub fn add_member(&mut self, user: Arc<User>, modes: MemberModes) {
        let id = user.link().id();
        self.invited.remove(&id);
        self.members.insert(id, Member { user, modes });
    }

    pub fn remove_member(&mut self, id: LinkId) -> Option<Member> {
        self.members.shift_remove(&id)
    }

    /// Apply one parsed change.
    ///
    /// Re-adding a set flag or removing an absent one succeeds unchanged,
    /// so the caller still echoes it. Returns the carrier to echo, with
    /// list masks normalised.
    pub fn update_mode(
        &mut self,
        change: &ModeCarrier<ChannelMode>,
    ) -> Result<ModeCarrier<ChannelMode>, ChannelError> {
        let op = change.op();
        let add = op == ModeOp::Add;
        let param = change.param().unwrap_or_default();
        match change.mode() {
            mode @ (ChannelMode::Oper | ChannelMode::Voice) => {
                let Some((id, member)) = self.member_by_nick(param) else {
                    return Err(ChannelError::UserNotInChannel(param.to_string()));
                };
                let nick = member.user.nickname();
                if let Some(member) = self.members.get_mut(&id) {
                    match mode {
                        ChannelMode::Oper => member.modes.op = add,
                        _ => member.modes.voice = add,
                    }
                }
                Ok(ModeCarrier::new(mode, op, Some(nick)))
            }
            ChannelMode::Key => {
                if add {
                    if self.modes.key.as_deref().is_some_and(|k| k != param) {
                        return Err(ChannelError::KeySet);
                    }
                    self.modes.key = Some(param.to_string());
                } else {
                    self.modes.key = None;
                }
                Ok(change.clone())
            }
            ChannelMode::Limit => {
                if add {
                    let limit = param.parse().unwrap_or(0);
                    self.modes.limit = Some(limit);
                    Ok(ModeCarrier::new(ChannelMode::Limit, op, Some(limit.to_string())))
                } else {
                    self.modes.limit = None;
                    Ok(ModeCarrier::new(ChannelMode::Limit, op, None))
                }
            }
            mode @ (ChannelMode::Ban | ChannelMode::Except | ChannelMode::InviteExcept) => {
                let normalized = normalize_user_mask(param);
                let list = self.list_mut(mode);
                let existing = list.iter().position(|m| irc_eq(m, &normalized));
                match (add, existing) {
                    (true, None) => list.push(normalized.clone()),
                    (false, Some(idx)) => {
                        list.remove(idx);
                    }
                    _ => {}
                }
                Ok(ModeCarrier::new(mode, op, Some(normalized)))
            }
            mode => {
                if let Some(flag) = self.modes.flag_mut(mode) {
                    *flag = add;
                }
                Ok(ModeCarrier::new(mode, op, None))
            }
        }
    }

    fn list_mut(&mut self, mode: ChannelMode) -> &mut Vec<String> {
        match mode {
            ChannelMode::Except => &mut self.excepts,
            ChannelMode::InviteExcept => &mut self.invex,
            _ => &mut self.bans,
        }
    }

    /// Entries of a list mode.
    pub fn list_mode(&self, mode: ChannelMode) -> &[String] {
        match mode {
            ChannelMode::Except => &self.excepts,
            ChannelMode::InviteExcept => &self.invex,
            _ => &self.bans,
        }
    }

    /// `nick` list for RPL_NAMREPLY, with status prefixes. Invisible users
    /// are left out unless `viewer_is_member`.
    pub fn names(&self, viewer_is_member: bool) -> Vec<String> {
        self.members
            .values()
            .filter(|m| viewer_is_member || !m.user.modes().invisible)
            .map(|m| {
                let nick = m.user.nickname();
                match m.modes.prefix_char() {
                    Some(c) => format!("{c}{nick}"),
                    None => nick,
                }
            })
            .collect()
    }

    /// Members visible to `viewer` (all of them if a member, else the
    /// non-invisible ones).
    pub fn visible_count(&self, viewer: LinkId) -> usize {
        if self.is_member(viewer) {
            self.members.len()
        } else {
            self.members
                .values()
                .filter(|m| !m.user.modes().invisible)
                .count()
        }
    }
}

/// A channel.
#[derive(Debug)]
pub struct Channel {
    name: String,
    created: DateTime<Utc>,
    state: Mutex<ChannelState>,
}

impl Channel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created: Utc::now(),
            state: Mutex::new(ChannelState::default()),
        }
    }

    /// Name as first joined, case preserved.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn folded_name(&self) -> String {
        irc_to_lower(&self.name)
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn lock(&self) -> MutexGuard<'_, ChannelState> {
        self.state.lock()
    }

    /// `NAMES`/`WHO` channel symbol: `@` secret, `*` private, `=` public.
    pub fn symbol(&self) -> char {
        let state = self.state.lock();
        if state.modes.secret {
            '@'
        } else if state.modes.private {
            '*'
        } else {
            '='
        }
    }
}
