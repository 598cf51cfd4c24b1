//! User-related types and state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use parlance_proto::{ModeOp, Prefix, UserMode, irc_to_lower};

use super::link::Link;

/// A client connection speaking as a user.
///
/// Created on accept with no nickname; becomes visible in the directory
/// once NICK and USER have both been received.
#[derive(Debug)]
pub struct User {
    link: Arc<Link>,
    server: String,
    info: RwLock<UserInfo>,
}

/// Mutable identity and status of a user.
#[derive(Debug, Clone)]
pub struct UserInfo {
    pub nickname: Option<String>,
    pub username: Option<String>,
    pub realname: String,
    pub modes: UserModes,
    /// Away message if user is marked away.
    pub away: Option<String>,
    /// Channels this user is in (folded names), in join order.
    pub channels: IndexSet<String>,
    pub signon: DateTime<Utc>,
}

/// User modes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UserModes {
    pub away: bool,           // +a
    pub invisible: bool,      // +i
    pub wallops: bool,        // +w
    pub restricted: bool,     // +r
    pub oper: bool,           // +o
    pub local_oper: bool,     // +O
    pub server_notices: bool, // +s
}

impl UserModes {
    /// Whether a flag is set.
    pub fn has(&self, mode: UserMode) -> bool {
        match mode {
            UserMode::Away => self.away,
            UserMode::Invisible => self.invisible,
            UserMode::Wallops => self.wallops,
            UserMode::Restricted => self.restricted,
            UserMode::Oper => self.oper,
            UserMode::LocalOper => self.local_oper,
            UserMode::ServerNotices => self.server_notices,
        }
    }

    /// Apply an add or remove. Returns whether the flag changed.
    pub fn apply(&mut self, mode: UserMode, op: ModeOp) -> bool {
        let value = match op {
            ModeOp::Add => true,
            ModeOp::Remove => false,
            ModeOp::List => return false,
        };
        let flag = match mode {
            UserMode::Away => &mut self.away,
            UserMode::Invisible => &mut self.invisible,
            UserMode::Wallops => &mut self.wallops,
            UserMode::Restricted => &mut self.restricted,
            UserMode::Oper => &mut self.oper,
            UserMode::LocalOper => &mut self.local_oper,
            UserMode::ServerNotices => &mut self.server_notices,
        };
        std::mem::replace(flag, value) != value
    }

    /// Convert modes to a string like "+iw".
    pub fn as_mode_string(&self) -> String {
        let mut s = String::from("+");
        s.extend(
            UserMode::ALL
                .into_iter()
                .filter(|m| self.has(*m))
                .map(|m| m.to_string()),
        );
        s
    }

    /// Either operator flag.
    pub fn is_operator(&self) -> bool {
        self.oper || self.local_oper
    }
}

impl User {
    pub fn new(link: Arc<Link>, server: impl Into<String>) -> Self {
        Self {
            link,
            server: server.into(),
            info: RwLock::new(UserInfo {
                nickname: None,
                username: None,
                realname: String::new(),
                modes: UserModes::default(),
                away: None,
                channels: IndexSet::new(),
                signon: Utc::now(),
            }),
        }
    }

    pub fn link(&self) -> &Arc<Link> {
        &self.link
    }

    /// Name of the server the user is connected to.
    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn hostname(&self) -> &str {
        self.link.hostname()
    }

    pub fn info(&self) -> RwLockReadGuard<'_, UserInfo> {
        self.info.read()
    }

    pub fn info_mut(&self) -> RwLockWriteGuard<'_, UserInfo> {
        self.info.write()
    }

    /// Current nickname, or `*` before NICK.
    pub fn nickname(&self) -> String {
        self.info
            .read()
            .nickname
            .clone()
            .unwrap_or_else(|| "*".to_string())
    }

    /// Folded nickname, the directory key.
    pub fn folded_nickname(&self) -> Option<String> {
        self.info.read().nickname.as_deref().map(irc_to_lower)
    }

    pub fn username(&self) -> String {
        self.info.read().username.clone().unwrap_or_default()
    }

    pub fn modes(&self) -> UserModes {
        self.info.read().modes
    }

    pub fn is_operator(&self) -> bool {
        self.info.read().modes.is_operator()
    }

    pub fn is_restricted(&self) -> bool {
        self.info.read().modes.restricted
    }

    /// Both NICK and USER have been seen.
    pub fn has_identity(&self) -> bool {
        let info = self.info.read();
        info.nickname.is_some() && info.username.is_some()
    }

    /// `nick!user@host` as a prefix.
    pub fn prefix(&self) -> Prefix {
        let info = self.info.read();
        Prefix::user(
            info.nickname.as_deref().unwrap_or("*"),
            info.username.as_deref().unwrap_or("*"),
            self.link.hostname(),
        )
    }

    /// `nick!user@host` for mask matching.
    pub fn mask(&self) -> String {
        self.prefix().to_string()
    }

    pub fn channel_count(&self) -> usize {
        self.info.read().channels.len()
    }

    /// Snapshot for WHOWAS.
    pub fn dry(&self) -> Option<DriedUser> {
        let info = self.info.read();
        Some(DriedUser {
            nickname: info.nickname.clone()?,
            username: info.username.clone().unwrap_or_default(),
            hostname: self.link.hostname().to_string(),
            realname: info.realname.clone(),
            server: self.server.clone(),
            signoff: Utc::now(),
        })
    }
}

/// An entry in the WHOWAS history for a disconnected user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriedUser {
    pub nickname: String,
    pub username: String,
    pub hostname: String,
    pub realname: String,
    pub server: String,
    pub signoff: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_string_follows_flag_order() {
        let mut modes = UserModes::default();
        assert_eq!(modes.as_mode_string(), "+");
        modes.apply(UserMode::Wallops, ModeOp::Add);
        modes.apply(UserMode::Invisible, ModeOp::Add);
        modes.apply(UserMode::Oper, ModeOp::Add);
        assert_eq!(modes.as_mode_string(), "+iwo");
    }

    #[test]
    fn apply_reports_changes_only() {
        let mut modes = UserModes::default();
        assert!(modes.apply(UserMode::Invisible, ModeOp::Add));
        assert!(!modes.apply(UserMode::Invisible, ModeOp::Add));
        assert!(modes.apply(UserMode::Invisible, ModeOp::Remove));
        assert!(!modes.apply(UserMode::Invisible, ModeOp::List));
    }
}
