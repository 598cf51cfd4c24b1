//! The directory of live named entities.
//!
//! One `RwLock` guards every table, so registration, renames and channel
//! creation/removal are atomic with respect to each other. Keys are folded
//! with RFC 1459 case mapping; each table iterates in insertion order.

use std::collections::VecDeque;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use parlance_proto::irc_to_lower;
use tracing::debug;

use super::channel::{Channel, MemberModes};
use super::service::{Server, Service};
use super::user::{DriedUser, User};
use crate::error::{ChannelError, RegistryError};

#[derive(Debug, Default)]
struct Tables {
    /// Includes nicknames reserved by connections still registering.
    users: IndexMap<String, Arc<User>>,
    services: IndexMap<String, Arc<Service>>,
    channels: IndexMap<String, Arc<Channel>>,
    servers: IndexMap<String, Arc<Server>>,
    /// Newest last.
    whowas: VecDeque<DriedUser>,
}

impl Tables {
    fn nick_taken(&self, key: &str, by: &Arc<User>) -> bool {
        self.services.contains_key(key)
            || self
                .users
                .get(key)
                .is_some_and(|holder| !Arc::ptr_eq(holder, by))
    }
}

/// Outcome of a successful JOIN.
#[derive(Debug)]
pub struct Joined {
    pub channel: Arc<Channel>,
    pub created: bool,
}

/// Entity counts for LUSERS.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Census {
    pub visible: usize,
    pub invisible: usize,
    pub services: usize,
    pub servers: usize,
    pub operators: usize,
    pub channels: usize,
}

/// Process-wide table of users, services, channels and servers.
#[derive(Debug)]
pub struct Directory {
    tables: RwLock<Tables>,
    history: usize,
}

impl Directory {
    /// `history` bounds the WHOWAS ring.
    pub fn new(history: usize) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            history,
        }
    }

    /// Register or rename a user's nickname.
    ///
    /// The new name is claimed before the old one is released, all under
    /// one write lock, so a failed rename leaves the old entry in place.
    pub fn claim_nick(&self, user: &Arc<User>, nick: &str) -> Result<(), RegistryError> {
        let key = irc_to_lower(nick);
        let mut tables = self.tables.write();
        if tables.nick_taken(&key, user) {
            return Err(RegistryError::NicknameInUse(nick.to_string()));
        }
        let old = user.folded_nickname();
        if old.as_deref() != Some(key.as_str()) {
            tables.users.insert(key, Arc::clone(user));
            if let Some(old) = old {
                tables.users.shift_remove(&old);
            }
        }
        user.info_mut().nickname = Some(nick.to_string());
        Ok(())
    }

    /// Turn a connection that reserved a nickname through NICK into a
    /// service. The service name is checked and inserted before the user
    /// reservation is dropped, under one write lock; on failure the
    /// reservation stays.
    pub fn promote_to_service(&self, user: &Arc<User>, service: Arc<Service>) -> Result<(), RegistryError> {
        let key = irc_to_lower(service.nickname());
        let mut tables = self.tables.write();
        if tables.nick_taken(&key, user) {
            return Err(RegistryError::NicknameInUse(service.nickname().to_string()));
        }
        tables.services.insert(key, service);
        if let Some(old) = user.folded_nickname()
            && tables.users.get(&old).is_some_and(|holder| Arc::ptr_eq(holder, user))
        {
            tables.users.shift_remove(&old);
        }
        Ok(())
    }

    pub fn register_server(&self, server: Arc<Server>) -> Result<(), RegistryError> {
        let key = irc_to_lower(server.name());
        let mut tables = self.tables.write();
        if tables.servers.contains_key(&key) {
            return Err(RegistryError::ServerExists(server.name().to_string()));
        }
        tables.servers.insert(key, server);
        Ok(())
    }

    pub fn unregister_service(&self, service: &Service) {
        self.tables
            .write()
            .services
            .shift_remove(&irc_to_lower(service.nickname()));
    }

    pub fn unregister_server(&self, name: &str) -> Option<Arc<Server>> {
        self.tables.write().servers.shift_remove(&irc_to_lower(name))
    }

    /// Remove a user from every channel and from the nickname table. A
    /// registered user leaves a WHOWAS entry behind.
    pub fn unregister_user(&self, user: &Arc<User>) {
        let mut tables = self.tables.write();
        let id = user.link().id();
        let joined: Vec<String> = user.info_mut().channels.drain(..).collect();
        for channel in tables.channels.values() {
            channel.lock().invited.remove(&id);
        }
        for name in joined {
            let Some(channel) = tables.channels.get(&name).cloned() else {
                continue;
            };
            let mut state = channel.lock();
            state.remove_member(id);
            if state.members.is_empty() {
                drop(state);
                tables.channels.shift_remove(&name);
                debug!(channel = %channel.name(), "Channel removed");
            }
        }
        let Some(key) = user.folded_nickname() else {
            return;
        };
        if tables
            .users
            .get(&key)
            .is_some_and(|holder| Arc::ptr_eq(holder, user))
        {
            tables.users.shift_remove(&key);
            if user.has_identity() {
                if let Some(dried) = user.dry() {
                    tables.whowas.push_back(dried);
                    while tables.whowas.len() > self.history {
                        tables.whowas.pop_front();
                    }
                }
            }
        }
    }

    /// A registered user by nickname.
    pub fn find_user(&self, nick: &str) -> Option<Arc<User>> {
        self.tables
            .read()
            .users
            .get(&irc_to_lower(nick))
            .filter(|u| u.link().is_operational())
            .cloned()
    }

    pub fn find_service(&self, nick: &str) -> Option<Arc<Service>> {
        self.tables.read().services.get(&irc_to_lower(nick)).cloned()
    }

    pub fn find_server(&self, name: &str) -> Option<Arc<Server>> {
        self.tables.read().servers.get(&irc_to_lower(name)).cloned()
    }

    pub fn find_channel(&self, name: &str) -> Option<Arc<Channel>> {
        self.tables.read().channels.get(&irc_to_lower(name)).cloned()
    }

    /// Registered users in registration order.
    pub fn users(&self) -> Vec<Arc<User>> {
        self.tables
            .read()
            .users
            .values()
            .filter(|u| u.link().is_operational())
            .cloned()
            .collect()
    }

    pub fn services(&self) -> Vec<Arc<Service>> {
        self.tables.read().services.values().cloned().collect()
    }

    pub fn servers(&self) -> Vec<Arc<Server>> {
        self.tables.read().servers.values().cloned().collect()
    }

    /// Channels in creation order.
    pub fn channels(&self) -> Vec<Arc<Channel>> {
        self.tables.read().channels.values().cloned().collect()
    }

    /// Join `user` to `name`, creating the channel with the user as operator
    /// if it does not exist yet. Joining a channel twice is a no-op
    /// reported as `Ok(None)`.
    pub fn join(
        &self,
        user: &Arc<User>,
        name: &str,
        key: Option<&str>,
        max_channels: usize,
    ) -> Result<Option<Joined>, ChannelError> {
        let folded = irc_to_lower(name);
        let mut tables = self.tables.write();
        let (channel, created) = match tables.channels.get(&folded) {
            Some(channel) => (Arc::clone(channel), false),
            None => (Arc::new(Channel::new(name)), true),
        };

        let mut state = channel.lock();
        if state.is_member(user.link().id()) {
            return Ok(None);
        }
        if user.channel_count() >= max_channels {
            return Err(ChannelError::TooManyChannels);
        }
        if !created {
            state.check_join(user, key)?;
        }
        let modes = MemberModes {
            op: created,
            ..Default::default()
        };
        state.add_member(Arc::clone(user), modes);
        user.info_mut().channels.insert(folded.clone());
        drop(state);

        if created {
            tables.channels.insert(folded, Arc::clone(&channel));
        }
        Ok(Some(Joined { channel, created }))
    }

    /// Remove `user` from `channel`, deleting the channel when it empties.
    pub fn leave(&self, user: &User, channel: &Arc<Channel>) -> Result<(), ChannelError> {
        let folded = channel.folded_name();
        let mut tables = self.tables.write();
        let mut state = channel.lock();
        if state.remove_member(user.link().id()).is_none() {
            return Err(ChannelError::NotOnChannel);
        }
        user.info_mut().channels.shift_remove(&folded);
        if state.members.is_empty() {
            drop(state);
            if tables
                .channels
                .get(&folded)
                .is_some_and(|c| Arc::ptr_eq(c, channel))
            {
                tables.channels.shift_remove(&folded);
                debug!(channel = %channel.name(), "Channel removed");
            }
        }
        Ok(())
    }

    /// WHOWAS entries for `nick`, newest first.
    pub fn whowas(&self, nick: &str, count: Option<usize>) -> Vec<DriedUser> {
        let folded = irc_to_lower(nick);
        self.tables
            .read()
            .whowas
            .iter()
            .rev()
            .filter(|d| irc_to_lower(&d.nickname) == folded)
            .take(count.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    pub fn census(&self) -> Census {
        let tables = self.tables.read();
        let mut census = Census {
            services: tables.services.len(),
            servers: tables.servers.len(),
            channels: tables.channels.len(),
            ..Default::default()
        };
        for user in tables.users.values().filter(|u| u.link().is_operational()) {
            let modes = user.modes();
            if modes.invisible {
                census.invisible += 1;
            } else {
                census.visible += 1;
            }
            if modes.is_operator() {
                census.operators += 1;
            }
        }
        census
    }
}
