//! The shared server context.
//!
//! Everything that would otherwise be a process-wide global lives here:
//! server identity, the hot configuration, the directory, the live link
//! table and the shutdown flags. One `Arc<ServerContext>` is created at
//! startup and handed to every connection.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::{RwLock, RwLockReadGuard};
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::directory::Directory;
use super::link::{Link, LinkId, LinkState};
use super::service::Server;
use crate::config::{Config, ConfigError, LimitsConfig};
use crate::router::Router;

/// Static identity of this server.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub network: String,
    pub description: String,
    pub version: String,
    pub created: DateTime<Utc>,
}

/// State shared by every connection.
#[derive(Debug)]
pub struct ServerContext {
    info: ServerInfo,
    started: Instant,
    config: RwLock<Config>,
    config_path: Option<PathBuf>,
    motd: RwLock<Option<Vec<String>>>,
    directory: Directory,
    links: DashMap<LinkId, Arc<Link>>,
    next_link: AtomicU64,
    down: AtomicBool,
    restart: AtomicBool,
    shutdown: CancellationToken,
    local: Arc<Server>,
}

impl ServerContext {
    /// Build the context for `config`. `path` is where REHASH reloads from.
    pub fn new(config: Config, path: Option<PathBuf>) -> Self {
        let info = ServerInfo {
            name: config.server.name.clone(),
            network: config.server.network.clone(),
            description: config.server.description.clone(),
            version: config.server.version(),
            created: Utc::now(),
        };
        let local = Arc::new(Server::new(&*info.name, 0, &*info.description));
        let directory = Directory::new(config.limits.whowas_history);
        // The directory is empty, so the local name cannot clash.
        let _ = directory.register_server(Arc::clone(&local));
        let motd = config.motd.load_lines();

        Self {
            info,
            started: Instant::now(),
            config: RwLock::new(config),
            config_path: path,
            motd: RwLock::new(motd),
            directory,
            links: DashMap::new(),
            next_link: AtomicU64::new(1),
            down: AtomicBool::new(false),
            restart: AtomicBool::new(false),
            shutdown: CancellationToken::new(),
            local,
        }
    }

    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    /// This server's name, the prefix of every server-originated line.
    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn local(&self) -> &Arc<Server> {
        &self.local
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn router(&self) -> Router<'_> {
        Router::new(self)
    }

    pub fn config(&self) -> RwLockReadGuard<'_, Config> {
        self.config.read()
    }

    pub fn limits(&self) -> LimitsConfig {
        self.config.read().limits.clone()
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// MOTD lines, `None` when no MOTD is configured or the file is missing.
    pub fn motd(&self) -> Option<Vec<String>> {
        self.motd.read().clone()
    }

    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    /// Reload the configuration file. Server identity and the listen
    /// address keep their startup values.
    pub fn rehash(&self) -> Result<(), ConfigError> {
        let Some(path) = &self.config_path else {
            return Ok(());
        };
        let fresh = Config::load(path)?;
        *self.motd.write() = fresh.motd.load_lines();
        let mut config = self.config.write();
        let server = config.server.clone();
        let listen = config.listen.clone();
        *config = Config {
            server: crate::config::ServerConfig {
                admin_loc1: fresh.server.admin_loc1.clone(),
                admin_loc2: fresh.server.admin_loc2.clone(),
                admin_email: fresh.server.admin_email.clone(),
                ..server
            },
            listen,
            ..fresh
        };
        info!(path = %path.display(), "Configuration reloaded");
        Ok(())
    }

    /// Allocate an id for a new connection.
    pub fn next_link_id(&self) -> LinkId {
        self.next_link.fetch_add(1, Ordering::Relaxed)
    }

    pub fn register_link(&self, link: Arc<Link>) {
        self.links.insert(link.id(), link);
    }

    pub fn remove_link(&self, id: LinkId) -> Option<Arc<Link>> {
        self.links.remove(&id).map(|(_, link)| link)
    }

    /// Every live connection, in no particular order.
    pub fn links(&self) -> Vec<Arc<Link>> {
        self.links.iter().map(|entry| Arc::clone(entry.value())).collect()
    }

    /// Connections that have not finished registering.
    pub fn unknown_connections(&self) -> usize {
        self.links
            .iter()
            .filter(|entry| entry.value().state() == LinkState::New)
            .count()
    }

    /// Raise the down flag and stop accepting; `restart` asks the binary to
    /// run the server loop again.
    pub fn shut_down(&self, restart: bool) {
        self.restart.store(restart, Ordering::SeqCst);
        self.down.store(true, Ordering::SeqCst);
        self.shutdown.cancel();
    }

    pub fn is_down(&self) -> bool {
        self.down.load(Ordering::SeqCst)
    }

    pub fn wants_restart(&self) -> bool {
        self.restart.load(Ordering::SeqCst)
    }

    /// Cancelled once the server goes down.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }
}
