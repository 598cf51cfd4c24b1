//! Core configuration types and loading.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::limits::{LimitsConfig, TimeoutsConfig};
use super::oper::OperBlock;
use super::validation::{ValidationError, validate};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server identity.
    pub server: ServerConfig,
    /// Client listener.
    pub listen: ListenConfig,
    /// Message of the Day.
    #[serde(default)]
    pub motd: MotdConfig,
    /// INFO text.
    #[serde(default)]
    pub info: InfoConfig,
    /// Operator blocks.
    #[serde(default)]
    pub oper: Vec<OperBlock>,
    /// Queue capacities and protocol limits.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Keepalive and registration deadlines.
    #[serde(default)]
    pub timeouts: TimeoutsConfig,
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        validate(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name (e.g., "irc.example.org").
    pub name: String,
    /// Network name, advertised in RPL_ISUPPORT and RPL_WELCOME.
    #[serde(default = "default_network")]
    pub network: String,
    /// Server description, shown in LINKS and WHOIS.
    #[serde(default = "default_description")]
    pub description: String,
    /// Version string override. Defaults to the crate version.
    #[serde(default)]
    pub version: Option<String>,
    /// RPL_ADMINLOC1, typically the organization.
    #[serde(default)]
    pub admin_loc1: Option<String>,
    /// RPL_ADMINLOC2, typically the location.
    #[serde(default)]
    pub admin_loc2: Option<String>,
    /// RPL_ADMINEMAIL.
    #[serde(default)]
    pub admin_email: Option<String>,
}

impl ServerConfig {
    /// The version string sent in RPL_YOURHOST, RPL_MYINFO and RPL_VERSION.
    pub fn version(&self) -> String {
        self.version
            .clone()
            .unwrap_or_else(|| format!("parlance-{}", env!("CARGO_PKG_VERSION")))
    }

    /// Whether any ADMIN line is configured.
    pub fn has_admin_info(&self) -> bool {
        self.admin_loc1.is_some() || self.admin_loc2.is_some() || self.admin_email.is_some()
    }
}

fn default_network() -> String {
    "Parlance".to_string()
}

fn default_description() -> String {
    "Parlance IRC server".to_string()
}

/// Client listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Address to bind, e.g. "0.0.0.0:6667".
    pub address: SocketAddr,
}

/// Message of the Day configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MotdConfig {
    /// Path to a MOTD file (one line per MOTD line).
    pub file: Option<PathBuf>,
    /// Inline MOTD lines, used when `file` is not set or unreadable.
    #[serde(default)]
    pub lines: Vec<String>,
}

impl MotdConfig {
    /// Load MOTD lines. `None` means there is no MOTD (ERR_NOMOTD).
    pub fn load_lines(&self) -> Option<Vec<String>> {
        if let Some(ref path) = self.file {
            match std::fs::read_to_string(path) {
                Ok(content) => return Some(content.lines().map(str::to_string).collect()),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to read MOTD file");
                }
            }
        }
        if self.lines.is_empty() {
            None
        } else {
            Some(self.lines.clone())
        }
    }
}

/// INFO command text.
#[derive(Debug, Clone, Deserialize)]
pub struct InfoConfig {
    /// Lines returned as RPL_INFO.
    #[serde(default = "default_info_lines")]
    pub lines: Vec<String>,
}

impl Default for InfoConfig {
    fn default() -> Self {
        Self {
            lines: default_info_lines(),
        }
    }
}

fn default_info_lines() -> Vec<String> {
    vec![
        format!("parlance {}", env!("CARGO_PKG_VERSION")),
        "An RFC 2812 IRC server written in Rust.".to_string(),
    ]
}
