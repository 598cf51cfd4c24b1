//! Configuration loading and management.
//!
//! - [`types`]: the top-level [`Config`] plus server, listen, MOTD and INFO sections
//! - [`limits`]: queue capacities and protocol limits ([`LimitsConfig`], [`TimeoutsConfig`])
//! - [`oper`]: operator blocks ([`OperBlock`])
//! - [`validation`]: startup sanity checks

mod limits;
mod oper;
mod types;
mod validation;

pub use limits::{LimitsConfig, TimeoutsConfig};
pub use oper::OperBlock;
pub use types::{Config, ConfigError, InfoConfig, ListenConfig, MotdConfig, ServerConfig};
pub use validation::{ValidationError, validate};
