//! Queue capacities, protocol limits and connection deadlines.

use serde::Deserialize;

/// Per-connection and protocol limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LimitsConfig {
    /// Inbound lines buffered between the socket reader and the command
    /// processor. A full queue stalls the reader (default: 32).
    #[serde(default = "default_input_queue")]
    pub input_queue: usize,
    /// Outbound lines buffered for the socket writer. Lines sent to a full
    /// queue are dropped (default: 512).
    #[serde(default = "default_output_queue")]
    pub output_queue: usize,
    /// WHOWAS entries remembered across all nicknames (default: 256).
    #[serde(default = "default_whowas_history")]
    pub whowas_history: usize,
    /// Channels a single user may be in (default: 20).
    #[serde(default = "default_max_channels")]
    pub max_channels: usize,
    /// Longest accepted nickname (default: 30).
    #[serde(default = "default_nick_length")]
    pub nick_length: usize,
    /// Longest accepted inbound line in bytes, CRLF included (default: 512).
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            input_queue: default_input_queue(),
            output_queue: default_output_queue(),
            whowas_history: default_whowas_history(),
            max_channels: default_max_channels(),
            nick_length: default_nick_length(),
            max_line_length: default_max_line_length(),
        }
    }
}

fn default_input_queue() -> usize {
    32
}

fn default_output_queue() -> usize {
    512
}

fn default_whowas_history() -> usize {
    256
}

fn default_max_channels() -> usize {
    20
}

fn default_nick_length() -> usize {
    30
}

fn default_max_line_length() -> usize {
    parlance_proto::MAX_LINE_LENGTH
}

/// Keepalive and registration deadlines, in seconds.
///
/// - `ping`: idle time before the server sends PING (default: 90)
/// - `timeout`: time to wait for any traffic after that PING (default: 120)
/// - `registration`: time allowed to finish NICK/USER or SERVICE (default: 60)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimeoutsConfig {
    #[serde(default = "default_ping")]
    pub ping: u64,
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default = "default_registration")]
    pub registration: u64,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            ping: default_ping(),
            timeout: default_timeout(),
            registration: default_registration(),
        }
    }
}

fn default_ping() -> u64 {
    90
}

fn default_timeout() -> u64 {
    120
}

fn default_registration() -> u64 {
    60
}
