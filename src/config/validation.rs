//! Configuration validation.
//!
//! Catches values that would make the server misbehave rather than fail
//! to start: zero-capacity queues, impossible nick lengths, a server name
//! that clients could not parse back.

use parlance_proto::Grammar;
use parlance_proto::grammar::NICKNAME_MAX;
use thiserror::Error;

use super::Config;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.name must be a host name, got '{0}'")]
    InvalidServerName(String),
    #[error("server.network must not be empty")]
    MissingNetworkName,
    #[error("limits.{0} must be greater than zero")]
    ZeroLimit(&'static str),
    #[error("limits.nick_length must be between 1 and 30, got {0}")]
    NickLength(usize),
    #[error("limits.max_line_length must be at least 512, got {0}")]
    LineLength(usize),
    #[error("oper block '{0}' has an empty password")]
    EmptyOperPassword(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !Grammar::Host.is_match(&config.server.name) {
        errors.push(ValidationError::InvalidServerName(config.server.name.clone()));
    }
    if config.server.network.is_empty() {
        errors.push(ValidationError::MissingNetworkName);
    }

    let limits = &config.limits;
    for (name, value) in [
        ("input_queue", limits.input_queue),
        ("output_queue", limits.output_queue),
        ("whowas_history", limits.whowas_history),
        ("max_channels", limits.max_channels),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroLimit(name));
        }
    }
    if !(1..=NICKNAME_MAX).contains(&limits.nick_length) {
        errors.push(ValidationError::NickLength(limits.nick_length));
    }
    if limits.max_line_length < parlance_proto::MAX_LINE_LENGTH {
        errors.push(ValidationError::LineLength(limits.max_line_length));
    }

    for oper in &config.oper {
        if oper.password.is_empty() {
            errors.push(ValidationError::EmptyOperPassword(oper.name.clone()));
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
