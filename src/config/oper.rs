//! Operator block configuration.

use parlance_proto::mask;
use serde::Deserialize;

/// An `[[oper]]` block: who may use OPER, and from where.
#[derive(Debug, Clone, Deserialize)]
pub struct OperBlock {
    /// Name given as the first OPER parameter.
    pub name: String,
    /// Plaintext password or a bcrypt hash (`$2...`).
    pub password: String,
    /// Optional `user@host` mask the connection must match.
    #[serde(default)]
    pub hostmask: Option<String>,
}

impl OperBlock {
    /// Verify the provided password against the stored password (plaintext or bcrypt).
    pub fn verify_password(&self, password: &str) -> bool {
        if self.password.starts_with("$2") {
            bcrypt::verify(password, &self.password).unwrap_or(false)
        } else {
            self.password == password
        }
    }

    /// Whether a connection from `user@host` may use this block.
    pub fn allows(&self, user: &str, host: &str) -> bool {
        match &self.hostmask {
            None => true,
            Some(pattern) => mask::matches(pattern, &format!("{user}@{host}")),
        }
    }
}
