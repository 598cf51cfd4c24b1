#![allow(dead_code)]

//! Integration test common infrastructure.
//!
//! - [`Engine`]: drives the dispatcher directly with in-memory connections
//! - [`TestServer`]: a real gateway on an ephemeral port
//! - [`TestClient`]: a line-based socket client

pub mod client;
pub mod engine;
pub mod server;

#[allow(unused_imports)]
pub use client::TestClient;
#[allow(unused_imports)]
pub use engine::{Engine, Peer, numeric_code};
#[allow(unused_imports)]
pub use server::TestServer;

/// Configuration shared by both harnesses. `{address}` is substituted.
pub const TEST_CONFIG: &str = r#"
[server]
name = "irc.test"
network = "TestNet"
description = "Test IRC Server"
admin_loc1 = "Test Lab"
admin_email = "admin@irc.test"

[listen]
address = "{address}"

[motd]
lines = ["Test Server"]

[[oper]]
name = "root"
password = "hunter2"
hostmask = "*@127.0.0.1"

[timeouts]
registration = 2
"#;

/// [`TEST_CONFIG`] bound to `address`.
pub fn test_config(address: &str) -> String {
    TEST_CONFIG.replace("{address}", address)
}
