//! Test server management.
//!
//! Runs a gateway inside the test's own runtime on an ephemeral port.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use parlance::config::Config;
use parlance::handlers::Dispatcher;
use parlance::network::Gateway;
use parlance::state::ServerContext;
use tempfile::NamedTempFile;
use tokio::task::JoinHandle;

/// A test server instance.
pub struct TestServer {
    pub context: Arc<ServerContext>,
    addr: SocketAddr,
    config_file: NamedTempFile,
    task: JoinHandle<anyhow::Result<()>>,
}

impl TestServer {
    /// Write the test config to a temp file and start a gateway for it.
    pub async fn spawn() -> anyhow::Result<Self> {
        let config_file = NamedTempFile::new()?;
        std::fs::write(config_file.path(), super::test_config("127.0.0.1:0"))?;
        let config = Config::load(config_file.path())?;

        let context = Arc::new(ServerContext::new(
            config.clone(),
            Some(config_file.path().to_path_buf()),
        ));
        let gateway = Gateway::bind(
            config.listen.address,
            Arc::clone(&context),
            Arc::new(Dispatcher::new()),
        )
        .await?;
        let addr = gateway.local_addr()?;
        let task = tokio::spawn(gateway.run());

        Ok(Self {
            context,
            addr,
            config_file,
            task,
        })
    }

    pub fn address(&self) -> String {
        self.addr.to_string()
    }

    /// The file REHASH reads.
    pub fn config_path(&self) -> &Path {
        self.config_file.path()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.context.shut_down(false);
        self.task.abort();
    }
}
