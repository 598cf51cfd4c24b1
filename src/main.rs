//! parlanced - the parlance IRC daemon.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use parlance::config::Config;
use parlance::handlers::Dispatcher;
use parlance::network::Gateway;
use parlance::state::ServerContext;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// How long a shutdown waits for connections to finish.
const DRAIN_GRACE: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let logs = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true);
    if std::env::var("PARLANCE_LOG_FORMAT").is_ok_and(|format| format == "json") {
        logs.json().init();
    } else {
        logs.init();
    }

    let config_path = PathBuf::from(
        std::env::args()
            .nth(1)
            .unwrap_or_else(|| "parlance.toml".to_string()),
    );

    loop {
        let config = Config::load(&config_path).map_err(|e| {
            error!(path = %config_path.display(), error = %e, "Failed to load config");
            e
        })?;
        info!(
            server = %config.server.name,
            network = %config.server.network,
            listen = %config.listen.address,
            "Starting parlance"
        );

        let addr = config.listen.address;
        let server = Arc::new(ServerContext::new(config, Some(config_path.clone())));
        let dispatcher = Arc::new(Dispatcher::new());
        let gateway = Gateway::bind(addr, Arc::clone(&server), dispatcher).await?;

        tokio::select! {
            result = gateway.run() => result?,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                server.shut_down(false);
            }
        }

        // Connections flush their ERROR lines on the way out.
        let drained = tokio::time::timeout(DRAIN_GRACE, async {
            while !server.links().is_empty() {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
        })
        .await;
        if drained.is_err() {
            warn!(remaining = server.links().len(), "Connections still open after grace period");
        }

        if server.wants_restart() {
            info!("Restarting");
            continue;
        }
        info!("Server stopped");
        return Ok(());
    }
}
