//! Gateway - TCP listener that accepts incoming connections.
//!
//! The Gateway binds the client port and spawns a [`Connection`] task per
//! accepted socket until the server goes down.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info, instrument};

use crate::handlers::Dispatcher;
use crate::network::Connection;
use crate::state::ServerContext;

/// The Gateway accepts incoming TCP connections and spawns handlers.
pub struct Gateway {
    listener: TcpListener,
    server: Arc<ServerContext>,
    dispatcher: Arc<Dispatcher>,
}

impl Gateway {
    /// Bind the gateway to `addr`.
    pub async fn bind(
        addr: SocketAddr,
        server: Arc<ServerContext>,
        dispatcher: Arc<Dispatcher>,
    ) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!(addr = %listener.local_addr()?, "Listener bound");
        Ok(Self {
            listener,
            server,
            dispatcher,
        })
    }

    /// The bound address; useful when binding port 0.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until the server goes down.
    #[instrument(skip(self), name = "gateway")]
    pub async fn run(self) -> anyhow::Result<()> {
        let shutdown = self.server.shutdown_token();
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Server going down, no longer accepting");
                    break;
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, addr)) => {
                        let id = self.server.next_link_id();
                        info!(link = id, %addr, "Connection accepted");
                        let connection = Connection::new(
                            id,
                            stream,
                            addr,
                            Arc::clone(&self.server),
                            Arc::clone(&self.dispatcher),
                        );
                        tokio::spawn(connection.run());
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to accept connection");
                    }
                },
            }
        }
        Ok(())
    }
}
