//! Connection - drives one client socket.
//!
//! Three activities per client, wired through bounded queues:
//!
//! ```text
//!  socket ─▶ reader ──(input queue, blocking)──▶ processor ─▶ Dispatcher
//!                                                               │
//!  socket ◀─ writer ◀──(output queue, lossy)── Router ◀─────────┘
//! ```
//!
//! The reader and writer are spawned tasks; the processor runs in the
//! connection task itself, together with the keepalive timers.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::{SinkExt, StreamExt};
use parlance_proto::Message;
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{Instrument, debug, info, warn};

use super::codec::IrcLineCodec;
use crate::handlers::{Dispatcher, disconnect};
use crate::state::{CommandReport, Link, LinkId, LinkState, ServerContext, Talker, User};
use crate::telemetry::spans;

/// How often the keepalive and registration deadlines are checked.
const TICK: Duration = Duration::from_secs(1);

/// What the reader hands to the processor.
enum Inbound {
    Line(String),
    /// The socket is done; the reason ends up in QUIT and ERROR.
    Closed(String),
}

/// A client connection handler.
pub struct Connection {
    id: LinkId,
    stream: TcpStream,
    addr: SocketAddr,
    server: Arc<ServerContext>,
    dispatcher: Arc<Dispatcher>,
}

impl Connection {
    pub fn new(
        id: LinkId,
        stream: TcpStream,
        addr: SocketAddr,
        server: Arc<ServerContext>,
        dispatcher: Arc<Dispatcher>,
    ) -> Self {
        Self {
            id,
            stream,
            addr,
            server,
            dispatcher,
        }
    }

    /// Serve the client until it quits, is killed, times out or the server
    /// goes down.
    pub async fn run(self) {
        let span = spans::connection(self.id, &self.addr.to_string());
        self.serve().instrument(span).await;
    }

    async fn serve(self) {
        let Self {
            id,
            stream,
            addr,
            server,
            dispatcher,
        } = self;
        let limits = server.limits();
        let timeouts = server.config().timeouts.clone();
        let max_line = limits.max_line_length.saturating_sub(2);

        let (out_tx, out_rx) = mpsc::channel(limits.output_queue.max(1));
        let (in_tx, mut in_rx) = mpsc::channel(limits.input_queue.max(1));

        let link = Arc::new(Link::new(id, Some(addr), addr.ip().to_string(), out_tx));
        server.register_link(Arc::clone(&link));
        let mut talker = Talker::User(Arc::new(User::new(Arc::clone(&link), server.name())));

        let (read_half, write_half) = stream.into_split();
        let reader = tokio::spawn(
            read_lines(FramedRead::new(read_half, IrcLineCodec::new(max_line)), in_tx)
                .in_current_span(),
        );
        let writer = tokio::spawn(
            write_lines(
                FramedWrite::new(write_half, IrcLineCodec::new(max_line)),
                out_rx,
                Arc::clone(&link),
            )
            .in_current_span(),
        );

        let ping_after = Duration::from_secs(timeouts.ping);
        let pong_within = Duration::from_secs(timeouts.timeout);
        let register_within = Duration::from_secs(timeouts.registration);
        let shutdown = server.shutdown_token();
        let mut ticker = tokio::time::interval(TICK);
        // First tick fires immediately.
        ticker.tick().await;
        let mut ping_sent: Option<Instant> = None;

        let reason = loop {
            tokio::select! {
                inbound = in_rx.recv() => match inbound {
                    Some(Inbound::Line(line)) => {
                        link.record_inbound(line.len());
                        ping_sent = None;
                        if !line.is_empty() {
                            dispatcher.dispatch(&server, &mut talker, &line);
                        }
                        if link.is_closing() {
                            break link.close_reason().unwrap_or_default();
                        }
                    }
                    Some(Inbound::Closed(reason)) => break reason,
                    None => break "Connection closed".to_string(),
                },
                _ = link.closed() => {
                    break link.close_reason().unwrap_or_default();
                }
                _ = shutdown.cancelled() => {
                    break "Server shutting down".to_string();
                }
                _ = ticker.tick() => {
                    if link.state() == LinkState::New && link.opened().elapsed() >= register_within {
                        break "Registration timeout".to_string();
                    }
                    let idle = link.last_seen().elapsed();
                    match ping_sent {
                        Some(sent) if sent.elapsed() >= pong_within => {
                            break format!("Ping timeout: {} seconds", idle.as_secs());
                        }
                        None if idle >= ping_after => {
                            debug!(idle_secs = idle.as_secs(), "Sending PING to idle client");
                            server.router().send(&talker, &Message::ping(server.name()));
                            ping_sent = Some(Instant::now());
                        }
                        _ => {}
                    }
                }
            }
        };

        info!(nick = %talker.nickname(), reason = %reason, "Connection closing");
        disconnect(&server, &talker, &reason);
        link.set_state(LinkState::Closing);
        server.remove_link(link.id());

        reader.abort();
        if writer.await.is_err() {
            warn!("Writer task ended abnormally");
        }
        link.set_state(LinkState::Closed);
        info!("Connection closed");
    }
}

/// Socket to input queue. Waits when the queue is full.
async fn read_lines(mut lines: FramedRead<OwnedReadHalf, IrcLineCodec>, queue: mpsc::Sender<Inbound>) {
    loop {
        let item = match lines.next().await {
            Some(Ok(line)) => Inbound::Line(line),
            Some(Err(e)) => Inbound::Closed(format!("Read error: {e}")),
            None => Inbound::Closed("Connection closed".to_string()),
        };
        let done = matches!(item, Inbound::Closed(_));
        if queue.send(item).await.is_err() || done {
            return;
        }
    }
}

/// Output queue to socket. Once the link is closed, whatever is still
/// queued is written out and the task ends.
async fn write_lines(
    mut sink: FramedWrite<OwnedWriteHalf, IrcLineCodec>,
    mut queue: mpsc::Receiver<CommandReport>,
    link: Arc<Link>,
) {
    loop {
        tokio::select! {
            biased;
            report = queue.recv() => match report {
                Some(report) => {
                    if let Err(e) = sink.send(report.into_text()).await {
                        debug!(error = %e, "Write failed");
                        link.close(&format!("Write error: {e}"));
                        return;
                    }
                }
                None => return,
            },
            _ = link.closed() => break,
        }
    }
    while let Ok(report) = queue.try_recv() {
        if sink.send(report.into_text()).await.is_err() {
            return;
        }
    }
    let _ = sink.close().await;
}
