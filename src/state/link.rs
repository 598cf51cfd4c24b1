//! Connection links and their bounded output queues.
//!
//! A [`Link`] is the engine's handle on one socket: the sending half of
//! its output queue, its lifecycle state and its traffic counters. Every
//! Talker owns exactly one link (stub servers own none).

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use parking_lot::Mutex;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Process-unique connection identifier.
pub type LinkId = u64;

/// Connection lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// Connected, registration not finished.
    New,
    /// Registered and in the directory.
    Operational,
    /// Asked to close; the writer is flushing.
    Close,
    /// Quit path running.
    Closing,
    /// Gone.
    Closed,
}

/// One formatted outbound line and who it is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandReport {
    text: String,
    recipient: String,
    origin: String,
}

impl CommandReport {
    pub fn new(text: String, recipient: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            text,
            recipient: recipient.into(),
            origin: origin.into(),
        }
    }

    /// The wire text, without CRLF.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Traffic counters for STATS l.
#[derive(Debug, Default)]
pub struct LinkStats {
    pub sent_messages: AtomicU64,
    pub sent_bytes: AtomicU64,
    pub received_messages: AtomicU64,
    pub received_bytes: AtomicU64,
    pub dropped_messages: AtomicU64,
}

/// Shared handle on one connection.
#[derive(Debug)]
pub struct Link {
    id: LinkId,
    peer: Option<SocketAddr>,
    hostname: String,
    opened: Instant,
    state: Mutex<LinkState>,
    close_reason: Mutex<Option<String>>,
    last_seen: Mutex<Instant>,
    outbox: mpsc::Sender<CommandReport>,
    closed: CancellationToken,
    pub stats: LinkStats,
}

impl Link {
    pub fn new(
        id: LinkId,
        peer: Option<SocketAddr>,
        hostname: String,
        outbox: mpsc::Sender<CommandReport>,
    ) -> Self {
        let now = Instant::now();
        Self {
            id,
            peer,
            hostname,
            opened: now,
            state: Mutex::new(LinkState::New),
            close_reason: Mutex::new(None),
            last_seen: Mutex::new(now),
            outbox,
            closed: CancellationToken::new(),
            stats: LinkStats::default(),
        }
    }

    pub fn id(&self) -> LinkId {
        self.id
    }

    pub fn peer(&self) -> Option<SocketAddr> {
        self.peer
    }

    /// Host name (or address literal) the connection came from.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn opened(&self) -> Instant {
        self.opened
    }

    pub fn state(&self) -> LinkState {
        *self.state.lock()
    }

    pub fn set_state(&self, state: LinkState) {
        *self.state.lock() = state;
    }

    pub fn is_operational(&self) -> bool {
        self.state() == LinkState::Operational
    }

    /// Enqueue a line without waiting. A full queue drops the line; a
    /// closed queue reports `false`.
    pub fn send(&self, report: CommandReport) -> bool {
        let bytes = report.text().len() as u64 + 2;
        match self.outbox.try_send(report) {
            Ok(()) => {
                self.stats.sent_messages.fetch_add(1, Ordering::Relaxed);
                self.stats.sent_bytes.fetch_add(bytes, Ordering::Relaxed);
                true
            }
            Err(TrySendError::Full(report)) => {
                self.stats.dropped_messages.fetch_add(1, Ordering::Relaxed);
                trace!(link = self.id, line = %report.text(), "Output queue full, line dropped");
                true
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }

    /// Lines waiting in the output queue.
    pub fn queued(&self) -> usize {
        self.outbox.max_capacity() - self.outbox.capacity()
    }

    /// Count one inbound line and refresh the idle clock.
    pub fn record_inbound(&self, bytes: usize) {
        self.stats.received_messages.fetch_add(1, Ordering::Relaxed);
        self.stats
            .received_bytes
            .fetch_add(bytes as u64 + 2, Ordering::Relaxed);
        *self.last_seen.lock() = Instant::now();
    }

    /// Time of the last inbound line.
    pub fn last_seen(&self) -> Instant {
        *self.last_seen.lock()
    }

    /// Mark the link as closing without waking its tasks yet, so that
    /// farewell lines can still be queued. Returns whether this call made
    /// the transition; the first reason wins.
    pub fn begin_close(&self, reason: &str) -> bool {
        {
            let mut state = self.state.lock();
            if matches!(*state, LinkState::Close | LinkState::Closing | LinkState::Closed) {
                return false;
            }
            *state = LinkState::Close;
        }
        self.close_reason.lock().get_or_insert_with(|| reason.to_string());
        true
    }

    /// Ask the connection to shut down. Returns whether this call made the
    /// transition.
    pub fn close(&self, reason: &str) -> bool {
        let first = self.begin_close(reason);
        self.closed.cancel();
        first
    }

    pub fn close_reason(&self) -> Option<String> {
        self.close_reason.lock().clone()
    }

    pub fn is_closing(&self) -> bool {
        self.closed.is_cancelled()
    }

    /// Resolves once [`Link::close`] has been called.
    pub async fn closed(&self) {
        self.closed.cancelled().await;
    }
}
