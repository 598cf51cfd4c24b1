//! In-memory harness around the dispatcher.
//!
//! Each [`Peer`] owns the receiving end of its link's output queue, so tests
//! can assert on the exact wire text a client would have been sent.

use std::sync::Arc;

use parlance::config::Config;
use parlance::handlers::Dispatcher;
use parlance::state::{CommandReport, Link, ServerContext, Talker, User};
use tokio::sync::mpsc;

/// Server context plus dispatcher, no sockets.
pub struct Engine {
    pub server: Arc<ServerContext>,
    pub dispatcher: Dispatcher,
}

/// One in-memory connection.
pub struct Peer {
    pub talker: Talker,
    rx: mpsc::Receiver<CommandReport>,
}

impl Engine {
    pub fn new() -> Self {
        let config = Config::parse(&super::test_config("127.0.0.1:0")).expect("test config");
        Self {
            server: Arc::new(ServerContext::new(config, None)),
            dispatcher: Dispatcher::new(),
        }
    }

    /// A fresh, unregistered connection from 127.0.0.1.
    pub fn connect(&self) -> Peer {
        let (tx, rx) = mpsc::channel(1024);
        let id = self.server.next_link_id();
        let link = Arc::new(Link::new(id, None, "127.0.0.1".to_string(), tx));
        self.server.register_link(Arc::clone(&link));
        let user = Arc::new(User::new(link, self.server.name()));
        Peer {
            talker: Talker::User(user),
            rx,
        }
    }

    /// Feed one line from `peer`.
    pub fn send(&self, peer: &mut Peer, line: &str) {
        self.dispatcher.dispatch(&self.server, &mut peer.talker, line);
    }

    /// Connect and register `nick` (username = nick), discarding the
    /// welcome burst.
    pub fn register(&self, nick: &str) -> Peer {
        let mut peer = self.connect();
        self.send(&mut peer, &format!("NICK {nick}"));
        self.send(&mut peer, &format!("USER {nick} 0 * :{nick} Tester"));
        peer.drain();
        peer
    }
}

impl Peer {
    /// Everything queued for this peer so far.
    pub fn drain(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while let Ok(report) = self.rx.try_recv() {
            lines.push(report.into_text());
        }
        lines
    }

    /// Numeric codes of everything queued so far.
    pub fn drain_codes(&mut self) -> Vec<u16> {
        self.drain().iter().filter_map(|l| numeric_code(l)).collect()
    }
}

/// The numeric of a `:server NNN ...` line.
pub fn numeric_code(line: &str) -> Option<u16> {
    line.split(' ').nth(1).filter(|c| c.len() == 3)?.parse().ok()
}
