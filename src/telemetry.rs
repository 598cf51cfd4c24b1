//! Command timing and connection spans.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Usage counters for one command, reported by STATS m.
#[derive(Debug, Default)]
pub struct CommandStats {
    pub count: AtomicU64,
    pub bytes: AtomicU64,
    pub remote: AtomicU64,
    pub nanos: AtomicU64,
}

impl CommandStats {
    pub fn record(&self, bytes: usize, remote: bool) {
        self.count.fetch_add(1, Ordering::Relaxed);
        self.bytes.fetch_add(bytes as u64, Ordering::Relaxed);
        if remote {
            self.remote.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> (u64, u64, u64) {
        (
            self.count.load(Ordering::Relaxed),
            self.bytes.load(Ordering::Relaxed),
            self.remote.load(Ordering::Relaxed),
        )
    }
}

/// Guard for timing command execution.
///
/// Adds the elapsed time to the command's counters when dropped.
pub struct CommandTimer<'a> {
    stats: &'a CommandStats,
    start: Instant,
}

impl<'a> CommandTimer<'a> {
    /// Start timing a command.
    pub fn new(stats: &'a CommandStats) -> Self {
        Self {
            stats,
            start: Instant::now(),
        }
    }
}

impl Drop for CommandTimer<'_> {
    fn drop(&mut self) {
        let nanos = u64::try_from(self.start.elapsed().as_nanos()).unwrap_or(u64::MAX);
        self.stats.nanos.fetch_add(nanos, Ordering::Relaxed);
    }
}

/// Standardized span constructors.
pub mod spans {
    use tracing::{Span, info_span};

    /// Create a span for a client connection.
    pub fn connection(link: u64, peer: &str) -> Span {
        info_span!("connection", link = link, peer = %peer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_accumulates_on_drop() {
        let stats = CommandStats::default();
        stats.record(12, false);
        stats.record(8, true);
        drop(CommandTimer::new(&stats));
        assert_eq!(stats.snapshot(), (2, 20, 1));
    }
}
