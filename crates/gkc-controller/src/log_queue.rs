//! Bounded FIFO of log entries awaiting consumer drain.
//!
//! This is distinct from `tracing`: frames the MCU sends as `Packet::Log`,
//! and narrated host-internal diagnostics the session wants a caller to
//! see, both land here so an external caller can drain them via
//! [`crate::session::GkcSession::get_next_log`] in addition to whatever a
//! `tracing` subscriber does with the same events.

use std::collections::VecDeque;

use gkc_protocol::packet::Severity;
use parking_lot::Mutex;

/// One drained log entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Severity as reported by the MCU.
    pub severity: Severity,
    /// UTF-8 message text.
    pub message: String,
}

/// A bounded, drop-oldest FIFO of [`LogEntry`] values.
pub struct LogQueue {
    capacity: usize,
    entries: Mutex<VecDeque<LogEntry>>,
}

impl LogQueue {
    /// Builds an empty queue holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self { capacity, entries: Mutex::new(VecDeque::with_capacity(capacity)) }
    }

    /// Pushes a new entry, dropping the oldest one and logging an INFO
    /// `tracing` event if the queue was already at capacity.
    pub fn push(&self, entry: LogEntry) {
        let mut entries = self.entries.lock();
        if entries.len() >= self.capacity {
            entries.pop_front();
            tracing::info!(capacity = self.capacity, "log queue full, dropped oldest entry");
        }
        entries.push_back(entry);
    }

    /// Pops the oldest entry, if any.
    pub fn pop_front(&self) -> Option<LogEntry> {
        self.entries.lock().pop_front()
    }

    /// Current number of queued entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// True if the queue holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
