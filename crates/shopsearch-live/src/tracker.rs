use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one query evaluation; newer tickets supersede older ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QueryTicket(u64);

/// Last-query-wins bookkeeping for callers that evaluate queries off the
/// input thread: results for anything but the latest ticket are dropped.
#[derive(Debug, Default)]
pub struct QueryTracker {
    latest: AtomicU64,
}

impl QueryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> QueryTicket {
        QueryTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: QueryTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// `Some(value)` if `ticket` is still the latest, otherwise `None`.
    pub fn accept<T>(&self, ticket: QueryTicket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            tracing::trace!(ticket = ticket.0, "discarding superseded query results");
            None
        }
    }
}
