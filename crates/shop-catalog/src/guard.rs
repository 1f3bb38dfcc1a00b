//! Stale-response guarding.
//!
//! Every listing load takes a ticket. Starting a newer load supersedes all
//! earlier tickets, and a result whose ticket is no longer current must be
//! dropped instead of displayed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Issues monotonically increasing request tokens.
#[derive(Debug, Clone, Default)]
pub struct RequestGuard {
    latest: Arc<AtomicU64>,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request, superseding every earlier ticket.
    pub fn begin(&self) -> RequestTicket {
        let token = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket {
            token,
            latest: Arc::clone(&self.latest),
        }
    }

    /// Supersede every outstanding ticket without starting a request.
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    /// Token of the most recently issued ticket (0 before any).
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

/// Proof of when a request started.
#[derive(Debug, Clone)]
pub struct RequestTicket {
    token: u64,
    latest: Arc<AtomicU64>,
}

impl RequestTicket {
    pub fn token(&self) -> u64 {
        self.token
    }

    /// Whether no newer request has started since this one.
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let guard = RequestGuard::new();
        let first = guard.begin();
        assert!(first.is_current());

        let second = guard.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
        assert!(second.token() > first.token());
    }

    #[test]
    fn test_clones_share_tokens() {
        let guard = RequestGuard::new();
        let ticket = guard.begin();
        guard.clone().begin();
        assert!(!ticket.is_current());
        assert_eq!(guard.latest(), 2);
    }

    #[test]
    fn test_invalidate() {
        let guard = RequestGuard::new();
        let ticket = guard.begin();
        guard.invalidate();
        assert!(!ticket.is_current());
    }
}
