use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{CatalogError, Result};

/// Identity of one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Tracks the most recent request so late responses to superseded
/// requests can be discarded instead of overwriting newer state.
#[derive(Debug, Default)]
pub struct LatestRequest {
    latest: AtomicU64,
}

impl LatestRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket; every earlier ticket becomes stale
    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    #[must_use]
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Pass `outcome` through if `ticket` is still the latest request
    pub fn accept<T>(&self, ticket: RequestTicket, outcome: Result<T>) -> Result<T> {
        if self.is_current(ticket) {
            outcome
        } else {
            log::debug!("Ignoring stale response to request #{}", ticket.0);
            Err(CatalogError::Stale(ticket.0))
        }
    }
}
