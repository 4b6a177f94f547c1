//! Cancellable request bookkeeping.
//!
//! A screen owns one `RequestSlot`. Every trigger calls `begin`, which
//! invalidates whatever was in flight and hands out a fresh `Ticket`. Worker
//! threads carry their ticket back together with the outcome; the screen only
//! applies outcomes whose ticket the slot still accepts, so a superseded or
//! cancelled request can never reach state.
//!
//! Ticket ids are unique for the whole process, so an outcome addressed to a
//! screen that has since been replaced cannot match its successor's slot.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Identifies a single issued request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Ticket(u64);

impl Ticket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// At most one live request at a time.
#[derive(Debug, Default)]
pub struct RequestSlot {
    live: Option<Ticket>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the previous request (if any) and issue a new ticket.
    pub fn begin(&mut self) -> Ticket {
        self.cancel();
        let ticket = Ticket(NEXT_TICKET.fetch_add(1, Ordering::Relaxed));
        self.live = Some(ticket);
        ticket
    }

    /// Invalidate the live ticket without issuing another one.
    pub fn cancel(&mut self) {
        if let Some(t) = self.live.take() {
            log::debug!("request #{} cancelled", t.id());
        }
    }

    pub fn accepts(&self, ticket: Ticket) -> bool {
        self.live == Some(ticket)
    }

    /// Consume the live ticket. Returns `false` for stale or already-finished tickets.
    pub fn finish(&mut self, ticket: Ticket) -> bool {
        if self.accepts(ticket) {
            self.live = None;
            true
        } else {
            log::debug!("discarding outcome of stale request #{}", ticket.id());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_supersedes_previous_ticket() {
        let mut slot = RequestSlot::new();
        let a = slot.begin();
        let b = slot.begin();
        assert_ne!(a, b);
        assert!(!slot.accepts(a));
        assert!(slot.accepts(b));
    }

    #[test]
    fn cancel_rejects_live_ticket() {
        let mut slot = RequestSlot::new();
        let a = slot.begin();
        slot.cancel();
        assert!(!slot.accepts(a));
        assert!(!slot.finish(a));
    }

    #[test]
    fn finish_accepts_exactly_once() {
        let mut slot = RequestSlot::new();
        let a = slot.begin();
        assert!(slot.finish(a));
        assert!(!slot.finish(a));
        assert!(!slot.accepts(a));
    }

    #[test]
    fn tickets_never_repeat_after_cancel() {
        let mut slot = RequestSlot::new();
        let a = slot.begin();
        slot.cancel();
        let b = slot.begin();
        assert!(b.id() > a.id());
        assert!(!slot.accepts(a));
    }

    #[test]
    fn separate_slots_never_share_tickets() {
        let mut first = RequestSlot::new();
        let mut second = RequestSlot::new();
        let a = first.begin();
        let b = second.begin();
        assert_ne!(a, b);
        assert!(!second.accepts(a));
        assert!(!first.accepts(b));
    }
}
