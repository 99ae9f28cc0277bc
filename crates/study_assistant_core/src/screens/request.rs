//! crates/study_assistant_core/src/screens/request.rs
//!
//! One in-flight request token per screen. Starting a request supersedes
//! interest in any earlier one; a reply carrying a stale ticket is dropped.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestSlot {
    #[serde(skip)]
    latest: u64,
    #[serde(rename = "loading")]
    in_flight: bool,
}

impl RequestSlot {
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn begin(&mut self) -> RequestTicket {
        self.latest += 1;
        self.in_flight = true;
        RequestTicket(self.latest)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Clears the loading flag if `ticket` is still the latest request.
    /// Returns false for stale tickets, whose replies must be ignored.
    pub fn finish(&mut self, ticket: RequestTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.in_flight = false;
        true
    }

    /// Drops interest in whatever is in flight without issuing a new request.
    pub fn abandon(&mut self) {
        self.latest += 1;
        self.in_flight = false;
    }
}
