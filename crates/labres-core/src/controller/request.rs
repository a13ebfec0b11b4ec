// ── Pending requests ──
//
// A request is handed out as a ticket plus a boxed future. Whoever drives
// the future (a spawned task, or `ViewController::settle`) passes the
// resulting `Completion` back to `ViewController::complete`.

use std::fmt;

use futures_util::future::BoxFuture;

use super::state::Tab;
use crate::error::CoreError;
use crate::model::Reservation;

/// Identifies one request: its slot and the generation it was issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub slot: Tab,
    pub generation: u64,
}

/// What the service answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Listed(Result<Vec<Reservation>, CoreError>),
    Created(Result<Reservation, CoreError>),
}

/// A request issued by the controller but not yet awaited.
pub struct PendingRequest {
    ticket: Ticket,
    future: BoxFuture<'static, Reply>,
}

impl PendingRequest {
    pub(crate) fn new(ticket: Ticket, future: BoxFuture<'static, Reply>) -> Self {
        Self { ticket, future }
    }

    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// Drive the request to completion.
    pub async fn run(self) -> Completion {
        Completion {
            ticket: self.ticket,
            reply: self.future.await,
        }
    }
}

impl fmt::Debug for PendingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingRequest")
            .field("ticket", &self.ticket)
            .finish_non_exhaustive()
    }
}

/// A settled request, ready to be reconciled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub ticket: Ticket,
    pub reply: Reply,
}
