// ── View controller ──
//
// Owns `ViewState` and drives the reservation service in response to
// user actions. Operations return a `PendingRequest`; the caller awaits
// it wherever it likes and feeds the `Completion` back through
// `complete`. Each request slot (Current, Past, New) carries its own
// generation counter, and a completion whose generation is no longer the
// latest for its slot is dropped without touching state.

mod request;
mod state;

#[cfg(test)]
mod tests;

pub use request::{Completion, PendingRequest, Reply, Ticket};
pub use state::{Tab, ViewState};

use chrono::NaiveDate;
use futures_util::FutureExt;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::model::{FieldName, Reservation};
use crate::service::ReservationService;
use crate::time;
use crate::validate;

pub const LOAD_ACTIVE_FAILED: &str = "Failed to load reservations. Please try again later.";
pub const LOAD_PAST_FAILED: &str = "Failed to load past reservations. Please try again later.";
pub const CREATE_FAILED: &str = "Failed to create reservation. Please try again.";
pub const CREATED: &str = "Reservation created successfully!";

#[derive(Debug, Clone, Copy, Default)]
struct SlotState {
    generation: u64,
    in_flight: bool,
}

/// The session controller. Sole writer of its `ViewState`.
#[derive(Debug)]
pub struct ViewController<S> {
    service: S,
    state: ViewState,
    current: SlotState,
    past: SlotState,
    new: SlotState,
    failure: Option<CoreError>,
    last_created: Option<Reservation>,
}

impl<S: ReservationService> ViewController<S> {
    /// Start a session dated today (UTC). Nothing is fetched yet.
    pub fn new(service: S) -> Self {
        Self::with_today(service, time::today())
    }

    pub fn with_today(service: S, today: NaiveDate) -> Self {
        Self {
            service,
            state: ViewState::new(today),
            current: SlotState::default(),
            past: SlotState::default(),
            new: SlotState::default(),
            failure: None,
            last_created: None,
        }
    }

    // ── Read access ──────────────────────────────────────────────────

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn active_tab(&self) -> Tab {
        self.state.active_tab
    }

    pub fn loading(&self) -> bool {
        self.state.loading
    }

    pub fn is_in_flight(&self, slot: Tab) -> bool {
        self.slot(slot).in_flight
    }

    /// The error behind `state().error`, for callers that branch on kind.
    pub fn last_failure(&self) -> Option<&CoreError> {
        self.failure.as_ref()
    }

    /// The reservation returned by the most recent successful create.
    pub fn last_created(&self) -> Option<&Reservation> {
        self.last_created.as_ref()
    }

    /// Consume the one-shot notification, if any.
    pub fn take_notification(&mut self) -> Option<String> {
        self.state.notification.take()
    }

    // ── Navigation ───────────────────────────────────────────────────

    /// Switch views. Clears the error, invalidates list requests issued
    /// for other tabs, and starts the new tab's fetch (none for New).
    pub fn select_tab(&mut self, tab: Tab) -> Option<PendingRequest> {
        debug!(from = %self.state.active_tab, to = %tab, "selecting tab");
        self.state.active_tab = tab;
        self.clear_error();
        for slot in [Tab::Current, Tab::Past] {
            if slot != tab {
                self.invalidate(slot);
            }
        }

        match tab {
            Tab::Current => Some(self.load_active()),
            Tab::Past => self.load_past(),
            Tab::New => {
                self.sync_loading();
                None
            }
        }
    }

    // ── Fetches ──────────────────────────────────────────────────────

    pub fn load_active(&mut self) -> PendingRequest {
        self.clear_error();
        let ticket = self.begin(Tab::Current);
        debug!(generation = ticket.generation, "loading active reservations");

        let service = self.service.clone();
        PendingRequest::new(
            ticket,
            async move { Reply::Listed(service.fetch_active().await) }.boxed(),
        )
    }

    /// Fetch past reservations for the current date range. A missing or
    /// malformed date sets the error, abandons any earlier past fetch and
    /// returns `None` without a request.
    pub fn load_past(&mut self) -> Option<PendingRequest> {
        self.clear_error();
        let (start_date, end_date) = match validate::parse_date_range(&self.state.date_range) {
            Ok(range) => range,
            Err(err) => {
                self.invalidate(Tab::Past);
                self.record_failure(Tab::Past, err.into());
                return None;
            }
        };

        let ticket = self.begin(Tab::Past);
        debug!(
            generation = ticket.generation,
            %start_date,
            %end_date,
            "loading past reservations"
        );

        let service = self.service.clone();
        Some(PendingRequest::new(
            ticket,
            async move { Reply::Listed(service.fetch_past(start_date, end_date).await) }.boxed(),
        ))
    }

    // ── Creation ─────────────────────────────────────────────────────

    /// Validate the form and submit it. Ignored while a submission is
    /// already in flight.
    pub fn submit_reservation(&mut self) -> Option<PendingRequest> {
        if self.new.in_flight {
            debug!("submission already in flight, ignoring");
            return None;
        }

        self.clear_error();
        let draft = match validate::validate_draft_fields(&self.state.form) {
            Ok(draft) => draft,
            Err(err) => {
                self.record_failure(Tab::New, err.into());
                return None;
            }
        };

        let ticket = self.begin(Tab::New);
        info!(
            generation = ticket.generation,
            laboratory = %draft.laboratory,
            time = %time::to_wire_string(&draft.reservation_time),
            "submitting reservation"
        );

        let service = self.service.clone();
        Some(PendingRequest::new(
            ticket,
            async move { Reply::Created(service.create_reservation(&draft).await) }.boxed(),
        ))
    }

    // ── Input editing ────────────────────────────────────────────────

    pub fn edit_field(&mut self, field: FieldName, value: impl Into<String>) {
        self.state.form.set(field, value.into());
    }

    pub fn set_date_range(&mut self, start_date: impl Into<String>, end_date: impl Into<String>) {
        self.state.date_range.start_date = start_date.into();
        self.state.date_range.end_date = end_date.into();
    }

    pub fn edit_start_date(&mut self, start_date: impl Into<String>) {
        self.state.date_range.start_date = start_date.into();
    }

    pub fn edit_end_date(&mut self, end_date: impl Into<String>) {
        self.state.date_range.end_date = end_date.into();
    }

    // ── Reconciliation ───────────────────────────────────────────────

    /// Apply a settled request. Stale completions are dropped.
    ///
    /// A successful create clears the form, raises the success
    /// notification and returns the follow-up refresh of the active list
    /// (skipped while the Past tab is showing).
    pub fn complete(&mut self, completion: Completion) -> Option<PendingRequest> {
        let Completion { ticket, reply } = completion;

        let slot = self.slot_mut(ticket.slot);
        if !slot.in_flight || slot.generation != ticket.generation {
            let latest = slot.generation;
            warn!(
                slot = %ticket.slot,
                generation = ticket.generation,
                latest,
                "dropping stale response"
            );
            return None;
        }
        slot.in_flight = false;
        self.sync_loading();

        match reply {
            Reply::Listed(Ok(reservations)) => {
                info!(slot = %ticket.slot, count = reservations.len(), "reservations loaded");
                self.state.reservations = reservations;
                None
            }
            Reply::Created(Ok(reservation)) => {
                info!(
                    id = %reservation.id,
                    laboratory = %reservation.laboratory,
                    "reservation created"
                );
                self.state.form.clear();
                self.state.notification = Some(CREATED.to_owned());
                self.last_created = Some(reservation);

                if self.state.active_tab == Tab::Past {
                    None
                } else {
                    Some(self.load_active())
                }
            }
            Reply::Listed(Err(err)) | Reply::Created(Err(err)) => {
                self.record_failure(ticket.slot, err);
                None
            }
        }
    }

    /// Await `request` and every follow-up it triggers, in order.
    pub async fn settle(&mut self, request: PendingRequest) {
        let mut next = Some(request);
        while let Some(request) = next {
            let completion = request.run().await;
            next = self.complete(completion);
        }
    }

    // ── Internals ────────────────────────────────────────────────────

    fn slot(&self, slot: Tab) -> &SlotState {
        match slot {
            Tab::Current => &self.current,
            Tab::Past => &self.past,
            Tab::New => &self.new,
        }
    }

    fn slot_mut(&mut self, slot: Tab) -> &mut SlotState {
        match slot {
            Tab::Current => &mut self.current,
            Tab::Past => &mut self.past,
            Tab::New => &mut self.new,
        }
    }

    fn begin(&mut self, slot: Tab) -> Ticket {
        let state = self.slot_mut(slot);
        state.generation += 1;
        state.in_flight = true;
        let ticket = Ticket {
            slot,
            generation: state.generation,
        };
        self.sync_loading();
        ticket
    }

    fn invalidate(&mut self, slot: Tab) {
        let state = self.slot_mut(slot);
        if state.in_flight {
            state.generation += 1;
            state.in_flight = false;
            debug!(%slot, "invalidated in-flight request");
        }
        self.sync_loading();
    }

    fn sync_loading(&mut self) {
        self.state.loading = self.slot(self.state.active_tab).in_flight;
    }

    fn clear_error(&mut self) {
        self.state.error = None;
        self.failure = None;
    }

    fn record_failure(&mut self, slot: Tab, err: CoreError) {
        warn!(%slot, error = %err, "request failed");
        self.state.error = Some(failure_message(slot, &err));
        self.failure = Some(err);
    }
}

/// The message shown for a failure on `slot`.
fn failure_message(slot: Tab, err: &CoreError) -> String {
    match (slot, err) {
        (_, err) if err.is_local() => err.to_string(),
        (Tab::New, CoreError::Rejected { message }) => message.clone(),
        (Tab::Current, _) => LOAD_ACTIVE_FAILED.to_owned(),
        (Tab::Past, _) => LOAD_PAST_FAILED.to_owned(),
        (Tab::New, _) => CREATE_FAILED.to_owned(),
    }
}
