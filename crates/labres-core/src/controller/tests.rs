#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use super::*;
use crate::model::{Laboratory, ReservationDraft, ReservationId};
use crate::time::to_display_string;

// ── Scripted service ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Active,
    Past(NaiveDate, NaiveDate),
    Create(ReservationDraft),
}

#[derive(Debug, Default)]
struct Backend {
    reservations: Vec<Reservation>,
    next_id: u64,
    fail_next: Option<CoreError>,
    calls: Vec<Call>,
}

/// In-memory stand-in: remembers what it was asked and stores creations.
#[derive(Debug, Clone, Default)]
struct FakeService {
    backend: Arc<Mutex<Backend>>,
}

impl FakeService {
    fn starting_at(next_id: u64) -> Self {
        let service = Self::default();
        service.backend.lock().unwrap().next_id = next_id;
        service
    }

    fn fail_next(&self, err: CoreError) {
        self.backend.lock().unwrap().fail_next = Some(err);
    }

    fn seed(&self, reservation: Reservation) {
        self.backend.lock().unwrap().reservations.push(reservation);
    }

    fn calls(&self) -> Vec<Call> {
        self.backend.lock().unwrap().calls.clone()
    }
}

impl ReservationService for FakeService {
    async fn fetch_active(&self) -> Result<Vec<Reservation>, CoreError> {
        let mut backend = self.backend.lock().unwrap();
        backend.calls.push(Call::Active);
        match backend.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(backend.reservations.clone()),
        }
    }

    async fn fetch_past(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Reservation>, CoreError> {
        let mut backend = self.backend.lock().unwrap();
        backend.calls.push(Call::Past(start_date, end_date));
        if let Some(err) = backend.fail_next.take() {
            return Err(err);
        }
        Ok(backend
            .reservations
            .iter()
            .filter(|r| {
                let day = r.reservation_time.date();
                start_date <= day && day <= end_date
            })
            .cloned()
            .collect())
    }

    async fn create_reservation(&self, draft: &ReservationDraft) -> Result<Reservation, CoreError> {
        let mut backend = self.backend.lock().unwrap();
        backend.calls.push(Call::Create(draft.clone()));
        if let Some(err) = backend.fail_next.take() {
            return Err(err);
        }
        let created = Reservation {
            id: ReservationId::new(backend.next_id.to_string()),
            email: draft.email.clone(),
            name: draft.name.clone(),
            student_id: draft.student_id.clone(),
            laboratory: draft.laboratory,
            reservation_time: draft.reservation_time,
        };
        backend.next_id += 1;
        backend.reservations.push(created.clone());
        Ok(created)
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

fn controller(service: &FakeService) -> ViewController<FakeService> {
    ViewController::with_today(service.clone(), today())
}

fn reservation(id: &str, lab: Laboratory, time: &str) -> Reservation {
    Reservation {
        id: ReservationId::new(id),
        email: format!("{id}@x.edu"),
        name: format!("Student {id}"),
        student_id: id.to_owned(),
        laboratory: lab,
        reservation_time: crate::time::to_canonical(time).unwrap(),
    }
}

fn fill_form(ctrl: &mut ViewController<FakeService>) {
    ctrl.edit_field(FieldName::Email, "a@x.com");
    ctrl.edit_field(FieldName::Name, "A B");
    ctrl.edit_field(FieldName::StudentId, "123");
    ctrl.edit_field(FieldName::Laboratory, "Lab 2");
    ctrl.edit_field(FieldName::ReservationTime, "2024-05-01 14:00");
}

// ── Session start ───────────────────────────────────────────────────

#[test]
fn new_session_defaults() {
    let service = FakeService::default();
    let ctrl = controller(&service);
    let state = ctrl.state();

    assert_eq!(state.active_tab, Tab::Current);
    assert!(state.reservations.is_empty());
    assert!(!state.loading);
    assert_eq!(state.error, None);
    assert_eq!(state.date_range.start_date, "2024-05-01");
    assert_eq!(state.date_range.end_date, "2024-05-01");
    assert!(state.form.is_empty());
}

// ── Fetching ────────────────────────────────────────────────────────

#[tokio::test]
async fn load_active_replaces_list() {
    let service = FakeService::default();
    service.seed(reservation("1", Laboratory::Lab1, "2024-05-02 09:00"));
    let mut ctrl = controller(&service);

    let pending = ctrl.load_active();
    assert!(ctrl.loading());

    let follow_up = ctrl.complete(pending.run().await);
    assert!(follow_up.is_none());
    assert!(!ctrl.loading());
    assert_eq!(ctrl.state().reservations.len(), 1);
    assert_eq!(service.calls(), vec![Call::Active]);
}

#[tokio::test]
async fn load_active_failure_keeps_stale_list() {
    let service = FakeService::default();
    service.seed(reservation("1", Laboratory::Lab1, "2024-05-02 09:00"));
    let mut ctrl = controller(&service);

    let pending = ctrl.load_active();
    ctrl.settle(pending).await;
    assert_eq!(ctrl.state().reservations.len(), 1);

    service.fail_next(CoreError::Network {
        reason: "connection refused".into(),
    });
    let pending = ctrl.load_active();
    ctrl.settle(pending).await;

    assert_eq!(ctrl.state().error.as_deref(), Some(LOAD_ACTIVE_FAILED));
    assert_eq!(ctrl.state().reservations.len(), 1);
    assert!(!ctrl.loading());
    assert!(matches!(ctrl.last_failure(), Some(CoreError::Network { .. })));
}

#[tokio::test]
async fn load_past_sends_parsed_range() {
    let service = FakeService::default();
    service.seed(reservation("1", Laboratory::Lab3, "2024-01-15 10:00"));
    service.seed(reservation("2", Laboratory::Lab3, "2024-03-15 10:00"));
    let mut ctrl = controller(&service);

    ctrl.set_date_range("2024-01-01", "2024-01-31");
    let pending = ctrl.select_tab(Tab::Past).unwrap();
    assert!(ctrl.loading());
    ctrl.settle(pending).await;

    let ids: Vec<&str> = ctrl
        .state()
        .reservations
        .iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(ids, vec!["1"]);
    assert_eq!(
        service.calls(),
        vec![Call::Past(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
        )]
    );
}

#[tokio::test]
async fn load_past_forwards_reversed_range() {
    let service = FakeService::default();
    let mut ctrl = controller(&service);

    ctrl.edit_start_date("2024-02-01");
    ctrl.edit_end_date("2024-01-01");
    let pending = ctrl.load_past().unwrap();
    ctrl.settle(pending).await;

    assert_eq!(ctrl.state().error, None);
    assert_eq!(service.calls().len(), 1);
}

#[test]
fn load_past_with_missing_date_skips_network() {
    let service = FakeService::default();
    let mut ctrl = controller(&service);

    ctrl.set_date_range("", "2024-05-01");
    assert!(ctrl.load_past().is_none());

    assert_eq!(
        ctrl.state().error.as_deref(),
        Some("Please select both start and end dates")
    );
    assert!(!ctrl.loading());
    assert!(service.calls().is_empty());
}

#[test]
fn load_past_with_malformed_date_skips_network() {
    let service = FakeService::default();
    let mut ctrl = controller(&service);

    ctrl.set_date_range("2024-05-01", "May 2nd");
    assert!(ctrl.load_past().is_none());

    assert_eq!(
        ctrl.state().error.as_deref(),
        Some("Invalid date 'May 2nd' (expected YYYY-MM-DD)")
    );
    assert!(matches!(ctrl.last_failure(), Some(CoreError::Format(_))));
    assert!(service.calls().is_empty());
}

#[tokio::test]
async fn load_past_failure_message() {
    let service = FakeService::default();
    service.fail_next(CoreError::Timeout);
    let mut ctrl = controller(&service);

    let pending = ctrl.select_tab(Tab::Past).unwrap();
    ctrl.settle(pending).await;

    assert_eq!(ctrl.state().error.as_deref(), Some(LOAD_PAST_FAILED));
}

// ── Creation ────────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_refresh_shows_new_reservation() {
    let service = FakeService::starting_at(42);
    let mut ctrl = controller(&service);
    assert!(ctrl.select_tab(Tab::New).is_none());
    fill_form(&mut ctrl);

    let pending = ctrl.submit_reservation().unwrap();
    assert!(ctrl.loading());
    ctrl.settle(pending).await;

    let state = ctrl.state();
    assert!(state.form.is_empty());
    assert_eq!(state.error, None);
    assert_eq!(state.notification.as_deref(), Some(CREATED));

    let created = state
        .reservations
        .iter()
        .find(|r| r.id.as_str() == "42")
        .unwrap();
    assert_eq!(created.laboratory, Laboratory::Lab2);
    assert_eq!(created.email, "a@x.com");
    assert_eq!(
        to_display_string(&created.reservation_time),
        "Wed, May 1, 2024, 02:00 PM"
    );
    assert_eq!(ctrl.last_created().map(|r| r.id.as_str()), Some("42"));

    let calls = service.calls();
    assert_eq!(calls.len(), 2);
    assert!(matches!(&calls[0], Call::Create(draft) if draft.matches(created)));
    assert_eq!(calls[1], Call::Active);
}

#[tokio::test]
async fn create_rejection_surfaces_service_message() {
    let service = FakeService::default();
    service.fail_next(CoreError::Rejected {
        message: "Slot already booked".into(),
    });
    let mut ctrl = controller(&service);
    ctrl.select_tab(Tab::New);
    fill_form(&mut ctrl);

    let pending = ctrl.submit_reservation().unwrap();
    ctrl.settle(pending).await;

    assert_eq!(ctrl.state().error.as_deref(), Some("Slot already booked"));
    assert_eq!(ctrl.state().form.name, "A B");
    assert_eq!(ctrl.state().notification, None);
    assert_eq!(service.calls().len(), 1);
}

#[tokio::test]
async fn create_transport_failure_uses_generic_message() {
    let service = FakeService::default();
    service.fail_next(CoreError::Network {
        reason: "HTTP 500".into(),
    });
    let mut ctrl = controller(&service);
    fill_form(&mut ctrl);

    let pending = ctrl.submit_reservation().unwrap();
    ctrl.settle(pending).await;

    assert_eq!(ctrl.state().error.as_deref(), Some(CREATE_FAILED));
    assert!(!ctrl.state().form.is_empty());
}

#[test]
fn invalid_form_never_reaches_service() {
    let service = FakeService::default();
    let mut ctrl = controller(&service);
    fill_form(&mut ctrl);
    ctrl.edit_field(FieldName::Laboratory, "Lab 7");

    assert!(ctrl.submit_reservation().is_none());
    assert_eq!(
        ctrl.state().error.as_deref(),
        Some("Invalid value for: laboratory")
    );
    assert_eq!(ctrl.state().form.laboratory, "Lab 7");
    assert!(service.calls().is_empty());
}

#[test]
fn second_submit_ignored_while_in_flight() {
    let service = FakeService::default();
    let mut ctrl = controller(&service);
    fill_form(&mut ctrl);

    let first = ctrl.submit_reservation();
    assert!(first.is_some());
    assert!(ctrl.submit_reservation().is_none());
    assert!(ctrl.is_in_flight(Tab::New));
}

#[tokio::test]
async fn refresh_skipped_when_past_tab_showing() {
    let service = FakeService::default();
    let mut ctrl = controller(&service);
    ctrl.select_tab(Tab::New);
    fill_form(&mut ctrl);
    let create = ctrl.submit_reservation().unwrap();

    let past = ctrl.select_tab(Tab::Past).unwrap();
    let follow_up = ctrl.complete(create.run().await);

    assert!(follow_up.is_none());
    assert_eq!(ctrl.state().notification.as_deref(), Some(CREATED));
    assert!(ctrl.loading());

    ctrl.settle(past).await;
    assert!(!ctrl.loading());
}

#[test]
fn notification_is_one_shot() {
    let service = FakeService::default();
    let mut ctrl = controller(&service);
    ctrl.state.notification = Some(CREATED.into());

    assert_eq!(ctrl.take_notification().as_deref(), Some(CREATED));
    assert_eq!(ctrl.take_notification(), None);
}

// ── Tabs and races ──────────────────────────────────────────────────

#[tokio::test]
async fn tab_switch_clears_error_before_loading() {
    let service = FakeService::default();
    service.fail_next(CoreError::Timeout);
    let mut ctrl = controller(&service);

    let pending = ctrl.load_active();
    ctrl.settle(pending).await;
    assert!(ctrl.state().error.is_some());

    let pending = ctrl.select_tab(Tab::Past);
    assert_eq!(ctrl.state().error, None);
    assert!(ctrl.last_failure().is_none());
    assert!(ctrl.loading());
    assert!(pending.is_some());
}

#[tokio::test]
async fn stale_response_is_dropped() {
    let service = FakeService::default();
    service.seed(reservation("1", Laboratory::Lab1, "2024-05-02 09:00"));
    let mut ctrl = controller(&service);

    let first = ctrl.load_active();
    let first_done = first.run().await;

    service.seed(reservation("2", Laboratory::Lab2, "2024-05-03 09:00"));
    let second = ctrl.load_active();
    let second_done = second.run().await;

    assert!(ctrl.complete(second_done).is_none());
    assert_eq!(ctrl.state().reservations.len(), 2);

    // The older response lands late and must not overwrite the newer one.
    assert!(ctrl.complete(first_done).is_none());
    assert_eq!(ctrl.state().reservations.len(), 2);
    assert!(!ctrl.loading());
}

#[tokio::test]
async fn tab_switch_invalidates_other_list() {
    let service = FakeService::default();
    service.seed(reservation("1", Laboratory::Lab1, "2024-05-01 09:00"));
    let mut ctrl = controller(&service);

    let active = ctrl.load_active();
    let past = ctrl.select_tab(Tab::Past).unwrap();

    let active_done = active.run().await;
    assert!(ctrl.complete(active_done).is_none());
    assert!(ctrl.state().reservations.is_empty());
    assert!(ctrl.loading());

    ctrl.settle(past).await;
    assert_eq!(ctrl.state().reservations.len(), 1);
    assert!(!ctrl.loading());
}

#[tokio::test]
async fn invalid_past_range_after_tab_switch_clears_loading() {
    let service = FakeService::default();
    let mut ctrl = controller(&service);
    ctrl.edit_start_date("");

    let active = ctrl.select_tab(Tab::Current).unwrap();
    assert!(ctrl.loading());

    assert!(ctrl.select_tab(Tab::Past).is_none());
    assert!(!ctrl.loading());
    assert_eq!(
        ctrl.state().error.as_deref(),
        Some("Please select both start and end dates")
    );

    let active_done = active.run().await;
    assert!(ctrl.complete(active_done).is_none());
    assert!(!ctrl.loading());
}

#[tokio::test]
async fn invalid_search_abandons_earlier_past_fetch() {
    let service = FakeService::default();
    service.seed(reservation("1", Laboratory::Lab1, "2024-05-01 09:00"));
    let mut ctrl = controller(&service);

    let past = ctrl.select_tab(Tab::Past).unwrap();
    ctrl.edit_start_date("");
    assert!(ctrl.load_past().is_none());
    assert!(!ctrl.loading());
    assert!(!ctrl.is_in_flight(Tab::Past));

    let past_done = past.run().await;
    assert!(ctrl.complete(past_done).is_none());
    assert!(ctrl.state().reservations.is_empty());
    assert_eq!(
        ctrl.state().error.as_deref(),
        Some("Please select both start and end dates")
    );
}

#[test]
fn loading_tracks_active_tab_only() {
    let service = FakeService::default();
    let mut ctrl = controller(&service);
    fill_form(&mut ctrl);

    ctrl.select_tab(Tab::Current);
    assert!(ctrl.loading());

    let create = ctrl.submit_reservation();
    assert!(create.is_some());
    assert!(ctrl.loading());

    ctrl.select_tab(Tab::New);
    assert!(ctrl.loading(), "create is still in flight on the New tab");
    assert!(!ctrl.is_in_flight(Tab::Current));
}

#[test]
fn tab_cycle_wraps() {
    assert_eq!(Tab::Current.next(), Tab::Past);
    assert_eq!(Tab::New.next(), Tab::Current);
    assert_eq!(Tab::Current.prev(), Tab::New);
    assert_eq!(Tab::from_index(2), Some(Tab::New));
    assert_eq!(Tab::from_index(3), None);
    assert_eq!(Tab::Past.to_string(), "Past");
}
