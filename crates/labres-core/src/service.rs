// ── Reservation service seam ──
//
// The controller talks to the service only through this trait, so the
// HTTP client can be swapped for a scripted stand-in.

use std::future::Future;

use chrono::NaiveDate;
use labres_api::{CreateReservationRequest, ReservationClient};
use tracing::debug;

use crate::convert::reservations_from_wire;
use crate::error::CoreError;
use crate::model::{Reservation, ReservationDraft};

/// The three remote operations. One request per call; no retry, no caching.
pub trait ReservationService: Clone + Send + Sync + 'static {
    /// Reservations whose time has not elapsed.
    fn fetch_active(&self) -> impl Future<Output = Result<Vec<Reservation>, CoreError>> + Send;

    /// Reservations between two dates. Ordering is the service's concern.
    fn fetch_past(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<Reservation>, CoreError>> + Send;

    /// Submit a draft; yields the created reservation.
    fn create_reservation(
        &self,
        draft: &ReservationDraft,
    ) -> impl Future<Output = Result<Reservation, CoreError>> + Send;
}

impl ReservationService for ReservationClient {
    async fn fetch_active(&self) -> Result<Vec<Reservation>, CoreError> {
        let raw = self.list_active().await?;
        debug!(count = raw.len(), "fetched active reservations");
        reservations_from_wire(raw)
    }

    async fn fetch_past(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Reservation>, CoreError> {
        let raw = self.list_past(start_date, end_date).await?;
        debug!(count = raw.len(), %start_date, %end_date, "fetched past reservations");
        reservations_from_wire(raw)
    }

    async fn create_reservation(&self, draft: &ReservationDraft) -> Result<Reservation, CoreError> {
        let request = CreateReservationRequest::from(draft);
        let created = ReservationClient::create_reservation(self, &request).await?;
        Reservation::try_from(created)
    }
}
