// ── API-to-domain type conversions ──
//
// Bridges `labres_api` wire types and the canonical model: labels become
// `Laboratory`, timestamps become UTC `NaiveDateTime`.

use std::str::FromStr;

use labres_api::{CreateReservationRequest, ReservationResponse};

use crate::error::CoreError;
use crate::model::{Laboratory, Reservation, ReservationDraft};
use crate::time;

impl TryFrom<ReservationResponse> for Reservation {
    type Error = CoreError;

    fn try_from(raw: ReservationResponse) -> Result<Self, Self::Error> {
        let laboratory =
            Laboratory::from_str(&raw.laboratory).map_err(|_| CoreError::InvalidResponse {
                message: format!(
                    "reservation {} has unknown laboratory '{}'",
                    raw.id, raw.laboratory
                ),
            })?;
        let reservation_time =
            time::to_canonical(&raw.reservation_time).map_err(|e| CoreError::InvalidResponse {
                message: format!("reservation {}: {e}", raw.id),
            })?;

        Ok(Self {
            id: raw.id.into(),
            email: raw.email,
            name: raw.name,
            student_id: raw.student_id,
            laboratory,
            reservation_time,
        })
    }
}

impl From<&ReservationDraft> for CreateReservationRequest {
    fn from(draft: &ReservationDraft) -> Self {
        Self {
            email: draft.email.clone(),
            name: draft.name.clone(),
            student_id: draft.student_id.clone(),
            laboratory: draft.laboratory.to_string(),
            reservation_time: time::to_wire_string(&draft.reservation_time),
        }
    }
}

/// Convert a fetched list, failing on the first malformed entry.
pub fn reservations_from_wire(
    raw: Vec<ReservationResponse>,
) -> Result<Vec<Reservation>, CoreError> {
    raw.into_iter().map(Reservation::try_from).collect()
}
