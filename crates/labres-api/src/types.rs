// Wire types for the reservation service JSON API.
//
// These mirror the JSON exactly; `labres-core` converts them into the
// canonical domain model (typed laboratory, parsed timestamps).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reservation identifier as sent by the service.
///
/// The service is free to use numeric or string identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Number(i64),
    Text(String),
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A reservation as returned by `GET /reservations/*` and `POST /reservations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub id: WireId,
    pub email: String,
    pub name: String,
    pub student_id: String,
    pub laboratory: String,
    pub reservation_time: String,
}

/// Body of `POST /reservations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub email: String,
    pub name: String,
    pub student_id: String,
    pub laboratory: String,
    pub reservation_time: String,
}

/// Error body returned by the service on rejection.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
}
