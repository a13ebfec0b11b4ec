// ── Reservation domain types ──

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Opaque reservation identifier.
///
/// The service may send numbers or strings; both collapse to their
/// textual form here so equality is stable across fetches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(String);

impl ReservationId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<labres_api::WireId> for ReservationId {
    fn from(id: labres_api::WireId) -> Self {
        Self(id.to_string())
    }
}

/// The bookable laboratories.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
pub enum Laboratory {
    #[strum(serialize = "Lab 1")]
    #[serde(rename = "Lab 1")]
    Lab1,
    #[strum(serialize = "Lab 2")]
    #[serde(rename = "Lab 2")]
    Lab2,
    #[strum(serialize = "Lab 3")]
    #[serde(rename = "Lab 3")]
    Lab3,
    #[strum(serialize = "Lab 4")]
    #[serde(rename = "Lab 4")]
    Lab4,
}

/// A reservation as held by the service.
///
/// `reservation_time` is a UTC wall-clock time with whole seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: ReservationId,
    pub email: String,
    pub name: String,
    pub student_id: String,
    pub laboratory: Laboratory,
    pub reservation_time: NaiveDateTime,
}

/// A validated reservation awaiting submission. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationDraft {
    pub email: String,
    pub name: String,
    pub student_id: String,
    pub laboratory: Laboratory,
    pub reservation_time: NaiveDateTime,
}

impl ReservationDraft {
    /// Whether `reservation` carries this draft's fields (ignoring the id).
    pub fn matches(&self, reservation: &Reservation) -> bool {
        self.email == reservation.email
            && self.name == reservation.name
            && self.student_id == reservation.student_id
            && self.laboratory == reservation.laboratory
            && self.reservation_time == reservation.reservation_time
    }
}
