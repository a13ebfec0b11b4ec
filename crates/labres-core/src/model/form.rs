// ── Raw user input ──
//
// The New-tab form and the Past-tab date filter hold exactly what the
// user typed. Parsing happens in `crate::validate` right before a request.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Identifies one field of the reservation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
pub enum FieldName {
    #[strum(serialize = "email")]
    Email,
    #[strum(serialize = "name")]
    Name,
    #[strum(serialize = "student ID")]
    StudentId,
    #[strum(serialize = "laboratory")]
    Laboratory,
    #[strum(serialize = "reservation time")]
    ReservationTime,
}

/// The raw New-tab form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFields {
    pub email: String,
    pub name: String,
    pub student_id: String,
    pub laboratory: String,
    pub reservation_time: String,
}

impl FormFields {
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Email => &self.email,
            FieldName::Name => &self.name,
            FieldName::StudentId => &self.student_id,
            FieldName::Laboratory => &self.laboratory,
            FieldName::ReservationTime => &self.reservation_time,
        }
    }

    pub fn set(&mut self, field: FieldName, value: String) {
        let slot = match field {
            FieldName::Email => &mut self.email,
            FieldName::Name => &mut self.name,
            FieldName::StudentId => &mut self.student_id,
            FieldName::Laboratory => &mut self.laboratory,
            FieldName::ReservationTime => &mut self.reservation_time,
        };
        *slot = value;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Date range for the past-reservations query, as typed (`YYYY-MM-DD`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeFilter {
    pub start_date: String,
    pub end_date: String,
}

impl DateRangeFilter {
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }
}
