// ── Input validators ──
//
// Pure checks run before any request is built. A failure here never
// reaches the network.

use std::str::FromStr;

use chrono::NaiveDate;
use strum::IntoEnumIterator;
use thiserror::Error;

use crate::model::{DateRangeFilter, FieldName, FormFields, Laboratory, ReservationDraft};
use crate::time::{self, FormatError};

// ── Date range ───────────────────────────────────────────────────────

/// Which end of the date range is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MissingDates {
    #[error("Please select both start and end dates")]
    Start,
    #[error("Please select both start and end dates")]
    End,
    #[error("Please select both start and end dates")]
    Both,
}

/// Presence check only. `start > end` is deliberately accepted.
pub fn validate_date_range(range: &DateRangeFilter) -> Result<(), MissingDates> {
    match (
        range.start_date.trim().is_empty(),
        range.end_date.trim().is_empty(),
    ) {
        (false, false) => Ok(()),
        (true, false) => Err(MissingDates::Start),
        (false, true) => Err(MissingDates::End),
        (true, true) => Err(MissingDates::Both),
    }
}

/// Failure while turning the filter into query dates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeError {
    #[error(transparent)]
    Missing(#[from] MissingDates),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Validate, then parse both dates.
pub fn parse_date_range(range: &DateRangeFilter) -> Result<(NaiveDate, NaiveDate), DateRangeError> {
    validate_date_range(range)?;
    let start = time::parse_date(&range.start_date)?;
    let end = time::parse_date(&range.end_date)?;
    Ok((start, end))
}

// ── Reservation form ─────────────────────────────────────────────────

/// Fields that are empty or hold an unacceptable value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", self.describe())]
pub struct DraftError {
    pub missing: Vec<FieldName>,
    pub invalid: Vec<FieldName>,
}

impl DraftError {
    fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }

    fn describe(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        if !self.missing.is_empty() {
            parts.push(format!(
                "Please fill in all required fields: {}",
                join_fields(&self.missing)
            ));
        }
        if !self.invalid.is_empty() {
            parts.push(format!("Invalid value for: {}", join_fields(&self.invalid)));
        }
        parts.join(". ")
    }
}

fn join_fields(fields: &[FieldName]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check the raw form and build a draft with a canonical timestamp.
///
/// Every field must be non-empty, the laboratory must be one of the
/// known labs, and the reservation time must parse.
pub fn validate_draft_fields(form: &FormFields) -> Result<ReservationDraft, DraftError> {
    let mut error = DraftError::default();

    for field in FieldName::iter() {
        if form.get(field).trim().is_empty() {
            error.missing.push(field);
        }
    }

    let laboratory = match form.laboratory.trim() {
        "" => None,
        raw => Laboratory::from_str(raw)
            .inspect_err(|_| error.invalid.push(FieldName::Laboratory))
            .ok(),
    };

    let reservation_time = match form.reservation_time.trim() {
        "" => None,
        raw => time::to_canonical(raw)
            .inspect_err(|_| error.invalid.push(FieldName::ReservationTime))
            .ok(),
    };

    match (laboratory, reservation_time) {
        (Some(laboratory), Some(reservation_time)) if error.is_empty() => Ok(ReservationDraft {
            email: form.email.trim().to_owned(),
            name: form.name.trim().to_owned(),
            student_id: form.student_id.trim().to_owned(),
            laboratory,
            reservation_time,
        }),
        _ => Err(error),
    }
}
