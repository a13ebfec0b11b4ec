// ── Domain model ──
//
// Canonical reservation types consumed by the controller, CLI and TUI.
// Wire-level shapes live in `labres_api::types`; see `crate::convert`.

pub mod form;
pub mod reservation;

pub use form::{DateRangeFilter, FieldName, FormFields};
pub use reservation::{Laboratory, Reservation, ReservationDraft, ReservationId};
