// labres-core: View/session controller between labres-api and consumers (CLI/TUI).

pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod model;
pub mod service;
pub mod time;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DEFAULT_SERVICE_URL, ServiceConfig, TlsVerification};
pub use controller::{Completion, PendingRequest, Reply, Tab, Ticket, ViewController, ViewState};
pub use error::CoreError;
pub use service::ReservationService;
pub use time::FormatError;
pub use validate::{DraftError, MissingDates};

pub use model::{
    DateRangeFilter, FieldName, FormFields, Laboratory, Reservation, ReservationDraft,
    ReservationId,
};
