// ── Core error types ──
//
// User-facing errors from labres-core. Consumers never see HTTP status
// codes or JSON parse failures directly; `From<labres_api::Error>` folds
// them into the variants below.

use thiserror::Error;

use crate::time::FormatError;
use crate::validate::{DateRangeError, DraftError, MissingDates};

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Remote errors ────────────────────────────────────────────────
    #[error("Cannot reach reservation service: {reason}")]
    Network { reason: String },

    #[error("Reservation service timed out")]
    Timeout,

    /// Structured rejection; `message` is shown verbatim.
    #[error("{message}")]
    Rejected { message: String },

    #[error("Invalid response from reservation service: {message}")]
    InvalidResponse { message: String },

    // ── Local validation ─────────────────────────────────────────────
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    MissingFields(#[from] DraftError),

    #[error(transparent)]
    MissingDates(#[from] MissingDates),

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Raised before any request was sent.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Format(_) | Self::MissingFields(_) | Self::MissingDates(_)
        )
    }
}

impl From<DateRangeError> for CoreError {
    fn from(err: DateRangeError) -> Self {
        match err {
            DateRangeError::Missing(missing) => Self::MissingDates(missing),
            DateRangeError::Format(format) => Self::Format(format),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<labres_api::Error> for CoreError {
    fn from(err: labres_api::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout;
        }
        match err {
            labres_api::Error::Transport(e) => Self::Network {
                reason: e.to_string(),
            },
            labres_api::Error::Status { status } => Self::Network {
                reason: format!("HTTP {status}"),
            },
            labres_api::Error::Rejected { message, .. } => Self::Rejected { message },
            labres_api::Error::Deserialization { message, .. } => {
                Self::InvalidResponse { message }
            }
            labres_api::Error::InvalidUrl(e) => Self::Config {
                message: format!("Invalid URL: {e}"),
            },
            labres_api::Error::Tls(msg) => Self::Config {
                message: format!("TLS error: {msg}"),
            },
        }
    }
}
