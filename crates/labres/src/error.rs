//! CLI error types with miette diagnostics.
//!
//! Maps controller failures and configuration problems into user-facing
//! errors with actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use labres_config::ConfigError;
use labres_core::{CoreError, ServiceConfig};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const REJECTED: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(dead_code, unused_assignments)]
pub enum CliError {
    // ── Service ──────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(labres::connection_failed),
        help(
            "Could not reach the reservation service at {url}: {reason}\n\
             Check that the service is running, or pass --service <URL>."
        )
    )]
    ConnectionFailed {
        message: String,
        url: String,
        reason: String,
    },

    #[error("{message}")]
    #[diagnostic(
        code(labres::timeout),
        help("No response within {seconds}s. Increase it with --timeout.")
    )]
    Timeout { message: String, seconds: u64 },

    #[error("{message}")]
    #[diagnostic(
        code(labres::rejected),
        help("The reservation service refused the request. Pick another slot or laboratory.")
    )]
    Rejected { message: String },

    #[error("{message}")]
    #[diagnostic(code(labres::invalid_response), help("{detail}"))]
    InvalidResponse { message: String, detail: String },

    // ── Input ────────────────────────────────────────────────────────
    #[error("{reason}")]
    #[diagnostic(code(labres::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(labres::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: labres config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(labres::config),
        help("Inspect the file with: labres config show")
    )]
    Config { message: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(labres::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(labres::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Rejected { .. } => exit_code::REJECTED,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Build from a failure the controller recorded. `shown` is the
    /// message the controller put in its view state.
    pub fn from_failure(failure: &CoreError, shown: String, service: &ServiceConfig) -> Self {
        match failure {
            CoreError::Network { reason } => Self::ConnectionFailed {
                message: shown,
                url: service.base_url.to_string(),
                reason: reason.clone(),
            },
            CoreError::Timeout => Self::Timeout {
                message: shown,
                seconds: service.timeout.as_secs(),
            },
            CoreError::Rejected { .. } => Self::Rejected { message: shown },
            CoreError::InvalidResponse { message } => Self::InvalidResponse {
                message: shown,
                detail: message.clone(),
            },
            CoreError::Format(_) | CoreError::MissingFields(_) | CoreError::MissingDates(_) => {
                Self::Validation {
                    field: "input".into(),
                    reason: shown,
                }
            }
            CoreError::Config { message } => Self::Config {
                message: message.clone(),
            },
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Config { message } => Self::Config { message },
            CoreError::Rejected { message } => Self::Rejected { message },
            other if other.is_local() => Self::Validation {
                field: "input".into(),
                reason: other.to_string(),
            },
            other => Self::Config {
                message: other.to_string(),
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::UnknownProfile { name, available } => {
                Self::ProfileNotFound { name, available }
            }
            other => Self::Config {
                message: other.to_string(),
            },
        }
    }
}
