// ── Runtime connection configuration ──
//
// Describes *how* to reach the reservation service. Never touches disk;
// the CLI/TUI builds a `ServiceConfig` (via labres-config) and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use labres_api::{ReservationClient, TlsMode, TransportConfig};
use url::Url;

use crate::error::CoreError;

/// Base URL used when nothing is configured.
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8080/api";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed certs).
    DangerAcceptInvalid,
}

/// Configuration for one reservation service endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Service base URL including the `/api` prefix.
    pub base_url: Url,
    /// Per-request timeout; a timed-out request settles as `CoreError::Timeout`.
    pub timeout: Duration,
    pub tls: TlsVerification,
}

impl ServiceConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            tls: TlsVerification::default(),
        }
    }

    /// Parse `raw` as the base URL.
    pub fn from_url_str(raw: &str) -> Result<Self, CoreError> {
        let base_url = Url::parse(raw).map_err(|e| CoreError::Config {
            message: format!("invalid service URL '{raw}': {e}"),
        })?;
        Ok(Self::new(base_url))
    }

    /// Build an HTTP client for this endpoint.
    pub fn connect(&self) -> Result<ReservationClient, CoreError> {
        let transport = TransportConfig {
            tls: match &self.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: self.timeout,
        };
        Ok(ReservationClient::new(self.base_url.as_str(), &transport)?)
    }
}
