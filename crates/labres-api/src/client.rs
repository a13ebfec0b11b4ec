// Async HTTP client for the reservation service.
//
// Base path: /api/
// Endpoints: reservations/active, reservations/past, reservations

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;
use crate::types::{CreateReservationRequest, ErrorResponse, ReservationResponse};

/// Query-string date format for `GET /reservations/past`.
const QUERY_DATE_FORMAT: &str = "%Y-%m-%d";

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the reservation service.
///
/// One request per call: no retry, no caching. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ReservationClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ReservationClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for `base_url` (e.g. `http://localhost:8080/api`).
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base path ends with `/` so relative joins stay under it.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The normalized base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        Self::handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        match serde_json::from_str::<ErrorResponse>(&raw) {
            Ok(ErrorResponse {
                message: Some(message),
            }) if !message.trim().is_empty() => Error::Rejected {
                status: status.as_u16(),
                message,
            },
            _ => Error::Status {
                status: status.as_u16(),
            },
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// `GET /reservations/active`: reservations whose time has not elapsed.
    pub async fn list_active(&self) -> Result<Vec<ReservationResponse>, Error> {
        self.get("reservations/active").await
    }

    /// `GET /reservations/past?startDate=..&endDate=..`
    ///
    /// Date ordering is not checked here; the service decides.
    pub async fn list_past(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<ReservationResponse>, Error> {
        self.get_with_params(
            "reservations/past",
            &[
                ("startDate", start_date.format(QUERY_DATE_FORMAT).to_string()),
                ("endDate", end_date.format(QUERY_DATE_FORMAT).to_string()),
            ],
        )
        .await
    }

    /// `POST /reservations`: returns the created reservation.
    pub async fn create_reservation(
        &self,
        request: &CreateReservationRequest,
    ) -> Result<ReservationResponse, Error> {
        self.post("reservations", request).await
    }
}
