//! # Seatplan HTTP Client
//!
//! Wrapper around the Seatplan REST API, used by the CLI to push plans to a
//! remote server and pull them back.
//!
//! Plan loads retry transient failures with doubling delays and degrade to
//! "no data available" rather than erroring out; saves report failure to the
//! caller.

use crate::api::{SaveSeatingRequest, SeatingResponse, StudentResponse};
use chrono::Utc;
use seatplan_core::{SeatAssignment, Seating};
use std::time::Duration;
use tokio::time::sleep;

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Total attempts for plan loads.
const FETCH_ATTEMPTS: u32 = 3;

/// Delay before the first retry; doubles after each failed attempt.
const RETRY_BASE_DELAY: Duration = Duration::from_secs(2);

// =============================================================================
// CLIENT ERRORS
// =============================================================================

/// Errors from the HTTP client layer.
#[derive(Debug)]
pub enum ClientError {
    /// Cannot reach the Seatplan server.
    ConnectionFailed(String),
    /// 429 Too Many Requests.
    RateLimited,
    /// Server returned a 4xx/5xx error.
    ServerError(u16, String),
    /// Failed to parse response body.
    ParseError(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionFailed(url) => write!(f, "Cannot connect to Seatplan at {url}"),
            Self::RateLimited => write!(f, "Rate limited: too many requests"),
            Self::ServerError(status, msg) => write!(f, "Server error ({status}): {msg}"),
            Self::ParseError(msg) => write!(f, "Parse error: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

// =============================================================================
// CLIENT
// =============================================================================

/// HTTP client that wraps calls to the Seatplan REST API.
#[derive(Clone)]
pub struct SeatplanClient {
    http: reqwest::Client,
    base_url: String,
}

impl SeatplanClient {
    /// Create a new client pointing at the given Seatplan server URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Build a request with the per-request timeout applied.
    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.http.request(method, &url).timeout(REQUEST_TIMEOUT)
    }

    /// Send a request and handle connection errors.
    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, ClientError> {
        req.send()
            .await
            .map_err(|e| ClientError::ConnectionFailed(format!("{}: {e}", self.base_url)))
    }

    /// Reject error status codes common to every endpoint.
    async fn handle_status(
        &self,
        resp: reqwest::Response,
    ) -> Result<reqwest::Response, ClientError> {
        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ClientError::RateLimited);
        }
        if status.is_client_error() || status.is_server_error() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::ServerError(status.as_u16(), body));
        }
        Ok(resp)
    }

    /// POST /api/save-seating — push a plan to the server.
    ///
    /// Returns the stored assignment count reported by the server.
    ///
    /// # Errors
    ///
    /// Any connection, status, or parse failure. Saves are not retried; the
    /// caller decides whether a failed push is fatal.
    pub async fn save_seating(&self, seating: &Seating) -> Result<usize, ClientError> {
        let body = SaveSeatingRequest {
            seating_arrangement: seating.assignments.clone(),
        };
        let req = self
            .request(reqwest::Method::POST, "/api/save-seating")
            .json(&body);
        let resp = self.send(req).await?;
        let resp = self.handle_status(resp).await?;

        let saved: crate::api::SaveSeatingResponse = resp
            .json()
            .await
            .map_err(|e| ClientError::ParseError(e.to_string()))?;
        Ok(saved.total_students)
    }

    /// GET /api/seating — fetch the stored plan, retrying transient failures.
    ///
    /// Makes up to three attempts, sleeping 2s then 4s between them. A server
    /// holding no plan (404) and a final failed attempt both yield `None`:
    /// "no data available" is an answer, not an error.
    pub async fn fetch_seating(&self) -> Option<Seating> {
        let mut delay = RETRY_BASE_DELAY;
        for attempt in 1..=FETCH_ATTEMPTS {
            match self.try_fetch_seating().await {
                Ok(found) => return found,
                Err(e) if attempt < FETCH_ATTEMPTS => {
                    tracing::warn!(
                        "Load attempt {}/{} failed: {} (retrying in {:?})",
                        attempt,
                        FETCH_ATTEMPTS,
                        e,
                        delay
                    );
                    sleep(delay).await;
                    delay = delay.saturating_mul(2);
                }
                Err(e) => {
                    tracing::warn!("Load failed after {} attempts: {}", FETCH_ATTEMPTS, e);
                }
            }
        }
        None
    }

    /// Single fetch attempt. `Ok(None)` means the server answered but holds
    /// no plan; `Err` means the attempt should be retried.
    async fn try_fetch_seating(&self) -> Result<Option<Seating>, ClientError> {
        let req = self.request(reqwest::Method::GET, "/api/seating");
        let resp = self.send(req).await?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = self.handle_status(resp).await?;

        let body: SeatingResponse = resp
            .json()
            .await
            .map_err(|e| ClientError::ParseError(e.to_string()))?;
        Ok(Some(Seating {
            assignments: body.seating_arrangement,
            unplaced: body.unplaced_count,
            generated_at: body.generated_at.unwrap_or_else(Utc::now),
        }))
    }

    /// GET /api/student/{id} — look up one examinee on the server.
    ///
    /// # Errors
    ///
    /// Any connection, status, or parse failure other than 404, which maps
    /// to `Ok(None)`.
    pub async fn fetch_student(
        &self,
        identifier: &str,
    ) -> Result<Option<SeatAssignment>, ClientError> {
        let req = self.request(reqwest::Method::GET, &format!("/api/student/{identifier}"));
        let resp = self.send(req).await?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = self.handle_status(resp).await?;

        let body: StudentResponse = resp
            .json()
            .await
            .map_err(|e| ClientError::ParseError(e.to_string()))?;
        Ok(body.student)
    }
}
