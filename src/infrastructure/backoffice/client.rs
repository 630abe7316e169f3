//! Backoffice API abstraction and its reqwest implementation

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::backoffice::{
    ApiErrorBody, DashboardSummary, FetchError, FlaggedEvent, FlaggedSubject, LeadDetail,
};

/// Read-only operations the dashboard needs from the backend
///
/// Implementations report failures as [`FetchError`]; the caller decides how
/// each kind is surfaced.
#[async_trait::async_trait]
pub trait BackofficeApi: Send + Sync + 'static {
    /// `GET /api/analytics/daily`
    async fn daily_summary(&self) -> Result<DashboardSummary, FetchError>;

    /// `GET /api/lead/{id}`
    async fn lead_detail(&self, lead_id: &str) -> Result<LeadDetail, FetchError>;

    /// `GET /api/spam/activities`
    async fn spam_activities(&self) -> Result<Vec<FlaggedEvent>, FetchError>;

    /// `GET /api/spam/users`
    async fn spam_users(&self) -> Result<Vec<FlaggedSubject>, FetchError>;
}

/// HTTP client for the backoffice API
pub struct HttpBackofficeApi {
    http: reqwest::Client,
    base: Url,
}

impl HttpBackofficeApi {
    /// Create a client rooted at `base_url`. Path prefixes such as an API
    /// gateway stage (`https://host/dev`) are preserved.
    ///
    /// No timeout is applied unless one is given.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base = Url::parse(base_url.trim())
            .with_context(|| format!("invalid API base URL: {base_url}"))?;
        if base.cannot_be_a_base() {
            anyhow::bail!("API base URL cannot carry a path: {base_url}");
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to create HTTP client")?;

        Ok(Self { http, base })
    }

    /// Build an endpoint URL from path segments. Each segment is
    /// percent-encoded, so a lead id can never escape its path position.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.set_query(None);
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        debug!(%url, "GET");
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        if !status.is_success() {
            let message = error_message(status, &body);
            warn!(%url, status = status.as_u16(), %message, "request rejected");
            return Err(FetchError::Application {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&body).map_err(|err| {
            warn!(%url, error = %err, "malformed response body");
            FetchError::Transport(format!("invalid JSON response: {err}"))
        })
    }
}

#[async_trait::async_trait]
impl BackofficeApi for HttpBackofficeApi {
    async fn daily_summary(&self) -> Result<DashboardSummary, FetchError> {
        self.get_json(self.endpoint(&["api", "analytics", "daily"]))
            .await
    }

    async fn lead_detail(&self, lead_id: &str) -> Result<LeadDetail, FetchError> {
        self.get_json(self.endpoint(&["api", "lead", lead_id])).await
    }

    async fn spam_activities(&self) -> Result<Vec<FlaggedEvent>, FetchError> {
        self.get_json(self.endpoint(&["api", "spam", "activities"]))
            .await
    }

    async fn spam_users(&self) -> Result<Vec<FlaggedSubject>, FetchError> {
        self.get_json(self.endpoint(&["api", "spam", "users"])).await
    }
}

/// Server-provided `error` text, falling back to the status reason
fn error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ApiErrorBody>(body)
        .ok()
        .and_then(|body| body.error)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
        })
}
