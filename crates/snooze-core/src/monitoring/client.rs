//! REST client for `projects.snoozes.create`.

use chrono::{SecondsFormat, Utc};
use chrono_tz::Tz;
use reqwest::Client;
use serde::Serialize;
use url::Url;

use super::token::TokenSource;
use super::traits::{CreatedSnooze, SnoozeApi};
use crate::error::ApiError;
use crate::schedule::SnoozeRequest;

/// Production Cloud Monitoring endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://monitoring.googleapis.com";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnoozeBody<'a> {
    display_name: &'a str,
    criteria: Criteria<'a>,
    interval: TimeInterval,
}

#[derive(Serialize)]
struct Criteria<'a> {
    policies: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TimeInterval {
    start_time: String,
    end_time: String,
}

fn timestamp(dt: &chrono::DateTime<Tz>) -> String {
    dt.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl<'a> SnoozeBody<'a> {
    fn from_request(request: &'a SnoozeRequest) -> Self {
        Self {
            display_name: &request.display_name,
            criteria: Criteria {
                policies: &request.policies,
            },
            interval: TimeInterval {
                start_time: timestamp(&request.interval.start),
                end_time: timestamp(&request.interval.end),
            },
        }
    }
}

/// Cloud Monitoring v3 client, authenticated with a bearer token.
pub struct MonitoringClient {
    http_client: Client,
    endpoint: Url,
    token: String,
}

impl MonitoringClient {
    /// Create a client against `endpoint` using an already obtained token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidEndpoint`] for a malformed URL and
    /// [`ApiError::ClientBuild`] if the HTTP client cannot be constructed.
    pub fn new(endpoint: &str, token: impl Into<String>) -> Result<Self, ApiError> {
        let normalized = if endpoint.ends_with('/') {
            endpoint.to_string()
        } else {
            format!("{endpoint}/")
        };
        let endpoint = Url::parse(&normalized).map_err(|source| ApiError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source,
        })?;
        let http_client = Client::builder()
            .user_agent(concat!("snooze-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self {
            http_client,
            endpoint,
            token: token.into(),
        })
    }

    /// Obtain a token from `source` and build a client against `endpoint`.
    pub async fn connect(endpoint: &str, source: &TokenSource) -> Result<Self, ApiError> {
        let token = source.access_token().await?;
        tracing::debug!(endpoint, source = source.name(), "monitoring client ready");
        Self::new(endpoint, token)
    }

    fn snoozes_url(&self, parent: &str) -> Result<Url, ApiError> {
        let path = format!("v3/{parent}/snoozes");
        self.endpoint
            .join(&path)
            .map_err(|source| ApiError::InvalidEndpoint {
                endpoint: format!("{}{path}", self.endpoint),
                source,
            })
    }
}

impl SnoozeApi for MonitoringClient {
    async fn create_snooze(&self, request: &SnoozeRequest) -> Result<CreatedSnooze, ApiError> {
        let url = self.snoozes_url(&request.parent)?;
        let body = SnoozeBody::from_request(request);

        let resp = self
            .http_client
            .post(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::transport)?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ApiError::rejected(status.as_u16(), error_message(&text)));
        }

        resp.json::<CreatedSnooze>()
            .await
            .map_err(|source| ApiError::UnreadableResponse {
                status: status.as_u16(),
                source,
            })
    }
}

/// Pull `error.message` out of a Google API error body, or fall back to the
/// raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
