//! Access-token acquisition for the Monitoring API.
//!
//! Three sources cover the usual ways the tool is run:
//! - an explicit token (flag or `GOOGLE_OAUTH_ACCESS_TOKEN`),
//! - the local `gcloud` CLI login,
//! - the GCE / Cloud Run metadata server.

use reqwest::Client;
use serde::Deserialize;

use crate::error::ApiError;

/// Environment variable holding a ready-made access token.
pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

/// Overrides the metadata server host, as the Google client libraries do.
pub const METADATA_HOST_ENV: &str = "GCE_METADATA_HOST";

const DEFAULT_METADATA_HOST: &str = "metadata.google.internal";
const METADATA_TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";

/// Where the bearer token comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    Static(String),
    Gcloud,
    Metadata,
}

#[derive(Deserialize)]
struct MetadataToken {
    access_token: String,
}

impl TokenSource {
    /// `Static` when `GOOGLE_OAUTH_ACCESS_TOKEN` is set, otherwise `Gcloud`.
    pub fn from_env() -> Self {
        match std::env::var(ACCESS_TOKEN_ENV) {
            Ok(token) if !token.trim().is_empty() => Self::Static(token.trim().to_string()),
            _ => Self::Gcloud,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Static(_) => "static token",
            Self::Gcloud => "gcloud",
            Self::Metadata => "metadata server",
        }
    }

    /// Fetch a token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Token`] if the source yields no usable token.
    pub async fn access_token(&self) -> Result<String, ApiError> {
        let token = match self {
            Self::Static(token) => token.clone(),
            Self::Gcloud => self.gcloud_token().await?,
            Self::Metadata => self.metadata_token().await?,
        };
        if token.is_empty() {
            return Err(self.error("empty access token"));
        }
        Ok(token)
    }

    async fn gcloud_token(&self) -> Result<String, ApiError> {
        let output = tokio::process::Command::new("gcloud")
            .args(["auth", "print-access-token"])
            .output()
            .await
            .map_err(|e| self.error(format!("failed to run gcloud: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.error(stderr.trim().to_string()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    async fn metadata_token(&self) -> Result<String, ApiError> {
        let host = std::env::var(METADATA_HOST_ENV)
            .unwrap_or_else(|_| DEFAULT_METADATA_HOST.to_string());
        let url = format!("http://{host}{METADATA_TOKEN_PATH}");

        let resp = Client::new()
            .get(&url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| self.error(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(self.error(format!("metadata server returned {}", resp.status())));
        }

        let token: MetadataToken = resp.json().await.map_err(|e| self.error(e.to_string()))?;
        Ok(token.access_token)
    }

    fn error(&self, message: impl Into<String>) -> ApiError {
        ApiError::Token {
            source_name: self.name(),
            message: message.into(),
        }
    }
}
