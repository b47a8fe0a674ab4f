//! Submits one computed snooze at a time.

use super::traits::{CreatedSnooze, SnoozeApi};
use crate::error::ApiError;
use crate::schedule::SnoozeRequest;

/// Stateless wrapper that sends each request exactly once.
pub struct SnoozeEmitter<A> {
    api: A,
}

impl<A: SnoozeApi> SnoozeEmitter<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Create the snooze described by `request`.
    ///
    /// Errors are returned as-is; nothing is retried.
    pub async fn emit(&self, request: &SnoozeRequest) -> Result<CreatedSnooze, ApiError> {
        tracing::debug!(
            parent = %request.parent,
            display_name = %request.display_name,
            start = %request.interval.start.to_rfc3339(),
            end = %request.interval.end.to_rfc3339(),
            "creating snooze"
        );
        match self.api.create_snooze(request).await {
            Ok(created) => {
                tracing::info!(name = %created.name, "snooze created");
                Ok(created)
            }
            Err(err) => {
                tracing::error!(display_name = %request.display_name, error = %err, "snooze creation failed");
                Err(err)
            }
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}
