use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::schedule::SnoozeRequest;

/// A snooze resource as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSnooze {
    /// Full resource name, `projects/{id}/snoozes/{snooze}`.
    pub name: String,
    #[serde(default)]
    pub display_name: String,
}

/// Anything that can create snoozes.
///
/// Implementations make exactly one remote mutation per call and never
/// retry. There is no idempotency key, so submitting the same request twice
/// creates two snoozes.
pub trait SnoozeApi: Send + Sync {
    fn create_snooze(
        &self,
        request: &SnoozeRequest,
    ) -> impl Future<Output = Result<CreatedSnooze, ApiError>> + Send;
}
