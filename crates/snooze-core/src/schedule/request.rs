use serde::Serialize;

use super::Interval;
use crate::config::ScheduleConfig;

/// A single create-snooze call, derived from the schedule and one interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnoozeRequest {
    /// `projects/{id}`
    pub parent: String,
    pub display_name: String,
    /// Alert policies the snooze applies to.
    pub policies: Vec<String>,
    pub interval: Interval,
}

impl SnoozeRequest {
    /// Build the request; the display name is the prefix and the start date.
    pub fn new(config: &ScheduleConfig, interval: Interval) -> Self {
        Self {
            parent: config.parent(),
            display_name: format!(
                "{} - {}",
                config.display_name_prefix,
                interval.start.format("%Y-%m-%d")
            ),
            policies: config.policies.clone(),
            interval,
        }
    }
}
