//! Sequential, fail-fast driver over an expanded schedule.
//!
//! Days are processed strictly in order and each create call is awaited
//! before the next day is looked at. The first failure stops the run;
//! snoozes already created are left in place.

use std::io::Write;

use crate::config::ScheduleConfig;
use crate::error::Result;
use crate::monitoring::{CreatedSnooze, SnoozeApi, SnoozeEmitter};
use crate::schedule::{expand, DayPlan, SnoozeRequest};

/// What a run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Snoozes created, in order. Empty for a dry run.
    pub created: Vec<CreatedSnooze>,
    /// Requests computed (and, unless dry-running, submitted).
    pub requests: Vec<SnoozeRequest>,
    /// Days skipped because the weekend snooze covers them.
    pub skipped: usize,
}

fn progress_line(out: &mut impl Write, plan: &DayPlan) -> std::io::Result<()> {
    let verb = if plan.is_covered() { "Skipping" } else { "Processing" };
    writeln!(out, "{verb} snooze for - {}", plan.day.format("%A, %Y-%m-%d"))
}

/// Create every snooze in the schedule.
///
/// # Errors
///
/// Stops at the first failed create call or failed write to `out`.
pub async fn apply<A: SnoozeApi>(
    config: &ScheduleConfig,
    emitter: &SnoozeEmitter<A>,
    out: &mut impl Write,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for plan in expand(config) {
        progress_line(out, &plan)?;
        let Some(interval) = plan.interval() else {
            summary.skipped += 1;
            continue;
        };

        let request = SnoozeRequest::new(config, *interval);
        let created = emitter.emit(&request).await?;
        writeln!(out, "Created {}", created.name)?;

        summary.requests.push(request);
        summary.created.push(created);
    }

    tracing::info!(
        created = summary.created.len(),
        skipped = summary.skipped,
        "snooze run complete"
    );
    Ok(summary)
}

/// Walk the schedule without calling the API.
pub fn plan(config: &ScheduleConfig, out: &mut impl Write) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for plan in expand(config) {
        progress_line(out, &plan)?;
        let Some(interval) = plan.interval() else {
            summary.skipped += 1;
            continue;
        };

        let request = SnoozeRequest::new(config, *interval);
        writeln!(
            out,
            "Would create \"{}\" from {} to {}",
            request.display_name,
            request.interval.start.to_rfc3339(),
            request.interval.end.to_rfc3339()
        )?;
        summary.requests.push(request);
    }

    Ok(summary)
}
