//! # Snooze Core Library
//!
//! Generates Cloud Monitoring snoozes (scheduled alert suppression) for
//! known-safe periods: weekday nights and weekends.
//!
//! ## Architecture
//!
//! - **Config**: YAML/TOML/JSON schedule document, resolved once into an
//!   immutable [`ScheduleConfig`]
//! - **Schedule**: pure day-by-day expansion of the schedule into
//!   suppression intervals
//! - **Monitoring**: the [`SnoozeApi`] seam and its REST implementation
//! - **Runner**: sequential, fail-fast driver used by the CLI
//!
//! ## Key Components
//!
//! - [`ScheduleExpander`]: lazy iterator over the day plans
//! - [`MonitoringClient`]: `projects.snoozes.create` client
//! - [`runner::apply`]: creates every snooze in a schedule

pub mod config;
pub mod error;
pub mod monitoring;
pub mod runner;
pub mod schedule;

pub use config::{load_schedule, ConfigFormat, ScheduleConfig, SnoozeConfig, SnoozeSchedule};
pub use error::{ApiError, ConfigError, CoreError, Result, ScheduleError};
pub use monitoring::{CreatedSnooze, MonitoringClient, SnoozeApi, SnoozeEmitter, TokenSource};
pub use runner::RunSummary;
pub use schedule::{expand, DayKind, DayPlan, Interval, ScheduleExpander, SnoozeRequest};
