//! Snooze schedule configuration.
//!
//! The configuration document names the Cloud project, the display-name
//! prefix, the alert policies to suppress, and the recurring schedule.
//! It is read once at startup from YAML, TOML or JSON (picked by file
//! extension) and resolved into an immutable [`ScheduleConfig`] that the
//! expander consumes.
//!
//! ```yaml
//! project_id: my-project
//! snooze_display_name: Out of hours
//! policy_details:
//!   - projects/my-project/alertPolicies/123
//! snooze_schedule:
//!   weekday_start_date_time: "2023-10-23T00:00:00+01:00"
//!   weekday_end_duration_days: 7
//!   weekday_duration: 30
//!   weekend_start_time: "22:00"
//!   weekend_duration_days: 2
//! ```

use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, NaiveTime, Offset, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result, ScheduleError};
use crate::schedule::resolve_local;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Recurring schedule section of the configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnoozeSchedule {
    /// Range start, RFC3339.
    pub weekday_start_date_time: String,
    /// Range length in days; the last day is included.
    pub weekday_end_duration_days: u32,
    /// Weekday snooze length in minutes.
    pub weekday_duration: u32,
    /// Weekend snooze start, "HH:MM" on the anchor day.
    pub weekend_start_time: String,
    pub weekend_duration_days: u32,
    /// IANA zone the schedule is evaluated in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Day of week that opens the weekend snooze.
    #[serde(default = "default_weekend_anchor")]
    pub weekend_anchor: String,
}

/// Configuration document as it appears on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnoozeConfig {
    pub project_id: String,
    pub snooze_display_name: String,
    /// Fully-qualified alert policy names.
    pub policy_details: Vec<String>,
    pub snooze_schedule: SnoozeSchedule,
}

fn default_timezone() -> String {
    "Europe/London".into()
}
fn default_weekend_anchor() -> String {
    "Friday".into()
}

/// On-disk formats understood by [`SnoozeConfig::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl SnoozeConfig {
    /// Read and parse a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, its extension is not a
    /// known format, or its content does not deserialize.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::parse(&content, format, path)?;
        tracing::debug!(
            path = %path.display(),
            project = %cfg.project_id,
            policies = cfg.policy_details.len(),
            "loaded snooze configuration"
        );
        Ok(cfg)
    }

    /// Parse configuration content in the given format.
    ///
    /// `origin` is only used for error messages.
    pub fn parse(content: &str, format: ConfigFormat, origin: &Path) -> Result<Self> {
        let parsed = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| {
            ConfigError::ParseFailed {
                path: origin.to_path_buf(),
                message,
            }
            .into()
        })
    }

    /// Validate the document and resolve it into a [`ScheduleConfig`].
    ///
    /// # Errors
    ///
    /// Fails on an empty project id or policy list, an unknown timezone or
    /// weekday name, a start date-time that is not RFC3339, or a weekend
    /// start time that is not `HH:MM`.
    pub fn resolve(&self) -> Result<ScheduleConfig> {
        if self.project_id.trim().is_empty() {
            return Err(invalid("project_id", "must not be empty"));
        }
        if self.policy_details.is_empty() {
            return Err(invalid("policy_details", "at least one alert policy is required"));
        }

        let sched = &self.snooze_schedule;
        let timezone = Tz::from_str(&sched.timezone).map_err(|e| {
            invalid("snooze_schedule.timezone", format!("'{}': {e}", sched.timezone))
        })?;
        let weekend_anchor = Weekday::from_str(&sched.weekend_anchor).map_err(|_| {
            invalid(
                "snooze_schedule.weekend_anchor",
                format!("'{}' is not a day of the week", sched.weekend_anchor),
            )
        })?;

        // The written wall clock fixes the first calendar day; the zone
        // supplies the offset, so a stale offset literal cannot shift the date.
        let written = DateTime::parse_from_rfc3339(&sched.weekday_start_date_time).map_err(
            |source| ScheduleError::InvalidStartDateTime {
                value: sched.weekday_start_date_time.clone(),
                source,
            },
        )?;
        let start = resolve_local(timezone, written.naive_local());
        if written.offset().local_minus_utc() != start.offset().fix().local_minus_utc() {
            tracing::warn!(
                written = %sched.weekday_start_date_time,
                resolved = %start.to_rfc3339(),
                timezone = %timezone,
                "start offset does not match the schedule timezone; using the zone's offset"
            );
        }

        let weekend_start_time = NaiveTime::parse_from_str(&sched.weekend_start_time, "%H:%M")
            .map_err(|source| ScheduleError::InvalidTimeOfDay {
                value: sched.weekend_start_time.clone(),
                source,
            })?;

        let span_days =
            u64::from(sched.weekday_end_duration_days) + u64::from(sched.weekend_duration_days) + 1;
        start
            .naive_local()
            .checked_add_days(chrono::Days::new(span_days))
            .ok_or_else(|| ScheduleError::RangeOverflow {
                start: sched.weekday_start_date_time.clone(),
                days: span_days,
            })?;

        Ok(ScheduleConfig {
            project_id: self.project_id.clone(),
            display_name_prefix: self.snooze_display_name.clone(),
            policies: self.policy_details.clone(),
            start,
            range_days: sched.weekday_end_duration_days,
            weekday_duration_minutes: sched.weekday_duration,
            weekend_start_time,
            weekend_duration_days: sched.weekend_duration_days,
            timezone,
            weekend_anchor,
        })
    }
}

fn invalid(key: &str, message: impl Into<String>) -> crate::error::CoreError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.into(),
    }
    .into()
}

/// Resolved, immutable schedule handed to the expander.
///
/// Only [`SnoozeConfig::resolve`] builds one outside this crate, so every
/// instance has passed validation and range checks.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleConfig {
    pub(crate) project_id: String,
    pub(crate) display_name_prefix: String,
    pub(crate) policies: Vec<String>,
    /// First day of the range, in `timezone`.
    pub(crate) start: DateTime<Tz>,
    pub(crate) range_days: u32,
    pub(crate) weekday_duration_minutes: u32,
    pub(crate) weekend_start_time: NaiveTime,
    pub(crate) weekend_duration_days: u32,
    pub(crate) timezone: Tz,
    pub(crate) weekend_anchor: Weekday,
}

impl ScheduleConfig {
    /// Parent scope for create requests, `projects/{id}`.
    pub fn parent(&self) -> String {
        format!("projects/{}", self.project_id)
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn display_name_prefix(&self) -> &str {
        &self.display_name_prefix
    }

    pub fn policies(&self) -> &[String] {
        &self.policies
    }

    pub fn start(&self) -> DateTime<Tz> {
        self.start
    }

    pub fn range_days(&self) -> u32 {
        self.range_days
    }

    pub fn weekday_duration_minutes(&self) -> u32 {
        self.weekday_duration_minutes
    }

    pub fn weekend_start_time(&self) -> NaiveTime {
        self.weekend_start_time
    }

    pub fn weekend_duration_days(&self) -> u32 {
        self.weekend_duration_days
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn weekend_anchor(&self) -> Weekday {
        self.weekend_anchor
    }
}

/// Load and resolve a config file in one step.
pub fn load_schedule(path: impl AsRef<Path>) -> Result<ScheduleConfig> {
    SnoozeConfig::load(path)?.resolve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use chrono::{Datelike, Timelike};

    const YAML: &str = r#"
project_id: test-project
snooze_display_name: Nightly
policy_details:
  - projects/test-project/alertPolicies/1
  - projects/test-project/alertPolicies/2
snooze_schedule:
  weekday_start_date_time: "2023-10-23T00:00:00+01:00"
  weekday_end_duration_days: 7
  weekday_duration: 30
  weekend_start_time: "22:00"
  weekend_duration_days: 2
"#;

    fn yaml_config() -> SnoozeConfig {
        SnoozeConfig::parse(YAML, ConfigFormat::Yaml, Path::new("config.yaml")).unwrap()
    }

    #[test]
    fn parses_yaml_with_defaults() {
        let cfg = yaml_config();
        assert_eq!(cfg.project_id, "test-project");
        assert_eq!(cfg.policy_details.len(), 2);
        assert_eq!(cfg.snooze_schedule.timezone, "Europe/London");
        assert_eq!(cfg.snooze_schedule.weekend_anchor, "Friday");
    }

    #[test]
    fn resolves_into_schedule_config() {
        let sched = yaml_config().resolve().unwrap();
        assert_eq!(sched.parent(), "projects/test-project");
        assert_eq!(sched.timezone, chrono_tz::Europe::London);
        assert_eq!(sched.weekend_anchor, Weekday::Fri);
        assert_eq!(sched.start.weekday(), Weekday::Mon);
        assert_eq!(sched.start.hour(), 0);
        assert_eq!(sched.weekend_start_time, NaiveTime::from_hms_opt(22, 0, 0).unwrap());
    }

    #[test]
    fn format_is_picked_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.yml")), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_path(Path::new("a.YAML")), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_path(Path::new("a.toml")), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_path(Path::new("a.json")), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_path(Path::new("a.ini")), None);
        assert_eq!(ConfigFormat::from_path(Path::new("config")), None);
    }

    #[test]
    fn start_keeps_written_date_when_offset_disagrees_with_zone() {
        // London is on GMT in January, so +01:00 is stale for this date.
        let mut cfg = yaml_config();
        cfg.snooze_schedule.weekday_start_date_time = "2024-01-08T00:00:00+01:00".into();
        let sched = cfg.resolve().unwrap();

        assert_eq!(sched.start.to_rfc3339(), "2024-01-08T00:00:00+00:00");
        let plans: Vec<_> = crate::schedule::expand(&sched).collect();
        assert_eq!(plans[0].date(), chrono::NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        assert_eq!(plans[0].weekday(), Weekday::Mon);
        assert!(matches!(plans[0].kind, crate::schedule::DayKind::Weekday(_)));
        assert!(matches!(plans[4].kind, crate::schedule::DayKind::WeekendAnchor(_)));
        assert_eq!(plans[4].date(), chrono::NaiveDate::from_ymd_opt(2024, 1, 12).unwrap());
    }

    #[test]
    fn oversized_range_reports_the_checked_span() {
        let mut cfg = yaml_config();
        cfg.snooze_schedule.weekday_start_date_time = "9999-12-01T00:00:00Z".into();
        cfg.snooze_schedule.weekday_end_duration_days = u32::MAX;
        cfg.snooze_schedule.weekend_duration_days = 2;
        match cfg.resolve().unwrap_err() {
            CoreError::Schedule(ScheduleError::RangeOverflow { days, .. }) => {
                assert_eq!(days, u64::from(u32::MAX) + 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_start_is_a_schedule_error() {
        let mut cfg = yaml_config();
        cfg.snooze_schedule.weekday_start_date_time = "2023-10-23 00:00".into();
        let err = cfg.resolve().unwrap_err();
        assert!(matches!(
            err,
            CoreError::Schedule(ScheduleError::InvalidStartDateTime { .. })
        ));
    }

    #[test]
    fn malformed_weekend_time_is_a_schedule_error() {
        let mut cfg = yaml_config();
        cfg.snooze_schedule.weekend_start_time = "10pm".into();
        let err = cfg.resolve().unwrap_err();
        assert!(matches!(
            err,
            CoreError::Schedule(ScheduleError::InvalidTimeOfDay { .. })
        ));
    }

    #[test]
    fn empty_policy_list_is_rejected() {
        let mut cfg = yaml_config();
        cfg.policy_details.clear();
        let err = cfg.resolve().unwrap_err();
        assert!(err.to_string().contains("policy_details"));
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let mut cfg = yaml_config();
        cfg.snooze_schedule.timezone = "Mars/Olympus".into();
        assert!(cfg.resolve().is_err());
    }

    #[test]
    fn weekend_anchor_accepts_short_names() {
        let mut cfg = yaml_config();
        cfg.snooze_schedule.weekend_anchor = "sat".into();
        assert_eq!(cfg.resolve().unwrap().weekend_anchor, Weekday::Sat);

        cfg.snooze_schedule.weekend_anchor = "someday".into();
        assert!(cfg.resolve().is_err());
    }

    #[test]
    fn negative_durations_fail_to_parse() {
        let content = YAML.replace("weekday_duration: 30", "weekday_duration: -30");
        let result = SnoozeConfig::parse(&content, ConfigFormat::Yaml, Path::new("config.yaml"));
        assert!(matches!(
            result,
            Err(CoreError::Config(ConfigError::ParseFailed { .. }))
        ));
    }

    #[test]
    fn toml_and_json_documents_match_yaml() {
        let yaml = yaml_config();
        let toml_str = toml::to_string_pretty(&yaml).unwrap();
        let from_toml =
            SnoozeConfig::parse(&toml_str, ConfigFormat::Toml, Path::new("config.toml")).unwrap();
        let json_str = serde_json::to_string(&yaml).unwrap();
        let from_json =
            SnoozeConfig::parse(&json_str, ConfigFormat::Json, Path::new("config.json")).unwrap();

        assert_eq!(from_toml.resolve().unwrap(), yaml.resolve().unwrap());
        assert_eq!(from_json.resolve().unwrap(), yaml.resolve().unwrap());
    }
}
