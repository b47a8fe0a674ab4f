//! Schedule expansion: turns a recurring snooze schedule into concrete
//! suppression intervals, one calendar day at a time.
//!
//! Each day in the inclusive range `[start, start + range_days]` is
//! classified against the configured weekend anchor (Friday by default):
//!
//! - the anchor day opens a weekend interval at the configured start time,
//!   lasting the configured number of calendar days plus a fixed 30 minute
//!   grace extension;
//! - the two days after the anchor are already covered by that interval and
//!   produce nothing;
//! - every other day gets a weekday interval starting at the day's
//!   date-time and lasting the configured number of minutes.
//!
//! Everything here is pure. Parsing happens when the configuration is
//! resolved, and the remote calls live in [`crate::monitoring`].

mod request;

pub use request::SnoozeRequest;

use chrono::{
    DateTime, Datelike, Days, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Utc, Weekday,
};
use chrono_tz::Tz;
use serde::Serialize;

use crate::config::ScheduleConfig;

/// Fixed extension appended to every weekend interval.
pub const WEEKEND_GRACE_MINUTES: i64 = 30;

/// A suppression window, both ends in the schedule's timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl Interval {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// How a single day is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayClass {
    /// Plain weekday snooze.
    Weekday,
    /// Opens the weekend snooze.
    WeekendAnchor,
    /// Inside the weekend snooze opened by the anchor.
    Covered,
}

/// Classify a weekday against the weekend anchor.
///
/// The anchor check runs first, so the anchor day never falls through to the
/// weekday rule.
pub fn classify(day: Weekday, anchor: Weekday) -> DayClass {
    if day == anchor {
        DayClass::WeekendAnchor
    } else if day == anchor.succ() || day == anchor.succ().succ() {
        DayClass::Covered
    } else {
        DayClass::Weekday
    }
}

/// Outcome of expanding one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayKind {
    Weekday(Interval),
    WeekendAnchor(Interval),
    Covered,
}

/// One iterated day and what it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPlan {
    pub day: DateTime<Tz>,
    pub kind: DayKind,
}

impl DayPlan {
    pub fn date(&self) -> NaiveDate {
        self.day.date_naive()
    }

    pub fn weekday(&self) -> Weekday {
        self.day.weekday()
    }

    /// The interval to snooze, or `None` for a covered day.
    pub fn interval(&self) -> Option<&Interval> {
        match &self.kind {
            DayKind::Weekday(interval) | DayKind::WeekendAnchor(interval) => Some(interval),
            DayKind::Covered => None,
        }
    }

    pub fn is_covered(&self) -> bool {
        matches!(self.kind, DayKind::Covered)
    }
}

/// Weekday interval: `[day, day + minutes)`.
pub fn weekday_interval(day: &DateTime<Tz>, minutes: u32) -> Interval {
    Interval {
        start: *day,
        end: *day + Duration::minutes(i64::from(minutes)),
    }
}

/// Weekend interval opened on `date`.
///
/// The end is `days` calendar days later on the wall clock, so a DST change
/// inside the weekend shifts the absolute length by the offset difference.
pub fn weekend_interval(
    tz: Tz,
    date: NaiveDate,
    start_time: NaiveTime,
    days: u32,
) -> Interval {
    let local_start = date.and_time(start_time);
    let start = resolve_local(tz, local_start);
    // Resolved configs are range-checked, so saturation never triggers for them.
    let end = start
        .naive_local()
        .checked_add_days(Days::new(u64::from(days)))
        .map(|local_end| resolve_local(tz, local_end))
        .and_then(|end| end.checked_add_signed(Duration::minutes(WEEKEND_GRACE_MINUTES)))
        .unwrap_or_else(|| DateTime::<Utc>::MAX_UTC.with_timezone(&tz));
    Interval { start, end }
}

/// Map a wall-clock time to an instant in `tz`.
///
/// Ambiguous times (clocks going back) take the earlier instant. Times that
/// do not exist (clocks going forward) move to the end of the gap.
pub fn resolve_local(tz: Tz, local: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            // Gaps are at most a couple of hours; walk to the first valid minute.
            (1..=24 * 60)
                .filter_map(|m| local.checked_add_signed(Duration::minutes(m)))
                .find_map(|candidate| tz.from_local_datetime(&candidate).earliest())
                .unwrap_or_else(|| tz.from_utc_datetime(&local))
        }
    }
}

/// Expand a single day.
pub fn plan_day(config: &ScheduleConfig, day: DateTime<Tz>) -> DayPlan {
    let kind = match classify(day.weekday(), config.weekend_anchor) {
        DayClass::WeekendAnchor => DayKind::WeekendAnchor(weekend_interval(
            config.timezone,
            day.date_naive(),
            config.weekend_start_time,
            config.weekend_duration_days,
        )),
        DayClass::Covered => DayKind::Covered,
        DayClass::Weekday => {
            DayKind::Weekday(weekday_interval(&day, config.weekday_duration_minutes))
        }
    };
    DayPlan { day, kind }
}

/// Lazy day-by-day walk over a schedule's range.
///
/// Yields `range_days + 1` plans. Day `n` is computed from the start's wall
/// clock plus `n` calendar days, so a DST shift on one day never drifts into
/// the following ones.
#[derive(Debug, Clone)]
pub struct ScheduleExpander<'a> {
    config: &'a ScheduleConfig,
    offset: u32,
    done: bool,
}

impl<'a> ScheduleExpander<'a> {
    pub fn new(config: &'a ScheduleConfig) -> Self {
        Self {
            config,
            offset: 0,
            done: false,
        }
    }

    /// Only the days that produce a snooze, as create requests.
    pub fn requests(self) -> impl Iterator<Item = SnoozeRequest> + 'a {
        let config = self.config;
        self.filter_map(move |plan| {
            plan.interval()
                .cloned()
                .map(|interval| SnoozeRequest::new(config, interval))
        })
    }

    fn day_at(&self, offset: u32) -> Option<DateTime<Tz>> {
        let local = self
            .config
            .start
            .naive_local()
            .checked_add_days(Days::new(u64::from(offset)))?;
        Some(resolve_local(self.config.timezone, local))
    }
}

impl Iterator for ScheduleExpander<'_> {
    type Item = DayPlan;

    fn next(&mut self) -> Option<DayPlan> {
        if self.done || self.offset > self.config.range_days {
            return None;
        }
        let Some(day) = self.day_at(self.offset) else {
            self.done = true;
            return None;
        };
        if self.offset == self.config.range_days {
            self.done = true;
        } else {
            self.offset += 1;
        }
        Some(plan_day(self.config, day))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let remaining = (self.config.range_days - self.offset) as usize + 1;
        (0, Some(remaining))
    }
}

/// Expand a schedule into its day plans.
pub fn expand(config: &ScheduleConfig) -> ScheduleExpander<'_> {
    ScheduleExpander::new(config)
}
