//! Property tests for schedule expansion.
//!
//! Uses UTC so absolute durations are not disturbed by DST shifts.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use proptest::prelude::*;
use snooze_core::schedule::{classify, expand, DayClass, DayKind, WEEKEND_GRACE_MINUTES};
use snooze_core::{ScheduleConfig, SnoozeConfig, SnoozeSchedule};

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

prop_compose! {
    fn schedule_config()(
        start_offset in 0i64..10_000,
        hour in 0u32..24,
        range_days in 0u32..60,
        weekday_minutes in 0u32..(24 * 60),
        weekend_hour in 0u32..24,
        weekend_days in 0u32..4,
        anchor in 0usize..7,
    ) -> ScheduleConfig {
        let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Duration::days(start_offset);
        SnoozeConfig {
            project_id: "prop".into(),
            snooze_display_name: "Prop".into(),
            policy_details: vec!["projects/prop/alertPolicies/1".into()],
            snooze_schedule: SnoozeSchedule {
                weekday_start_date_time: format!("{date}T{hour:02}:00:00Z"),
                weekday_end_duration_days: range_days,
                weekday_duration: weekday_minutes,
                weekend_start_time: format!("{weekend_hour:02}:00"),
                weekend_duration_days: weekend_days,
                timezone: "UTC".into(),
                weekend_anchor: WEEK[anchor].to_string(),
            },
        }
        .resolve()
        .unwrap()
    }
}

proptest! {
    #[test]
    fn request_count_excludes_covered_days(cfg in schedule_config()) {
        let first = cfg.start().date_naive();
        let covered = (0..=cfg.range_days())
            .map(|n| first + Duration::days(i64::from(n)))
            .filter(|d| classify(d.weekday(), cfg.weekend_anchor()) == DayClass::Covered)
            .count();

        let plans: Vec<_> = expand(&cfg).collect();
        prop_assert_eq!(plans.len(), cfg.range_days() as usize + 1);
        prop_assert_eq!(
            expand(&cfg).requests().count(),
            cfg.range_days() as usize + 1 - covered
        );
    }

    #[test]
    fn anchor_day_never_gets_a_weekday_interval(cfg in schedule_config()) {
        for plan in expand(&cfg) {
            if plan.weekday() == cfg.weekend_anchor() {
                prop_assert!(matches!(plan.kind, DayKind::WeekendAnchor(_)));
            }
            if let DayKind::Weekday(_) = plan.kind {
                prop_assert_eq!(classify(plan.weekday(), cfg.weekend_anchor()), DayClass::Weekday);
            }
        }
    }

    #[test]
    fn interval_lengths_match_configuration(cfg in schedule_config()) {
        for plan in expand(&cfg) {
            match &plan.kind {
                DayKind::Weekday(i) => prop_assert_eq!(
                    i.duration(),
                    Duration::minutes(i64::from(cfg.weekday_duration_minutes()))
                ),
                DayKind::WeekendAnchor(i) => prop_assert_eq!(
                    i.duration(),
                    Duration::days(i64::from(cfg.weekend_duration_days()))
                        + Duration::minutes(WEEKEND_GRACE_MINUTES)
                ),
                DayKind::Covered => {}
            }
        }
    }

    #[test]
    fn interval_starts_stay_inside_the_range(cfg in schedule_config()) {
        let first = cfg.start().date_naive();
        let last = first + Duration::days(i64::from(cfg.range_days()));
        for req in expand(&cfg).requests() {
            let date = req.interval.start.date_naive();
            prop_assert!(date >= first && date <= last);
            prop_assert!(req.interval.end >= req.interval.start);
        }
    }
}
