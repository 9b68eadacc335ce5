use chrono::{DateTime, Datelike, TimeZone, Timelike, Weekday};

use crate::types::ScheduleConfig;

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Decides whether the scheduled report fires this tick: true only when
/// both the weekday and the `hour * 100 + minute` time code are configured.
///
/// Evaluated once per minute. There is no deduplication here, so the
/// caller must not evaluate the same qualifying minute twice.
pub fn should_run<Tz: TimeZone>(now: &DateTime<Tz>, config: &ScheduleConfig) -> bool {
    let today = weekday_name(now.weekday());
    let timecode = now.hour() * 100 + now.minute();
    config.days_to_run.contains(today) && config.times_to_run.contains(&timecode)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn schedule(days: &[&str], times: &[u32]) -> ScheduleConfig {
        ScheduleConfig {
            days_to_run: days.iter().map(|day| day.to_string()).collect(),
            times_to_run: times.iter().copied().collect(),
        }
    }

    #[test]
    fn fires_only_when_day_and_time_both_match() {
        // 2026-08-03 is a Monday.
        let cases = [
            ((2026, 8, 3, 9, 0), &["monday"][..], &[900][..], true),
            ((2026, 8, 3, 9, 1), &["monday"], &[900], false),
            ((2026, 8, 3, 9, 0), &["tuesday"], &[900], false),
            ((2026, 8, 4, 9, 0), &["tuesday"], &[900], true),
            ((2026, 8, 3, 13, 30), &["monday"], &[900, 1330], true),
            ((2026, 8, 3, 9, 0), &[], &[900], false),
            ((2026, 8, 3, 9, 0), &["monday"], &[], false),
        ];

        for (when, days, times, expected) in cases {
            let (y, mo, d, h, mi) = when;
            let now = Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap();
            assert_eq!(
                should_run(&now, &schedule(days, times)),
                expected,
                "{:?} days={:?} times={:?}",
                when,
                days,
                times
            );
        }
    }

    #[test]
    fn every_weekday_maps_to_its_lowercase_name() {
        // 2026-08-03 through 2026-08-09 cover Monday to Sunday.
        let names = [
            "monday",
            "tuesday",
            "wednesday",
            "thursday",
            "friday",
            "saturday",
            "sunday",
        ];
        for (offset, name) in names.iter().enumerate() {
            let now = Utc
                .with_ymd_and_hms(2026, 8, 3 + offset as u32, 9, 0, 0)
                .unwrap();
            assert!(should_run(&now, &schedule(&[name], &[900])));
        }
    }

    #[test]
    fn seconds_do_not_affect_the_time_code() {
        let now = Utc.with_ymd_and_hms(2026, 8, 3, 9, 0, 59).unwrap();
        assert!(should_run(&now, &schedule(&["monday"], &[900])));
    }
}
