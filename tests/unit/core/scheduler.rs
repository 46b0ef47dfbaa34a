//! Unit tests for the polling schedule

use strikewise::core::scheduler::{cron_expression, schedule_for_interval, SchedulerError};

#[test]
fn test_sub_minute_interval_ticks_on_seconds() {
    assert_eq!(cron_expression(15).unwrap(), "*/15 * * * * *");
}

#[test]
fn test_minute_intervals_tick_on_minutes() {
    assert_eq!(cron_expression(60).unwrap(), "0 */1 * * * *");
    assert_eq!(cron_expression(300).unwrap(), "0 */5 * * * *");
}

#[test]
fn test_zero_interval_is_disabled() {
    assert!(matches!(cron_expression(0), Err(SchedulerError::Disabled)));
    assert!(schedule_for_interval(0).is_err());
}

#[test]
fn test_schedule_parses() {
    let schedule = schedule_for_interval(15).unwrap();
    let mut upcoming = schedule.upcoming(chrono::Utc);
    let first = upcoming.next().unwrap();
    let second = upcoming.next().unwrap();
    assert_eq!((second - first).num_seconds(), 15);
}

#[test]
fn test_hour_intervals_tick_on_hours() {
    assert_eq!(cron_expression(3_600).unwrap(), "0 0 */1 * * *");
    assert_eq!(cron_expression(7_200).unwrap(), "0 0 */2 * * *");
}

#[test]
fn test_uneven_intervals_are_rejected() {
    for interval in [7, 45, 90, 150, 420, 5_400, 18_000, 172_800] {
        assert!(
            matches!(
                cron_expression(interval),
                Err(SchedulerError::UnsupportedInterval { interval_seconds }) if interval_seconds == interval
            ),
            "interval {} should be rejected",
            interval
        );
        assert!(schedule_for_interval(interval).is_err());
    }
}

#[test]
fn test_accepted_intervals_keep_exact_spacing() {
    for interval in [1, 5, 15, 30, 60, 120, 300, 900, 3_600, 7_200] {
        let schedule = schedule_for_interval(interval).unwrap();
        let ticks: Vec<_> = schedule.upcoming(chrono::Utc).take(6).collect();
        for pair in ticks.windows(2) {
            assert_eq!(
                (pair[1] - pair[0]).num_seconds(),
                interval as i64,
                "interval {} drifted",
                interval
            );
        }
    }
}
