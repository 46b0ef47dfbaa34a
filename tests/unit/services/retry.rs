//! Unit tests for the retry policy

use std::time::Duration;
use strikewise::services::retry::RetryPolicy;

#[test]
fn test_default_policy_doubles_from_one_second() {
    let delays = RetryPolicy::default().delays();
    assert_eq!(
        delays,
        vec![
            Duration::from_secs(1),
            Duration::from_secs(2),
            Duration::from_secs(4),
            Duration::from_secs(8),
        ]
    );
}

#[test]
fn test_delays_are_capped() {
    let policy = RetryPolicy {
        max_attempts: 5,
        min_delay: Duration::from_secs(1),
        max_delay: Duration::from_secs(3),
    };
    assert_eq!(
        policy.delays(),
        vec![
            Duration::from_secs(1),
            Duration::from_secs(2),
            Duration::from_secs(3),
            Duration::from_secs(3),
        ]
    );
}

#[test]
fn test_single_attempt_never_sleeps() {
    let policy = RetryPolicy {
        max_attempts: 1,
        ..RetryPolicy::default()
    };
    assert!(policy.delays().is_empty());
}
