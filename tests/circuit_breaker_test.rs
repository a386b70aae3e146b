// ABOUTME: Unit tests for the sensor endpoint circuit breaker
// ABOUTME: Tests state transitions, failure counting, and recovery behavior
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports
#![cfg(feature = "sensor-http")]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::time::Duration;
use vumpit_providers::circuit_breaker::{BreakerConfig, BreakerState, SensorBreaker};
use vumpit_providers::SensorError;

fn unreachable() -> SensorError {
    SensorError::Unavailable {
        source_name: "http://10.0.0.7:5000/data".to_owned(),
        reason: "connection refused".to_owned(),
    }
}

#[test]
fn test_breaker_starts_closed() {
    let breaker = SensorBreaker::new("pi", BreakerConfig::default());
    assert_eq!(breaker.state(), BreakerState::Closed);
    assert_eq!(breaker.failure_count(), 0);
    assert!(breaker.guard().is_ok());
}

#[test]
fn test_breaker_opens_after_threshold_failures() {
    let breaker = SensorBreaker::new("pi", BreakerConfig::new(3, Duration::from_secs(30), 2));

    breaker.record_failure();
    assert_eq!(breaker.state(), BreakerState::Closed);
    breaker.record_failure();
    assert_eq!(breaker.state(), BreakerState::Closed);
    breaker.record_failure();
    assert_eq!(breaker.state(), BreakerState::Open);

    let err = breaker.guard().unwrap_err();
    match err {
        SensorError::CircuitOpen {
            endpoint,
            retry_after_secs,
        } => {
            assert_eq!(endpoint, "pi");
            assert!(retry_after_secs > 0 && retry_after_secs <= 30);
        }
        other => panic!("expected CircuitOpen, got {other:?}"),
    }
}

#[test]
fn test_success_resets_failure_count() {
    let breaker = SensorBreaker::new("pi", BreakerConfig::new(3, Duration::from_secs(30), 2));

    breaker.record_failure();
    breaker.record_failure();
    assert_eq!(breaker.failure_count(), 2);

    breaker.record_success();
    assert_eq!(breaker.failure_count(), 0);
    assert_eq!(breaker.state(), BreakerState::Closed);
}

#[test]
fn test_only_connectivity_failures_count() {
    let breaker = SensorBreaker::new("pi", BreakerConfig::new(1, Duration::from_secs(30), 1));
    let invalid: Result<(), SensorError> = Err(SensorError::InvalidReading {
        channel: vumpit_providers::SensorChannel::Weight,
        detail: "negative".to_owned(),
    });
    breaker.observe(&invalid);
    assert_eq!(breaker.state(), BreakerState::Closed);

    breaker.observe::<()>(&Err(unreachable()));
    assert_eq!(breaker.state(), BreakerState::Open);
}

#[test]
fn test_half_open_allows_a_single_trial() {
    let breaker = SensorBreaker::new("pi", BreakerConfig::new(1, Duration::ZERO, 2));
    breaker.record_failure();
    assert_eq!(breaker.state(), BreakerState::Open);

    assert!(breaker.guard().is_ok());
    assert_eq!(breaker.state(), BreakerState::HalfOpen);
    // A second request while the trial is outstanding is refused
    assert!(breaker.guard().is_err());

    breaker.record_success();
    assert_eq!(breaker.state(), BreakerState::Open);
    assert!(breaker.guard().is_ok());
    breaker.record_success();
    assert_eq!(breaker.state(), BreakerState::Closed);
}

#[test]
fn test_failed_trial_reopens() {
    let breaker = SensorBreaker::new("pi", BreakerConfig::new(1, Duration::ZERO, 1));
    breaker.record_failure();
    assert!(breaker.guard().is_ok());
    breaker.observe::<()>(&Err(unreachable()));
    assert_eq!(breaker.state(), BreakerState::Open);
}

#[test]
fn test_trial_waits_for_the_cool_down() {
    let breaker = SensorBreaker::new("pi", BreakerConfig::new(1, Duration::from_millis(50), 1));
    breaker.record_failure();
    assert!(breaker.guard().is_err());

    std::thread::sleep(Duration::from_millis(80));
    assert!(breaker.guard().is_ok());
    breaker.record_success();
    assert_eq!(breaker.state(), BreakerState::Closed);
}

#[test]
fn test_reset_closes_the_breaker() {
    let breaker = SensorBreaker::new("pi", BreakerConfig::new(1, Duration::from_secs(60), 1));
    breaker.record_failure();
    assert_eq!(breaker.state(), BreakerState::Open);
    breaker.reset();
    assert_eq!(breaker.state(), BreakerState::Closed);
    assert!(breaker.guard().is_ok());
}

#[test]
fn test_config_presets() {
    let default = BreakerConfig::default();
    assert_eq!(default, BreakerConfig::local_device());
    assert_eq!(default.failure_threshold, 5);
    assert_eq!(default.cool_down, Duration::from_secs(2));

    let flaky = BreakerConfig::flaky_link();
    assert_eq!(flaky.failure_threshold, 3);
    assert_eq!(flaky.success_threshold, 2);
    assert!(flaky.cool_down > default.cool_down);
}
