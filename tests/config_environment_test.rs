// ABOUTME: Unit tests for config environment functionality
// ABOUTME: Validates VUMPIT_* parsing, defaults, fallbacks and validation errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use serial_test::serial;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use vumpit::config::{AppConfig, DataPath, Environment, SensorMode, WizardConfig};
use vumpit::logging::{LogFormat, LoggingConfig};

const VARS: &[&str] = &[
    "ENVIRONMENT",
    "VUMPIT_DATA_PATH",
    "VUMPIT_SAMPLE_COUNT",
    "VUMPIT_POLL_INTERVAL_MS",
    "VUMPIT_CONNECTIVITY_CHECK_MS",
    "VUMPIT_COUNTDOWN_SECS",
    "VUMPIT_JUMP_WINDOW_MS",
    "VUMPIT_SENSOR_MODE",
    "VUMPIT_SENSOR_ENDPOINT",
    "VUMPIT_SENSOR_SEED",
    "VUMPIT_SENSOR_STALE_MS",
    "VUMPIT_HTTP_TIMEOUT_SECS",
    "LOG_FORMAT",
    "SERVICE_NAME",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

// Tests for public configuration types

#[test]
fn test_environment_parsing() {
    assert_eq!(
        Environment::from_str_or_default("production"),
        Environment::Production
    );
    assert_eq!(
        Environment::from_str_or_default("PROD"),
        Environment::Production
    );
    assert_eq!(
        Environment::from_str_or_default("test"),
        Environment::Testing
    );
    assert_eq!(
        Environment::from_str_or_default("invalid"),
        Environment::Development
    ); // Default fallback
    assert!(Environment::Production.is_production());
}

#[test]
fn test_data_path_parsing() {
    assert_eq!(DataPath::parse(":memory:"), DataPath::Memory);
    assert_eq!(DataPath::parse("  "), DataPath::Memory);
    assert_eq!(
        DataPath::parse("/srv/vumpit/data.json"),
        DataPath::File(PathBuf::from("/srv/vumpit/data.json"))
    );
    assert_eq!(DataPath::Memory.to_string(), ":memory:");
}

#[test]
fn test_sensor_mode_parsing() {
    assert_eq!("sim".parse::<SensorMode>().unwrap(), SensorMode::Simulated);
    assert_eq!("HTTP".parse::<SensorMode>().unwrap(), SensorMode::Http);
    assert_eq!("pi".parse::<SensorMode>().unwrap(), SensorMode::Http);
    assert!("bluetooth".parse::<SensorMode>().is_err());
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let config = AppConfig::from_env().unwrap();

    assert_eq!(config, AppConfig::default());
    assert_eq!(config.wizard, WizardConfig::default());
    assert_eq!(config.wizard.samples_per_reading, 30);
    assert_eq!(config.wizard.poll_interval, Duration::from_millis(100));
    assert_eq!(config.wizard.countdown_secs, 5);
    assert_eq!(config.sensor.mode, SensorMode::Simulated);
    assert_eq!(
        config.data_path,
        DataPath::File(PathBuf::from("vumpit_data.json"))
    );
}

#[test]
#[serial]
fn test_overrides_from_environment() {
    clear_env();
    env::set_var("ENVIRONMENT", "production");
    env::set_var("VUMPIT_DATA_PATH", ":memory:");
    env::set_var("VUMPIT_SAMPLE_COUNT", "10");
    env::set_var("VUMPIT_POLL_INTERVAL_MS", "50");
    env::set_var("VUMPIT_COUNTDOWN_SECS", "3");
    env::set_var("VUMPIT_SENSOR_MODE", "http");
    env::set_var("VUMPIT_SENSOR_ENDPOINT", "http://10.0.0.7:5000/data");
    env::set_var("VUMPIT_SENSOR_SEED", "42");
    env::set_var("VUMPIT_HTTP_TIMEOUT_SECS", "2");

    let config = AppConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.environment, Environment::Production);
    assert_eq!(config.data_path, DataPath::Memory);
    assert_eq!(config.wizard.samples_per_reading, 10);
    assert_eq!(config.wizard.poll_interval, Duration::from_millis(50));
    assert_eq!(config.wizard.countdown_secs, 3);
    assert_eq!(config.sensor.mode, SensorMode::Http);
    assert_eq!(config.sensor.endpoint, "http://10.0.0.7:5000/data");
    assert_eq!(config.sensor.seed, Some(42));
    assert_eq!(config.sensor.http_timeout, Duration::from_secs(2));

    let summary = config.summary();
    assert!(summary.contains("production"));
    assert!(summary.contains("http://10.0.0.7:5000/data"));
}

#[test]
#[serial]
fn test_malformed_values_are_rejected() {
    clear_env();
    env::set_var("VUMPIT_SAMPLE_COUNT", "thirty");
    let err = AppConfig::from_env().unwrap_err();
    assert!(err.to_string().contains("VUMPIT_SAMPLE_COUNT"));

    clear_env();
    env::set_var("VUMPIT_SENSOR_MODE", "bluetooth");
    assert!(AppConfig::from_env().is_err());
    clear_env();
}

#[test]
#[serial]
fn test_unusable_timings_fail_validation() {
    clear_env();
    env::set_var("VUMPIT_SAMPLE_COUNT", "0");
    assert!(AppConfig::from_env().is_err());

    clear_env();
    env::set_var("VUMPIT_POLL_INTERVAL_MS", "500");
    env::set_var("VUMPIT_JUMP_WINDOW_MS", "200");
    assert!(AppConfig::from_env().is_err());
    clear_env();
}

#[test]
fn test_http_mode_needs_an_endpoint() {
    let mut config = AppConfig::default();
    config.sensor.mode = SensorMode::Http;
    config.sensor.endpoint = String::new();
    assert!(config.validate().is_err());

    config.sensor.mode = SensorMode::Simulated;
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_logging_config_from_environment() {
    clear_env();
    let defaults = LoggingConfig::from_env();
    assert_eq!(defaults.format, LogFormat::Pretty);
    assert!(!defaults.include_location);

    env::set_var("ENVIRONMENT", "production");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("SERVICE_NAME", "vumpit-station-2");
    let config = LoggingConfig::from_env();
    clear_env();

    assert_eq!(config.format, LogFormat::Json);
    assert!(config.include_location);
    assert_eq!(config.service_name, "vumpit-station-2");
    assert_eq!(LogFormat::from_str_or_default("COMPACT"), LogFormat::Compact);
}
