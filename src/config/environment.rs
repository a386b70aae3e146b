// ABOUTME: Environment configuration for deployment-specific settings
// ABOUTME: Parses VUMPIT_* variables into a typed AppConfig with validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

//! Environment-based configuration

use super::wizard::WizardConfig;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;
use vumpit_core::constants::sensor_defaults;
use vumpit_intelligence::ThresholdConfig;

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Station deployed at a gym
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Where the data store is mirrored
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataPath {
    /// No persistence
    Memory,
    /// JSON document on disk
    File(PathBuf),
}

impl DataPath {
    /// `:memory:` selects the unpersisted store; anything else is a file path
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            ":memory:" | "" => Self::Memory,
            path => Self::File(PathBuf::from(path)),
        }
    }
}

impl fmt::Display for DataPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, ":memory:"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Which sensor source backs the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SensorMode {
    /// Seeded random values
    #[default]
    Simulated,
    /// Raspberry Pi polled over HTTP
    Http,
}

impl FromStr for SensorMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "simulated" | "sim" => Ok(Self::Simulated),
            "http" | "raspberry-pi" | "pi" => Ok(Self::Http),
            other => bail!("unknown sensor mode '{other}' (expected simulated or http)"),
        }
    }
}

/// Sensor source settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorConfig {
    /// Source kind
    pub mode: SensorMode,
    /// Endpoint polled in HTTP mode
    pub endpoint: String,
    /// Seed for the simulated source
    pub seed: Option<u64>,
    /// Age after which an HTTP reading counts as lost
    pub stale_after: Duration,
    /// Per-request HTTP timeout
    pub http_timeout: Duration,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            mode: SensorMode::Simulated,
            endpoint: sensor_defaults::HTTP_ENDPOINT.to_owned(),
            seed: None,
            stale_after: Duration::from_millis(sensor_defaults::STALE_AFTER_MS),
            http_timeout: Duration::from_secs(sensor_defaults::HTTP_TIMEOUT_SECS),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Data store mirror
    pub data_path: DataPath,
    /// Sensor source settings
    pub sensor: SensorConfig,
    /// Wizard timings
    pub wizard: WizardConfig,
    /// Rating thresholds
    pub thresholds: ThresholdConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            data_path: DataPath::File(PathBuf::from("vumpit_data.json")),
            sensor: SensorConfig::default(),
            wizard: WizardConfig::default(),
            thresholds: ThresholdConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but malformed, or the
    /// resulting configuration fails validation
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        let defaults = Self::default();

        let wizard = WizardConfig {
            samples_per_reading: env_parse(
                "VUMPIT_SAMPLE_COUNT",
                defaults.wizard.samples_per_reading,
            )?,
            poll_interval: env_millis("VUMPIT_POLL_INTERVAL_MS", defaults.wizard.poll_interval)?,
            connectivity_check_interval: env_millis(
                "VUMPIT_CONNECTIVITY_CHECK_MS",
                defaults.wizard.connectivity_check_interval,
            )?,
            countdown_secs: env_parse("VUMPIT_COUNTDOWN_SECS", defaults.wizard.countdown_secs)?,
            jump_window: env_millis("VUMPIT_JUMP_WINDOW_MS", defaults.wizard.jump_window)?,
        };

        let sensor = SensorConfig {
            mode: env::var("VUMPIT_SENSOR_MODE")
                .ok()
                .map(|value| value.parse::<SensorMode>())
                .transpose()
                .context("Invalid VUMPIT_SENSOR_MODE value")?
                .unwrap_or_default(),
            endpoint: env::var("VUMPIT_SENSOR_ENDPOINT").unwrap_or(defaults.sensor.endpoint),
            seed: env::var("VUMPIT_SENSOR_SEED")
                .ok()
                .map(|value| value.parse::<u64>())
                .transpose()
                .context("Invalid VUMPIT_SENSOR_SEED value")?,
            stale_after: env_millis("VUMPIT_SENSOR_STALE_MS", defaults.sensor.stale_after)?,
            http_timeout: Duration::from_secs(env_parse(
                "VUMPIT_HTTP_TIMEOUT_SECS",
                defaults.sensor.http_timeout.as_secs(),
            )?),
        };

        let config = Self {
            environment: env::var("ENVIRONMENT")
                .map(|value| Environment::from_str_or_default(&value))
                .unwrap_or_default(),
            data_path: env::var("VUMPIT_DATA_PATH")
                .map_or(defaults.data_path, |value| DataPath::parse(&value)),
            sensor,
            wizard,
            thresholds: defaults.thresholds,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns an error when wizard timings or thresholds are unusable
    pub fn validate(&self) -> Result<()> {
        self.wizard.validate()?;
        self.thresholds.validate()?;
        if self.sensor.mode == SensorMode::Http && self.sensor.endpoint.trim().is_empty() {
            bail!("VUMPIT_SENSOR_ENDPOINT must be set in http sensor mode");
        }
        Ok(())
    }

    /// One-paragraph summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "vumpIT configuration:\n\
             - Environment: {}\n\
             - Data: {}\n\
             - Sensor: {:?}{}\n\
             - Samples per reading: {}\n\
             - Poll interval: {} ms\n\
             - Countdown: {} s, jump window: {} ms",
            self.environment,
            self.data_path,
            self.sensor.mode,
            match self.sensor.mode {
                SensorMode::Http => format!(" ({})", self.sensor.endpoint),
                SensorMode::Simulated => String::new(),
            },
            self.wizard.samples_per_reading,
            self.wizard.poll_interval.as_millis(),
            self.wizard.countdown_secs,
            self.wizard.jump_window.as_millis(),
        )
    }
}

fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value")),
        Err(_) => Ok(default),
    }
}

fn env_millis(key: &str, default: Duration) -> Result<Duration> {
    let default_ms = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
    env_parse(key, default_ms).map(Duration::from_millis)
}
