// ABOUTME: Configuration module for the vumpIT application
// ABOUTME: Environment-driven settings for storage, sensors, wizard timings and thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

//! Configuration management
//!
//! All configuration comes from environment variables; there is no config file.

/// Environment variable parsing into `AppConfig`
pub mod environment;

/// Wizard sampling and timer settings
pub mod wizard;

pub use environment::{AppConfig, DataPath, Environment, SensorConfig, SensorMode};
pub use wizard::WizardConfig;
