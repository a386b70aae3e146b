// ABOUTME: Sensor sources feeding the vumpIT measurement wizard
// ABOUTME: Simulated source plus the Raspberry Pi HTTP source behind the sensor-http feature
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

#![deny(unsafe_code)]

//! # vumpIT Providers
//!
//! Implementations of [`SensorSource`]. The wizard is generic over the trait
//! and never knows which source it drives.

/// Sensor contract and sample types
pub mod sensor;

/// Seeded simulated source
pub mod simulated;

/// Breaker guarding HTTP sensor endpoints
#[cfg(feature = "sensor-http")]
pub mod circuit_breaker;

/// Shared HTTP client
#[cfg(feature = "sensor-http")]
pub mod http_client;

/// Raspberry Pi source polled over HTTP
#[cfg(feature = "sensor-http")]
pub mod polled_http;

pub use sensor::{SensorChannel, SensorError, SensorSample, SensorSource};
pub use simulated::SimulatedSensorSource;

#[cfg(feature = "sensor-http")]
pub use polled_http::{HttpSensorConfig, PolledHttpSensorSource};
