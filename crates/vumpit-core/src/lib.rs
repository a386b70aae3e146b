// ABOUTME: Core types and constants for the vumpIT sports performance tracker
// ABOUTME: Foundation crate with error handling, athlete and measurement models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

#![deny(unsafe_code)]

//! # vumpIT Core
//!
//! Foundation crate providing shared types and constants for the vumpIT
//! performance tracker. It changes rarely so the rating engine, the sensor
//! providers and the application crate can build on a stable vocabulary.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode` and `AppResult`
//! - **constants**: Sensor ranges, wizard timings and storage keys
//! - **models**: Athlete profiles, measurement snapshots, users and classes

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`AthleteProfile`, `MeasurementSnapshot`, `User`, `ClassGroup`)
pub mod models;

pub use errors::{AppError, AppResult, ErrorCode};
