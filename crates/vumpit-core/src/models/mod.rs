// ABOUTME: Core data models for the vumpIT performance tracker
// ABOUTME: Re-exports athlete, measurement, user and class types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

//! # Data Models
//!
//! - `MeasurementSnapshot`: one completed wizard run
//! - `AthleteProfile`: a student or athlete with current stats and history
//! - `User`: admin and coach accounts
//! - `ClassGroup`: a coach's class

mod athlete;
mod class;
mod measurement;
mod user;

pub use athlete::{AthleteProfile, CurrentBmi, CurrentJump};
pub use class::ClassGroup;
pub use measurement::{BmiRating, Gender, JumpMeasurement, JumpRating, MeasurementSnapshot};
pub use user::{User, UserRole};
