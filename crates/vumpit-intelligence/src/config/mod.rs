// ABOUTME: Threshold configuration for BMI and vertical-jump rating ladders
// ABOUTME: Defaults match the published standards; validation rejects malformed ladders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

//! Rating threshold configuration
//!
//! Ladders are evaluated top-down and the first threshold the value reaches
//! wins, so every ladder must be strictly descending from its best band.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Thresholds are not strictly ordered
    #[error("Invalid ladder: {0}")]
    InvalidLadder(&'static str),

    /// Threshold is negative, zero where it must be positive, or not finite
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}

/// BMI category boundaries; each bound belongs to the higher category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiThresholds {
    /// Below this is Underweight
    pub normal_from: f64,
    /// Below this (and at or above `normal_from`) is Normal
    pub overweight_from: f64,
    /// At or above this is Obese
    pub obese_from: f64,
}

impl Default for BmiThresholds {
    fn default() -> Self {
        Self {
            normal_from: 18.5,
            overweight_from: 25.0,
            obese_from: 30.0,
        }
    }
}

/// Vertical-jump ladder (cm) for one gender
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpLadder {
    /// Minimum for Excellent
    pub excellent: f64,
    /// Minimum for Good
    pub good: f64,
    /// Minimum for Average
    pub average: f64,
    /// Minimum for Below Average; anything lower is Poor
    pub below_average: f64,
}

impl JumpLadder {
    /// Male standards
    #[must_use]
    pub const fn male() -> Self {
        Self {
            excellent: 73.7,
            good: 63.5,
            average: 53.3,
            below_average: 40.6,
        }
    }

    /// Female standards, also used for unrecognized genders
    #[must_use]
    pub const fn female() -> Self {
        Self {
            excellent: 63.5,
            good: 50.8,
            average: 33.0,
            below_average: 17.8,
        }
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        let steps = [self.excellent, self.good, self.average, self.below_average];
        if steps.iter().any(|value| !value.is_finite() || *value < 0.0) {
            return Err(ConfigError::ValueOutOfRange(name));
        }
        if steps.windows(2).any(|pair| pair[0] <= pair[1]) {
            return Err(ConfigError::InvalidLadder(name));
        }
        Ok(())
    }
}

/// Complete threshold set used by the rating engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// BMI boundaries
    pub bmi: BmiThresholds,
    /// Male jump ladder
    pub male_jump: JumpLadder,
    /// Female jump ladder
    pub female_jump: JumpLadder,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            bmi: BmiThresholds::default(),
            male_jump: JumpLadder::male(),
            female_jump: JumpLadder::female(),
        }
    }
}

impl ThresholdConfig {
    /// Validate all ladders
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a ladder is not strictly ordered or holds
    /// non-finite or negative values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bmi = [self.bmi.normal_from, self.bmi.overweight_from, self.bmi.obese_from];
        if bmi.iter().any(|value| !value.is_finite() || *value <= 0.0) {
            return Err(ConfigError::ValueOutOfRange("bmi thresholds"));
        }
        if bmi.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::InvalidLadder("bmi thresholds"));
        }
        self.male_jump.validate("male jump ladder")?;
        self.female_jump.validate("female jump ladder")
    }
}
