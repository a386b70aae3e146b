// ABOUTME: Deterministic BMI and vertical-jump classification
// ABOUTME: compute_bmi, vertical_jump, classify_bmi and classify_jump over configurable ladders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

//! # Rating Engine
//!
//! Pure functions from a measurement to a rating label. Callers own input
//! validity: a zero height or a non-finite BMI is a caller bug, not a case
//! handled here.

use crate::config::{JumpLadder, ThresholdConfig};
use vumpit_core::models::{BmiRating, Gender, JumpRating};

/// Body mass index from weight (kg) and height (cm)
#[must_use]
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Vertical jump (cm) from standing and jump reach; never negative
#[must_use]
pub fn vertical_jump(standing_reach_cm: f64, jump_reach_cm: f64) -> f64 {
    (jump_reach_cm - standing_reach_cm).max(0.0)
}

/// Classify a BMI with the default thresholds
#[must_use]
pub fn classify_bmi(bmi: f64) -> BmiRating {
    RatingEngine::default().classify_bmi(bmi)
}

/// Classify a vertical jump with the default ladders
#[must_use]
pub fn classify_jump(vertical_jump_cm: f64, gender: Gender) -> JumpRating {
    RatingEngine::default().classify_jump(vertical_jump_cm, gender)
}

/// Rating engine bound to one threshold configuration
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RatingEngine {
    thresholds: ThresholdConfig,
}

impl RatingEngine {
    /// Create an engine over custom thresholds
    #[must_use]
    pub const fn new(thresholds: ThresholdConfig) -> Self {
        Self { thresholds }
    }

    /// Thresholds in use
    #[must_use]
    pub const fn thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }

    /// Classify a BMI; each boundary belongs to the higher category
    #[must_use]
    pub fn classify_bmi(&self, bmi: f64) -> BmiRating {
        let bounds = &self.thresholds.bmi;
        if bmi < bounds.normal_from {
            BmiRating::Underweight
        } else if bmi < bounds.overweight_from {
            BmiRating::Normal
        } else if bmi < bounds.obese_from {
            BmiRating::Overweight
        } else {
            BmiRating::Obese
        }
    }

    /// Classify a vertical jump against the gender's ladder, top-down
    #[must_use]
    pub fn classify_jump(&self, vertical_jump_cm: f64, gender: Gender) -> JumpRating {
        let ladder = self.ladder_for(gender);
        if vertical_jump_cm >= ladder.excellent {
            JumpRating::Excellent
        } else if vertical_jump_cm >= ladder.good {
            JumpRating::Good
        } else if vertical_jump_cm >= ladder.average {
            JumpRating::Average
        } else if vertical_jump_cm >= ladder.below_average {
            JumpRating::BelowAverage
        } else {
            JumpRating::Poor
        }
    }

    /// Ladder applied to a gender
    #[must_use]
    pub const fn ladder_for(&self, gender: Gender) -> &JumpLadder {
        match gender {
            Gender::Male => &self.thresholds.male_jump,
            Gender::Female => &self.thresholds.female_jump,
        }
    }
}
