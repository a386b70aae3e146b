// ABOUTME: Rating and recommendation engine for the vumpIT performance tracker
// ABOUTME: Classifies BMI and vertical jump and maps jump ratings to training advice
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

#![deny(unsafe_code)]

//! # vumpIT Intelligence
//!
//! Deterministic, side-effect-free classification. Nothing here touches
//! storage, sensors or clocks.

/// Threshold ladders and their validation
pub mod config;

/// BMI and vertical-jump classification
pub mod rating;

/// Recommendation bundles keyed by jump rating
pub mod recommendation;

pub use config::{BmiThresholds, ConfigError, JumpLadder, ThresholdConfig};
pub use rating::{classify_bmi, classify_jump, compute_bmi, vertical_jump, RatingEngine};
pub use recommendation::{
    get_recommendation, recommendation_for, recommendation_for_label, recommendation_for_profile,
    RecommendationBundle,
};
