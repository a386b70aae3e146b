// ABOUTME: Canned training recommendations keyed by vertical-jump rating
// ABOUTME: Immutable bundles regenerated on demand, never stored or hand-edited
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

//! # Training Recommendations
//!
//! A recommendation is a pure lookup over the five jump ratings. Anything that
//! looks like an editable copy inside a stored record is stale and ignored;
//! callers regenerate from the current rating every time.

use serde::Serialize;
use tracing::debug;
use vumpit_core::models::{AthleteProfile, JumpRating};

/// Fixed advice for one jump rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecommendationBundle {
    /// Rating this bundle belongs to
    pub rating: JumpRating,
    /// Overall training focus
    pub training_focus: &'static str,
    /// Suggested plyometric drills
    pub plyometric_exercises: &'static [&'static str],
    /// Suggested recovery methods
    pub recovery_methods: &'static [&'static str],
    /// Closing remarks
    pub remarks: &'static str,
}

const EXCELLENT: RecommendationBundle = RecommendationBundle {
    rating: JumpRating::Excellent,
    training_focus:
        "Maintain current explosive strength and refine jump mechanics for efficiency.",
    plyometric_exercises: &[
        "Depth jumps",
        "Bounding",
        "Single-leg hops",
        "Contrast training",
    ],
    recovery_methods: &[
        "Cold immersion",
        "Active recovery sessions",
        "Proper sleep optimization",
    ],
    remarks: "Continue monitoring fatigue levels and include mobility drills to prevent overtraining.",
};

const GOOD: RecommendationBundle = RecommendationBundle {
    rating: JumpRating::Good,
    training_focus: "Enhance maximum power output and reactive strength.",
    plyometric_exercises: &[
        "Box jumps",
        "Tuck jumps",
        "Squat jumps",
        "Medicine ball throws",
    ],
    recovery_methods: &[
        "Dynamic stretching",
        "Foam rolling",
        "Light jogging post-training",
    ],
    remarks: "Gradually increase jump intensity and track weekly improvements.",
};

const AVERAGE: RecommendationBundle = RecommendationBundle {
    rating: JumpRating::Average,
    training_focus: "Build foundational leg strength and coordination.",
    plyometric_exercises: &["Jump squats", "Skipping", "Lateral bounds", "Step jumps"],
    recovery_methods: &[
        "Proper nutrition",
        "48-hour recovery between plyometric sessions",
        "Moderate stretching",
    ],
    remarks: "Combine strength training (e.g., squats, lunges) with plyometric drills for better results.",
};

const BELOW_AVERAGE: RecommendationBundle = RecommendationBundle {
    rating: JumpRating::BelowAverage,
    training_focus: "Improve lower-body strength and stability.",
    plyometric_exercises: &[
        "Low box jumps",
        "Ankle hops",
        "Wall sits",
        "Assisted jump training",
    ],
    recovery_methods: &["Massage", "Low-impact cycling", "Hydration emphasis"],
    remarks: "Focus on form before intensity; integrate progressive overload gradually.",
};

const POOR: RecommendationBundle = RecommendationBundle {
    rating: JumpRating::Poor,
    training_focus: "Develop basic strength and neuromuscular coordination.",
    plyometric_exercises: &[
        "Step-ups",
        "Mini-squat jumps",
        "Seated leg extensions",
        "Resistance band work",
    ],
    recovery_methods: &["Gentle stretching", "Walking", "Adequate sleep (7-9 hours)"],
    remarks: "Start with strength-building and mobility routines before introducing explosive training.",
};

/// Bundle for a rating
#[must_use]
pub const fn recommendation_for(rating: JumpRating) -> RecommendationBundle {
    match rating {
        JumpRating::Excellent => EXCELLENT,
        JumpRating::Good => GOOD,
        JumpRating::Average => AVERAGE,
        JumpRating::BelowAverage => BELOW_AVERAGE,
        JumpRating::Poor => POOR,
    }
}

/// Bundle for an optional rating; missing ratings get the Average bundle
#[must_use]
pub fn get_recommendation(rating: Option<JumpRating>) -> RecommendationBundle {
    rating.map_or(AVERAGE, recommendation_for)
}

/// Bundle for a free-form label; unknown labels get the Average bundle
#[must_use]
pub fn recommendation_for_label(label: &str) -> RecommendationBundle {
    let rating = JumpRating::from_label(label.trim());
    if rating.is_none() {
        debug!(label, "unknown jump rating label, using Average recommendations");
    }
    get_recommendation(rating)
}

/// Regenerate the bundle for a profile from its current jump rating
#[must_use]
pub fn recommendation_for_profile(profile: &AthleteProfile) -> RecommendationBundle {
    get_recommendation(profile.current_jump.map(|jump| jump.rating))
}
