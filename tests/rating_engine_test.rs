// ABOUTME: Integration tests for BMI and vertical-jump classification and recommendations
// ABOUTME: Covers category boundaries, gender ladders, custom thresholds and bundle lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::NaiveDate;
use vumpit_core::models::{
    AthleteProfile, BmiRating, Gender, JumpMeasurement, JumpRating, MeasurementSnapshot,
};
use vumpit_intelligence::{
    classify_bmi, classify_jump, compute_bmi, get_recommendation, recommendation_for,
    recommendation_for_label, recommendation_for_profile, vertical_jump, ConfigError,
    RatingEngine, ThresholdConfig,
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_compute_bmi_uses_height_in_metres() {
    assert!(close(compute_bmi(70.0, 175.0), 70.0 / (1.75 * 1.75)));
    assert!(close(compute_bmi(81.0, 180.0), 25.0));
    assert!(close(compute_bmi(58.0, 165.0), 58.0 / (1.65 * 1.65)));
}

#[test]
fn test_bmi_boundaries_belong_to_the_higher_category() {
    let cases = [
        (17.0, BmiRating::Underweight),
        (18.49, BmiRating::Underweight),
        (18.5, BmiRating::Normal),
        (24.99, BmiRating::Normal),
        (25.0, BmiRating::Overweight),
        (29.99, BmiRating::Overweight),
        (30.0, BmiRating::Obese),
        (41.2, BmiRating::Obese),
    ];
    for (bmi, expected) in cases {
        assert_eq!(classify_bmi(bmi), expected, "bmi {bmi}");
    }
}

#[test]
fn test_male_jump_ladder() {
    let cases = [
        (80.0, JumpRating::Excellent),
        (73.7, JumpRating::Excellent),
        (73.6, JumpRating::Good),
        (63.5, JumpRating::Good),
        (53.3, JumpRating::Average),
        (50.0, JumpRating::BelowAverage),
        (40.6, JumpRating::BelowAverage),
        (40.5, JumpRating::Poor),
        (0.0, JumpRating::Poor),
    ];
    for (jump, expected) in cases {
        assert_eq!(classify_jump(jump, Gender::Male), expected, "male {jump}");
    }
}

#[test]
fn test_female_jump_ladder() {
    let cases = [
        (63.5, JumpRating::Excellent),
        (63.4, JumpRating::Good),
        (50.8, JumpRating::Good),
        (40.0, JumpRating::Average),
        (33.0, JumpRating::Average),
        (17.8, JumpRating::BelowAverage),
        (17.7, JumpRating::Poor),
    ];
    for (jump, expected) in cases {
        assert_eq!(classify_jump(jump, Gender::Female), expected, "female {jump}");
    }
}

#[test]
fn test_same_jump_rates_differently_by_gender() {
    assert_eq!(classify_jump(55.0, Gender::Male), JumpRating::Average);
    assert_eq!(classify_jump(55.0, Gender::Female), JumpRating::Good);
}

#[test]
fn test_unknown_gender_labels_use_the_female_ladder() {
    let gender = Gender::parse_lenient("other");
    assert_eq!(gender, Gender::Female);
    assert_eq!(classify_jump(40.0, gender), JumpRating::Average);
}

#[test]
fn test_vertical_jump_never_goes_negative() {
    assert!(close(vertical_jump(220.0, 270.0), 50.0));
    assert!(close(vertical_jump(220.0, 220.0), 0.0));
    assert!(close(vertical_jump(220.0, 200.0), 0.0));
    assert_eq!(
        classify_jump(vertical_jump(220.0, 200.0), Gender::Male),
        JumpRating::Poor
    );
}

#[test]
fn test_engine_with_thresholds_from_json() {
    let json = r#"{
        "bmi": { "normal_from": 18.5, "overweight_from": 23.0, "obese_from": 27.5 },
        "male_jump": { "excellent": 70.0, "good": 60.0, "average": 50.0, "below_average": 40.0 },
        "female_jump": { "excellent": 60.0, "good": 48.0, "average": 32.0, "below_average": 16.0 }
    }"#;
    let thresholds: ThresholdConfig = serde_json::from_str(json).unwrap();
    thresholds.validate().unwrap();
    let engine = RatingEngine::new(thresholds);

    assert_eq!(engine.classify_bmi(24.0), BmiRating::Overweight);
    assert_eq!(classify_bmi(24.0), BmiRating::Normal);
    assert_eq!(engine.classify_jump(70.0, Gender::Male), JumpRating::Excellent);
    assert!(close(engine.ladder_for(Gender::Female).good, 48.0));
}

#[test]
fn test_malformed_ladders_are_rejected() {
    let mut thresholds = ThresholdConfig::default();
    thresholds.male_jump.average = thresholds.male_jump.good;
    assert_eq!(
        thresholds.validate(),
        Err(ConfigError::InvalidLadder("male jump ladder"))
    );

    let mut thresholds = ThresholdConfig::default();
    thresholds.female_jump.below_average = -1.0;
    assert_eq!(
        thresholds.validate(),
        Err(ConfigError::ValueOutOfRange("female jump ladder"))
    );

    let mut thresholds = ThresholdConfig::default();
    thresholds.bmi.normal_from = 26.0;
    assert_eq!(
        thresholds.validate(),
        Err(ConfigError::InvalidLadder("bmi thresholds"))
    );
}

#[test]
fn test_every_rating_has_a_complete_bundle() {
    for rating in JumpRating::ALL {
        let bundle = recommendation_for(rating);
        assert_eq!(bundle.rating, rating);
        assert!(!bundle.training_focus.is_empty());
        assert_eq!(bundle.plyometric_exercises.len(), 4);
        assert_eq!(bundle.recovery_methods.len(), 3);
        assert!(!bundle.remarks.is_empty());
    }
    assert_eq!(
        recommendation_for(JumpRating::Excellent).plyometric_exercises[0],
        "Depth jumps"
    );
}

#[test]
fn test_missing_or_unknown_ratings_fall_back_to_average() {
    assert_eq!(get_recommendation(None).rating, JumpRating::Average);
    assert_eq!(recommendation_for_label("Superb").rating, JumpRating::Average);
    assert_eq!(recommendation_for_label("").rating, JumpRating::Average);
    assert_eq!(
        recommendation_for_label(" Below Average ").rating,
        JumpRating::BelowAverage
    );
    assert_eq!(recommendation_for_label("Good").rating, JumpRating::Good);
}

#[test]
fn test_profile_recommendation_follows_current_jump() {
    let unmeasured = AthleteProfile::new("STU010", "Test Athlete", Gender::Male);
    assert_eq!(
        recommendation_for_profile(&unmeasured).rating,
        JumpRating::Average
    );

    let store = vumpit::storage::DataStore::with_demo_data();
    let measured = store.student("STU001").unwrap();
    assert_eq!(
        recommendation_for_profile(measured),
        recommendation_for(JumpRating::BelowAverage)
    );
}

#[test]
fn test_75kg_at_180cm_displays_23_1_and_is_normal() {
    let bmi = compute_bmi(75.0, 180.0);
    let rating = classify_bmi(bmi);
    assert_eq!(rating, BmiRating::Normal);

    let snapshot = MeasurementSnapshot {
        date: NaiveDate::from_ymd_opt(2025, 10, 15).unwrap(),
        weight: 75.0,
        height: 180.0,
        bmi,
        bmi_rating: rating,
        jump: None,
    };
    assert!(close(snapshot.bmi_display(), 23.1));
}

#[test]
fn test_male_50cm_jump_is_below_average() {
    let vertical = vertical_jump(230.0, 280.0);
    assert!(close(vertical, 50.0));

    let rating = classify_jump(vertical, Gender::Male);
    assert_eq!(rating, JumpRating::BelowAverage);
    assert_eq!(RatingEngine::default().classify_jump(vertical, Gender::Male), rating);

    let jump = JumpMeasurement {
        standing_reach: 230.0,
        jump_reach: 280.0,
        vertical_jump: vertical,
        jump_rating: rating,
    };
    assert_eq!(
        recommendation_for(jump.jump_rating),
        get_recommendation(Some(JumpRating::BelowAverage))
    );
}
