// ABOUTME: Measurement snapshot model and the rating label enums it carries
// ABOUTME: Gender, BmiRating, JumpRating, JumpMeasurement and MeasurementSnapshot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Athlete gender, selects the vertical-jump threshold ladder
///
/// Parsing is lenient: any spelling of "male" (case and surrounding
/// whitespace ignored) is `Male`, every other value is `Female`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Gender {
    /// Male ladder
    Male,
    /// Female ladder, also the fallback for unrecognized values
    Female,
}

impl Gender {
    /// Parse a free-form gender label
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("male") {
            Self::Male
        } else {
            Self::Female
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl From<&str> for Gender {
    fn from(value: &str) -> Self {
        Self::parse_lenient(value)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// BMI category, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BmiRating {
    /// bmi < 18.5
    Underweight,
    /// 18.5 <= bmi < 25
    Normal,
    /// 25 <= bmi < 30
    Overweight,
    /// bmi >= 30
    Obese,
}

impl BmiRating {
    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Vertical-jump rating, ordered from worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum JumpRating {
    /// Below the lowest threshold
    Poor,
    /// Lowest band above Poor
    #[serde(rename = "Below Average")]
    BelowAverage,
    /// Middle band
    Average,
    /// Second best band
    Good,
    /// At or above the top threshold
    Excellent,
}

impl JumpRating {
    /// All ratings from worst to best
    pub const ALL: [Self; 5] = [
        Self::Poor,
        Self::BelowAverage,
        Self::Average,
        Self::Good,
        Self::Excellent,
    ];

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::BelowAverage => "Below Average",
            Self::Average => "Average",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        }
    }

    /// Parse an exact display label
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rating| rating.label() == label)
    }
}

impl fmt::Display for JumpRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Jump half of a snapshot, present only when the jump step was not skipped
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpMeasurement {
    /// Standing reach (cm)
    pub standing_reach: f64,
    /// Peak reach during the jump (cm)
    pub jump_reach: f64,
    /// `jump_reach - standing_reach` (cm)
    pub vertical_jump: f64,
    /// Gender-dependent rating of `vertical_jump`
    pub jump_rating: JumpRating,
}

/// One completed measurement cycle
///
/// The date is stamped when the wizard starts, not when each step completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSnapshot {
    /// Calendar date of the run (serialized `YYYY-MM-DD`)
    pub date: NaiveDate,
    /// Body weight (kg)
    pub weight: f64,
    /// Standing height (cm)
    pub height: f64,
    /// `weight / (height_m)^2`
    pub bmi: f64,
    /// Category of `bmi`
    pub bmi_rating: BmiRating,
    /// Jump results, absent for BMI-only runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jump: Option<JumpMeasurement>,
}

impl MeasurementSnapshot {
    /// Whether the jump step was completed for this snapshot
    #[must_use]
    pub const fn has_jump(&self) -> bool {
        self.jump.is_some()
    }

    /// BMI rounded to one decimal place, as displayed
    #[must_use]
    pub fn bmi_display(&self) -> f64 {
        (self.bmi * 10.0).round() / 10.0
    }
}
