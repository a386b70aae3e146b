// ABOUTME: Athlete profile model with denormalized current stats and measurement history
// ABOUTME: AthleteProfile, CurrentBmi, CurrentJump and the append-only history rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

use super::measurement::{BmiRating, Gender, JumpRating, MeasurementSnapshot};
use super::user::UserRole;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Most recent BMI values, copied from the last snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentBmi {
    /// Weight (kg)
    pub weight: f64,
    /// Height (cm)
    pub height: f64,
    /// Body mass index
    pub bmi: f64,
    /// BMI category
    pub rating: BmiRating,
    /// Date of the snapshot these values came from
    pub updated: NaiveDate,
}

/// Most recent jump values, copied from the last jump snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentJump {
    /// Standing reach (cm)
    pub standing_reach: f64,
    /// Jump reach (cm)
    pub jump_reach: f64,
    /// Vertical jump (cm)
    pub vertical_jump: f64,
    /// Jump rating
    pub rating: JumpRating,
    /// Date of the snapshot these values came from
    pub updated: NaiveDate,
}

/// A student or athlete as stored by the persistence collaborator
///
/// `current_bmi` and `current_jump` mirror the last entry of the matching
/// history. Histories are append-only and insertion-ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteProfile {
    /// Unique user identifier (e.g. `STU001`)
    pub id: String,
    /// Display name
    pub name: String,
    /// Student or Athlete
    pub role: UserRole,
    /// Selects the jump threshold ladder
    pub gender: Gender,
    /// Sport played
    #[serde(default)]
    pub sport: String,
    /// Assigned coach, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coach_id: Option<String>,
    /// Login secret for the client-side portal
    #[serde(default)]
    pub password: String,
    /// College
    #[serde(default)]
    pub college: String,
    /// Course
    #[serde(default)]
    pub course: String,
    /// Year level label (e.g. "2nd Year")
    #[serde(default)]
    pub year: String,
    /// Section
    #[serde(default)]
    pub section: String,
    /// Class names the student is enrolled in
    #[serde(default)]
    pub class_list: Vec<String>,
    /// Most recent BMI values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_bmi: Option<CurrentBmi>,
    /// Most recent jump values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_jump: Option<CurrentJump>,
    /// Every committed snapshot
    #[serde(default)]
    pub bmi_history: Vec<MeasurementSnapshot>,
    /// Every committed snapshot that includes a jump
    #[serde(default)]
    pub jump_history: Vec<MeasurementSnapshot>,
}

impl AthleteProfile {
    /// Create a profile with empty stats and histories
    pub fn new(id: impl Into<String>, name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: UserRole::Student,
            gender,
            sport: String::new(),
            coach_id: None,
            password: String::new(),
            college: String::new(),
            course: String::new(),
            year: String::new(),
            section: String::new(),
            class_list: Vec::new(),
            current_bmi: None,
            current_jump: None,
            bmi_history: Vec::new(),
            jump_history: Vec::new(),
        }
    }

    /// Append a committed snapshot and overwrite the current fields with its values
    ///
    /// Every snapshot lands in `bmi_history`; only snapshots carrying a jump
    /// land in `jump_history`. `current_jump` is left alone for BMI-only runs.
    pub fn record_snapshot(&mut self, snapshot: MeasurementSnapshot) {
        self.current_bmi = Some(CurrentBmi {
            weight: snapshot.weight,
            height: snapshot.height,
            bmi: snapshot.bmi,
            rating: snapshot.bmi_rating,
            updated: snapshot.date,
        });

        if let Some(jump) = snapshot.jump {
            self.current_jump = Some(CurrentJump {
                standing_reach: jump.standing_reach,
                jump_reach: jump.jump_reach,
                vertical_jump: jump.vertical_jump,
                rating: jump.jump_rating,
                updated: snapshot.date,
            });
            self.jump_history.push(snapshot.clone());
        }

        self.bmi_history.push(snapshot);
    }

    /// Whether `other` only appends to this profile's histories
    ///
    /// Used by stores to refuse writes that would rewrite past entries.
    #[must_use]
    pub fn histories_extended_by(&self, other: &Self) -> bool {
        other.bmi_history.starts_with(&self.bmi_history)
            && other.jump_history.starts_with(&self.jump_history)
    }

    /// Case-insensitive substring match over id, name, role and gender
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [
            self.id.as_str(),
            self.name.as_str(),
            self.role.as_str(),
            self.gender.label(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
    }
}
