// ABOUTME: Coach class model and the roster membership rule
// ABOUTME: A class groups students by college, course, year and section
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

use super::athlete::AthleteProfile;
use serde::{Deserialize, Serialize};

/// A class taught by one coach
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassGroup {
    /// Unique class identifier (e.g. `CLS001`)
    pub id: String,
    /// Class name
    pub name: String,
    /// Owning coach
    pub coach_id: String,
    /// Owning coach's display name
    #[serde(default)]
    pub coach_name: String,
    /// College
    pub college: String,
    /// Course
    pub course: String,
    /// Year level label
    pub year: String,
    /// Section
    pub section: String,
}

impl ClassGroup {
    /// A student belongs to a class when college, course, year and section all match
    #[must_use]
    pub fn includes(&self, student: &AthleteProfile) -> bool {
        student.college == self.college
            && student.course == self.course
            && student.year == self.year
            && student.section == self.section
    }

    /// Case-insensitive substring match over name, college, course, year and section
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [
            self.name.as_str(),
            self.college.as_str(),
            self.course.as_str(),
            self.year.as_str(),
            self.section.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
    }
}
