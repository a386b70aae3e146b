// ABOUTME: User account model for admins and coaches plus the shared role enum
// ABOUTME: User, UserRole and the search predicate used by the admin portal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

use super::measurement::Gender;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of an account, decides which portal a login routes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Manages every account
    Admin,
    /// Manages classes and their students
    Coach,
    /// Enrolled student
    Student,
    /// Varsity athlete under a coach
    Athlete,
}

impl UserRole {
    /// Lowercase wire label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Coach => "coach",
            Self::Student => "student",
            Self::Athlete => "athlete",
        }
    }

    /// Whether this role can run the measurement wizard
    #[must_use]
    pub const fn is_measurable(self) -> bool {
        matches!(self, Self::Student | Self::Athlete)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Admin or coach account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Account role
    pub role: UserRole,
    /// Sport (admins always carry "All Sports")
    pub sport: String,
    /// College the account belongs to
    #[serde(default)]
    pub college: String,
    /// Gender
    pub gender: Gender,
    /// Login secret for the client-side portal
    #[serde(default)]
    pub password: String,
    /// Coach identifier, equal to `id` for coach accounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coach_id: Option<String>,
}

impl User {
    /// Case-insensitive substring match over id, name, sport, role and college
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [
            self.id.as_str(),
            self.name.as_str(),
            self.sport.as_str(),
            self.role.as_str(),
            self.college.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
    }
}
