// ABOUTME: Persistence collaborator for athlete profiles
// ABOUTME: ProfileStore trait, ProfileFilter, and the JSON-mirrored DataStore
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

//! # Storage
//!
//! The wizard only depends on [`ProfileStore`]. [`DataStore`] is the concrete
//! store behind the CLI: users, student profiles and classes held in memory
//! and mirrored to a JSON document after every mutation.

/// In-memory store mirrored to a JSON document
pub mod data_store;

/// Demo accounts, students and classes
pub mod demo;

pub use data_store::{DataStore, StoreDocument};

use vumpit_core::errors::AppResult;
use vumpit_core::models::{AthleteProfile, UserRole};

/// Criteria for listing profiles; empty fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFilter {
    /// Only profiles assigned to this coach
    pub coach_id: Option<String>,
    /// Only this role
    pub role: Option<UserRole>,
    /// Case-insensitive substring over id, name, role and gender
    pub query: Option<String>,
    /// Exact college
    pub college: Option<String>,
    /// Exact course
    pub course: Option<String>,
    /// Exact year level
    pub year: Option<String>,
    /// Exact section
    pub section: Option<String>,
}

impl ProfileFilter {
    /// Profiles coached by `coach_id`
    #[must_use]
    pub fn for_coach(coach_id: impl Into<String>) -> Self {
        Self {
            coach_id: Some(coach_id.into()),
            ..Self::default()
        }
    }

    /// Restrict to one role
    #[must_use]
    pub const fn with_role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Restrict to a search query
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Whether a profile passes every set criterion
    #[must_use]
    pub fn matches(&self, profile: &AthleteProfile) -> bool {
        let exact = |wanted: &Option<String>, actual: &str| {
            wanted.as_deref().is_none_or(|value| value == actual)
        };
        self.coach_id
            .as_deref()
            .is_none_or(|coach| profile.coach_id.as_deref() == Some(coach))
            && self.role.is_none_or(|role| profile.role == role)
            && self
                .query
                .as_deref()
                .is_none_or(|query| profile.matches_query(query))
            && exact(&self.college, &profile.college)
            && exact(&self.course, &profile.course)
            && exact(&self.year, &profile.year)
            && exact(&self.section, &profile.section)
    }
}

/// Where the wizard reads and writes athlete profiles
pub trait ProfileStore {
    /// Profile by id
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read
    fn get_profile(&self, id: &str) -> AppResult<Option<AthleteProfile>>;

    /// Insert or replace a profile
    ///
    /// Implementations must refuse a write that would change, reorder or drop
    /// entries already in the stored histories.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is refused or cannot be persisted
    fn save_profile(&mut self, profile: AthleteProfile) -> AppResult<()>;

    /// Profiles in insertion order, optionally filtered
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read
    fn list_profiles(&self, filter: Option<&ProfileFilter>) -> AppResult<Vec<AthleteProfile>>;
}

impl<T: ProfileStore + ?Sized> ProfileStore for &mut T {
    fn get_profile(&self, id: &str) -> AppResult<Option<AthleteProfile>> {
        (**self).get_profile(id)
    }

    fn save_profile(&mut self, profile: AthleteProfile) -> AppResult<()> {
        (**self).save_profile(profile)
    }

    fn list_profiles(&self, filter: Option<&ProfileFilter>) -> AppResult<Vec<AthleteProfile>> {
        (**self).list_profiles(filter)
    }
}
