// ABOUTME: Account, student and class management on top of the DataStore
// ABOUTME: CRUD with duplicate-id checks, search, class rosters and the coach dashboard summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

//! # Directory
//!
//! Admin and coach operations. Ids are unique across accounts and student
//! profiles together, since both sign in through the same form. Coach edits
//! to a student never reach the measurement fields; only the wizard writes
//! those.

use crate::storage::demo::{ADMIN_PASSWORD, COACH_PASSWORD, STUDENT_PASSWORD};
use crate::storage::{DataStore, ProfileStore};
use serde::Serialize;
use tracing::info;
use vumpit_core::constants::labels;
use vumpit_core::errors::{AppError, AppResult};
use vumpit_core::models::{AthleteProfile, ClassGroup, User, UserRole};
use vumpit_intelligence::{recommendation_for_profile, RecommendationBundle};

/// Counts shown on the coach dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoachSummary {
    /// Coach id
    pub coach_id: String,
    /// Assigned sport, `N/A` when unset
    pub sport: String,
    /// Classes the coach owns
    pub class_count: usize,
    /// Assigned profiles with the athlete role
    pub athlete_count: usize,
    /// Every assigned profile
    pub student_count: usize,
}

/// A profile with its training recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AthleteOverview {
    /// Stored profile
    pub profile: AthleteProfile,
    /// Regenerated from the current jump rating
    pub recommendation: RecommendationBundle,
}

fn require(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        Err(AppError::missing_field(field))
    } else {
        Ok(())
    }
}

fn normalize_account(user: &mut User) {
    match user.role {
        UserRole::Coach => user.coach_id = Some(user.id.clone()),
        UserRole::Admin => {
            labels::ALL_SPORTS.clone_into(&mut user.sport);
            user.coach_id = None;
        }
        UserRole::Student | UserRole::Athlete => {}
    }
}

/// Case-insensitive search over id, name, role and gender
#[must_use]
pub fn search_students<'a>(students: &'a [AthleteProfile], query: &str) -> Vec<&'a AthleteProfile> {
    students
        .iter()
        .filter(|student| student.matches_query(query))
        .collect()
}

impl DataStore {
    /// Create an admin or coach account
    ///
    /// Coaches get `coach_id = id`; admins always carry `All Sports`. An empty
    /// password falls back to the role's default.
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` for a blank id or name,
    /// `ResourceAlreadyExists` when the id is taken by any account or profile,
    /// and a storage error if the mirror cannot be written
    pub fn add_user(&mut self, mut user: User) -> AppResult<()> {
        require(&user.id, "user_id")?;
        require(&user.name, "user_name")?;
        if !matches!(user.role, UserRole::Admin | UserRole::Coach) {
            return Err(AppError::invalid_input(
                "students and athletes are added as profiles, not accounts",
            ));
        }
        if self.id_taken(&user.id) {
            return Err(AppError::already_exists("user", user.id));
        }
        normalize_account(&mut user);
        if user.password.is_empty() {
            let default = if user.role == UserRole::Coach {
                COACH_PASSWORD
            } else {
                ADMIN_PASSWORD
            };
            default.clone_into(&mut user.password);
        }
        let mut staged = self.doc.clone();
        let (id, role) = (user.id.clone(), user.role);
        staged.users.push(user);
        self.commit(staged)?;
        info!(user.id = %id, user.role = %role, "account created");
        Ok(())
    }

    /// Replace an account's details; an empty password keeps the old one
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id, or a storage error
    pub fn update_user(&mut self, id: &str, mut updated: User) -> AppResult<()> {
        let Some(index) = self.doc.users.iter().position(|user| user.id == id) else {
            return Err(AppError::not_found(format!("user '{id}'")).with_resource_id(id));
        };
        id.clone_into(&mut updated.id);
        if updated.password.is_empty() {
            updated.password.clone_from(&self.doc.users[index].password);
        }
        normalize_account(&mut updated);
        let mut staged = self.doc.clone();
        staged.users[index] = updated;
        self.commit(staged)?;
        info!(user.id = %id, "account updated");
        Ok(())
    }

    /// Remove an account
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id, or a storage error
    pub fn delete_user(&mut self, id: &str) -> AppResult<()> {
        let mut staged = self.doc.clone();
        staged.users.retain(|user| user.id != id);
        if staged.users.len() == self.doc.users.len() {
            return Err(AppError::not_found(format!("user '{id}'")).with_resource_id(id));
        }
        self.commit(staged)?;
        info!(user.id = %id, "account deleted");
        Ok(())
    }

    /// Accounts whose id, name, sport, role or college contain `query`
    #[must_use]
    pub fn search_users(&self, query: &str) -> Vec<&User> {
        self.doc
            .users
            .iter()
            .filter(|user| user.matches_query(query))
            .collect()
    }

    /// Accounts with one role
    #[must_use]
    pub fn users_by_role(&self, role: UserRole) -> Vec<&User> {
        self.doc.users.iter().filter(|user| user.role == role).collect()
    }

    /// Register a student or athlete with empty stats and histories
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` for a blank id or name,
    /// `InvalidInput` for an account role, `ResourceAlreadyExists` when the id
    /// is taken, and a storage error if the mirror cannot be written
    pub fn add_student(&mut self, mut profile: AthleteProfile) -> AppResult<()> {
        require(&profile.id, "user_id")?;
        require(&profile.name, "student_name")?;
        if !profile.role.is_measurable() {
            return Err(AppError::invalid_input(format!(
                "{} accounts cannot be added as student profiles",
                profile.role
            )));
        }
        if self.id_taken(&profile.id) {
            return Err(AppError::already_exists("user", profile.id));
        }
        profile.current_bmi = None;
        profile.current_jump = None;
        profile.bmi_history.clear();
        profile.jump_history.clear();
        if profile.password.is_empty() {
            STUDENT_PASSWORD.clone_into(&mut profile.password);
        }
        let mut staged = self.doc.clone();
        let (id, role) = (profile.id.clone(), profile.role);
        staged.students.push(profile);
        self.commit(staged)?;
        info!(athlete_id = %id, role = %role, "student profile created");
        Ok(())
    }

    /// Apply a coach edit; measurement stats and histories are kept as stored
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id, `InvalidInput` for an
    /// account role, or a storage error
    pub fn update_student(&mut self, id: &str, edited: AthleteProfile) -> AppResult<()> {
        if !edited.role.is_measurable() {
            return Err(AppError::invalid_input(format!(
                "{} is not a student role",
                edited.role
            )));
        }
        let mut staged = self.doc.clone();
        let Some(stored) = staged.students.iter_mut().find(|profile| profile.id == id) else {
            return Err(AppError::not_found(format!("student '{id}'")).with_resource_id(id));
        };
        let AthleteProfile {
            name,
            role,
            gender,
            sport,
            coach_id,
            password,
            college,
            course,
            year,
            section,
            class_list,
            ..
        } = edited;
        stored.name = name;
        stored.role = role;
        stored.gender = gender;
        stored.sport = sport;
        stored.coach_id = coach_id;
        if !password.is_empty() {
            stored.password = password;
        }
        stored.college = college;
        stored.course = course;
        stored.year = year;
        stored.section = section;
        stored.class_list = class_list;
        self.commit(staged)?;
        info!(athlete_id = %id, "student profile updated");
        Ok(())
    }

    /// Remove a student profile and its history
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id, or a storage error
    pub fn delete_student(&mut self, id: &str) -> AppResult<()> {
        let mut staged = self.doc.clone();
        staged.students.retain(|profile| profile.id != id);
        if staged.students.len() == self.doc.students.len() {
            return Err(AppError::not_found(format!("student '{id}'")).with_resource_id(id));
        }
        self.commit(staged)?;
        info!(athlete_id = %id, "student profile deleted");
        Ok(())
    }

    /// Every profile assigned to a coach
    #[must_use]
    pub fn students_by_coach(&self, coach_id: &str) -> Vec<&AthleteProfile> {
        self.doc
            .students
            .iter()
            .filter(|profile| profile.coach_id.as_deref() == Some(coach_id))
            .collect()
    }

    /// Profiles with the athlete role assigned to a coach
    #[must_use]
    pub fn athletes_by_coach(&self, coach_id: &str) -> Vec<&AthleteProfile> {
        self.students_by_coach(coach_id)
            .into_iter()
            .filter(|profile| profile.role == UserRole::Athlete)
            .collect()
    }

    fn next_class_id(&self) -> String {
        let highest = self
            .doc
            .classes
            .iter()
            .filter_map(|class| class.id.strip_prefix(labels::CLASS_ID_PREFIX))
            .filter_map(|digits| digits.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        format!("{}{:03}", labels::CLASS_ID_PREFIX, highest + 1)
    }

    /// Add a class, numbering it `CLS###` when no id is given; returns the id
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` for a blank name or coach,
    /// `ResourceAlreadyExists` for a taken class id, or a storage error
    pub fn add_class(&mut self, mut class: ClassGroup) -> AppResult<String> {
        require(&class.name, "class_name")?;
        require(&class.coach_id, "coach_id")?;
        if class.id.trim().is_empty() {
            class.id = self.next_class_id();
        } else if self.class(&class.id).is_some() {
            return Err(AppError::already_exists("class", class.id));
        }
        let id = class.id.clone();
        let coach_id = class.coach_id.clone();
        let mut staged = self.doc.clone();
        staged.classes.push(class);
        self.commit(staged)?;
        info!(class_id = %id, coach_id = %coach_id, "class created");
        Ok(id)
    }

    /// Replace a class's details, keeping its id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id, or a storage error
    pub fn update_class(&mut self, id: &str, mut updated: ClassGroup) -> AppResult<()> {
        let mut staged = self.doc.clone();
        let Some(stored) = staged.classes.iter_mut().find(|class| class.id == id) else {
            return Err(AppError::not_found(format!("class '{id}'")).with_resource_id(id));
        };
        id.clone_into(&mut updated.id);
        *stored = updated;
        self.commit(staged)?;
        info!(class_id = %id, "class updated");
        Ok(())
    }

    /// Remove a class; enrolled profiles are untouched
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id, or a storage error
    pub fn delete_class(&mut self, id: &str) -> AppResult<()> {
        let mut staged = self.doc.clone();
        staged.classes.retain(|class| class.id != id);
        if staged.classes.len() == self.doc.classes.len() {
            return Err(AppError::not_found(format!("class '{id}'")).with_resource_id(id));
        }
        self.commit(staged)?;
        info!(class_id = %id, "class deleted");
        Ok(())
    }

    /// Classes a coach owns
    #[must_use]
    pub fn classes_by_coach(&self, coach_id: &str) -> Vec<&ClassGroup> {
        self.doc
            .classes
            .iter()
            .filter(|class| class.coach_id == coach_id)
            .collect()
    }

    /// Classes whose name, college, course, year or section contain `query`
    #[must_use]
    pub fn filter_classes(&self, query: &str) -> Vec<&ClassGroup> {
        self.doc
            .classes
            .iter()
            .filter(|class| class.matches_query(query))
            .collect()
    }

    /// Profiles in a class's college, course, year and section
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown class
    pub fn class_roster(&self, class_id: &str) -> AppResult<Vec<&AthleteProfile>> {
        let class = self.class(class_id).ok_or_else(|| {
            AppError::not_found(format!("class '{class_id}'")).with_resource_id(class_id)
        })?;
        Ok(self
            .doc
            .students
            .iter()
            .filter(|profile| class.includes(profile))
            .collect())
    }

    /// Dashboard counts for a coach
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` unless `coach_id` is a coach account
    pub fn coach_summary(&self, coach_id: &str) -> AppResult<CoachSummary> {
        let coach = self
            .user(coach_id)
            .filter(|user| user.role == UserRole::Coach)
            .ok_or_else(|| {
                AppError::not_found(format!("coach '{coach_id}'")).with_resource_id(coach_id)
            })?;
        let sport = if coach.sport.is_empty() {
            "N/A".to_owned()
        } else {
            coach.sport.clone()
        };
        Ok(CoachSummary {
            coach_id: coach_id.to_owned(),
            sport,
            class_count: self.classes_by_coach(coach_id).len(),
            athlete_count: self.athletes_by_coach(coach_id).len(),
            student_count: self.students_by_coach(coach_id).len(),
        })
    }

    /// A profile with a recommendation regenerated from its current jump
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id
    pub fn athlete_overview(&self, id: &str) -> AppResult<AthleteOverview> {
        let profile = self.get_profile(id)?.ok_or_else(|| {
            AppError::not_found(format!("student '{id}'")).with_resource_id(id)
        })?;
        let recommendation = recommendation_for_profile(&profile);
        Ok(AthleteOverview {
            profile,
            recommendation,
        })
    }
}
