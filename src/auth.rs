// ABOUTME: Station login: credential check against accounts and student profiles
// ABOUTME: Produces the CurrentUser the wizard needs and routes each role to its portal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

//! # Authentication
//!
//! The station keeps credentials in its own data file and has no real
//! identity provider. Passwords are compared in constant time, but they are
//! stored as entered; anyone with the data file can read them.

use crate::storage::DataStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use subtle::ConstantTimeEq;
use tracing::{info, warn};
use vumpit_core::errors::{AppError, AppResult};
use vumpit_core::models::{Gender, UserRole};

/// Signed-in identity handed to the wizard and the portals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Account or student id
    pub id: String,
    /// Display name
    pub name: String,
    /// Role
    pub role: UserRole,
    /// Gender on record
    pub gender: Gender,
}

/// Landing area for a role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Portal {
    /// Account management
    AdminPortal,
    /// Classes, rosters and athlete stats
    CoachPortal,
    /// Own stats and the measurement wizard
    StudentPortal,
}

impl Portal {
    /// Portal a role routes to
    #[must_use]
    pub const fn for_role(role: UserRole) -> Self {
        match role {
            UserRole::Admin => Self::AdminPortal,
            UserRole::Coach => Self::CoachPortal,
            UserRole::Student | UserRole::Athlete => Self::StudentPortal,
        }
    }
}

impl fmt::Display for Portal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdminPortal => write!(f, "admin portal"),
            Self::CoachPortal => write!(f, "coach portal"),
            Self::StudentPortal => write!(f, "student portal"),
        }
    }
}

/// Result of a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Who signed in
    pub user: CurrentUser,
    /// Where they land
    pub portal: Portal,
    /// When
    pub signed_in_at: DateTime<Utc>,
}

impl AuthSession {
    /// Fail unless the signed-in role is one of `roles`
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied` for any other role
    pub fn require_role(&self, roles: &[UserRole]) -> AppResult<()> {
        if roles.contains(&self.user.role) {
            Ok(())
        } else {
            Err(AppError::permission_denied(format!(
                "{} accounts cannot use this feature",
                self.user.role
            )))
        }
    }
}

fn password_matches(stored: &str, given: &str) -> bool {
    !stored.is_empty() && bool::from(stored.as_bytes().ct_eq(given.as_bytes()))
}

/// Check credentials against accounts first, then student profiles
///
/// # Errors
///
/// Returns `MissingRequiredField` for a blank id or password and
/// `AuthInvalid` when no record matches
pub fn authenticate(store: &DataStore, user_id: &str, password: &str) -> AppResult<AuthSession> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(AppError::missing_field("user_id"));
    }
    if password.is_empty() {
        return Err(AppError::missing_field("password"));
    }

    let found = if let Some(account) = store.user(user_id) {
        password_matches(&account.password, password).then(|| CurrentUser {
            id: account.id.clone(),
            name: account.name.clone(),
            role: account.role,
            gender: account.gender,
        })
    } else {
        store.student(user_id).and_then(|profile| {
            password_matches(&profile.password, password).then(|| CurrentUser {
                id: profile.id.clone(),
                name: profile.name.clone(),
                role: profile.role,
                gender: profile.gender,
            })
        })
    };

    let Some(user) = found else {
        warn!(user.id = %user_id, auth.success = false, "login rejected");
        return Err(AppError::auth_invalid("invalid user id or password"));
    };

    let portal = Portal::for_role(user.role);
    info!(user.id = %user.id, user.role = %user.role, %portal, auth.success = true, "login accepted");
    Ok(AuthSession {
        user,
        portal,
        signed_in_at: Utc::now(),
    })
}
