// ABOUTME: DataStore holding users, student profiles and classes for the vumpIT station
// ABOUTME: Every mutation is mirrored to a JSON document written atomically via tempfile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

use super::{demo, ProfileFilter, ProfileStore};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};
use vumpit_core::errors::{AppError, AppResult};
use vumpit_core::models::{AthleteProfile, ClassGroup, User};

/// Persisted document; keys match the station's original storage keys
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    /// Admin and coach accounts
    #[serde(rename = "vumpIT_users", default)]
    pub users: Vec<User>,
    /// Student and athlete profiles
    #[serde(rename = "vumpIT_students", default)]
    pub students: Vec<AthleteProfile>,
    /// Coach classes
    #[serde(rename = "vumpIT_classes", default)]
    pub classes: Vec<ClassGroup>,
}

/// Users, profiles and classes with an optional JSON mirror
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    pub(crate) doc: StoreDocument,
    path: Option<PathBuf>,
}

impl DataStore {
    /// Empty store that never touches disk
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Unpersisted store pre-loaded with the demo data set
    #[must_use]
    pub fn with_demo_data() -> Self {
        Self {
            doc: demo::document(),
            path: None,
        }
    }

    /// Load the mirror at `path`, or start empty if it does not exist yet
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let doc = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| {
                AppError::storage(format!("cannot read {}: {e}", path.display()))
            })?;
            let doc: StoreDocument = serde_json::from_str(&raw)?;
            info!(
                path = %path.display(),
                users = doc.users.len(),
                students = doc.students.len(),
                classes = doc.classes.len(),
                "data store loaded"
            );
            doc
        } else {
            debug!(path = %path.display(), "no data file yet, starting empty");
            StoreDocument::default()
        };
        Ok(Self {
            doc,
            path: Some(path),
        })
    }

    /// Replace everything with the demo data set and persist it
    ///
    /// # Errors
    ///
    /// Returns an error if the mirror cannot be written
    pub fn seed_demo_data(&mut self) -> AppResult<()> {
        self.commit(demo::document())
    }

    /// Mirror path, if any
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// All accounts in insertion order
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.doc.users
    }

    /// All student and athlete profiles in insertion order
    #[must_use]
    pub fn students(&self) -> &[AthleteProfile] {
        &self.doc.students
    }

    /// All classes in insertion order
    #[must_use]
    pub fn classes(&self) -> &[ClassGroup] {
        &self.doc.classes
    }

    /// Account by id
    #[must_use]
    pub fn user(&self, id: &str) -> Option<&User> {
        self.doc.users.iter().find(|user| user.id == id)
    }

    /// Profile by id
    #[must_use]
    pub fn student(&self, id: &str) -> Option<&AthleteProfile> {
        self.doc.students.iter().find(|student| student.id == id)
    }

    /// Class by id
    #[must_use]
    pub fn class(&self, id: &str) -> Option<&ClassGroup> {
        self.doc.classes.iter().find(|class| class.id == id)
    }

    /// Pretty JSON of the whole document
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn export_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(&self.doc)?)
    }

    /// Write the document to the mirror path, if one is set
    ///
    /// The document goes to a temp file next to the target and is renamed
    /// over it, so an interrupted write leaves the previous file intact.
    ///
    /// # Errors
    ///
    /// Returns an error if the temp file cannot be written or renamed
    pub fn persist(&self) -> AppResult<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        let json = self.export_json()?;
        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;
        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(json.as_bytes())?;
        temp.flush()?;
        temp.persist(path).map_err(|e| {
            AppError::storage(format!("cannot replace {}: {}", path.display(), e.error))
        })?;
        debug!(path = %path.display(), "data store persisted");
        Ok(())
    }

    /// Swap in `staged` and persist it; the previous document comes back if the write fails
    pub(crate) fn commit(&mut self, staged: StoreDocument) -> AppResult<()> {
        let previous = std::mem::replace(&mut self.doc, staged);
        if let Err(error) = self.persist() {
            warn!(error = %error, "mirror write failed, keeping the previous document");
            self.doc = previous;
            return Err(error);
        }
        Ok(())
    }

    pub(crate) fn id_taken(&self, id: &str) -> bool {
        self.user(id).is_some() || self.student(id).is_some()
    }
}

impl ProfileStore for DataStore {
    fn get_profile(&self, id: &str) -> AppResult<Option<AthleteProfile>> {
        Ok(self.student(id).cloned())
    }

    // Memory only changes once the mirror write succeeds
    fn save_profile(&mut self, profile: AthleteProfile) -> AppResult<()> {
        match self.doc.students.iter().position(|p| p.id == profile.id) {
            Some(index) => {
                if !self.doc.students[index].histories_extended_by(&profile) {
                    warn!(athlete_id = %profile.id, "refusing write that rewrites measurement history");
                    return Err(AppError::invalid_input(
                        "measurement histories are append-only",
                    )
                    .with_resource_id(profile.id));
                }
                let previous = std::mem::replace(&mut self.doc.students[index], profile);
                if let Err(error) = self.persist() {
                    self.doc.students[index] = previous;
                    return Err(error);
                }
            }
            None => {
                self.doc.students.push(profile);
                if let Err(error) = self.persist() {
                    self.doc.students.pop();
                    return Err(error);
                }
            }
        }
        Ok(())
    }

    fn list_profiles(&self, filter: Option<&ProfileFilter>) -> AppResult<Vec<AthleteProfile>> {
        Ok(self
            .doc
            .students
            .iter()
            .filter(|profile| filter.is_none_or(|f| f.matches(profile)))
            .cloned()
            .collect())
    }
}
