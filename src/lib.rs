// ABOUTME: Main library entry point for the vumpIT measurement station
// ABOUTME: Wires the measurement wizard, storage, directory, auth, config and runtime together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

#![deny(unsafe_code)]

//! # vumpIT
//!
//! Sports performance tracking for a college measurement station. Students
//! and athletes step on a load cell, wear a position sensor and jump; the
//! station turns the readings into BMI and vertical jump ratings and keeps a
//! history per athlete. Coaches and admins manage classes and accounts.
//!
//! ## Architecture
//!
//! - **`vumpit-core`**: errors, domain models and constants
//! - **`vumpit-intelligence`**: the rating engine and training recommendations
//! - **`vumpit-providers`**: sensor sources (simulated and HTTP-polled)
//! - **this crate**: the measurement wizard, persistence, directory, login,
//!   configuration and the real-time runner
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use vumpit::auth::authenticate;
//! use vumpit::config::WizardConfig;
//! use vumpit::storage::DataStore;
//! use vumpit::wizard::{MeasurementWizard, WizardSession};
//! use vumpit_providers::SimulatedSensorSource;
//! use std::time::Duration;
//!
//! # fn main() -> vumpit::errors::AppResult<()> {
//! let mut store = DataStore::with_demo_data();
//! let login = authenticate(&store, "STU001", "student123")?;
//!
//! let mut wizard = MeasurementWizard::new(
//!     SimulatedSensorSource::with_seed(7),
//!     &mut store,
//!     WizardConfig::default(),
//! );
//! let mut session = WizardSession::new();
//! wizard.start(&mut session, Some(&login.user), Duration::ZERO).ok();
//! # Ok(())
//! # }
//! ```

/// Station login and portal routing
pub mod auth;

/// Environment-driven configuration
pub mod config;

/// Account, student and class management
pub mod directory;

/// Structured logging setup
pub mod logging;

/// Real-time wizard driver
pub mod runtime;

/// Profile persistence
pub mod storage;

/// Measurement wizard state machine
pub mod wizard;

/// Errors shared across the workspace
pub mod errors {
    pub use vumpit_core::errors::{AppError, AppResult, ErrorCode};
}

/// Domain models shared across the workspace
pub mod models {
    pub use vumpit_core::models::*;
}
