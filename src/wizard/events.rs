// ABOUTME: Events the wizard emits and errors it returns
// ABOUTME: Events drive the UI; errors mean the action was rejected and nothing changed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

use super::state::WizardState;
use serde::Serialize;
use thiserror::Error;
use vumpit_core::errors::AppError;
use vumpit_core::models::{BmiRating, JumpMeasurement, MeasurementSnapshot, UserRole};
use vumpit_providers::SensorChannel;

/// Something the UI should show
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WizardEvent {
    /// A new step started
    StepEntered {
        /// Step
        state: WizardState,
    },
    /// Enough valid samples were averaged
    ReadingReady {
        /// Channel read
        channel: SensorChannel,
        /// Averaged value
        value: f64,
    },
    /// BMI computed from weight and height
    BmiComputed {
        /// Body mass index
        bmi: f64,
        /// Category
        rating: BmiRating,
    },
    /// The UI should play the jump video
    VideoRequested,
    /// Seconds left before the jump window opens
    CountdownTick {
        /// Seconds remaining; 0 means jump now
        remaining: u32,
    },
    /// Jump window closed with a peak
    JumpComputed {
        /// Result of this trial
        jump: JumpMeasurement,
        /// Trial number within the run, from 1
        trial: u32,
    },
    /// Jump window closed without a single valid sample
    JumpNotDetected,
    /// The sensor stopped answering; the run is blocked
    DeviceDisconnected {
        /// Step that was interrupted
        state: WizardState,
    },
    /// The sensor answers again
    DeviceReconnected,
    /// Cancellation needs confirming
    CancelRequested,
    /// Cancellation was dismissed
    CancelDismissed,
    /// Run abandoned; nothing was saved
    Cancelled,
    /// Snapshot saved to the profile
    Committed {
        /// What was saved
        snapshot: MeasurementSnapshot,
    },
}

/// Why an action was rejected
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WizardError {
    /// No one is signed in
    #[error("sign in before starting a measurement")]
    NotAuthenticated,

    /// The signed-in role has no measurements
    #[error("{role} accounts cannot be measured")]
    NotAnAthlete {
        /// Role of the signed-in user
        role: UserRole,
    },

    /// A run is already in progress
    #[error("a measurement is already in progress ({state})")]
    SessionActive {
        /// Where that run is
        state: WizardState,
    },

    /// The action does not apply to the current step
    #[error("{action} is not available during {state}")]
    ActionNotAllowed {
        /// Rejected action
        action: &'static str,
        /// Current step
        state: WizardState,
    },

    /// The step has not collected its reading yet
    #[error("{state} has not finished sampling")]
    StepNotReady {
        /// Current step
        state: WizardState,
    },

    /// The device is disconnected; resume or cancel first
    #[error("sensor disconnected during {state}; reconnect and resume, or cancel")]
    DeviceDisconnected {
        /// Interrupted step
        state: WizardState,
    },

    /// The athlete's profile is gone; the run was aborted
    #[error("athlete profile '{athlete_id}' not found")]
    ProfileNotFound {
        /// Missing id
        athlete_id: String,
    },

    /// The store failed; the run is left where it was
    #[error("could not save measurement: {0}")]
    Storage(#[from] AppError),
}

/// Result of one wizard call
pub type WizardResult = Result<Vec<WizardEvent>, WizardError>;
